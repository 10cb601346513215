/// DefragSaver Core: disk map simulation, settings, and launch modes.
///
/// This crate contains all business logic with zero UI dependencies.
/// The host owns windows, colours and pixels; the engine only ever speaks
/// in cell indices and [`model::SegmentChange`]s.
///
/// # Modules
///
/// - [`model`]: Cell states, diff units, and display formatting helpers.
/// - [`engine`]: The simulation: initial layout and tick-by-tick animation.
/// - [`settings`]: Persisted user settings (JSON).
/// - [`launch`]: Screensaver command-line mode parsing.
/// - [`error`]: Error types for settings and launch parsing.
pub mod engine;
pub mod error;
pub mod launch;
pub mod model;
pub mod settings;

pub use engine::DefragEngine;
pub use model::{Cell, SegmentChange};
