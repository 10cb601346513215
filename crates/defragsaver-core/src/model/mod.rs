/// Data model for the simulated disk surface.
///
/// Re-exports the cell state enum, the diff unit, and supporting types.
pub mod cell;
pub mod change;
pub mod size;

pub use cell::Cell;
pub use change::{LastMove, SegmentChange};
