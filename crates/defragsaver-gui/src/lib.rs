/// DefragSaver GUI: egui-based screensaver frontend.
///
/// This crate contains all UI code. The simulation lives in
/// `defragsaver-core`.
pub mod app;
pub mod icon;
pub mod panels;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{DefragSaverApp, DefragSaverState};
