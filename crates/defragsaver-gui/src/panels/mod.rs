/// UI panels for DefragSaver.
pub mod settings_panel;
