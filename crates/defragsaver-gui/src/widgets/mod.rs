/// UI widgets for DefragSaver.

pub mod disk_map;
pub mod legend;
pub mod status_bar;
