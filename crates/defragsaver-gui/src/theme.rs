/// Colour lookup for the disk map and the status overlay.
///
/// The engine only knows cell states; this table is the single place they
/// become colours. Keep it in step with the legend text in
/// `defragsaver_core::engine::LEGEND`.
use defragsaver_core::model::Cell;
use egui::Color32;

/// Window background behind the map (visible around the edges when the
/// surface is not an exact multiple of the cell size).
pub const BACKGROUND: Color32 = Color32::from_rgb(0x00, 0x00, 0x00);

/// Status bar fill.
pub const STATUS_BG: Color32 = Color32::from_rgb(0x10, 0x10, 0x1c);

/// Status bar text, first line.
pub const STATUS_TEXT: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe8);

/// Status bar text, legend line.
pub const STATUS_MUTED: Color32 = Color32::from_rgb(0x9a, 0x9a, 0xae);

/// Map a cell state to its display colour.
pub const fn cell_color(cell: Cell) -> Color32 {
    match cell {
        Cell::Empty => Color32::from_rgb(0x18, 0x18, 0x24),
        Cell::Regular => Color32::from_rgb(0x2f, 0x6f, 0xd8),
        Cell::SpaceHog => Color32::from_rgb(0x1f, 0x9f, 0x9f),
        Cell::Fragmented => Color32::from_rgb(0xe0, 0x40, 0x40),
        Cell::Unmovable => Color32::from_rgb(0x8a, 0x8a, 0x96),
        Cell::Busy => Color32::from_rgb(0xff, 0xff, 0xff),
        Cell::MftReserved => Color32::from_rgb(0x9b, 0x5c, 0xd6),
        Cell::Unknown => Color32::from_rgb(0xb0, 0x90, 0x20),
    }
}
