/// Disk map widget: the animated cluster grid.
///
/// The state keeps one pixel per cell in a `ColorImage`; this widget
/// uploads it to a nearest-filtered texture (only when it changed) and
/// paints it scaled up by the configured cell size, centred in the
/// available area.
use crate::state::SaverState;
use crate::theme;
use egui::{pos2, Rect, TextureHandle, TextureOptions, Ui, Vec2};

/// Cells at least this many points wide get a one-point gap between them.
const MIN_CELL_FOR_GRID: u32 = 5;

/// Draw the disk map, refitting the grid to the available space first.
pub fn disk_map(ui: &mut Ui, state: &mut SaverState, texture: &mut Option<TextureHandle>) {
    let area = ui.available_rect_before_wrap();
    ui.painter().rect_filled(area, 0.0, theme::BACKGROUND);

    if state.fit_to(area.size()) {
        // Fresh grid: any previous texture has the wrong size.
        *texture = None;
    }

    let upload = state.take_dirty();
    if let Some(handle) = texture.as_mut() {
        if upload {
            handle.set(state.image().clone(), TextureOptions::NEAREST);
        }
    } else {
        *texture = Some(ui.ctx().load_texture(
            "disk-map",
            state.image().clone(),
            TextureOptions::NEAREST,
        ));
    }
    let Some(texture) = texture.as_ref() else {
        return;
    };

    let [cols, rows] = state.image().size;
    let cell = state.settings.cell_size as f32;
    let map_size = Vec2::new(cols as f32 * cell, rows as f32 * cell);
    let map_rect = Rect::from_center_size(area.center(), map_size);

    ui.painter().image(
        texture.id(),
        map_rect,
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    if state.settings.cell_size >= MIN_CELL_FOR_GRID {
        paint_cell_gaps(ui, map_rect, cols, rows, cell);
    }

    ui.allocate_rect(area, egui::Sense::hover());
}

/// Thin background-coloured lines between cells, like the classic
/// defragmenter's block grid.
fn paint_cell_gaps(ui: &Ui, map_rect: Rect, cols: usize, rows: usize, cell: f32) {
    let stroke = egui::Stroke::new(1.0, theme::BACKGROUND);
    let painter = ui.painter();
    for col in 1..cols {
        let x = map_rect.left() + col as f32 * cell;
        painter.vline(x, map_rect.y_range(), stroke);
    }
    for row in 1..rows {
        let y = map_rect.top() + row as f32 * cell;
        painter.hline(map_rect.x_range(), y, stroke);
    }
}
