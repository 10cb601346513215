/// Colour key: one swatch per cell state.
use crate::theme;
use defragsaver_core::model::Cell;
use egui::{Sense, Ui, Vec2};

const SWATCH: f32 = 12.0;

/// Draw a wrapped row of swatches labelled with each state's name.
pub fn legend(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for cell in Cell::ALL {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(SWATCH), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, theme::cell_color(cell));
            ui.label(cell.label());
            ui.add_space(6.0);
        }
    });
}
