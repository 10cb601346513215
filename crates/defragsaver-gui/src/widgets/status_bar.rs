/// Bottom status bar: fake progress, last move, fragmentation count.
///
/// The two lines come straight from the engine; this widget only decides
/// how they look.
use crate::theme;
use egui::{FontId, RichText, Ui};

const LINE_SIZE: f32 = 13.0;

/// Draw the engine's two status lines.
pub fn status_bar(ui: &mut Ui, lines: &[String; 2]) {
    let font = FontId::monospace(LINE_SIZE);
    ui.vertical(|ui| {
        ui.label(
            RichText::new(&lines[0])
                .font(font.clone())
                .color(theme::STATUS_TEXT),
        );
        ui.label(
            RichText::new(&lines[1])
                .font(font)
                .color(theme::STATUS_MUTED),
        );
    });
}
