/// Settings dialog: shown for `/c` (and when the screensaver file is
/// opened directly).
use crate::state::{ConfigAction, ConfigState};
use crate::widgets;
use defragsaver_core::settings::{
    CELL_SIZE_RANGE, FRAME_INTERVAL_RANGE, MOUSE_THRESHOLD_RANGE, TICKS_PER_FRAME_RANGE,
};
use egui::{RichText, Ui};

/// Draw the settings form. Returns the button the user pressed, if any.
pub fn settings_panel(ui: &mut Ui, state: &mut ConfigState) -> Option<ConfigAction> {
    let mut action = None;
    let draft = &mut state.draft;

    ui.heading("DefragSaver Settings");
    ui.add_space(8.0);

    egui::Grid::new("settings_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Animation speed");
            ui.add(
                egui::Slider::new(
                    &mut draft.ticks_per_frame,
                    TICKS_PER_FRAME_RANGE.0..=TICKS_PER_FRAME_RANGE.1,
                )
                .logarithmic(true)
                .suffix(" ticks/frame"),
            );
            ui.end_row();

            ui.label("Frame interval");
            ui.add(
                egui::Slider::new(
                    &mut draft.frame_interval_ms,
                    FRAME_INTERVAL_RANGE.0..=FRAME_INTERVAL_RANGE.1,
                )
                .logarithmic(true)
                .suffix(" ms"),
            );
            ui.end_row();

            ui.label("Cluster size");
            ui.add(
                egui::Slider::new(&mut draft.cell_size, CELL_SIZE_RANGE.0..=CELL_SIZE_RANGE.1)
                    .suffix(" px"),
            );
            ui.end_row();

            ui.label("Status bar");
            ui.checkbox(&mut draft.show_status, "Show progress and legend");
            ui.end_row();

            ui.label("Dismiss");
            ui.checkbox(&mut draft.exit_on_mouse_move, "Close when the mouse moves");
            ui.end_row();

            ui.label("Mouse threshold");
            ui.add_enabled(
                draft.exit_on_mouse_move,
                egui::Slider::new(
                    &mut draft.mouse_move_threshold,
                    MOUSE_THRESHOLD_RANGE.0..=MOUSE_THRESHOLD_RANGE.1,
                )
                .suffix(" px"),
            );
            ui.end_row();

            ui.label("Fixed seed");
            let mut fixed = draft.seed.is_some();
            ui.horizontal(|ui| {
                if ui.checkbox(&mut fixed, "").changed() {
                    draft.seed = fixed.then_some(0);
                }
                if let Some(seed) = draft.seed.as_mut() {
                    ui.add(egui::DragValue::new(seed).hexadecimal(8, false, true));
                } else {
                    ui.label(RichText::new("random each run").weak());
                }
            });
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.separator();
    ui.label(RichText::new("Colour key").strong());
    widgets::legend::legend(ui);
    ui.separator();
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            action = Some(ConfigAction::Save);
        }
        if ui.button("Cancel").clicked() {
            action = Some(ConfigAction::Cancel);
        }
        if ui.button("Defaults").clicked() {
            action = Some(ConfigAction::RestoreDefaults);
        }
    });

    match &state.message {
        Some(Ok(text)) => {
            ui.label(RichText::new(text).weak());
        }
        Some(Err(text)) => {
            ui.colored_label(ui.visuals().error_fg_color, text);
        }
        None => {}
    }

    action
}
