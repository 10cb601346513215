/// Main `eframe::App` implementation for DefragSaver.
///
/// One app type serves every launch mode: the animated disk map for
/// `/s` and `/w`, the settings dialog for `/c`.
use crate::panels;
use crate::state::{ConfigState, InputSummary, SaverState};
use crate::theme;
use crate::widgets;
use defragsaver_core::launch::LaunchMode;
use defragsaver_core::settings::Settings;
use std::path::PathBuf;
use std::time::Instant;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so the first
/// frame has a map to draw and the window never sits on an empty
/// background while setup runs.
pub struct DefragSaverState {
    pub(crate) screen: Screen,
}

pub(crate) enum Screen {
    Saver(SaverState),
    Configure(ConfigState),
}

impl DefragSaverState {
    /// Prepare state for `mode`.
    ///
    /// `seed` drives the disk map; `settings_path` is where the dialog
    /// saves. Preview mode has no surface of its own and is treated as the
    /// windowed saver.
    pub fn build(mode: LaunchMode, settings: Settings, settings_path: PathBuf, seed: u64) -> Self {
        let screen = match mode {
            LaunchMode::Configure => Screen::Configure(ConfigState::new(settings, settings_path)),
            LaunchMode::Screensaver | LaunchMode::Windowed | LaunchMode::Preview { .. } => {
                Screen::Saver(SaverState::new(mode, settings, seed))
            }
        };
        Self { screen }
    }
}

/// The DefragSaver application.
pub struct DefragSaverApp {
    screen: Screen,
    /// GPU copy of the disk map; recreated after every regeneration.
    texture: Option<egui::TextureHandle>,
}

impl DefragSaverApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: DefragSaverState) -> Self {
        // ── Font: Consolas ────────────────────────────────────────────────
        // The status lines look right in a fixed-pitch console font; use
        // Consolas when Windows has it, otherwise egui's built-in monospace.
        let system_root =
            std::env::var("SystemRoot").unwrap_or_else(|_| "C:\\Windows".to_string());
        let font_path = format!("{}\\Fonts\\consola.ttf", system_root);

        let mut fonts = egui::FontDefinitions::default();
        match std::fs::read(&font_path) {
            Ok(bytes) => {
                fonts.font_data.insert(
                    "Consolas".to_owned(),
                    egui::FontData::from_owned(bytes).into(),
                );
                fonts
                    .families
                    .entry(egui::FontFamily::Monospace)
                    .or_default()
                    .insert(0, "Consolas".to_owned());
                tracing::info!("Loaded Consolas from {}", font_path);
            }
            Err(e) => {
                tracing::debug!(
                    "Could not load Consolas from {}: {} -- using default monospace",
                    font_path,
                    e
                );
            }
        }
        cc.egui_ctx.set_fonts(fonts);
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            screen: state.screen,
            texture: None,
        }
    }
}

impl eframe::App for DefragSaverApp {
    /// Clear to the map background so resizes never flash another colour.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::from(theme::BACKGROUND).to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match &mut self.screen {
            Screen::Saver(saver) => saver_frame(ctx, saver, &mut self.texture),
            Screen::Configure(config) => configure_frame(ctx, config),
        }
    }
}

/// One frame of the running screensaver.
fn saver_frame(ctx: &egui::Context, saver: &mut SaverState, texture: &mut Option<egui::TextureHandle>) {
    // ── Dismissal ─────────────────────────────────────────────────────
    let input = ctx.input(|i| InputSummary {
        pressed: i.events.iter().any(|e| {
            matches!(
                e,
                egui::Event::Key { pressed: true, .. }
                    | egui::Event::PointerButton { pressed: true, .. }
            )
        }),
        pointer_travel: i.pointer.delta().length(),
    });
    if saver.register_input(input) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        return;
    }
    if saver.mode.exits_on_input() {
        ctx.set_cursor_icon(egui::CursorIcon::None);
    }

    // ── Simulation ────────────────────────────────────────────────────
    saver.advance_if_due(Instant::now());
    ctx.request_repaint_after(saver.frame_interval());

    // ── Status bar ────────────────────────────────────────────────────
    if saver.settings.show_status {
        let lines = saver.status_lines();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::NONE
                    .fill(theme::STATUS_BG)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show_separator_line(false)
            .show(ctx, |ui| {
                widgets::status_bar::status_bar(ui, &lines);
            });
    }

    // ── Disk map ──────────────────────────────────────────────────────
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(theme::BACKGROUND))
        .show(ctx, |ui| {
            widgets::disk_map::disk_map(ui, saver, texture);
        });
}

/// One frame of the settings dialog.
fn configure_frame(ctx: &egui::Context, config: &mut ConfigState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(action) = panels::settings_panel::settings_panel(ui, config) {
                config.handle(action);
            }
        });
    });

    if config.closing {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}
