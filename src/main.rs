//! DefragSaver: a retro disk defragmenter screensaver.
//!
//! Thin binary entry point. All logic lives in the `defragsaver-core`
//! and `defragsaver-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use defragsaver_core::launch::LaunchMode;
use defragsaver_core::settings::{default_settings_path, Settings};
use rand::Rng;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mode = LaunchMode::parse(std::env::args().skip(1))
        .context("unrecognised screensaver command line")?;
    tracing::info!("DefragSaver starting in {:?} mode", mode);

    if let LaunchMode::Preview { parent } = mode {
        // Drawing into the control panel's preview window needs the parent
        // HWND as a render target, which eframe cannot adopt.
        tracing::warn!("Preview in window {parent:#x} is not supported -- exiting");
        return Ok(());
    }

    let settings_path = default_settings_path();
    let settings = Settings::load_or_default(&settings_path);
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());

    let icon = defragsaver_gui::icon::generate_icon(64);
    let viewport = match mode {
        LaunchMode::Screensaver => eframe::egui::ViewportBuilder::default()
            .with_title("DefragSaver")
            .with_fullscreen(true)
            .with_decorations(false)
            .with_always_on_top(),
        LaunchMode::Configure => eframe::egui::ViewportBuilder::default()
            .with_title("DefragSaver Settings")
            .with_inner_size([460.0, 420.0])
            .with_resizable(false),
        _ => eframe::egui::ViewportBuilder::default()
            .with_title("DefragSaver")
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([320.0, 200.0]),
    }
    .with_icon(icon);

    // Build state *before* opening the window so the first rendered frame
    // already has something to show.
    let state = defragsaver_gui::DefragSaverState::build(mode, settings, settings_path, seed);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "DefragSaver",
        options,
        Box::new(|cc| {
            Ok(Box::new(defragsaver_gui::DefragSaverApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
