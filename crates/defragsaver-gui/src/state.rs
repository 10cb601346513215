/// Application state management.
///
/// Centralises everything the UI reads and writes, with no dependency on a
/// live egui context so it can be driven directly from tests:
///
/// - [`SaverState`]: the running screensaver: engine, mirrored pixel
///   buffer, frame pacing, and input-based dismissal.
/// - [`ConfigState`]: the `/c` settings dialog: an editable draft and the
///   file it saves to.
use anyhow::Context;
use defragsaver_core::launch::LaunchMode;
use defragsaver_core::settings::Settings;
use defragsaver_core::DefragEngine;
use egui::{ColorImage, Vec2};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::theme;

/// What the user did since the previous frame, reduced to what dismissal
/// needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSummary {
    /// Any key press or mouse button press.
    pub pressed: bool,
    /// Pointer travel in points this frame.
    pub pointer_travel: f32,
}

/// The running screensaver.
pub struct SaverState {
    pub mode: LaunchMode,
    pub settings: Settings,
    engine: DefragEngine,
    /// One pixel per cell; the widget scales it up by `cell_size`.
    image: ColorImage,
    /// `true` when `image` changed since the last upload.
    dirty: bool,
    /// `false` until the first `fit_to`, so the first fit always resets.
    fitted: bool,
    last_advance: Option<Instant>,
    pointer_travel: f32,
    exit_requested: bool,
}

impl SaverState {
    /// Create a saver whose engine is seeded with `seed`.
    pub fn new(mode: LaunchMode, settings: Settings, seed: u64) -> Self {
        info!("Starting disk map with seed {seed:#x}");
        Self {
            mode,
            settings: settings.sanitised(),
            engine: DefragEngine::new(seed),
            image: ColorImage::new([1, 1], theme::BACKGROUND),
            dirty: true,
            fitted: false,
            last_advance: None,
            pointer_travel: 0.0,
            exit_requested: false,
        }
    }

    /// Resize the grid to fill `available` points.
    ///
    /// Regenerates the map only when the cell dimensions actually change.
    /// Returns `true` if the map was regenerated.
    pub fn fit_to(&mut self, available: Vec2) -> bool {
        let (cols, rows) = self.grid_size_for(available);
        if self.fitted && cols == self.engine.width() && rows == self.engine.height() {
            return false;
        }

        debug!("Regenerating disk map at {cols}x{rows} cells");
        self.engine.reset(cols, rows);
        self.fitted = true;
        self.repaint_all();
        true
    }

    /// Cell dimensions that fit in `available` points (at least 1×1).
    pub fn grid_size_for(&self, available: Vec2) -> (usize, usize) {
        let cell = self.settings.cell_size.max(1) as f32;
        let cols = (available.x / cell).floor().max(1.0) as usize;
        let rows = (available.y / cell).floor().max(1.0) as usize;
        (cols, rows)
    }

    /// Step the engine by one frame's worth of ticks and mirror the changes.
    ///
    /// Returns the number of changes applied.
    pub fn advance(&mut self) -> usize {
        let changes = self.engine.step(self.settings.ticks_per_frame);
        let pixels = &mut self.image.pixels;
        for change in &changes {
            let end = change.end().min(pixels.len());
            if change.start < end {
                pixels[change.start..end].fill(theme::cell_color(change.cell));
            }
        }
        if !changes.is_empty() {
            self.dirty = true;
        }
        changes.len()
    }

    /// Advance only if a full frame interval has passed since the last step.
    ///
    /// Keeps the animation speed independent of how often egui repaints
    /// (input events trigger extra frames).
    pub fn advance_if_due(&mut self, now: Instant) -> Option<usize> {
        let due = self
            .last_advance
            .map_or(true, |last| now.saturating_duration_since(last) >= self.frame_interval());
        if !due {
            return None;
        }
        self.last_advance = Some(now);
        Some(self.advance())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.settings.frame_interval_ms)
    }

    /// Record this frame's input; returns `true` once the saver should close.
    pub fn register_input(&mut self, input: InputSummary) -> bool {
        if !self.mode.exits_on_input() || self.exit_requested {
            return self.exit_requested;
        }
        if input.pressed {
            info!("Input received -- closing");
            self.exit_requested = true;
        } else if self.settings.exit_on_mouse_move && input.pointer_travel > 0.0 {
            self.pointer_travel += input.pointer_travel;
            if self.pointer_travel > self.settings.mouse_move_threshold {
                info!("Mouse moved {:.0} px -- closing", self.pointer_travel);
                self.exit_requested = true;
            }
        }
        self.exit_requested
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn engine(&self) -> &DefragEngine {
        &self.engine
    }

    /// The mirrored grid, one pixel per cell.
    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    /// Returns `true` (and clears the flag) if the image needs uploading.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn status_lines(&self) -> [String; 2] {
        self.engine.status_lines()
    }

    /// Rebuild the whole pixel buffer from the engine (after a reset).
    fn repaint_all(&mut self) {
        let mut image = ColorImage::new(
            [self.engine.width(), self.engine.height()],
            theme::BACKGROUND,
        );
        for (pixel, &cell) in image.pixels.iter_mut().zip(self.engine.cells()) {
            *pixel = theme::cell_color(cell);
        }
        self.image = image;
        self.dirty = true;
    }
}

/// Outcome of the settings dialog for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Save,
    Cancel,
    RestoreDefaults,
}

/// The `/c` configuration dialog.
pub struct ConfigState {
    /// Editable copy; written to disk only on save.
    pub draft: Settings,
    pub path: PathBuf,
    /// Result of the last save attempt, shown under the buttons.
    pub message: Option<Result<String, String>>,
    /// Set once the dialog should close.
    pub closing: bool,
}

impl ConfigState {
    pub fn new(settings: Settings, path: PathBuf) -> Self {
        Self {
            draft: settings,
            path,
            message: None,
            closing: false,
        }
    }

    /// Apply a button press from the dialog.
    pub fn handle(&mut self, action: ConfigAction) {
        match action {
            ConfigAction::Save => match self.save() {
                Ok(()) => {
                    self.message = Some(Ok(format!("Saved to {}", self.path.display())));
                    self.closing = true;
                }
                Err(e) => {
                    tracing::error!("{e:#}");
                    self.message = Some(Err(format!("{e:#}")));
                }
            },
            ConfigAction::Cancel => self.closing = true,
            ConfigAction::RestoreDefaults => {
                self.draft = Settings::default();
                self.message = None;
            }
        }
    }

    /// Sanitise the draft and write it to `path`.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.draft = self.draft.clone().sanitised();
        self.draft
            .save(&self.path)
            .context("could not save screensaver settings")
    }
}
