/// Persisted user settings: animation speed, cell size, seed, dismissal.
///
/// Stored as pretty-printed JSON. Unknown keys are ignored and missing keys
/// take their defaults, so files written by older versions keep loading.
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name inside the per-user config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Ticks advanced per rendered frame.
pub const TICKS_PER_FRAME_RANGE: (u32, u32) = (1, 500);
/// Milliseconds between frames.
pub const FRAME_INTERVAL_RANGE: (u64, u64) = (10, 1_000);
/// Pixel edge of one cell.
pub const CELL_SIZE_RANGE: (u32, u32) = (2, 32);
/// Pointer travel (px) that dismisses the screensaver.
pub const MOUSE_THRESHOLD_RANGE: (f32, f32) = (1.0, 200.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ticks_per_frame: u32,
    pub frame_interval_ms: u64,
    pub cell_size: u32,
    pub show_status: bool,
    /// Fixed seed for a reproducible map; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub exit_on_mouse_move: bool,
    pub mouse_move_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ticks_per_frame: 6,
            frame_interval_ms: 33,
            cell_size: 6,
            show_status: true,
            seed: None,
            exit_on_mouse_move: true,
            mouse_move_threshold: 8.0,
        }
    }
}

impl Settings {
    /// Read settings from `path`. Values are sanitised after parsing.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.sanitised())
    }

    /// Read settings, falling back to defaults on any error.
    ///
    /// A missing file is the normal first-run case and is not logged as a
    /// warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                warn!("{e} -- using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to `path`, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: std::io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Clamp every numeric field into its supported range.
    pub fn sanitised(mut self) -> Self {
        self.ticks_per_frame = self
            .ticks_per_frame
            .clamp(TICKS_PER_FRAME_RANGE.0, TICKS_PER_FRAME_RANGE.1);
        self.frame_interval_ms = self
            .frame_interval_ms
            .clamp(FRAME_INTERVAL_RANGE.0, FRAME_INTERVAL_RANGE.1);
        self.cell_size = self.cell_size.clamp(CELL_SIZE_RANGE.0, CELL_SIZE_RANGE.1);
        self.mouse_move_threshold = if self.mouse_move_threshold.is_finite() {
            self.mouse_move_threshold
                .clamp(MOUSE_THRESHOLD_RANGE.0, MOUSE_THRESHOLD_RANGE.1)
        } else {
            Settings::default().mouse_move_threshold
        };
        self
    }
}

/// Per-user settings location.
///
/// `%APPDATA%\DefragSaver` on Windows, otherwise the XDG config directory,
/// otherwise `~/.config/defragsaver`, otherwise the working directory.
pub fn default_settings_path() -> PathBuf {
    let env_dir = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(appdata) = env_dir("APPDATA") {
        return appdata.join("DefragSaver").join(SETTINGS_FILE);
    }
    if let Some(xdg) = env_dir("XDG_CONFIG_HOME") {
        return xdg.join("defragsaver").join(SETTINGS_FILE);
    }
    if let Some(home) = env_dir("HOME") {
        return home.join(".config").join("defragsaver").join(SETTINGS_FILE);
    }
    PathBuf::from(SETTINGS_FILE)
}
