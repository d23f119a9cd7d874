use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/flashdeck/config.toml` or
/// `~/.config/flashdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `FLASHDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub paths: PathsSettings,
    pub player: PlayerSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsSettings {
    /// Directory holding the flashing payloads (scripts, tools) that the
    /// menu actions are resolved against.
    pub base_dir: PathBuf,
    /// Music folder for the embedded player. Defaults to `<base_dir>/Music`.
    pub music_dir: Option<PathBuf>,
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("flashpack"),
            music_dir: None,
        }
    }
}

impl PathsSettings {
    /// The effective music directory.
    pub fn music_dir(&self) -> PathBuf {
        self.music_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("Music"))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Startup volume in `[0.0, 1.0]`.
    pub volume: f32,
    /// Assumed track length (seconds) when a file cannot be probed.
    pub fallback_duration_secs: u64,
    /// Volume change per `+` / `-` key press.
    pub volume_step: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            fallback_duration_secs: 180,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " flashdeck for Xiaomi 13T — flashing launcher & music ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive, e.g. `info` or `flashdeck=debug`.
    pub filter: String,
    /// Log file path. Defaults to `<base_dir>/flashdeck.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LogSettings {
    /// The effective log file path.
    pub fn file(&self, base_dir: &std::path::Path) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| base_dir.join("flashdeck.log"))
    }
}
