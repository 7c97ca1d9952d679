use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Frame rates offered by the front-end. The engine accepts any positive value.
pub const FRAME_RATE_CHOICES: [u32; 3] = [20, 10, 8];
/// Target width tokens offered by the front-end; no scaling is the absence of a token.
pub const SCALE_CHOICES: [&str; 2] = ["600", "480"];
/// Duration limits in seconds offered by the front-end.
pub const DURATION_CHOICES: [&str; 2] = ["10", "5"];

/// Per-conversion option record. The front-end mutates it between conversions
/// through the setters; the engine reads a snapshot at the start of each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    /// Frames per second sampled from the source video. Always positive.
    pub frame_rate: u32,
    /// Target width in pixels, encoded as a string token. Height follows the
    /// aspect ratio. `None` keeps the source dimensions.
    pub scale: Option<String>,
    /// Maximum seconds to encode from the start of the source. `None` encodes
    /// the full source.
    pub duration_limit: Option<String>,
    /// Replace an existing GIF silently instead of asking first.
    pub overwrite_existing: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            frame_rate: 20,
            scale: Some("600".to_string()),
            duration_limit: None,
            overwrite_existing: true,
        }
    }
}

impl ConversionOptions {
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps;
    }

    pub fn set_scale(&mut self, scale: Option<String>) {
        self.scale = scale;
    }

    pub fn set_duration_limit(&mut self, limit: Option<String>) {
        self.duration_limit = limit;
    }

    pub fn set_overwrite_existing(&mut self, overwrite: bool) {
        self.overwrite_existing = overwrite;
    }

    /// Read persisted options. A missing or unreadable settings file falls
    /// back to the defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist the options as the defaults for future runs.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, text).map_err(|e| format!("Failed to write settings: {}", e))
    }
}

/// Platform settings location, e.g. `~/.config/gifdrop/settings.json`.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gifdrop").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_front_end_presets() {
        let opts = ConversionOptions::default();
        assert_eq!(opts.frame_rate, 20);
        assert_eq!(opts.scale.as_deref(), Some("600"));
        assert_eq!(opts.duration_limit, None);
        assert!(opts.overwrite_existing);
    }

    #[test]
    fn setters_replace_single_fields() {
        let mut opts = ConversionOptions::default();

        opts.set_frame_rate(8);
        assert_eq!(opts.frame_rate, 8);

        opts.set_scale(None);
        assert_eq!(opts.scale, None);
        opts.set_scale(Some("480".to_string()));
        assert_eq!(opts.scale.as_deref(), Some("480"));

        opts.set_duration_limit(Some("5".to_string()));
        assert_eq!(opts.duration_limit.as_deref(), Some("5"));

        opts.set_overwrite_existing(false);
        assert!(!opts.overwrite_existing);
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ConversionOptions::load(&dir.path().join("settings.json"));
        assert_eq!(opts.frame_rate, 20);
        assert!(opts.overwrite_existing);
    }

    #[test]
    fn load_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let opts = ConversionOptions::load(&path);
        assert_eq!(opts.scale.as_deref(), Some("600"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut opts = ConversionOptions::default();
        opts.set_frame_rate(10);
        opts.set_scale(None);
        opts.set_duration_limit(Some("10".to_string()));
        opts.set_overwrite_existing(false);
        opts.save(&path).unwrap();

        let loaded = ConversionOptions::load(&path);
        assert_eq!(loaded.frame_rate, 10);
        assert_eq!(loaded.scale, None);
        assert_eq!(loaded.duration_limit.as_deref(), Some("10"));
        assert!(!loaded.overwrite_existing);
    }

    #[test]
    fn partial_settings_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "frameRate": 8 }"#).unwrap();

        let opts = ConversionOptions::load(&path);
        assert_eq!(opts.frame_rate, 8);
        assert_eq!(opts.scale.as_deref(), Some("600"));
        assert!(opts.overwrite_existing);
    }
}
