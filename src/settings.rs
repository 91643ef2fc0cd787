//! User settings stored as settings.json in the app data directory

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Grid
    pub cell_width: f32,
    pub row_height: f32,

    // Behaviour
    pub confirm_delete: bool,
    pub highlight_today: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            cell_width: 64.0,
            row_height: 44.0,
            confirm_delete: true,
            highlight_today: true,
        }
    }
}

pub const CELL_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 40.0..=140.0;
pub const ROW_HEIGHT_RANGE: std::ops::RangeInclusive<f32> = 32.0..=80.0;

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<Settings>(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings.clamped()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Hand-edited files can carry sizes the grid can't lay out
    fn clamped(mut self) -> Self {
        self.cell_width = self
            .cell_width
            .clamp(*CELL_WIDTH_RANGE.start(), *CELL_WIDTH_RANGE.end());
        self.row_height = self
            .row_height
            .clamp(*ROW_HEIGHT_RANGE.start(), *ROW_HEIGHT_RANGE.end());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "[1, 2").unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "confirm_delete": false, "cell_width": 500.0 }"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert!(!settings.confirm_delete);
        assert!(settings.highlight_today);
        assert_eq!(settings.cell_width, 140.0);
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            window_w: Some(1200.0),
            window_h: Some(700.0),
            highlight_today: false,
            ..Settings::default()
        };
        settings.save(dir.path());
        assert_eq!(Settings::load(dir.path()), settings);
    }
}
