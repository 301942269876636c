//! Preview settings, loaded from `waypost.toml` if present.
//!
//! Missing or invalid entries fall back to defaults so the preview can
//! always start.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};
use waypost_core::TrackerConfig;
use waypost_protocol::ThemeMode;

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Overrides the manifest's tracker tuning when set.
    #[serde(default)]
    pub tracker: Option<TrackerConfig>,
    /// Simulated browser width in px; picks the layout mode.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    /// Page pixels represented by one terminal row.
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f64,
    /// Height of a section when `section_heights` has no entry for it.
    #[serde(default = "default_section_height")]
    pub default_section_height: f64,
    #[serde(default)]
    pub section_heights: HashMap<String, f64>,
    #[serde(default = "default_footer_height")]
    pub footer_height: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            log_level: default_log_level(),
            tracker: None,
            viewport_width: default_viewport_width(),
            px_per_row: default_px_per_row(),
            default_section_height: default_section_height(),
            section_heights: HashMap::new(),
            footer_height: default_footer_height(),
        }
    }
}

impl PreviewConfig {
    pub fn section_height(&self, id: &str) -> f64 {
        self.section_heights
            .get(id)
            .copied()
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or(self.default_section_height)
    }
}

pub fn load_config(path: &Path) -> PreviewConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "loaded preview config");
            data
        }
        Err(err) => {
            warn!(path = %path.display(), "falling back to default config: {err}");
            return PreviewConfig::default();
        }
    };

    match toml::from_str::<PreviewConfig>(&contents) {
        Ok(cfg) => {
            debug!(?cfg, "parsed preview config");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "invalid config TOML: {err}");
            PreviewConfig::default()
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_viewport_width() -> f64 {
    1440.0
}

fn default_px_per_row() -> f64 {
    20.0
}

fn default_section_height() -> f64 {
    900.0
}

fn default_footer_height() -> f64 {
    100.0
}
