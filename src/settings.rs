use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SETTINGS_FILE: &str = "gesture_settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GestureSettings {
    /// Minimum pointer travel, in pixels, before a direction is recorded.
    #[serde(default = "default_tolerance")]
    pub tolerance_px: f32,
    /// Maximum number of direction and wheel signs in one gesture.
    #[serde(default = "default_max_chain_length")]
    pub max_chain_length: usize,
    /// Width of the band along the content edges where gestures are ignored.
    /// Covers the scrollbars.
    #[serde(default = "default_area_margin")]
    pub area_margin_px: f32,
    /// Delay before an error status is shown again after the session clears.
    #[serde(default)]
    pub status_redisplay_delay_ms: u64,
    /// When enabled the logger runs at debug level and sign/match traces are
    /// emitted. Defaults to `false` when the field is missing.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional rule table. The built-in table is used when `None`.
    #[serde(default)]
    pub gestures_file: Option<String>,
    /// Writes the log to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tolerance_px: default_tolerance(),
            max_chain_length: default_max_chain_length(),
            area_margin_px: default_area_margin(),
            status_redisplay_delay_ms: 0,
            debug_logging: false,
            gestures_file: None,
            log_file: None,
        }
    }
}

fn default_tolerance() -> f32 {
    10.0
}

fn default_max_chain_length() -> usize {
    10
}

fn default_area_margin() -> f32 {
    16.0
}

impl GestureSettings {
    /// Loads settings from `path`. A missing or blank file yields defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.tolerance_px.is_finite() && self.tolerance_px > 0.0) {
            anyhow::bail!("tolerancePx must be a positive number");
        }
        if self.max_chain_length == 0 {
            anyhow::bail!("maxChainLength must be at least 1");
        }
        if !(self.area_margin_px.is_finite() && self.area_margin_px >= 0.0) {
            anyhow::bail!("areaMarginPx must not be negative");
        }
        Ok(())
    }
}
