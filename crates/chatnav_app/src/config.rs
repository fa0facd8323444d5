use std::fs;
use std::path::Path;

use chatnav_core::{
    Tuning, DEBOUNCE_MS, HIGHLIGHT_MS, INITIAL_SCAN_MS, NEAR_BOTTOM_PX, PREVIEW_CHARS,
    SCROLL_SETTLE_MS,
};
use chatnav_engine::{ClassifierConfig, SelectorConfig};
use overlay_logging::{nav_info, nav_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "chatnav.ron";

/// Everything host-page-specific lives here: the selector list, the
/// classifier rule table, and timing knobs. Adapting to a restructured
/// host page should be a config edit, not a code change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OverlayConfig {
    pub selectors: SelectorConfig,
    pub classifier: ClassifierConfig,
    pub timings: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub debounce_ms: u64,
    pub initial_scan_ms: u64,
    pub highlight_ms: u64,
    pub near_bottom_px: u32,
    pub scroll_settle_ms: u64,
    pub preview_chars: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            initial_scan_ms: INITIAL_SCAN_MS,
            highlight_ms: HIGHLIGHT_MS,
            near_bottom_px: NEAR_BOTTOM_PX,
            scroll_settle_ms: SCROLL_SETTLE_MS,
            preview_chars: PREVIEW_CHARS,
        }
    }
}

impl TimingConfig {
    pub fn to_tuning(&self) -> Tuning {
        Tuning {
            debounce_ms: self.debounce_ms,
            initial_scan_ms: self.initial_scan_ms,
            highlight_ms: self.highlight_ms,
            near_bottom_px: self.near_bottom_px,
            scroll_settle_ms: self.scroll_settle_ms,
            preview_chars: self.preview_chars,
        }
    }
}

/// Loads the overlay configuration. A missing file silently yields
/// defaults; an unreadable or unparsable file logs a warning and yields
/// defaults. The overlay degrades, it does not refuse to start.
pub fn load_config(path: &Path) -> OverlayConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return OverlayConfig::default();
        }
        Err(err) => {
            nav_warn!("Failed to read config from {:?}: {}", path, err);
            return OverlayConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            nav_info!("Loaded overlay config from {:?}", path);
            config
        }
        Err(err) => {
            nav_warn!("Failed to parse config from {:?}: {}", path, err);
            OverlayConfig::default()
        }
    }
}
