//! Configuration for the tab-bar decoration engine.
//!
//! Settings load from a TOML file into plain serde structs; every field is
//! defaulted so a missing file or section is never fatal. The engine reads
//! a `&Config` snapshot each frame instead of consulting global state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use slat_anim::AnimationConfig;
use thiserror::Error;
use tracing::warn;

use crate::color::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout-wide gap and rounding settings.
    pub general: GeneralConfig,
    /// Tab bar appearance.
    pub tabs: TabsConfig,
    /// Animation timing per property group.
    pub animation: AnimationSettings,
}

/// Gap sizes and window rounding shared with the surrounding layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Gap between sibling nodes, in layout pixels.
    pub gaps_in: f32,
    /// Gap against the monitor edge, used for root-level groups.
    pub gaps_out: f32,
    /// Corner radius applied to windows, reused for stencil masks.
    pub window_rounding: f32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            gaps_in: 5.0,
            gaps_out: 20.0,
            window_rounding: 8.0,
        }
    }
}

/// Tab bar appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    /// Bar height in layout pixels.
    pub height: f32,
    /// Corner radius of each tab, clamped to half the tab extent.
    pub rounding: f32,
    /// Horizontal padding between adjacent tabs, in layout pixels.
    pub padding: f32,
    /// Slide the bar in from the top edge instead of the bottom.
    pub from_top: bool,
    /// Tab color when its node is the focused child.
    pub col_active: Color,
    /// Tab color when its node is flagged urgent.
    pub col_urgent: Color,
    /// Tab color otherwise.
    pub col_inactive: Color,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            height: 15.0,
            rounding: 3.0,
            padding: 5.0,
            from_top: false,
            col_active: Color::from_srgba_u8(0x32, 0xb4, 0xff, 0xff),
            col_urgent: Color::from_srgba_u8(0xff, 0x4f, 0x4f, 0xff),
            col_inactive: Color::from_srgba_u8(0x30, 0x46, 0x4f, 0xff),
        }
    }
}

/// Animation timing, split by which property group it drives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Bar-owned properties: entry offset/width, slide, fade.
    pub bar: AnimationConfig,
    /// Group position and size.
    pub group: AnimationConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, falling back to defaults on any failure.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(err) => {
                warn!("using default config: {err}");
                Self::default()
            }
        }
    }
}
