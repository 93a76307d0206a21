//! Demo configuration loaded from TOML.
//!
//! ```toml
//! tick_rate_ms = 100
//! enable_mouse = true
//!
//! [[sliders]]
//! id = "volume"
//! min = 0
//! max = 250
//! display = "percent-left"
//! ```
//!
//! Missing fields fall back to [`DemoConfig::default`], including the slider list.

use crate::error::TuiError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thinslider_widgets::{DisplayMode, SliderConfig};

/// Host settings plus the sliders to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Input poll timeout in milliseconds.
    pub tick_rate_ms: u64,
    /// Enable mouse capture.
    pub enable_mouse: bool,
    /// Sliders, top to bottom.
    pub sliders: Vec<SliderConfig>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            enable_mouse: true,
            sliders: default_sliders(),
        }
    }
}

fn default_sliders() -> Vec<SliderConfig> {
    vec![
        SliderConfig {
            value: Some(600),
            ..SliderConfig::new(0, 1500)
        },
        SliderConfig {
            display: DisplayMode::PercentLeft,
            ..SliderConfig::new(0, 250)
        },
        SliderConfig {
            display: DisplayMode::PercentRight,
            ..SliderConfig::new(0, 250)
        },
        SliderConfig {
            display: DisplayMode::PositionLeft,
            ..SliderConfig::new(72, 325)
        },
        SliderConfig {
            step: 3,
            display: DisplayMode::PositionRight,
            ..SliderConfig::new(0, 1500)
        },
    ]
}

impl DemoConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, TuiError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuiError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TuiError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!(
            "loaded {} slider(s) from {}",
            config.sliders.len(),
            path.display()
        );
        Ok(config)
    }
}
