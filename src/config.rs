//! Storefront widget configuration parsed from an inline JSON block.
//!
//! The theme may embed
//! `<script id="storefront-config" type="application/json">{...}</script>`;
//! every field is optional and falls back to the defaults below. File
//! validation limits are fixed constants in [`crate::state::intake`] and are
//! not configurable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "storefront-config";
pub const DEFAULT_HEADER_SELECTOR: &str = ".header-wrapper";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 200;
pub const DEFAULT_MIN_STEP: f64 = 5.0;
pub const DEFAULT_MAX_STEP: f64 = 30.0;
/// Smallest accepted `min_step`; caps an upload at 100 ticks.
pub const MIN_STEP_FLOOR: f64 = 1.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("upload tick interval must be positive")]
    ZeroTickInterval,
    #[error("upload steps must satisfy 1 <= min_step <= max_step (got {min_step}..={max_step})")]
    InvalidSteps { min_step: f64, max_step: f64 },
    #[error("unknown log level '{0}'")]
    LogLevel(String),
    #[error("header selector must not be empty")]
    EmptyHeaderSelector,
}

/// Pacing of the simulated upload.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadTiming {
    pub tick_interval_ms: u32,
    pub min_step: f64,
    pub max_step: f64,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self { tick_interval_ms: DEFAULT_TICK_INTERVAL_MS, min_step: DEFAULT_MIN_STEP, max_step: DEFAULT_MAX_STEP }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub log_level: String,
    /// Selector for the fixed header whose bottom edge anchors menu overlays.
    pub header_selector: String,
    pub upload: UploadTiming,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            header_selector: DEFAULT_HEADER_SELECTOR.to_owned(),
            upload: UploadTiming::default(),
        }
    }
}

impl StorefrontConfig {
    /// Parse and validate a JSON config block.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        let UploadTiming { min_step, max_step, .. } = self.upload;
        if !(min_step >= MIN_STEP_FLOOR && min_step <= max_step && max_step.is_finite()) {
            return Err(ConfigError::InvalidSteps { min_step, max_step });
        }
        if self.header_selector.trim().is_empty() {
            return Err(ConfigError::EmptyHeaderSelector);
        }
        self.level()?;
        Ok(())
    }

    /// Parsed log level.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(self.log_level.trim()).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Parse `raw` when present, falling back to defaults on any error.
    #[must_use]
    pub fn from_optional_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("storefront config ignored: {err}");
                Self::default()
            }
        }
    }

    /// Load the page's config block.
    #[must_use]
    pub fn load() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let raw = crate::util::dom::element_text(CONFIG_ELEMENT_ID);
            Self::from_optional_json(raw.as_deref())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }
}
