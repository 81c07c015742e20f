//! # Configuration
//!
//! Defaults for a fresh bill, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--currency`, `--tip`, `--round-up`)
//! 2. Environment variables (`TIPSPLIT_*`)
//! 3. Defaults (this file)

use std::env;

use serde::{Deserialize, Serialize};
use tipsplit_core::{Currency, DEFAULT_TIP_PERCENT};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Currency used for formatting (`TIPSPLIT_CURRENCY`, default USD).
    pub currency: Currency,

    /// Tip percentage a fresh form starts with (`TIPSPLIT_DEFAULT_TIP`,
    /// default 15).
    pub default_tip_percent: f64,

    /// Whether shares are rounded up by default (`TIPSPLIT_ROUND_UP`,
    /// default false).
    pub round_up: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: Currency::Usd,
            default_tip_percent: DEFAULT_TIP_PERCENT,
            round_up: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(code) = lookup("TIPSPLIT_CURRENCY") {
            config.currency = code
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TIPSPLIT_CURRENCY".to_string()))?;
        }

        if let Some(tip) = lookup("TIPSPLIT_DEFAULT_TIP") {
            config.default_tip_percent = tip
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|pct| pct.is_finite() && *pct >= 0.0)
                .ok_or_else(|| ConfigError::InvalidValue("TIPSPLIT_DEFAULT_TIP".to_string()))?;
        }

        if let Some(flag) = lookup("TIPSPLIT_ROUND_UP") {
            config.round_up = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(ConfigError::InvalidValue("TIPSPLIT_ROUND_UP".to_string())),
            };
        }

        Ok(config)
    }

    /// The default tip as it appears in the form's tip field.
    pub fn default_tip_input(&self) -> String {
        let pct = self.default_tip_percent;
        if pct.fract() == 0.0 {
            format!("{}", pct as u64)
        } else {
            format!("{}", pct)
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
