use crate::core::locale::regional_currency;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_GLOBAL_CURRENCY: &str = "USD";
pub const DEFAULT_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/fawazahmed0/currency-api@1/latest/currencies";

/// Host option keys understood by [`QuickConversionSettings::from_options`].
pub const OPTION_DIRECTION: &str = "QuickConversionDirection";
pub const OPTION_LOCAL_CURRENCY: &str = "QuickConversionLocalCurrency";
pub const OPTION_GLOBAL_CURRENCY: &str = "QuickConversionGlobalCurrency";

/// Which way a bare amount is converted.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    #[default]
    LocalToGlobal,
    GlobalToLocal,
}

impl ConversionDirection {
    /// Parses the host's combobox value (`"0"` or `"1"`).
    pub fn from_option_value(value: &str) -> Self {
        match value.trim() {
            "1" => ConversionDirection::GlobalToLocal,
            _ => ConversionDirection::LocalToGlobal,
        }
    }
}

/// Resolved defaults used when a query carries only an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickConversionSettings {
    pub direction: ConversionDirection,
    pub local_currency: String,
    pub global_currency: String,
}

impl QuickConversionSettings {
    /// Empty or missing currencies fall back to the regional currency (local)
    /// and USD (global).
    pub fn new(
        direction: ConversionDirection,
        local_currency: Option<&str>,
        global_currency: Option<&str>,
    ) -> Self {
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            direction,
            local_currency: non_empty(local_currency).unwrap_or_else(regional_currency),
            global_currency: non_empty(global_currency)
                .unwrap_or_else(|| DEFAULT_GLOBAL_CURRENCY.to_string()),
        }
    }

    /// Builds settings from the host's named options. Unknown keys are ignored.
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut direction = ConversionDirection::default();
        let mut local = None;
        let mut global = None;
        for (key, value) in options {
            match key {
                OPTION_DIRECTION => direction = ConversionDirection::from_option_value(value),
                OPTION_LOCAL_CURRENCY => local = Some(value),
                OPTION_GLOBAL_CURRENCY => global = Some(value),
                _ => debug!("Ignoring unknown option: {}", key),
            }
        }
        Self::new(direction, local, global)
    }

    /// Default `(from, to)` pair for the configured direction.
    pub fn default_pair(&self) -> (&str, &str) {
        match self.direction {
            ConversionDirection::LocalToGlobal => {
                (self.local_currency.as_str(), self.global_currency.as_str())
            }
            ConversionDirection::GlobalToLocal => {
                (self.global_currency.as_str(), self.local_currency.as_str())
            }
        }
    }
}

impl Default for QuickConversionSettings {
    fn default() -> Self {
        Self::new(ConversionDirection::default(), None, None)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct QuickConversionConfig {
    #[serde(default)]
    pub direction: ConversionDirection,
    pub local_currency: Option<String>,
    pub global_currency: Option<String>,
}

impl QuickConversionConfig {
    pub fn settings(&self) -> QuickConversionSettings {
        QuickConversionSettings::new(
            self.direction,
            self.local_currency.as_deref(),
            self.global_currency.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_validity_secs")]
    pub validity_secs: u64,
}

fn default_validity_secs() -> u64 {
    60 * 60
}

impl CacheConfig {
    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            validity_secs: default_validity_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub quick_conversion: QuickConversionConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Loads the config from the default path, or defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "quickfx", "quickfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
