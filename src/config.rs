use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::multi_transaction::errors::DEFAULT_ABANDON_PATTERNS;
use crate::multi_transaction::lifecycle::DEFAULT_IDLE_MESSAGE;

/// Main configuration structure for the storefront
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Multi-transaction sequencer settings
    pub sequencer: SequencerConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Drops listing settings
    pub drops: DropsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Failure message fragments that abandon a batch instead of offering retry
    pub abandon_patterns: Vec<String>,
    /// Upper bound for a single wallet action (no limit when unset)
    pub action_timeout_seconds: Option<u64>,
    /// Status message shown before the first action starts
    pub idle_message: String,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            abandon_patterns: DEFAULT_ABANDON_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            action_timeout_seconds: None,
            idle_message: DEFAULT_IDLE_MESSAGE.to_string(),
        }
    }
}

impl SequencerConfig {
    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit structured JSON log lines
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DropsConfig {
    /// Drops starting within this many hours show a countdown
    pub countdown_window_hours: i64,
    /// JSON catalog to load instead of the bundled one
    pub catalog_path: Option<String>,
}

impl Default for DropsConfig {
    fn default() -> Self {
        Self {
            countdown_window_hours: 12,
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (storefront.toml, .storefront-rc)
    /// 3. Environment variables (prefixed with STOREFRONT__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("storefront.toml").exists() {
            builder = builder.add_source(File::with_name("storefront"));
        }

        if Path::new(".storefront-rc").exists() {
            builder = builder.add_source(
                File::with_name(".storefront-rc").format(config::FileFormat::Toml),
            );
        }

        // Double underscore separates sections because field names contain `_`
        builder = builder.add_source(
            Environment::with_prefix("STOREFRONT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let storefront_config: StorefrontConfig = config.try_deserialize()?;
        Ok(storefront_config)
    }

    /// Load configuration from an explicit TOML file, ignoring other sources
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<StorefrontConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = StorefrontConfig::load_env_file();
        StorefrontConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static StorefrontConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
