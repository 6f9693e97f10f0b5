//! Application configuration module
//! Handles environment variable loading, configuration validation and gateway settings

use std::env;

use crate::payments::providers::paypal::PayPalSettings;

/// Gateway ids this crate knows how to build
pub const KNOWN_GATEWAYS: &[&str] = &["bacs", "cheque", "paypal"];

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub gateways: GatewaysConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Plain,
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewaysConfig {
    pub enabled: Vec<String>,
    /// ISO 3166-1 alpha-2 code of the store's base country
    pub store_country: Option<String>,
    pub bacs_instructions: String,
    pub cheque_instructions: String,
    pub paypal: PayPalSettings,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            format: LogFormat::Plain,
        }
    }
}

impl Default for GatewaysConfig {
    fn default() -> Self {
        Self {
            enabled: KNOWN_GATEWAYS.iter().map(|id| id.to_string()).collect(),
            store_country: None,
            bacs_instructions: String::new(),
            cheque_instructions: String::new(),
            paypal: PayPalSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenv::dotenv().ok();

        Ok(AppConfig {
            logging: LoggingConfig::from_env()?,
            gateways: GatewaysConfig::from_env()?,
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()?;
        self.gateways.validate()?;

        Ok(())
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "plain".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Plain,
            },
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
        if !valid_levels.contains(&self.level.to_uppercase().as_str()) {
            return Err(ConfigError::InvalidValue("LOG_LEVEL".to_string()));
        }

        Ok(())
    }
}

impl GatewaysConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let enabled = env::var("ENABLED_GATEWAYS")
            .unwrap_or_else(|_| KNOWN_GATEWAYS.join(","))
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(GatewaysConfig {
            enabled,
            store_country: env::var("STORE_COUNTRY")
                .ok()
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty()),
            bacs_instructions: env::var("BACS_INSTRUCTIONS").unwrap_or_default(),
            cheque_instructions: env::var("CHEQUE_INSTRUCTIONS").unwrap_or_default(),
            paypal: PayPalSettings::from_env()?,
        })
    }

    pub fn is_enabled(&self, gateway_id: &str) -> bool {
        self.enabled.iter().any(|id| id == gateway_id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(unknown) = self
            .enabled
            .iter()
            .find(|id| !KNOWN_GATEWAYS.contains(&id.as_str()))
        {
            return Err(ConfigError::InvalidValue(format!(
                "ENABLED_GATEWAYS contains unknown gateway: {}",
                unknown
            )));
        }

        if let Some(country) = &self.store_country {
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::InvalidValue(
                    "STORE_COUNTRY must be a two-letter country code".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Parse the yes/no style flags used by gateway settings
pub(crate) fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "1" | "on" => Ok(true),
        "no" | "false" | "0" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name.to_string())),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for configuration: {0}")]
    InvalidValue(String),
}
