//! Tracing setup and helpers for keeping credentials out of log output

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns an error if a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.format {
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?,
        LogFormat::Plain => builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?,
    }

    tracing::info!(level = %config.level, format = ?config.format, "tracing initialised");
    Ok(())
}

/// Mask a credential for log fields, keeping two characters at each end.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}
