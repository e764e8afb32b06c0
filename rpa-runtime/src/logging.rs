//! Logging & tracing bootstrap.
//!
//! Configures `tracing-subscriber` for toolkit binaries and scripts. Library
//! crates only emit through `tracing` macros; only the host calls
//! [`init_logging`], once, at startup.

use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{Result, RuntimeError};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Base level applied to toolkit crates
    pub level: tracing::Level,
    /// Custom filter string (e.g., "rpa_transfer=debug,provider_drive=trace")
    pub filter: Option<String>,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: tracing::Level::INFO,
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Initialize the logging system.
///
/// Call once during application startup; subsequent calls return an error.
///
/// # Example
///
/// ```ignore
/// use rpa_runtime::logging::{init_logging, LoggingConfig};
///
/// init_logging(LoggingConfig::default())?;
/// tracing::info!("script started");
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    match config.format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(config.display_target);
            try_init(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_target(config.display_target);
            try_init(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
        LogFormat::Compact => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_target(config.display_target);
            try_init(tracing_subscriber::registry().with(filter).with(fmt_layer))
        }
    }
}

fn try_init<S>(subscriber: S) -> Result<()>
where
    S: SubscriberInitExt,
{
    subscriber
        .try_init()
        .map_err(|e| RuntimeError::Config(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let base_level = config.level.as_str().to_lowercase();

    let filter_string = if let Some(custom_filter) = &config.filter {
        custom_filter.clone()
    } else {
        // Toolkit crates at the configured level, noisy dependencies at warn
        format!(
            "rpa_traits={level},rpa_transfer={level},rpa_runtime={level},\
             rpa_desktop={level},provider_drive={level},provider_chat={level},\
             h2=warn,hyper=warn,reqwest=warn",
            level = base_level
        )
    };

    EnvFilter::try_new(filter_string)
        .map_err(|e| RuntimeError::Config(format!("Invalid log filter: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid() {
        assert!(build_filter(&LoggingConfig::default()).is_ok());
    }

    #[test]
    fn custom_filter_is_honored() {
        let config = LoggingConfig::default().with_filter("rpa_transfer=trace");
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let config = LoggingConfig::default().with_filter("===");
        assert!(matches!(
            build_filter(&config),
            Err(RuntimeError::Config(_))
        ));
    }
}
