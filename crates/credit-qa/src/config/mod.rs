use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::quality::engine::QualityConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub quality: QualityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut quality = QualityConfig::default();
        if let Some(critical) = threshold_override("QA_ALERT_CRITICAL")? {
            quality.thresholds.critical = critical;
        }
        if let Some(warning) = threshold_override("QA_ALERT_WARNING")? {
            quality.thresholds.warning = warning;
        }
        if let Some(info) = threshold_override("QA_ALERT_INFO")? {
            quality.thresholds.info = info;
        }
        quality.validate()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            quality,
        })
    }
}

fn threshold_override(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("quality dimension weights must sum to 1.0, got {total:.4}")]
    WeightsDoNotSumToOne { total: f64 },
    #[error("{name} must lie in [0, 100], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("alert thresholds must satisfy critical < warning < info, got {critical} / {warning} / {info}")]
    ThresholdsOutOfOrder {
        critical: f64,
        warning: f64,
        info: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("QA_ALERT_CRITICAL");
        env::remove_var("QA_ALERT_WARNING");
        env::remove_var("QA_ALERT_INFO");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.quality.thresholds.critical, 60.0);
        assert_eq!(config.quality.thresholds.warning, 75.0);
        assert_eq!(config.quality.thresholds.info, 85.0);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn threshold_overrides_are_applied_and_validated() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("QA_ALERT_CRITICAL", "50");
        let config = AppConfig::load().expect("override loads");
        assert_eq!(config.quality.thresholds.critical, 50.0);

        env::set_var("QA_ALERT_CRITICAL", "80");
        match AppConfig::load() {
            Err(ConfigError::ThresholdsOutOfOrder { critical, .. }) => assert_eq!(critical, 80.0),
            other => panic!("expected ThresholdsOutOfOrder, got {other:?}"),
        }

        env::set_var("QA_ALERT_CRITICAL", "sixty");
        match AppConfig::load() {
            Err(ConfigError::InvalidNumber { name, .. }) => assert_eq!(name, "QA_ALERT_CRITICAL"),
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
        reset_env();
    }
}
