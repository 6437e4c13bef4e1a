use crate::config::TelemetryConfig;
use std::fmt;
use tracing::Level;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Crates whose spans and events follow `APP_LOG_LEVEL` when it names a bare level.
const QUALITY_TARGETS: [&str; 2] = ["credit_qa", "credit_qa_api"];

/// Floor for everything else (hyper, axum, tokio) so request plumbing stays quiet.
const DEPENDENCY_LEVEL: &str = "warn";

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { value: String, source: ParseError },
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value, .. } => write!(
                f,
                "APP_LOG_LEVEL '{value}' is neither a level nor a tracing filter directive"
            ),
            TelemetryError::Install(err) => {
                write!(f, "quality service log subscriber could not be installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(&**err),
        }
    }
}

/// Install the process-wide subscriber.
///
/// `RUST_LOG` wins when set. Otherwise a bare level such as `debug` applies to the quality
/// crates only, and a full directive list is used as given.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

fn directives(level: &str) -> String {
    let level = level.trim();
    match level.parse::<Level>() {
        Ok(parsed) => {
            let parsed = parsed.to_string().to_ascii_lowercase();
            let mut parts = vec![DEPENDENCY_LEVEL.to_string()];
            parts.extend(QUALITY_TARGETS.iter().map(|target| format!("{target}={parsed}")));
            parts.join(",")
        }
        Err(_) => level.to_string(),
    }
}

fn filter_for(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives(level)).map_err(|source| TelemetryError::InvalidFilter {
        value: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_scopes_to_quality_crates() {
        assert_eq!(
            directives(" DEBUG "),
            "warn,credit_qa=debug,credit_qa_api=debug"
        );
        assert_eq!(directives("credit_qa=trace,info"), "credit_qa=trace,info");
    }

    #[test]
    fn rejects_malformed_filters() {
        match filter_for("credit_qa=loud") {
            Err(TelemetryError::InvalidFilter { value, .. }) => {
                assert_eq!(value, "credit_qa=loud")
            }
            other => panic!("expected InvalidFilter error, got {other:?}"),
        }
        assert!(filter_for("info").is_ok());
    }

    #[test]
    fn errors_name_the_setting() {
        let err = filter_for("credit_qa=loud").expect_err("malformed directive");
        assert!(err.to_string().contains("APP_LOG_LEVEL 'credit_qa=loud'"));
    }
}
