use crate::error::AppError;
use chrono::{Local, NaiveDate};
use credit_qa::quality::engine::QuickCheck;
use credit_qa::QualityAssuranceEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<QualityAssuranceEngine>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// The evaluation date pinned by the caller, or the local calendar date.
pub(crate) fn evaluation_date(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn parse_check(raw: &str) -> Result<QuickCheck, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized)).map_err(|_| {
        format!(
            "unknown check '{raw}', expected data_quality, completeness, consistency or compliance"
        )
    })
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_accept_kebab_and_snake_case() {
        assert_eq!(parse_check("data-quality"), Ok(QuickCheck::DataQuality));
        assert_eq!(parse_check(" Compliance "), Ok(QuickCheck::Compliance));
        assert!(parse_check("speed").is_err());
    }

    #[test]
    fn pinned_date_wins_over_clock() {
        let pinned = parse_date("2025-06-01").expect("valid date");
        assert_eq!(evaluation_date(Some(pinned)), pinned);
        assert!(parse_date("06/01/2025").is_err());
    }
}
