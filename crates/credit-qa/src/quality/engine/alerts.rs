use serde::{Deserialize, Serialize};

use super::super::domain::{IssueKind, Severity, ValidationIssue};
use super::config::AlertThresholds;
use super::dimensions::{Dimension, QualityDimensions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

impl AlertLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// What raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSource {
    Dimension,
    Issue,
    ValidatorFailure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAlert {
    pub level: AlertLevel,
    pub source: AlertSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl QualityAlert {
    pub fn is_critical(&self) -> bool {
        self.level == AlertLevel::Critical
    }

    /// Alert documenting a validator that failed internally and was scored as zero.
    pub fn validator_failure(validator: &str, dimension: Dimension, reason: &str) -> Self {
        Self {
            level: AlertLevel::Critical,
            source: AlertSource::ValidatorFailure,
            dimension: Some(dimension),
            field: None,
            message: format!(
                "{validator} validator failed internally ({reason}); {} scored as 0",
                dimension.label().to_ascii_lowercase()
            ),
            score: Some(0.0),
            threshold: None,
        }
    }

    fn for_issue(level: AlertLevel, issue: &ValidationIssue) -> Self {
        Self {
            level,
            source: AlertSource::Issue,
            dimension: None,
            field: Some(issue.field.clone()),
            message: format!("[{}] {}", issue.category, issue.message),
            score: None,
            threshold: None,
        }
    }
}

/// Threshold alerts for every dimension, then one alert per high-severity issue.
pub(crate) fn raise_alerts(
    dimensions: &QualityDimensions,
    thresholds: &AlertThresholds,
    issues: &[&ValidationIssue],
) -> Vec<QualityAlert> {
    let mut alerts = Vec::new();

    for (dimension, score) in dimensions.entries() {
        let breached = if score < thresholds.critical {
            Some((AlertLevel::Critical, thresholds.critical))
        } else if score < thresholds.warning {
            Some((AlertLevel::Warning, thresholds.warning))
        } else if score < thresholds.info {
            Some((AlertLevel::Info, thresholds.info))
        } else {
            None
        };

        if let Some((level, threshold)) = breached {
            alerts.push(QualityAlert {
                level,
                source: AlertSource::Dimension,
                dimension: Some(dimension),
                field: None,
                message: format!(
                    "{} score {score:.1} is below the {} threshold of {threshold:.0}",
                    dimension.label(),
                    level.label().to_ascii_lowercase()
                ),
                score: Some(score),
                threshold: Some(threshold),
            });
        }
    }

    for issue in issues {
        if issue.severity != Severity::High {
            continue;
        }
        match issue.kind {
            IssueKind::Error => alerts.push(QualityAlert::for_issue(AlertLevel::Critical, issue)),
            IssueKind::Warning => alerts.push(QualityAlert::for_issue(AlertLevel::Warning, issue)),
            IssueKind::Info => {}
        }
    }

    alerts
}
