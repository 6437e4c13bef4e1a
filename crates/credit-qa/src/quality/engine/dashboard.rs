use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::super::domain::round1;
use super::dimensions::{Dimension, QualityGrade};
use super::QualityAssuranceResult;

/// Score movement inside this band reads as stable.
const TREND_DEAD_ZONE: f64 = 2.0;
const TOP_ENTRIES: usize = 5;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("assessment history is empty")]
    EmptyHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 80.0 {
            Self::Good
        } else if score >= 70.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn from_change(change: f64) -> Self {
        if change > TREND_DEAD_ZONE {
            Self::Up
        } else if change < -TREND_DEAD_ZONE {
            Self::Down
        } else {
            Self::Stable
        }
    }
}

/// Movement of one metric between the two most recent assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityTrend {
    /// `None` for the overall score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
    pub change: f64,
    pub direction: TrendDirection,
}

impl QualityTrend {
    fn between(dimension: Option<Dimension>, current: f64, previous: Option<f64>) -> Self {
        let change = previous.map_or(0.0, |previous| round1(current - previous));
        Self {
            dimension,
            current,
            previous,
            change,
            direction: TrendDirection::from_change(change),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFrequency {
    pub message: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityFrequency {
    pub dimension: Dimension,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDashboard {
    pub assessments: usize,
    pub latest_assessed_on: NaiveDate,
    pub latest_score: f64,
    pub latest_grade: QualityGrade,
    pub average_score: f64,
    pub overall_health: HealthStatus,
    /// Overall trend first, then one per dimension.
    pub trends: Vec<QualityTrend>,
    pub top_issues: Vec<IssueFrequency>,
    pub top_opportunities: Vec<OpportunityFrequency>,
}

impl QualityDashboard {
    pub fn trend(&self, dimension: Option<Dimension>) -> Option<&QualityTrend> {
        self.trends.iter().find(|trend| trend.dimension == dimension)
    }
}

/// Fold stored assessments into a dashboard summary.
///
/// History may arrive in any order; entries are ordered by assessment date, keeping the input
/// order for assessments on the same day.
pub fn generate_quality_dashboard(
    history: &[QualityAssuranceResult],
) -> Result<QualityDashboard, DashboardError> {
    let mut ordered: Vec<&QualityAssuranceResult> = history.iter().collect();
    ordered.sort_by_key(|result| result.assessed_on);

    let (latest, earlier) = ordered.split_last().ok_or(DashboardError::EmptyHistory)?;
    let previous = earlier.last();

    let mut trends = vec![QualityTrend::between(
        None,
        latest.overall_score,
        previous.map(|result| result.overall_score),
    )];
    trends.extend(Dimension::ordered().into_iter().map(|dimension| {
        QualityTrend::between(
            Some(dimension),
            latest.quality_dimensions.get(dimension),
            previous.map(|result| result.quality_dimensions.get(dimension)),
        )
    }));

    let average_score = round1(
        ordered.iter().map(|result| result.overall_score).sum::<f64>() / ordered.len() as f64,
    );

    Ok(QualityDashboard {
        assessments: ordered.len(),
        latest_assessed_on: latest.assessed_on,
        latest_score: latest.overall_score,
        latest_grade: latest.overall_grade,
        average_score,
        overall_health: HealthStatus::from_score(latest.overall_score),
        trends,
        top_issues: top_issues(&ordered),
        top_opportunities: top_opportunities(&ordered),
    })
}

fn top_issues(history: &[&QualityAssuranceResult]) -> Vec<IssueFrequency> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for result in history {
        for issue in result.issues() {
            *counts.entry(issue.message.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<IssueFrequency> = counts
        .into_iter()
        .map(|(message, occurrences)| IssueFrequency {
            message: message.to_string(),
            occurrences,
        })
        .collect();
    ranked.sort_by(|left, right| right.occurrences.cmp(&left.occurrences));
    ranked.truncate(TOP_ENTRIES);
    ranked
}

fn top_opportunities(history: &[&QualityAssuranceResult]) -> Vec<OpportunityFrequency> {
    let mut counts: BTreeMap<Dimension, usize> = BTreeMap::new();
    for result in history {
        for improvement in &result.improvements {
            *counts.entry(improvement.dimension).or_default() += 1;
        }
    }

    let mut ranked: Vec<OpportunityFrequency> = counts
        .into_iter()
        .map(|(dimension, occurrences)| OpportunityFrequency {
            dimension,
            occurrences,
        })
        .collect();
    ranked.sort_by(|left, right| right.occurrences.cmp(&left.occurrences));
    ranked.truncate(TOP_ENTRIES);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_dead_zone_is_inclusive() {
        assert_eq!(TrendDirection::from_change(2.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_change(-2.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_change(2.1), TrendDirection::Up);
        assert_eq!(TrendDirection::from_change(-2.1), TrendDirection::Down);
    }

    #[test]
    fn health_buckets_follow_latest_score() {
        assert_eq!(HealthStatus::from_score(90.0), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(89.9), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(70.0), HealthStatus::Fair);
        assert_eq!(HealthStatus::from_score(69.9), HealthStatus::Poor);
    }

    #[test]
    fn empty_history_is_rejected() {
        match generate_quality_dashboard(&[]) {
            Err(DashboardError::EmptyHistory) => {}
            other => panic!("expected empty history error, got {other:?}"),
        }
    }
}
