use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::super::domain::ValidationIssue;
use super::alerts::{AlertSource, QualityAlert};
use super::dimensions::Dimension;
use super::improvements::QualityImprovement;

const ISSUE_DUE_DAYS: i64 = 1;
const ALERT_DUE_DAYS: i64 = 2;
const IMPROVEMENT_DUE_DAYS: i64 = 7;

const ISSUE_PRIORITY: u8 = 10;
const ALERT_PRIORITY: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    CriticalIssue,
    CriticalAlert,
    Improvement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: u8,
    pub due_date: NaiveDate,
    pub source: ActionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
}

pub(crate) fn build_action_items(
    issues: &[&ValidationIssue],
    alerts: &[QualityAlert],
    improvements: &[QualityImprovement],
    today: NaiveDate,
) -> Vec<ActionItem> {
    let mut items = Vec::new();

    for issue in issues.iter().filter(|issue| issue.is_critical()) {
        items.push(ActionItem {
            id: String::new(),
            title: format!("Fix {}", issue.field),
            description: match &issue.suggestion {
                Some(suggestion) => format!("{} ({suggestion})", issue.message),
                None => issue.message.clone(),
            },
            priority: ISSUE_PRIORITY,
            due_date: today + Duration::days(ISSUE_DUE_DAYS),
            source: ActionSource::CriticalIssue,
            dimension: None,
        });
    }

    // Issue-sourced alerts already produced an item above.
    for alert in alerts
        .iter()
        .filter(|alert| alert.is_critical() && alert.source != AlertSource::Issue)
    {
        let title = match alert.dimension {
            Some(dimension) => format!("Investigate {} quality", dimension.label().to_ascii_lowercase()),
            None => "Investigate critical quality alert".to_string(),
        };
        items.push(ActionItem {
            id: String::new(),
            title,
            description: alert.message.clone(),
            priority: ALERT_PRIORITY,
            due_date: today + Duration::days(ALERT_DUE_DAYS),
            source: ActionSource::CriticalAlert,
            dimension: alert.dimension,
        });
    }

    for improvement in improvements.iter().filter(|entry| entry.is_high_priority()) {
        items.push(ActionItem {
            id: String::new(),
            title: improvement.recommendation.clone(),
            description: format!(
                "Raise {} from {:.1} to {:.1} (+{:.1} overall)",
                improvement.dimension.label().to_ascii_lowercase(),
                improvement.current_score,
                improvement.target_score,
                improvement.potential_impact
            ),
            priority: improvement.priority,
            due_date: today + Duration::days(IMPROVEMENT_DUE_DAYS),
            source: ActionSource::Improvement,
            dimension: Some(improvement.dimension),
        });
    }

    items.sort_by(|left, right| {
        right
            .priority
            .cmp(&left.priority)
            .then_with(|| left.due_date.cmp(&right.due_date))
    });
    for (index, item) in items.iter_mut().enumerate() {
        item.id = format!("QA-{:03}", index + 1);
    }
    items
}
