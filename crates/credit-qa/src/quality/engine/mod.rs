//! Orchestration of the four leaf validators into one graded assessment.
//!
//! The engine is an explicitly constructed, stateless service: it owns a read-only
//! [`QualityConfig`] and a set of [`LeafValidators`], and every call is independent.
//! Leaf validators run on scoped threads; a leaf that panics is scored as zero and
//! reported through a critical [`QualityAlert`] instead of aborting the assessment.

mod actions;
mod alerts;
mod benchmark;
mod config;
mod dashboard;
mod dimensions;
mod improvements;
mod quick;
mod report;

pub use actions::{ActionItem, ActionSource};
pub use alerts::{AlertLevel, AlertSource, QualityAlert};
pub use benchmark::{BenchmarkComparison, DimensionGap, Ranking};
pub use config::{AlertThresholds, DimensionWeights, IndustryBenchmarks, QualityConfig};
pub use dashboard::{
    generate_quality_dashboard, DashboardError, HealthStatus, IssueFrequency,
    OpportunityFrequency, QualityDashboard, QualityTrend, TrendDirection,
};
pub use dimensions::{Dimension, QualityDimensions, QualityGrade};
pub use improvements::{Effort, QualityImprovement};
pub use quick::{QuickCheck, QuickCheckResult};
pub use report::QualityReport;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::completeness::{CompletenessReport, CompletenessValidator};
use super::compliance::{ComplianceGrade, ComplianceReport, ComplianceValidator};
use super::consistency::{ConsistencyChecker, ConsistencyReport};
use super::data_quality::{DataQualityReport, DataQualityValidator};
use super::domain::{
    clamp_score, round1, CreditReport, DisputeLetter, Severity, ValidationIssue,
};

const SLOW_PROCESSING_MS: u64 = 30_000;
const SLUGGISH_PROCESSING_MS: u64 = 10_000;
const LOW_CONFIDENCE: f64 = 70.0;
const MODERATE_CONFIDENCE: f64 = 85.0;
const HIGH_ISSUE_PENALTY: f64 = 5.0;
const HIGH_ISSUE_PENALTY_CAP: f64 = 30.0;
const RECOMMENDATION_PENALTY: f64 = 2.0;
const RECOMMENDATION_PENALTY_CAP: f64 = 20.0;

/// The four leaf validators behind the engine.
///
/// Implementations must be pure: the engine may call them concurrently and expects the
/// same input to produce the same output.
pub trait LeafValidators: Send + Sync {
    fn data_quality(&self, report: &CreditReport, today: NaiveDate) -> DataQualityReport;
    fn completeness(&self, report: &CreditReport) -> CompletenessReport;
    fn consistency(&self, report: &CreditReport, today: NaiveDate) -> ConsistencyReport;
    fn compliance(&self, letter: &DisputeLetter) -> ComplianceReport;
}

/// Production validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidators;

impl LeafValidators for StandardValidators {
    fn data_quality(&self, report: &CreditReport, today: NaiveDate) -> DataQualityReport {
        DataQualityValidator::new().validate(report, today)
    }

    fn completeness(&self, report: &CreditReport) -> CompletenessReport {
        CompletenessValidator::new().validate(report)
    }

    fn consistency(&self, report: &CreditReport, today: NaiveDate) -> ConsistencyReport {
        ConsistencyChecker::new().validate(report, today)
    }

    fn compliance(&self, letter: &DisputeLetter) -> ComplianceReport {
        ComplianceValidator::new().validate(letter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssuranceResult {
    pub assessed_on: NaiveDate,
    pub overall_score: f64,
    pub overall_grade: QualityGrade,
    pub quality_dimensions: QualityDimensions,
    /// `None` when the validator failed internally.
    pub data_quality: Option<DataQualityReport>,
    pub completeness: Option<CompletenessReport>,
    pub consistency: Option<ConsistencyReport>,
    /// `None` when no letter was supplied or the validator failed internally.
    pub compliance: Option<ComplianceReport>,
    pub alerts: Vec<QualityAlert>,
    pub improvements: Vec<QualityImprovement>,
    pub benchmark: BenchmarkComparison,
    pub action_items: Vec<ActionItem>,
    pub report: QualityReport,
}

impl QualityAssuranceResult {
    /// Every issue raised by the leaf validators, in leaf order.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> + '_ {
        leaf_issues(
            self.data_quality.as_ref(),
            self.completeness.as_ref(),
            self.consistency.as_ref(),
            self.compliance.as_ref(),
        )
    }

    pub fn critical_alerts(&self) -> impl Iterator<Item = &QualityAlert> + '_ {
        self.alerts.iter().filter(|alert| alert.is_critical())
    }
}

fn leaf_issues<'a>(
    data_quality: Option<&'a DataQualityReport>,
    completeness: Option<&'a CompletenessReport>,
    consistency: Option<&'a ConsistencyReport>,
    compliance: Option<&'a ComplianceReport>,
) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
    let data_quality = data_quality.into_iter().flat_map(|report| report.issues.iter());
    let completeness = completeness.into_iter().flat_map(|report| report.issues.iter());
    let consistency = consistency.into_iter().flat_map(|report| report.issues.iter());
    let compliance = compliance
        .into_iter()
        .flat_map(|report| report.issues.iter().chain(report.warnings.iter()));
    data_quality
        .chain(completeness)
        .chain(consistency)
        .chain(compliance)
}

/// Outcome of one guarded leaf call; `Err` carries the panic message.
type LeafOutcome<T> = Result<T, String>;

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run a leaf validator, turning a panic into an error value.
pub(crate) fn guarded<T>(name: &str, run: impl FnOnce() -> T) -> LeafOutcome<T> {
    panic::catch_unwind(AssertUnwindSafe(run)).map_err(|payload| {
        let message = panic_message(payload);
        warn!(validator = name, error = %message, "leaf validator panicked; scoring it as zero");
        message
    })
}

/// Leaf outputs of one assessment.
pub(crate) struct LeafResults {
    pub data_quality: LeafOutcome<DataQualityReport>,
    pub completeness: LeafOutcome<CompletenessReport>,
    pub consistency: LeafOutcome<ConsistencyReport>,
    pub compliance: Option<LeafOutcome<ComplianceReport>>,
}

pub struct QualityAssuranceEngine<V = StandardValidators> {
    config: QualityConfig,
    validators: V,
}

impl QualityAssuranceEngine<StandardValidators> {
    pub fn new(config: QualityConfig) -> Self {
        Self::with_validators(config, StandardValidators)
    }
}

impl Default for QualityAssuranceEngine<StandardValidators> {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

impl<V: LeafValidators> QualityAssuranceEngine<V> {
    pub fn with_validators(config: QualityConfig, validators: V) -> Self {
        Self { config, validators }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Run all four leaves concurrently on scoped threads.
    pub(crate) fn run_leaves(
        &self,
        report: &CreditReport,
        letter: Option<&DisputeLetter>,
        today: NaiveDate,
    ) -> LeafResults {
        let validators = &self.validators;
        thread::scope(|scope| {
            let data_quality = scope.spawn(|| {
                guarded("data_quality", || validators.data_quality(report, today))
            });
            let completeness =
                scope.spawn(|| guarded("completeness", || validators.completeness(report)));
            let consistency = scope.spawn(|| {
                guarded("consistency", || validators.consistency(report, today))
            });
            let compliance = letter.map(|letter| {
                scope.spawn(move || guarded("compliance", || validators.compliance(letter)))
            });

            LeafResults {
                data_quality: joined(data_quality.join()),
                completeness: joined(completeness.join()),
                consistency: joined(consistency.join()),
                compliance: compliance.map(|handle| joined(handle.join())),
            }
        })
    }

    pub fn assess_quality(
        &self,
        report: &CreditReport,
        letter: Option<&DisputeLetter>,
        today: NaiveDate,
    ) -> QualityAssuranceResult {
        let leaves = self.run_leaves(report, letter, today);

        let data_quality = leaves.data_quality.as_ref().ok();
        let completeness = leaves.completeness.as_ref().ok();
        let consistency = leaves.consistency.as_ref().ok();
        let compliance = leaves
            .compliance
            .as_ref()
            .and_then(|outcome| outcome.as_ref().ok());

        if let Some(result) = data_quality {
            debug!(score = result.overall_score, issues = result.issues.len(), "data quality validated");
        }
        if let Some(result) = completeness {
            debug!(score = result.overall_completeness, issues = result.issues.len(), "completeness validated");
        }
        if let Some(result) = consistency {
            debug!(score = result.overall_consistency, issues = result.issues.len(), "consistency validated");
        }
        if let Some(result) = compliance {
            debug!(score = result.compliance_score, grade = result.overall_grade.label(), "compliance validated");
        }

        let issues: Vec<&ValidationIssue> =
            leaf_issues(data_quality, completeness, consistency, compliance).collect();

        let compliance_score = match &leaves.compliance {
            None => 100.0,
            Some(Ok(result)) => result.compliance_score,
            Some(Err(_)) => 0.0,
        };
        let compliance_grade = match &leaves.compliance {
            None => None,
            Some(Ok(result)) => Some(result.overall_grade),
            Some(Err(_)) => Some(ComplianceGrade::F),
        };

        let recommendation_count = data_quality.map_or(0, |r| r.recommendations.len())
            + completeness.map_or(0, |r| r.recommendations.len())
            + consistency.map_or(0, |r| r.recommendations.len())
            + compliance.map_or(0, |r| r.recommendations.len());

        let dimensions = QualityDimensions {
            accuracy: score_or_zero(data_quality.map(|r| r.overall_score)),
            completeness: score_or_zero(completeness.map(|r| r.overall_completeness)),
            consistency: score_or_zero(consistency.map(|r| r.overall_consistency)),
            compliance: round1(clamp_score(compliance_score)),
            reliability: reliability(report, &issues),
            usability: usability(recommendation_count, compliance_grade),
        };

        let overall_score = dimensions.overall(&self.config.weights);
        let overall_grade = QualityGrade::from_score(overall_score);

        let mut alerts = alerts::raise_alerts(&dimensions, &self.config.thresholds, &issues);
        for (name, dimension, failure) in [
            ("data quality", Dimension::Accuracy, leaves.data_quality.as_ref().err()),
            ("completeness", Dimension::Completeness, leaves.completeness.as_ref().err()),
            ("consistency", Dimension::Consistency, leaves.consistency.as_ref().err()),
            (
                "compliance",
                Dimension::Compliance,
                leaves.compliance.as_ref().and_then(|outcome| outcome.as_ref().err()),
            ),
        ] {
            if let Some(reason) = failure {
                alerts.push(QualityAlert::validator_failure(name, dimension, reason));
            }
        }

        let improvements = improvements::recommend(
            &dimensions,
            &self.config.weights,
            &self.config.benchmarks,
            |dimension| {
                let source = match dimension {
                    Dimension::Accuracy => data_quality.map(|r| &r.recommendations),
                    Dimension::Completeness => completeness.map(|r| &r.recommendations),
                    Dimension::Consistency => consistency.map(|r| &r.recommendations),
                    Dimension::Compliance => compliance.map(|r| &r.recommendations),
                    Dimension::Reliability | Dimension::Usability => None,
                };
                source
                    .map(|recommendations| recommendations.iter().take(3).cloned().collect())
                    .unwrap_or_default()
            },
        );

        let benchmark = benchmark::compare(overall_score, &dimensions, &self.config.benchmarks);
        let action_items = actions::build_action_items(&issues, &alerts, &improvements, today);
        let narrative = report::narrate(
            overall_score,
            overall_grade,
            &dimensions,
            &alerts,
            &improvements,
            &benchmark,
        );

        info!(
            overall = overall_score,
            grade = overall_grade.label(),
            alerts = alerts.len(),
            action_items = action_items.len(),
            "quality assessment complete"
        );

        QualityAssuranceResult {
            assessed_on: today,
            overall_score,
            overall_grade,
            quality_dimensions: dimensions,
            data_quality: leaves.data_quality.ok(),
            completeness: leaves.completeness.ok(),
            consistency: leaves.consistency.ok(),
            compliance: leaves.compliance.and_then(Result::ok),
            alerts,
            improvements,
            benchmark,
            action_items,
            report: narrative,
        }
    }
}

fn joined<T>(outcome: thread::Result<LeafOutcome<T>>) -> LeafOutcome<T> {
    outcome.unwrap_or_else(|payload| Err(panic_message(payload)))
}

fn score_or_zero(score: Option<f64>) -> f64 {
    round1(clamp_score(score.unwrap_or(0.0)))
}

/// Confidence in the extraction that produced the record.
fn reliability(report: &CreditReport, issues: &[&ValidationIssue]) -> f64 {
    let mut score = 100.0;

    if let Some(metadata) = &report.processing_metadata {
        if metadata.processing_time_ms > SLOW_PROCESSING_MS {
            score -= 20.0;
        } else if metadata.processing_time_ms > SLUGGISH_PROCESSING_MS {
            score -= 10.0;
        }

        match metadata.confidence {
            Some(confidence) if confidence < LOW_CONFIDENCE => score -= 20.0,
            Some(confidence) if confidence < MODERATE_CONFIDENCE => score -= 10.0,
            _ => {}
        }
    }

    let high = issues
        .iter()
        .filter(|issue| issue.severity == Severity::High)
        .count() as f64;
    score -= (high * HIGH_ISSUE_PENALTY).min(HIGH_ISSUE_PENALTY_CAP);

    round1(clamp_score(score))
}

/// How ready the results are to hand off without further work.
fn usability(recommendations: usize, compliance_grade: Option<ComplianceGrade>) -> f64 {
    let recommendation_penalty =
        (recommendations as f64 * RECOMMENDATION_PENALTY).min(RECOMMENDATION_PENALTY_CAP);
    let grade_penalty = match compliance_grade {
        None | Some(ComplianceGrade::A) => 0.0,
        Some(ComplianceGrade::B) => 5.0,
        Some(ComplianceGrade::C) => 10.0,
        Some(ComplianceGrade::D) => 20.0,
        Some(ComplianceGrade::F) => 30.0,
    };

    round1(clamp_score(100.0 - recommendation_penalty - grade_penalty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::domain::ProcessingMetadata;

    #[test]
    fn reliability_applies_metadata_and_issue_penalties() {
        let report = CreditReport {
            processing_metadata: Some(ProcessingMetadata {
                processing_time_ms: 12_000,
                confidence: Some(65.0),
                extraction_method: None,
            }),
            ..CreditReport::default()
        };
        let high = ValidationIssue::error(Severity::High, "accounts", "accounts[0]", "bad");
        let issues: Vec<&ValidationIssue> = std::iter::repeat(&high).take(8).collect();

        assert_eq!(reliability(&report, &[]), 70.0);
        assert_eq!(reliability(&report, &issues), 40.0);
        assert_eq!(reliability(&CreditReport::default(), &[]), 100.0);
    }

    #[test]
    fn usability_combines_recommendations_and_letter_grade() {
        assert_eq!(usability(0, None), 100.0);
        assert_eq!(usability(3, Some(ComplianceGrade::B)), 89.0);
        assert_eq!(usability(40, Some(ComplianceGrade::F)), 50.0);
    }

    #[test]
    fn panics_are_captured_with_their_message() {
        let outcome: LeafOutcome<()> = guarded("test", || panic!("boom"));
        assert_eq!(outcome, Err("boom".to_string()));

        let formatted: LeafOutcome<()> = guarded("test", || panic!("index {} out of range", 4));
        assert_eq!(formatted, Err("index 4 out of range".to_string()));
    }
}
