use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::{clamp_score, round1, CreditReport, DisputeLetter, ValidationIssue};
use super::dimensions::{Dimension, QualityGrade};
use super::{guarded, LeafValidators, QualityAssuranceEngine};

const QUICK_RECOMMENDATIONS: usize = 3;

/// Leaf check selectable for a quick quality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickCheck {
    DataQuality,
    Completeness,
    Consistency,
    Compliance,
}

impl QuickCheck {
    pub const DEFAULT: [Self; 2] = [Self::DataQuality, Self::Completeness];

    pub const fn dimension(self) -> Dimension {
        match self {
            Self::DataQuality => Dimension::Accuracy,
            Self::Completeness => Dimension::Completeness,
            Self::Consistency => Dimension::Consistency,
            Self::Compliance => Dimension::Compliance,
        }
    }

    const fn validator_name(self) -> &'static str {
        match self {
            Self::DataQuality => "data quality",
            Self::Completeness => "completeness",
            Self::Consistency => "consistency",
            Self::Compliance => "compliance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickCheckResult {
    pub quality_score: f64,
    pub quality_grade: QualityGrade,
    pub critical_alerts: Vec<String>,
    pub quick_recommendations: Vec<String>,
}

/// Score, issues and recommendations from one selected leaf.
struct QuickLeaf {
    score: f64,
    issues: Vec<ValidationIssue>,
    recommendations: Vec<String>,
}

impl<V: LeafValidators> QualityAssuranceEngine<V> {
    /// Low-latency check over a subset of the leaf validators.
    ///
    /// An empty `checks` slice runs the default data-quality and completeness pair. Duplicate
    /// entries are ignored. Compliance without a letter contributes a full score.
    pub fn quick_quality_check(
        &self,
        report: &CreditReport,
        letter: Option<&DisputeLetter>,
        checks: &[QuickCheck],
        today: NaiveDate,
    ) -> QuickCheckResult {
        let checks = if checks.is_empty() {
            &QuickCheck::DEFAULT[..]
        } else {
            checks
        };
        let mut selected: Vec<QuickCheck> = Vec::with_capacity(checks.len());
        for check in checks {
            if !selected.contains(check) {
                selected.push(*check);
            }
        }

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        let mut critical_alerts = Vec::new();
        let mut quick_recommendations = Vec::new();

        for check in selected {
            let dimension = check.dimension();
            let leaf = match self.run_quick_leaf(check, report, letter, today) {
                Ok(leaf) => leaf,
                Err(reason) => {
                    critical_alerts.push(format!(
                        "{} validator failed internally ({reason})",
                        check.validator_name()
                    ));
                    QuickLeaf {
                        score: 0.0,
                        issues: Vec::new(),
                        recommendations: Vec::new(),
                    }
                }
            };

            let weight = self.config.weights.weight(dimension);
            weighted += leaf.score * weight;
            total_weight += weight;

            critical_alerts.extend(
                leaf.issues
                    .iter()
                    .filter(|issue| issue.is_critical())
                    .map(|issue| format!("{}: {}", issue.field, issue.message)),
            );
            if leaf.score < self.config.thresholds.critical {
                critical_alerts.push(format!(
                    "{} score {:.1} is below the critical threshold of {:.0}",
                    dimension.label(),
                    leaf.score,
                    self.config.thresholds.critical
                ));
            }
            quick_recommendations.extend(leaf.recommendations);
        }
        quick_recommendations.truncate(QUICK_RECOMMENDATIONS);

        let quality_score = if total_weight > 0.0 {
            round1(clamp_score(weighted / total_weight))
        } else {
            0.0
        };
        let quality_grade = QualityGrade::from_score(quality_score);
        debug!(score = quality_score, grade = quality_grade.label(), "quick quality check complete");

        QuickCheckResult {
            quality_score,
            quality_grade,
            critical_alerts,
            quick_recommendations,
        }
    }

    fn run_quick_leaf(
        &self,
        check: QuickCheck,
        report: &CreditReport,
        letter: Option<&DisputeLetter>,
        today: NaiveDate,
    ) -> Result<QuickLeaf, String> {
        let validators = &self.validators;
        let name = check.validator_name();
        match check {
            QuickCheck::DataQuality => guarded(name, || {
                let result = validators.data_quality(report, today);
                QuickLeaf {
                    score: result.overall_score,
                    issues: result.issues,
                    recommendations: result.recommendations,
                }
            }),
            QuickCheck::Completeness => guarded(name, || {
                let result = validators.completeness(report);
                QuickLeaf {
                    score: result.overall_completeness,
                    issues: result.issues,
                    recommendations: result.recommendations,
                }
            }),
            QuickCheck::Consistency => guarded(name, || {
                let result = validators.consistency(report, today);
                QuickLeaf {
                    score: result.overall_consistency,
                    issues: result.issues,
                    recommendations: result.recommendations,
                }
            }),
            QuickCheck::Compliance => match letter {
                Some(letter) => guarded(name, || {
                    let result = validators.compliance(letter);
                    QuickLeaf {
                        score: result.compliance_score,
                        issues: result.issues,
                        recommendations: result.recommendations,
                    }
                }),
                None => Ok(QuickLeaf {
                    score: 100.0,
                    issues: Vec::new(),
                    recommendations: Vec::new(),
                }),
            },
        }
    }
}
