//! Agreement of the record with itself: across sections, across bureaus, across time and
//! across logical relationships between fields.
//!
//! Each sub-check starts from 100 and subtracts fixed penalties. Every check always runs,
//! so a sub-score that has already reached zero still reports all of its issues.

mod bureau;
mod cross_section;
mod logical;
mod temporal;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{clamp_score, round1, Bureau, CreditReport, Severity, ValidationIssue};

const CROSS_SECTION_WEIGHT: f64 = 0.30;
const BUREAU_WEIGHT: f64 = 0.25;
const TEMPORAL_WEIGHT: f64 = 0.25;
const LOGICAL_WEIGHT: f64 = 0.20;

const SUB_CHECK_RECOMMENDATION_THRESHOLD: f64 = 80.0;

/// Disagreement between two bureaus on the same logical fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BureauDiscrepancy {
    pub field: String,
    pub first_bureau: Bureau,
    pub first_value: f64,
    pub second_bureau: Bureau,
    pub second_value: f64,
    pub difference: f64,
    pub severity: Severity,
}

impl BureauDiscrepancy {
    pub fn involves(&self, bureau: Bureau) -> bool {
        self.first_bureau == bureau || self.second_bureau == bureau
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    pub overall_consistency: f64,
    pub cross_section_consistency: f64,
    pub bureau_consistency: f64,
    pub temporal_consistency: f64,
    pub logical_consistency: f64,
    pub issues: Vec<ValidationIssue>,
    pub discrepancies: Vec<BureauDiscrepancy>,
    pub recommendations: Vec<String>,
}

/// Penalties and findings accumulated by one sub-check.
#[derive(Debug, Default)]
struct CheckOutcome {
    penalty: f64,
    issues: Vec<ValidationIssue>,
    discrepancies: Vec<BureauDiscrepancy>,
}

impl CheckOutcome {
    fn penalize(&mut self, points: f64, issue: ValidationIssue) {
        self.penalty += points;
        self.issues.push(issue);
    }

    fn note(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn record(&mut self, discrepancy: BureauDiscrepancy) {
        self.discrepancies.push(discrepancy);
    }

    fn score(&self) -> f64 {
        round1(clamp_score(100.0 - self.penalty))
    }
}

/// Stateless checker running the cross-section, bureau, temporal and logical sub-checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, report: &CreditReport, today: NaiveDate) -> ConsistencyReport {
        let cross_section = cross_section::check(report, today);
        let bureau = bureau::check(report);
        let temporal = temporal::check(report, today);
        let logical = logical::check(report, today);

        let cross_section_consistency = cross_section.score();
        let bureau_consistency = bureau.score();
        let temporal_consistency = temporal.score();
        let logical_consistency = logical.score();

        let overall_consistency = round1(clamp_score(
            cross_section_consistency * CROSS_SECTION_WEIGHT
                + bureau_consistency * BUREAU_WEIGHT
                + temporal_consistency * TEMPORAL_WEIGHT
                + logical_consistency * LOGICAL_WEIGHT,
        ));

        let mut issues = Vec::new();
        let mut discrepancies = Vec::new();
        for outcome in [cross_section, bureau, temporal, logical] {
            issues.extend(outcome.issues);
            discrepancies.extend(outcome.discrepancies);
        }

        let recommendations = build_recommendations(
            [
                ("cross-section", cross_section_consistency),
                ("bureau", bureau_consistency),
                ("temporal", temporal_consistency),
                ("logical", logical_consistency),
            ],
            &discrepancies,
        );

        ConsistencyReport {
            overall_consistency,
            cross_section_consistency,
            bureau_consistency,
            temporal_consistency,
            logical_consistency,
            issues,
            discrepancies,
            recommendations,
        }
    }
}

fn build_recommendations(
    sub_scores: [(&str, f64); 4],
    discrepancies: &[BureauDiscrepancy],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for (name, score) in sub_scores {
        if score >= SUB_CHECK_RECOMMENDATION_THRESHOLD {
            continue;
        }
        let advice = match name {
            "cross-section" => "Reconcile negative items, inquiries and public records with the tradelines they refer to",
            "bureau" => "Compare the bureau reports side by side and dispute the outlying values",
            "temporal" => "Correct impossible date orderings before generating disputes",
            _ => "Review balances, limits and statuses that contradict each other",
        };
        recommendations.push(format!("{advice} ({name} consistency {score:.0})"));
    }

    let mut outliers: Vec<Bureau> = Vec::new();
    for bureau in Bureau::ordered() {
        let involved = discrepancies
            .iter()
            .filter(|discrepancy| discrepancy.involves(bureau))
            .count();
        if involved >= 2 {
            outliers.push(bureau);
        }
    }
    for bureau in outliers {
        recommendations.push(format!(
            "{} disagrees with the other bureaus on several values; request verification from {}",
            bureau.label(),
            bureau.label()
        ));
    }

    recommendations
}
