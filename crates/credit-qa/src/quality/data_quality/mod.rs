//! Factual plausibility and format validity of each report section.

mod rules;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{clamp_score, round1, CreditReport, ReportSection, ValidationIssue};
use rules::SectionOutcome;

/// Section weights for the overall accuracy roll-up.
pub const SECTION_WEIGHTS: [(ReportSection, f64); 6] = [
    (ReportSection::PersonalInfo, 0.20),
    (ReportSection::CreditScores, 0.25),
    (ReportSection::Accounts, 0.25),
    (ReportSection::NegativeItems, 0.15),
    (ReportSection::Inquiries, 0.10),
    (ReportSection::PublicRecords, 0.05),
];

/// Score below which a section earns a targeted recommendation.
const SECTION_RECOMMENDATION_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMetric {
    pub section: ReportSection,
    pub score: f64,
    pub validated_fields: usize,
    pub failed_fields: usize,
    pub issue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub overall_score: f64,
    pub section_metrics: Vec<SectionMetric>,
    pub issues: Vec<ValidationIssue>,
    pub recommendations: Vec<String>,
    pub validated_fields: Vec<String>,
    pub failed_fields: Vec<String>,
}

impl DataQualityReport {
    pub fn section_score(&self, section: ReportSection) -> Option<f64> {
        self.section_metrics
            .iter()
            .find(|metric| metric.section == section)
            .map(|metric| metric.score)
    }
}

/// Stateless validator applying the point-budget rubric to every section.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataQualityValidator;

impl DataQualityValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, report: &CreditReport, today: NaiveDate) -> DataQualityReport {
        let mut section_metrics = Vec::with_capacity(SECTION_WEIGHTS.len());
        let mut issues = Vec::new();
        let mut validated_fields = Vec::new();
        let mut failed_fields = Vec::new();
        let mut overall = 0.0;

        for (section, weight) in SECTION_WEIGHTS {
            let (outcome, score) = score_section(section, report, today);
            let score = round1(clamp_score(score));
            overall += score * weight;

            let mut validated = 0;
            let mut failed = 0;
            for field in &outcome.fields {
                if field.passed() {
                    validated += 1;
                    validated_fields.push(field.field.clone());
                } else {
                    failed += 1;
                    failed_fields.push(field.field.clone());
                }
            }

            section_metrics.push(SectionMetric {
                section,
                score,
                validated_fields: validated,
                failed_fields: failed,
                issue_count: outcome.issues.len(),
            });
            issues.extend(outcome.issues);
        }

        let overall_score = round1(clamp_score(overall));
        let recommendations = build_recommendations(report, &section_metrics, &failed_fields);

        DataQualityReport {
            overall_score,
            section_metrics,
            issues,
            recommendations,
            validated_fields,
            failed_fields,
        }
    }
}

fn score_section(
    section: ReportSection,
    report: &CreditReport,
    today: NaiveDate,
) -> (SectionOutcome, f64) {
    match section {
        ReportSection::PersonalInfo => {
            let outcome = rules::score_personal_info(&report.personal_info, today);
            let score = outcome.percentage().unwrap_or(0.0);
            (outcome, score)
        }
        ReportSection::CreditScores => {
            let (outcome, score) = rules::score_credit_scores(&report.credit_scores, today);
            (outcome, score.unwrap_or(0.0))
        }
        ReportSection::Accounts => {
            let mut outcome = average_entries(report.accounts.iter().enumerate().map(
                |(index, account)| rules::score_account(index, account, today),
            ));
            if report.accounts.is_empty() {
                outcome.0.issues.push(ValidationIssue::info(
                    "accounts",
                    "accounts",
                    "no accounts were extracted; tradeline accuracy cannot be verified",
                ));
            }
            outcome
        }
        ReportSection::NegativeItems => average_entries(
            report
                .negative_items
                .iter()
                .enumerate()
                .map(|(index, item)| rules::score_negative_item(index, item, today)),
        ),
        ReportSection::Inquiries => average_entries(
            report
                .inquiries
                .iter()
                .enumerate()
                .map(|(index, inquiry)| rules::score_inquiry(index, inquiry, today)),
        ),
        ReportSection::PublicRecords => average_entries(
            report
                .public_records
                .iter()
                .enumerate()
                .map(|(index, record)| rules::score_public_record(index, record, today)),
        ),
    }
}

/// Mean entry score for a repeating section; an empty section is neutral.
fn average_entries(entries: impl Iterator<Item = SectionOutcome>) -> (SectionOutcome, f64) {
    let mut merged = SectionOutcome::default();
    let mut scores = Vec::new();

    for entry in entries {
        if let Some(pct) = entry.percentage() {
            scores.push(pct);
        }
        merged.fields.extend(entry.fields);
        merged.issues.extend(entry.issues);
    }

    let score = if scores.is_empty() {
        100.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };
    (merged, score)
}

fn build_recommendations(
    report: &CreditReport,
    metrics: &[SectionMetric],
    failed_fields: &[String],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for metric in metrics {
        if metric.score >= SECTION_RECOMMENDATION_THRESHOLD {
            continue;
        }
        let advice = match metric.section {
            ReportSection::PersonalInfo => {
                "Re-verify personal information (name, address, SSN) against the report header"
            }
            ReportSection::CreditScores => {
                "Extract a dated, bureau-tagged score for each bureau from the score summary"
            }
            ReportSection::Accounts => {
                "Review tradeline extraction for missing balances, limits and open dates"
            }
            ReportSection::NegativeItems => {
                "Confirm negative item types, amounts and dates against the adverse section"
            }
            ReportSection::Inquiries => "Capture creditor, date and hard/soft type for inquiries",
            ReportSection::PublicRecords => {
                "Verify public record types, filing dates and current status"
            }
        };
        recommendations.push(format!(
            "{} ({} scored {:.0})",
            advice,
            metric.section.label(),
            metric.score
        ));
    }

    if !failed_fields.is_empty() {
        recommendations.push(format!(
            "Manually review {} field{} that failed validation",
            failed_fields.len(),
            if failed_fields.len() == 1 { "" } else { "s" }
        ));
    }

    let low_confidence = report
        .personal_info
        .confidence
        .name
        .into_iter()
        .chain(report.personal_info.confidence.address)
        .chain(report.personal_info.confidence.ssn)
        .any(|value| value < 0.6);
    if low_confidence {
        recommendations.push(
            "Extraction confidence is low for identity fields; route to human verification"
                .to_string(),
        );
    }

    recommendations
}
