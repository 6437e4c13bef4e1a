//! Presence and coverage of required, important and optional fields.

mod requirements;

pub use requirements::RequirementLevel;

use serde::{Deserialize, Serialize};

use super::domain::{
    clamp_score, round1, CreditReport, ReportSection, Severity, ValidationIssue,
};
use requirements::FieldRequirement;

/// Section weights for the overall completeness roll-up.
pub const SECTION_WEIGHTS: [(ReportSection, f64); 6] = [
    (ReportSection::PersonalInfo, 0.25),
    (ReportSection::CreditScores, 0.30),
    (ReportSection::Accounts, 0.25),
    (ReportSection::NegativeItems, 0.10),
    (ReportSection::Inquiries, 0.05),
    (ReportSection::PublicRecords, 0.05),
];

/// Completeness assigned to a report that carries no tradelines at all.
const EMPTY_ACCOUNTS_COMPLETENESS: f64 = 50.0;

const CATEGORY: &str = "completeness";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCompleteness {
    pub section: ReportSection,
    pub completeness: f64,
    pub entries: usize,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub overall_completeness: f64,
    pub section_completeness: Vec<SectionCompleteness>,
    pub critical_missing: Vec<String>,
    pub optional_missing: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    pub recommendations: Vec<String>,
}

impl CompletenessReport {
    pub fn section(&self, section: ReportSection) -> Option<&SectionCompleteness> {
        self.section_completeness
            .iter()
            .find(|entry| entry.section == section)
    }
}

/// Tally of one section's requirement checks before the roll-up.
#[derive(Default)]
struct SectionTally {
    missing: Vec<(String, RequirementLevel)>,
    issues: Vec<ValidationIssue>,
}

impl SectionTally {
    /// Apply a requirement table to one entity and return the satisfied share in percent.
    fn check<T>(&mut self, prefix: &str, entity: &T, table: &[FieldRequirement<T>]) -> f64 {
        let total: f64 = table.iter().map(|requirement| requirement.weight).sum();
        let mut satisfied = 0.0;

        for requirement in table {
            if (requirement.value)(entity).is_complete() {
                satisfied += requirement.weight;
                continue;
            }

            let path = format!("{prefix}.{}", requirement.field);
            self.issues.push(missing_issue(&path, requirement.level));
            self.missing.push((path, requirement.level));
        }

        if total > 0.0 {
            satisfied / total * 100.0
        } else {
            100.0
        }
    }

    /// Apply a table to each entry of a repeating section and average the results.
    fn check_all<T>(
        &mut self,
        key: &str,
        entries: &[T],
        table: &[FieldRequirement<T>],
    ) -> Option<f64> {
        if entries.is_empty() {
            return None;
        }

        let sum: f64 = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.check(&format!("{key}[{index}]"), entry, table))
            .sum();
        Some(sum / entries.len() as f64)
    }
}

fn missing_issue(path: &str, level: RequirementLevel) -> ValidationIssue {
    match level {
        RequirementLevel::Critical => ValidationIssue::error(
            Severity::High,
            CATEGORY,
            path,
            format!("critical field {path} is missing"),
        )
        .with_suggestion("Re-run extraction for this field before relying on the record"),
        RequirementLevel::Important => ValidationIssue::warning(
            Severity::Medium,
            CATEGORY,
            path,
            format!("important field {path} is missing"),
        ),
        RequirementLevel::Optional => {
            ValidationIssue::info(CATEGORY, path, format!("optional field {path} is absent"))
        }
    }
}

/// Stateless validator walking the requirement tables for every section.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletenessValidator;

impl CompletenessValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, report: &CreditReport) -> CompletenessReport {
        let mut section_completeness = Vec::with_capacity(SECTION_WEIGHTS.len());
        let mut critical_missing = Vec::new();
        let mut optional_missing = Vec::new();
        let mut issues = Vec::new();
        let mut overall = 0.0;

        for (section, weight) in SECTION_WEIGHTS {
            let mut tally = SectionTally::default();
            let key = section.key();
            let (completeness, entries) = match section {
                ReportSection::PersonalInfo => (
                    tally.check(
                        key,
                        &report.personal_info,
                        &requirements::personal_info_requirements(),
                    ),
                    1,
                ),
                ReportSection::CreditScores => (
                    tally.check(
                        key,
                        &report.credit_scores,
                        &requirements::credit_score_requirements(),
                    ),
                    report.credit_scores.entries().count(),
                ),
                ReportSection::Accounts => {
                    let score = tally.check_all(
                        key,
                        &report.accounts,
                        &requirements::account_requirements(),
                    );
                    let score = score.unwrap_or_else(|| {
                        tally.issues.push(
                            ValidationIssue::warning(
                                Severity::Medium,
                                CATEGORY,
                                key,
                                "no accounts were extracted from the report",
                            )
                            .with_suggestion("Confirm the report has no tradelines or re-extract"),
                        );
                        EMPTY_ACCOUNTS_COMPLETENESS
                    });
                    (score, report.accounts.len())
                }
                ReportSection::NegativeItems => (
                    tally
                        .check_all(
                            key,
                            &report.negative_items,
                            &requirements::negative_item_requirements(),
                        )
                        .unwrap_or(100.0),
                    report.negative_items.len(),
                ),
                ReportSection::Inquiries => (
                    tally
                        .check_all(
                            key,
                            &report.inquiries,
                            &requirements::inquiry_requirements(),
                        )
                        .unwrap_or(100.0),
                    report.inquiries.len(),
                ),
                ReportSection::PublicRecords => (
                    tally
                        .check_all(
                            key,
                            &report.public_records,
                            &requirements::public_record_requirements(),
                        )
                        .unwrap_or(100.0),
                    report.public_records.len(),
                ),
            };

            let completeness = round1(clamp_score(completeness));
            overall += completeness * weight;

            let mut missing_fields = Vec::with_capacity(tally.missing.len());
            for (path, level) in tally.missing {
                match level {
                    RequirementLevel::Critical => critical_missing.push(path.clone()),
                    RequirementLevel::Optional => optional_missing.push(path.clone()),
                    RequirementLevel::Important => {}
                }
                missing_fields.push(path);
            }

            section_completeness.push(SectionCompleteness {
                section,
                completeness,
                entries,
                missing_fields,
            });
            issues.extend(tally.issues);
        }

        let overall_completeness = round1(clamp_score(overall));
        let recommendations =
            build_recommendations(&section_completeness, &critical_missing, &optional_missing);

        CompletenessReport {
            overall_completeness,
            section_completeness,
            critical_missing,
            optional_missing,
            issues,
            recommendations,
        }
    }
}

fn build_recommendations(
    sections: &[SectionCompleteness],
    critical_missing: &[String],
    optional_missing: &[String],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !critical_missing.is_empty() {
        let preview: Vec<&str> = critical_missing.iter().take(3).map(String::as_str).collect();
        let remainder = critical_missing.len().saturating_sub(preview.len());
        let mut line = format!("Recover critical fields: {}", preview.join(", "));
        if remainder > 0 {
            line.push_str(&format!(" and {remainder} more"));
        }
        recommendations.push(line);
    }

    for entry in sections.iter().filter(|entry| entry.completeness < 80.0) {
        recommendations.push(format!(
            "Raise {} completeness from {:.0}% by re-extracting its missing fields",
            entry.section.label(),
            entry.completeness
        ));
    }

    if optional_missing.len() > 5 {
        recommendations.push(format!(
            "{} optional fields are absent; enrich the record where the source document allows",
            optional_missing.len()
        ));
    }

    recommendations
}
