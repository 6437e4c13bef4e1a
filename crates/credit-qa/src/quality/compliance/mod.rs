//! Structural compliance of a dispute letter with the e-OSCAR submission format.

mod bureau_rules;
mod descriptors;
mod dispute_items;
mod sections;

pub use bureau_rules::BureauRules;
pub use dispute_items::{ReasonCode, RequestedAction};

use serde::{Deserialize, Serialize};

use super::domain::{clamp_score, round1, DisputeLetter, IssueKind, ValidationIssue};
use sections::SectionResult;

const SECTION_WEIGHT: f64 = 0.40;
const REQUIRED_FIELDS_WEIGHT: f64 = 0.25;
const FORMAT_WEIGHT: f64 = 0.20;
const BUREAU_WEIGHT: f64 = 0.15;

/// Points each required section contributes to required-field compliance.
const REQUIRED_SECTION_POINTS: f64 = 25.0;

/// Minimum compliance score for a letter to be submitted.
pub const COMPLIANT_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LetterSection {
    Header,
    ConsumerInfo,
    DisputeItems,
    SupportingDocs,
    Footer,
}

impl LetterSection {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Header,
            Self::ConsumerInfo,
            Self::DisputeItems,
            Self::SupportingDocs,
            Self::Footer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::ConsumerInfo => "Consumer Information",
            Self::DisputeItems => "Dispute Items",
            Self::SupportingDocs => "Supporting Documents",
            Self::Footer => "Footer",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::ConsumerInfo => "consumerInfo",
            Self::DisputeItems => "disputeItems",
            Self::SupportingDocs => "supportingDocs",
            Self::Footer => "footer",
        }
    }

    /// Sections whose absence makes the letter unsubmittable.
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::SupportingDocs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplianceGrade {
    A,
    B,
    C,
    D,
    F,
}

impl ComplianceGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            Self::A
        } else if score >= 85.0 {
            Self::B
        } else if score >= 75.0 {
            Self::C
        } else if score >= 65.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCompliance {
    pub section: LetterSection,
    pub score: f64,
    pub issue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub is_compliant: bool,
    pub compliance_score: f64,
    pub overall_grade: ComplianceGrade,
    pub section_compliance: Vec<SectionCompliance>,
    pub required_fields_compliance: f64,
    pub format_compliance: f64,
    pub bureau_specific_compliance: f64,
    /// Errors; any high-severity entry blocks submission.
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub recommendations: Vec<String>,
}

impl ComplianceReport {
    pub fn section(&self, section: LetterSection) -> Option<&SectionCompliance> {
        self.section_compliance
            .iter()
            .find(|entry| entry.section == section)
    }
}

/// Stateless validator for dispute letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceValidator;

impl ComplianceValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, letter: &DisputeLetter) -> ComplianceReport {
        let results: Vec<SectionResult> = vec![
            sections::header(letter),
            sections::consumer_info(letter),
            sections::dispute_items(letter),
            sections::supporting_docs(letter),
            sections::footer(letter),
        ];

        let section_average =
            results.iter().map(|result| clamp_score(result.score)).sum::<f64>() / results.len() as f64;

        let required_fields_compliance = round1(clamp_score(
            results
                .iter()
                .filter(|result| result.section.is_required())
                .map(|result| REQUIRED_SECTION_POINTS * result.required_share)
                .sum(),
        ));

        let (checked, passed) = results.iter().fold((0, 0), |(checked, passed), result| {
            (checked + result.format_checked, passed + result.format_passed)
        });
        let format_compliance = if checked == 0 {
            100.0
        } else {
            round1(passed as f64 / checked as f64 * 100.0)
        };

        let bureau = bureau_rules::audit(letter);
        let bureau_specific_compliance = round1(clamp_score(bureau.score));

        let compliance_score = round1(clamp_score(
            section_average * SECTION_WEIGHT
                + required_fields_compliance * REQUIRED_FIELDS_WEIGHT
                + format_compliance * FORMAT_WEIGHT
                + bureau_specific_compliance * BUREAU_WEIGHT,
        ));
        let overall_grade = ComplianceGrade::from_score(compliance_score);

        let mut section_compliance = Vec::with_capacity(results.len());
        let mut issues = Vec::new();
        let mut warnings = Vec::new();
        for result in results {
            section_compliance.push(SectionCompliance {
                section: result.section,
                score: round1(clamp_score(result.score)),
                issue_count: result.issues.len(),
            });
            for issue in result.issues {
                route(issue, &mut issues, &mut warnings);
            }
        }
        for issue in bureau.issues {
            route(issue, &mut issues, &mut warnings);
        }

        let recommendations = build_recommendations(
            &section_compliance,
            required_fields_compliance,
            bureau_specific_compliance,
            compliance_score,
        );

        ComplianceReport {
            is_compliant: compliance_score >= COMPLIANT_THRESHOLD,
            compliance_score,
            overall_grade,
            section_compliance,
            required_fields_compliance,
            format_compliance,
            bureau_specific_compliance,
            issues,
            warnings,
            recommendations,
        }
    }
}

fn route(issue: ValidationIssue, issues: &mut Vec<ValidationIssue>, warnings: &mut Vec<ValidationIssue>) {
    match issue.kind {
        IssueKind::Error => issues.push(issue),
        IssueKind::Warning | IssueKind::Info => warnings.push(issue),
    }
}

fn build_recommendations(
    sections: &[SectionCompliance],
    required_fields: f64,
    bureau_specific: f64,
    score: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if required_fields < 100.0 {
        recommendations.push(
            "Complete every required field in the header, consumer, dispute item and footer sections"
                .to_string(),
        );
    }

    for entry in sections.iter().filter(|entry| entry.score < 85.0) {
        recommendations.push(format!(
            "Fix the {} section ({} issue{}, scored {:.0})",
            entry.section.label(),
            entry.issue_count,
            if entry.issue_count == 1 { "" } else { "s" },
            entry.score
        ));
    }

    if bureau_specific < 100.0 {
        recommendations
            .push("Adjust the letter to the target bureau's item limit and code rules".to_string());
    }

    if score < COMPLIANT_THRESHOLD {
        recommendations.push(format!(
            "Hold the letter: compliance {score:.0} is below the submission threshold of {COMPLIANT_THRESHOLD:.0}"
        ));
    }

    recommendations
}
