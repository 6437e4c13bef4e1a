use super::super::domain::{Bureau, DisputeLetter, Severity, ValidationIssue};
use super::dispute_items::ReasonCode;

const CATEGORY: &str = "bureau_rules";

/// Score awarded to the item-limit factor when the letter carries too many items.
const OVER_LIMIT_FACTOR: f64 = 60.0;

/// Submission rules published by each bureau for electronic disputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BureauRules {
    pub bureau: Bureau,
    pub max_items: usize,
    pub requires_creditor_code: bool,
    pub unsupported_reasons: &'static [ReasonCode],
}

impl BureauRules {
    pub const fn for_bureau(bureau: Bureau) -> Self {
        match bureau {
            Bureau::Experian => Self {
                bureau,
                max_items: 10,
                requires_creditor_code: false,
                unsupported_reasons: &[],
            },
            Bureau::Equifax => Self {
                bureau,
                max_items: 8,
                requires_creditor_code: true,
                unsupported_reasons: &[ReasonCode::BankruptcyDischarged],
            },
            Bureau::TransUnion => Self {
                bureau,
                max_items: 12,
                requires_creditor_code: false,
                unsupported_reasons: &[ReasonCode::IncorrectPersonalInfo],
            },
        }
    }

    pub fn supports(&self, reason: ReasonCode) -> bool {
        !self.unsupported_reasons.contains(&reason)
    }
}

pub(super) struct BureauAudit {
    pub score: f64,
    pub issues: Vec<ValidationIssue>,
}

pub(super) fn audit(letter: &DisputeLetter) -> BureauAudit {
    let mut issues = Vec::new();

    let Some(bureau) = letter.target_bureau() else {
        issues.push(
            ValidationIssue::error(
                Severity::High,
                CATEGORY,
                "bureau",
                "target bureau is missing or not one of experian, equifax, transunion",
            )
            .with_suggestion("Set the letter's bureau before submission"),
        );
        return BureauAudit { score: 0.0, issues };
    };

    let rules = BureauRules::for_bureau(bureau);
    let items = &letter.dispute_items;

    let limit_factor = if items.len() > rules.max_items {
        issues.push(
            ValidationIssue::error(
                Severity::High,
                CATEGORY,
                "disputeItems",
                format!(
                    "{} dispute items exceed the {} limit of {} per submission",
                    items.len(),
                    bureau.label(),
                    rules.max_items
                ),
            )
            .with_suggestion(format!(
                "Split the dispute into batches of at most {} items",
                rules.max_items
            )),
        );
        OVER_LIMIT_FACTOR
    } else {
        100.0
    };

    let coverage_factor = if rules.requires_creditor_code && !items.is_empty() {
        let coded = items
            .iter()
            .filter(|item| {
                item.creditor_code
                    .as_deref()
                    .is_some_and(|code| !code.trim().is_empty())
            })
            .count();
        if coded < items.len() {
            issues.push(
                ValidationIssue::error(
                    Severity::Medium,
                    CATEGORY,
                    "disputeItems.creditorCode",
                    format!(
                        "{} requires creditor codes; {} of {} items have one",
                        bureau.label(),
                        coded,
                        items.len()
                    ),
                )
                .with_suggestion("Look up each furnisher's subscriber code"),
            );
        }
        coded as f64 / items.len() as f64 * 100.0
    } else {
        100.0
    };

    let support_factor = if items.is_empty() {
        100.0
    } else {
        let mut supported = 0;
        for (index, item) in items.iter().enumerate() {
            let reason = item.reason_code.as_deref().and_then(ReasonCode::parse);
            match reason {
                Some(reason) if !rules.supports(reason) => issues.push(ValidationIssue::error(
                    Severity::Medium,
                    CATEGORY,
                    format!("disputeItems[{index}].reasonCode"),
                    format!(
                        "{} does not accept reason {} on electronic disputes",
                        bureau.label(),
                        reason.code()
                    ),
                )),
                _ => supported += 1,
            }
        }
        supported as f64 / items.len() as f64 * 100.0
    };

    BureauAudit {
        score: (limit_factor + coverage_factor + support_factor) / 3.0,
        issues,
    }
}
