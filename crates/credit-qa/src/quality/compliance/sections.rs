use std::collections::{BTreeMap, BTreeSet};

use super::super::dates::{days_between, parse_iso_date};
use super::super::domain::{Bureau, DisputeItem, DisputeLetter, Severity, ValidationIssue};
use super::descriptors::{self, FieldRule, RuleCheck};
use super::dispute_items::{sequence_is_contiguous, ReasonCode, RequestedAction};
use super::LetterSection;

const SEQUENCE_PENALTY: f64 = 10.0;
const DUPLICATE_PENALTY: f64 = 10.0;
/// FCRA §611 investigation window.
const RESPONSE_WINDOW_DAYS: i64 = 30;

/// Requirement tally for one section, or for one repeating entry inside it.
#[derive(Debug, Default)]
struct SectionAudit {
    requirements: usize,
    failures: usize,
    required_fields: usize,
    required_present: usize,
    format_checked: usize,
    format_passed: usize,
    issues: Vec<ValidationIssue>,
}

impl SectionAudit {
    fn apply<T>(&mut self, category: &str, prefix: &str, entity: &T, rules: &[FieldRule<T>]) {
        for rule in rules {
            let path = format!("{prefix}.{}", rule.field);
            self.custom(category, &path, rule.required, rule.check(entity));
        }
    }

    /// Record one requirement that is not a plain field descriptor.
    fn custom(&mut self, category: &str, path: &str, required: bool, check: RuleCheck) {
        self.requirements += 1;
        if required {
            self.required_fields += 1;
        }

        match check {
            RuleCheck::Absent if required => {
                self.failures += 1;
                self.issues.push(
                    ValidationIssue::error(
                        Severity::High,
                        category,
                        path,
                        format!("required field {path} is missing"),
                    )
                    .with_suggestion("Populate the field before transmission"),
                );
            }
            RuleCheck::Absent => {}
            RuleCheck::Passed => {
                if required {
                    self.required_present += 1;
                }
                self.format_checked += 1;
                self.format_passed += 1;
            }
            RuleCheck::Failed(reason) => {
                self.failures += 1;
                self.format_checked += 1;
                let message = format!("{path} {reason}");
                if required {
                    self.required_present += 1;
                    self.issues.push(ValidationIssue::error(
                        Severity::Medium,
                        category,
                        path,
                        message,
                    ));
                } else {
                    self.issues.push(ValidationIssue::warning(
                        Severity::Low,
                        category,
                        path,
                        message,
                    ));
                }
            }
        }
    }

    /// Record a cross-field constraint; a violation is always an error.
    fn constraint(&mut self, category: &str, path: &str, outcome: Result<(), String>) {
        self.requirements += 1;
        self.format_checked += 1;
        match outcome {
            Ok(()) => self.format_passed += 1,
            Err(reason) => {
                self.failures += 1;
                self.issues.push(ValidationIssue::error(
                    Severity::Medium,
                    category,
                    path,
                    format!("{path} {reason}"),
                ));
            }
        }
    }

    fn score(&self) -> f64 {
        if self.requirements == 0 {
            return 100.0;
        }
        let share = 100.0 / self.requirements as f64;
        100.0 - self.failures as f64 * share
    }

    fn required_share(&self) -> f64 {
        if self.required_fields == 0 {
            1.0
        } else {
            self.required_present as f64 / self.required_fields as f64
        }
    }
}

/// Outcome for one letter section, ready for the compliance roll-up.
#[derive(Debug)]
pub(super) struct SectionResult {
    pub section: LetterSection,
    pub score: f64,
    pub required_share: f64,
    pub format_checked: usize,
    pub format_passed: usize,
    pub issues: Vec<ValidationIssue>,
}

impl SectionResult {
    fn from_audit(section: LetterSection, audit: SectionAudit) -> Self {
        Self {
            section,
            score: audit.score(),
            required_share: audit.required_share(),
            format_checked: audit.format_checked,
            format_passed: audit.format_passed,
            issues: audit.issues,
        }
    }

    fn missing(section: LetterSection) -> Self {
        let key = section.key();
        Self {
            section,
            score: 0.0,
            required_share: 0.0,
            format_checked: 0,
            format_passed: 0,
            issues: vec![ValidationIssue::error(
                Severity::High,
                key,
                key,
                format!("required section {key} is missing"),
            )
            .with_suggestion(format!("Add the {} section to the letter", section.label()))],
        }
    }
}

pub(super) fn header(letter: &DisputeLetter) -> SectionResult {
    let section = LetterSection::Header;
    let Some(header) = letter.header.as_ref() else {
        return SectionResult::missing(section);
    };

    let mut audit = SectionAudit::default();
    audit.apply(
        section.key(),
        section.key(),
        header,
        &descriptors::header_rules(),
    );

    let declared = header
        .target_bureau
        .as_deref()
        .and_then(Bureau::parse);
    if let (Some(explicit), Some(declared)) = (letter.bureau, declared) {
        if explicit != declared {
            audit.issues.push(ValidationIssue::warning(
                Severity::Medium,
                section.key(),
                "header.targetBureau",
                format!(
                    "header targets {} but the letter is addressed to {}",
                    declared.label(),
                    explicit.label()
                ),
            ));
        }
    }

    SectionResult::from_audit(section, audit)
}

pub(super) fn consumer_info(letter: &DisputeLetter) -> SectionResult {
    let section = LetterSection::ConsumerInfo;
    let Some(consumer) = letter.consumer_info.as_ref() else {
        return SectionResult::missing(section);
    };

    let mut audit = SectionAudit::default();
    audit.apply(
        section.key(),
        section.key(),
        consumer,
        &descriptors::consumer_rules(),
    );
    SectionResult::from_audit(section, audit)
}

fn non_negative(balance: Option<f64>) -> bool {
    balance.map_or(true, |value| value.is_finite() && value >= 0.0)
}

fn audit_item(index: usize, item: &DisputeItem, doc_ids: &BTreeSet<&str>) -> SectionAudit {
    let category = LetterSection::DisputeItems.key();
    let prefix = format!("disputeItems[{index}]");
    let mut audit = SectionAudit::default();
    audit.apply(category, &prefix, item, &descriptors::dispute_item_rules());

    let reason = item.reason_code.as_deref().and_then(ReasonCode::parse);
    let action = item.requested_action.as_deref().and_then(RequestedAction::parse);
    let pairing = match (reason, action) {
        (Some(reason), Some(action)) if !reason.accepts(action) => {
            let allowed: Vec<&str> = reason
                .compatible_actions()
                .iter()
                .map(|action| action.code())
                .collect();
            Err(format!(
                "pairs {} with {}; allowed actions are {}",
                reason.code(),
                action.code(),
                allowed.join(", ")
            ))
        }
        _ => Ok(()),
    };
    audit.constraint(category, &format!("{prefix}.requestedAction"), pairing);

    let balances = if non_negative(item.current_balance) && non_negative(item.reported_balance) {
        Ok(())
    } else {
        Err("carries a negative balance".to_string())
    };
    audit.constraint(category, &format!("{prefix}.balances"), balances);

    for reference in &item.supporting_doc_refs {
        if !doc_ids.contains(reference.trim()) {
            audit.issues.push(ValidationIssue::warning(
                Severity::Low,
                category,
                format!("{prefix}.supportingDocRefs"),
                format!("references supporting document '{reference}' that is not attached"),
            ));
        }
    }

    audit
}

pub(super) fn dispute_items(letter: &DisputeLetter) -> SectionResult {
    let section = LetterSection::DisputeItems;
    let category = section.key();
    if letter.dispute_items.is_empty() {
        return SectionResult::missing(section);
    }

    let doc_ids: BTreeSet<&str> = letter
        .supporting_docs
        .iter()
        .filter_map(|doc| doc.doc_id.as_deref())
        .map(str::trim)
        .collect();

    let mut issues = Vec::new();
    let mut item_scores = 0.0;
    let mut required_shares = 0.0;
    let mut format_checked = 0;
    let mut format_passed = 0;

    for (index, item) in letter.dispute_items.iter().enumerate() {
        let audit = audit_item(index, item, &doc_ids);
        item_scores += audit.score();
        required_shares += audit.required_share();
        format_checked += audit.format_checked;
        format_passed += audit.format_passed;
        issues.extend(audit.issues);
    }

    let count = letter.dispute_items.len() as f64;
    let mut score = item_scores / count;

    let sequence: Vec<Option<u32>> = letter
        .dispute_items
        .iter()
        .map(|item| item.sequence_number)
        .collect();
    if !sequence_is_contiguous(&sequence) {
        score -= SEQUENCE_PENALTY;
        issues.push(
            ValidationIssue::error(
                Severity::Medium,
                category,
                "disputeItems.sequenceNumber",
                format!(
                    "sequence numbers must run 1..{} without gaps or repeats",
                    sequence.len()
                ),
            )
            .with_suggestion("Renumber the dispute items consecutively from 1"),
        );
    }

    let mut signatures: BTreeMap<String, usize> = BTreeMap::new();
    for (index, item) in letter.dispute_items.iter().enumerate() {
        let signature = item.signature();
        if let Some(first) = signatures.get(&signature).copied() {
            score -= DUPLICATE_PENALTY;
            issues.push(
                ValidationIssue::error(
                    Severity::Medium,
                    category,
                    format!("disputeItems[{index}]"),
                    format!("duplicates disputeItems[{first}] (same creditor, account and reason)"),
                )
                .with_suggestion("Remove the repeated dispute item"),
            );
        } else {
            signatures.insert(signature, index);
        }
    }

    SectionResult {
        section,
        score,
        required_share: required_shares / count,
        format_checked,
        format_passed,
        issues,
    }
}

pub(super) fn supporting_docs(letter: &DisputeLetter) -> SectionResult {
    let section = LetterSection::SupportingDocs;
    if letter.supporting_docs.is_empty() {
        return SectionResult::from_audit(section, SectionAudit::default());
    }

    let rules = descriptors::supporting_doc_rules();
    let mut scores = 0.0;
    let mut merged = SectionAudit::default();
    for (index, doc) in letter.supporting_docs.iter().enumerate() {
        let mut audit = SectionAudit::default();
        audit.apply(
            section.key(),
            &format!("supportingDocs[{index}]"),
            doc,
            &rules,
        );
        scores += audit.score();
        merged.format_checked += audit.format_checked;
        merged.format_passed += audit.format_passed;
        merged.issues.append(&mut audit.issues);
    }

    SectionResult {
        section,
        score: scores / letter.supporting_docs.len() as f64,
        required_share: 1.0,
        format_checked: merged.format_checked,
        format_passed: merged.format_passed,
        issues: merged.issues,
    }
}

pub(super) fn footer(letter: &DisputeLetter) -> SectionResult {
    let section = LetterSection::Footer;
    let category = section.key();
    let Some(footer) = letter.footer.as_ref() else {
        return SectionResult::missing(section);
    };

    let mut audit = SectionAudit::default();
    audit.apply(category, category, footer, &descriptors::footer_rules());

    let item_count = letter.dispute_items.len();
    let total_items = match footer.total_items {
        None => RuleCheck::Absent,
        Some(total) if total as usize == item_count => RuleCheck::Passed,
        Some(total) => RuleCheck::Failed(format!(
            "declares {total} items but the letter carries {item_count}"
        )),
    };
    audit.custom(category, "footer.totalItems", true, total_items);

    let submitted = footer
        .submission_date
        .as_deref()
        .or_else(|| {
            letter
                .header
                .as_ref()
                .and_then(|header| header.submission_date.as_deref())
        })
        .and_then(parse_iso_date);
    let expected = footer
        .expected_response_date
        .as_deref()
        .and_then(parse_iso_date);

    if let (Some(submitted), Some(expected)) = (submitted, expected) {
        let window = days_between(submitted, expected);
        let ordering = if window < 0 {
            Err(format!("{expected} precedes the submission date {submitted}"))
        } else {
            Ok(())
        };
        audit.constraint(category, "footer.expectedResponseDate", ordering);

        if window > RESPONSE_WINDOW_DAYS {
            audit.issues.push(ValidationIssue::warning(
                Severity::Low,
                category,
                "footer.expectedResponseDate",
                format!(
                    "expected response {window} days after submission exceeds the {RESPONSE_WINDOW_DAYS}-day investigation window"
                ),
            ));
        }
    }

    SectionResult::from_audit(section, audit)
}
