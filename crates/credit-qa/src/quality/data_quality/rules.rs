use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::super::dates::{parse_month, parse_optional, parse_report_date, years_between};
use super::super::domain::{
    AccountStatus, AccountType, CreditAccount, CreditScores, Inquiry, NegativeItem,
    NegativeItemType, PersonalInfo, PublicRecord, PublicRecordType, Severity, ValidationIssue,
};

/// Share of a field's point budget required for the field to count as validated.
pub(crate) const FIELD_VALIDITY_THRESHOLD: f64 = 0.7;

const CONFIDENCE_BONUS_THRESHOLD: f32 = 0.8;

static SSN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-?\d{2}-?\d{4}$").expect("valid SSN pattern"));

static ACCOUNT_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9*\- ]{4,}$").expect("valid account pattern"));

/// Points earned by one field against its budget.
#[derive(Debug, Clone)]
pub(crate) struct FieldScore {
    pub field: String,
    pub earned: f64,
    pub max: f64,
}

impl FieldScore {
    pub fn passed(&self) -> bool {
        self.max <= 0.0 || self.earned / self.max >= FIELD_VALIDITY_THRESHOLD
    }
}

/// Accumulated rubric result for one section or one repeating entry.
#[derive(Debug, Default)]
pub(crate) struct SectionOutcome {
    pub fields: Vec<FieldScore>,
    pub issues: Vec<ValidationIssue>,
}

impl SectionOutcome {
    fn award(&mut self, field: impl Into<String>, earned: f64, max: f64) {
        self.fields.push(FieldScore {
            field: field.into(),
            earned: earned.min(max),
            max,
        });
    }

    fn flag(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    fn absorb(&mut self, other: SectionOutcome) {
        self.fields.extend(other.fields);
        self.issues.extend(other.issues);
    }

    /// Percentage of the point budget earned, or `None` when nothing was scored.
    pub fn percentage(&self) -> Option<f64> {
        let max: f64 = self.fields.iter().map(|field| field.max).sum();
        if max <= 0.0 {
            return None;
        }
        let earned: f64 = self.fields.iter().map(|field| field.earned).sum();
        Some(earned / max * 100.0)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|raw| !raw.is_empty())
}

fn confident(confidence: Option<f32>) -> bool {
    confidence.is_some_and(|value| value >= CONFIDENCE_BONUS_THRESHOLD)
}

fn valid_ssn(raw: &str) -> bool {
    if !SSN_PATTERN.is_match(raw) {
        return false;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let (area, rest) = digits.split_at(3);
    let group = &rest[..2];
    area != "000" && group != "00"
}

fn valid_phone(raw: &str) -> bool {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
}

/// Check a dated field; returns the earned fraction of its budget.
fn score_date(
    outcome: &mut SectionOutcome,
    field: &str,
    raw: Option<&str>,
    today: NaiveDate,
    category: &str,
    required: bool,
) -> f64 {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => {
            if required {
                outcome.flag(
                    ValidationIssue::warning(Severity::Low, category, field, "date is missing")
                        .with_suggestion("Re-run extraction on the section that carries this date"),
                );
            }
            0.0
        }
        Some(value) => match parse_report_date(value) {
            Some(date) if date > today => {
                outcome.flag(
                    ValidationIssue::error(
                        Severity::Medium,
                        category,
                        field,
                        format!("date {value} lies in the future"),
                    )
                    .with_suggestion("Check the extracted date for transposed digits"),
                );
                0.0
            }
            Some(_) => 1.0,
            None => {
                outcome.flag(
                    ValidationIssue::warning(
                        Severity::Low,
                        category,
                        field,
                        format!("'{value}' is not a recognised date"),
                    )
                    .with_suggestion("Normalise dates to YYYY-MM-DD or MM/DD/YYYY"),
                );
                0.0
            }
        },
    }
}

pub(crate) fn score_personal_info(info: &PersonalInfo, today: NaiveDate) -> SectionOutcome {
    const CATEGORY: &str = "personal_info";
    let mut outcome = SectionOutcome::default();

    match non_blank(&info.name) {
        Some(name) if name.chars().filter(|c| c.is_alphabetic()).count() >= 2 => {
            let bonus = if confident(info.confidence.name) { 5.0 } else { 0.0 };
            outcome.award("personalInfo.name", 20.0 + bonus, 25.0);
        }
        Some(name) => {
            outcome.award("personalInfo.name", 5.0, 25.0);
            outcome.flag(
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    "personalInfo.name",
                    format!("name '{name}' is too short to identify the consumer"),
                )
                .with_suggestion("Verify the consumer name against the report header"),
            );
        }
        None => {
            outcome.award("personalInfo.name", 0.0, 25.0);
            outcome.flag(
                ValidationIssue::error(
                    Severity::High,
                    CATEGORY,
                    "personalInfo.name",
                    "consumer name is missing",
                )
                .with_suggestion("Extract the consumer name from the report header"),
            );
        }
    }

    match non_blank(&info.address) {
        Some(address) => {
            let structured = address.len() >= 10 && address.chars().any(|c| c.is_ascii_digit());
            let base = if structured { 20.0 } else { 10.0 };
            let bonus = if confident(info.confidence.address) { 5.0 } else { 0.0 };
            outcome.award("personalInfo.address", base + bonus, 25.0);
            if !structured {
                outcome.flag(
                    ValidationIssue::warning(
                        Severity::Medium,
                        CATEGORY,
                        "personalInfo.address",
                        "address lacks a street number or is truncated",
                    )
                    .with_suggestion("Capture the full street, city, state and ZIP"),
                );
            }
        }
        None => {
            outcome.award("personalInfo.address", 0.0, 25.0);
            outcome.flag(
                ValidationIssue::error(
                    Severity::High,
                    CATEGORY,
                    "personalInfo.address",
                    "current address is missing",
                )
                .with_suggestion("Extract the current address from the personal information block"),
            );
        }
    }

    match non_blank(&info.ssn) {
        Some(ssn) if valid_ssn(ssn) => {
            let bonus = if confident(info.confidence.ssn) { 5.0 } else { 0.0 };
            outcome.award("personalInfo.ssn", 20.0 + bonus, 25.0);
        }
        Some(_) => {
            outcome.award("personalInfo.ssn", 0.0, 25.0);
            outcome.flag(
                ValidationIssue::error(
                    Severity::High,
                    CATEGORY,
                    "personalInfo.ssn",
                    "SSN does not match the XXX-XX-XXXX format or has an all-zero area or group",
                )
                .with_suggestion("Re-read the SSN; masked digits must be left out rather than guessed"),
            );
        }
        None => {
            outcome.award("personalInfo.ssn", 0.0, 25.0);
            outcome.flag(
                ValidationIssue::error(
                    Severity::High,
                    CATEGORY,
                    "personalInfo.ssn",
                    "SSN is missing",
                )
                .with_suggestion("Extract at least the SSN as printed on the report"),
            );
        }
    }

    match non_blank(&info.date_of_birth) {
        Some(raw) => match parse_report_date(raw) {
            Some(dob) => {
                let age = years_between(dob, today);
                if (18..=120).contains(&age) {
                    outcome.award("personalInfo.dateOfBirth", 15.0, 15.0);
                } else {
                    outcome.award("personalInfo.dateOfBirth", 5.0, 15.0);
                    outcome.flag(ValidationIssue::warning(
                        Severity::Medium,
                        CATEGORY,
                        "personalInfo.dateOfBirth",
                        format!("date of birth implies an implausible age of {age}"),
                    ));
                }
            }
            None => {
                outcome.award("personalInfo.dateOfBirth", 0.0, 15.0);
                outcome.flag(ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    "personalInfo.dateOfBirth",
                    format!("'{raw}' is not a recognised date of birth"),
                ));
            }
        },
        None => {
            outcome.award("personalInfo.dateOfBirth", 0.0, 15.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                "personalInfo.dateOfBirth",
                "date of birth is missing",
            ));
        }
    }

    match non_blank(&info.phone) {
        Some(phone) if valid_phone(phone) => outcome.award("personalInfo.phone", 10.0, 10.0),
        Some(phone) => {
            outcome.award("personalInfo.phone", 0.0, 10.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Low,
                CATEGORY,
                "personalInfo.phone",
                format!("phone '{phone}' is not a 10-digit number"),
            ));
        }
        None => {
            outcome.award("personalInfo.phone", 0.0, 10.0);
            outcome.flag(ValidationIssue::info(
                CATEGORY,
                "personalInfo.phone",
                "no phone number extracted",
            ));
        }
    }

    outcome
}

/// Score every present bureau slot; the section score is the mean of the slots.
pub(crate) fn score_credit_scores(
    scores: &CreditScores,
    today: NaiveDate,
) -> (SectionOutcome, Option<f64>) {
    const CATEGORY: &str = "credit_scores";
    let mut outcome = SectionOutcome::default();
    let mut slot_scores = Vec::new();

    for (bureau, slot) in scores.entries() {
        let mut slot_outcome = SectionOutcome::default();
        let prefix = format!("creditScores.{}", bureau.code());

        match slot.score {
            Some(score) if (300..=850).contains(&score) => {
                slot_outcome.award(format!("{prefix}.score"), 50.0, 50.0);
            }
            Some(score) => {
                slot_outcome.award(format!("{prefix}.score"), 0.0, 50.0);
                slot_outcome.flag(
                    ValidationIssue::error(
                        Severity::High,
                        CATEGORY,
                        format!("{prefix}.score"),
                        format!("{} score {score} is outside the 300-850 range", bureau.label()),
                    )
                    .with_suggestion("Confirm the score was not read from a different scale"),
                );
            }
            None => {
                slot_outcome.award(format!("{prefix}.score"), 0.0, 50.0);
                slot_outcome.flag(ValidationIssue::error(
                    Severity::High,
                    CATEGORY,
                    format!("{prefix}.score"),
                    format!("{} score slot has no value", bureau.label()),
                ));
            }
        }

        match slot.bureau {
            Some(tagged) if tagged == bureau => {
                slot_outcome.award(format!("{prefix}.bureau"), 20.0, 20.0);
            }
            Some(tagged) => {
                slot_outcome.award(format!("{prefix}.bureau"), 0.0, 20.0);
                slot_outcome.flag(ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    format!("{prefix}.bureau"),
                    format!(
                        "score stored under {} is tagged as {}",
                        bureau.label(),
                        tagged.label()
                    ),
                ));
            }
            None => {
                slot_outcome.award(format!("{prefix}.bureau"), 0.0, 20.0);
                slot_outcome.flag(ValidationIssue::warning(
                    Severity::Low,
                    CATEGORY,
                    format!("{prefix}.bureau"),
                    "score is not tagged with its bureau",
                ));
            }
        }

        let date_field = format!("{prefix}.date");
        let fraction = score_date(
            &mut slot_outcome,
            &date_field,
            slot.date.as_deref(),
            today,
            CATEGORY,
            true,
        );
        slot_outcome.award(date_field, 20.0 * fraction, 20.0);

        if non_blank(&slot.model).is_some() {
            slot_outcome.award(format!("{prefix}.model"), 10.0, 10.0);
        } else {
            slot_outcome.award(format!("{prefix}.model"), 0.0, 10.0);
            slot_outcome.flag(ValidationIssue::info(
                CATEGORY,
                format!("{prefix}.model"),
                "scoring model is not named",
            ));
        }

        if let Some(pct) = slot_outcome.percentage() {
            slot_scores.push(pct);
        }
        outcome.absorb(slot_outcome);
    }

    if slot_scores.is_empty() {
        outcome.flag(
            ValidationIssue::error(
                Severity::High,
                CATEGORY,
                "creditScores",
                "no bureau credit scores were extracted",
            )
            .with_suggestion("Locate the score summary page and extract each bureau's score"),
        );
        return (outcome, None);
    }

    let in_range: Vec<i32> = scores
        .entries()
        .filter_map(|(_, slot)| slot.score)
        .filter(|score| (300..=850).contains(score))
        .collect();
    if let (Some(min), Some(max)) = (in_range.iter().min(), in_range.iter().max()) {
        if max - min > 100 {
            outcome.flag(
                ValidationIssue::warning(
                    Severity::Medium,
                    "consistency",
                    "creditScores",
                    format!("bureau scores vary by {} points", max - min),
                )
                .with_suggestion("Compare the bureau reports for divergent tradelines"),
            );
        }
    }

    let mean = slot_scores.iter().sum::<f64>() / slot_scores.len() as f64;
    (outcome, Some(mean))
}

pub(crate) fn score_account(
    index: usize,
    account: &CreditAccount,
    today: NaiveDate,
) -> SectionOutcome {
    const CATEGORY: &str = "accounts";
    let mut outcome = SectionOutcome::default();
    let prefix = format!("accounts[{index}]");

    match non_blank(&account.creditor) {
        Some(creditor) if creditor.len() >= 2 => {
            outcome.award(format!("{prefix}.creditor"), 20.0, 20.0);
        }
        _ => {
            outcome.award(format!("{prefix}.creditor"), 0.0, 20.0);
            outcome.flag(
                ValidationIssue::error(
                    Severity::High,
                    CATEGORY,
                    format!("{prefix}.creditor"),
                    "account has no creditor name",
                )
                .with_suggestion("Extract the furnisher name for every tradeline"),
            );
        }
    }

    match non_blank(&account.account_number) {
        Some(number) if ACCOUNT_NUMBER_PATTERN.is_match(number) => {
            let digits = number.chars().filter(char::is_ascii_digit).count();
            let earned = if digits >= 4 { 15.0 } else { 8.0 };
            outcome.award(format!("{prefix}.accountNumber"), earned, 15.0);
            if digits < 4 {
                outcome.flag(ValidationIssue::warning(
                    Severity::Low,
                    CATEGORY,
                    format!("{prefix}.accountNumber"),
                    "account number is fully masked; duplicates cannot be detected",
                ));
            }
        }
        Some(number) => {
            outcome.award(format!("{prefix}.accountNumber"), 0.0, 15.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.accountNumber"),
                format!("account number '{number}' contains unexpected characters"),
            ));
        }
        None => {
            outcome.award(format!("{prefix}.accountNumber"), 0.0, 15.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.accountNumber"),
                "account number is missing",
            ));
        }
    }

    match account.account_type {
        Some(kind) if kind != AccountType::Unknown => {
            outcome.award(format!("{prefix}.accountType"), 10.0, 10.0);
        }
        _ => {
            outcome.award(format!("{prefix}.accountType"), 0.0, 10.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Low,
                CATEGORY,
                format!("{prefix}.accountType"),
                "account type is missing or unrecognised",
            ));
        }
    }

    match account.balance {
        Some(balance) if balance.is_finite() && balance >= 0.0 => {
            outcome.award(format!("{prefix}.balance"), 15.0, 15.0);
        }
        Some(balance) => {
            outcome.award(format!("{prefix}.balance"), 0.0, 15.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.balance"),
                format!("balance {balance} is not a valid amount"),
            ));
        }
        None => {
            outcome.award(format!("{prefix}.balance"), 0.0, 15.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.balance"),
                "balance is missing",
            ));
        }
    }

    let limit_field = format!("{prefix}.creditLimit");
    match (account.is_revolving(), account.credit_limit) {
        (_, Some(limit)) if !limit.is_finite() || limit < 0.0 => {
            outcome.award(limit_field.clone(), 0.0, 10.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                limit_field,
                format!("credit limit {limit} is not a valid amount"),
            ));
        }
        (true, Some(limit)) if limit > 0.0 => outcome.award(limit_field, 10.0, 10.0),
        (true, _) => {
            outcome.award(limit_field.clone(), 0.0, 10.0);
            outcome.flag(
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    limit_field,
                    "revolving account has no credit limit",
                )
                .with_suggestion("Utilisation cannot be computed without the limit"),
            );
        }
        (false, _) => outcome.award(limit_field, 10.0, 10.0),
    }

    match account.status {
        Some(status) if status != AccountStatus::Unknown => {
            outcome.award(format!("{prefix}.status"), 10.0, 10.0);
        }
        _ => {
            outcome.award(format!("{prefix}.status"), 0.0, 10.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Low,
                CATEGORY,
                format!("{prefix}.status"),
                "account status is missing or unrecognised",
            ));
        }
    }

    let opened_field = format!("{prefix}.dateOpened");
    let fraction = score_date(
        &mut outcome,
        &opened_field,
        account.date_opened.as_deref(),
        today,
        CATEGORY,
        true,
    );
    outcome.award(opened_field, 10.0 * fraction, 10.0);

    let reported_field = format!("{prefix}.lastReported");
    let fraction = score_date(
        &mut outcome,
        &reported_field,
        account.last_reported.as_deref(),
        today,
        CATEGORY,
        false,
    );
    outcome.award(reported_field, 5.0 * fraction, 5.0);

    let history_valid = !account.payment_history.is_empty()
        && account
            .payment_history
            .iter()
            .all(|entry| parse_month(&entry.month).is_some());
    let history_points = if history_valid { 5.0 } else { 0.0 };
    outcome.award(format!("{prefix}.paymentHistory"), history_points, 5.0);

    outcome
}

pub(crate) fn score_negative_item(
    index: usize,
    item: &NegativeItem,
    today: NaiveDate,
) -> SectionOutcome {
    const CATEGORY: &str = "negative_items";
    let mut outcome = SectionOutcome::default();
    let prefix = format!("negativeItems[{index}]");

    match item.item_type {
        Some(kind) if kind != NegativeItemType::Unknown => {
            outcome.award(format!("{prefix}.itemType"), 20.0, 20.0);
        }
        _ => {
            outcome.award(format!("{prefix}.itemType"), 0.0, 20.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.itemType"),
                "negative item type is missing or unrecognised",
            ));
        }
    }

    if non_blank(&item.creditor).is_some() {
        outcome.award(format!("{prefix}.creditor"), 20.0, 20.0);
    } else {
        outcome.award(format!("{prefix}.creditor"), 0.0, 20.0);
        outcome.flag(ValidationIssue::error(
            Severity::High,
            CATEGORY,
            format!("{prefix}.creditor"),
            "negative item has no creditor",
        ));
    }

    match item.amount {
        Some(amount) if amount.is_finite() && amount >= 0.0 => {
            outcome.award(format!("{prefix}.amount"), 20.0, 20.0);
        }
        Some(amount) => {
            outcome.award(format!("{prefix}.amount"), 0.0, 20.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.amount"),
                format!("amount {amount} is not a valid amount"),
            ));
        }
        None => {
            outcome.award(format!("{prefix}.amount"), 0.0, 20.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Low,
                CATEGORY,
                format!("{prefix}.amount"),
                "amount is missing",
            ));
        }
    }

    let date_field = format!("{prefix}.date");
    let fraction = score_date(
        &mut outcome,
        &date_field,
        item.date.as_deref(),
        today,
        CATEGORY,
        true,
    );
    outcome.award(date_field, 20.0 * fraction, 20.0);

    let bureau_points = if item.bureaus.is_empty() { 0.0 } else { 10.0 };
    outcome.award(format!("{prefix}.bureaus"), bureau_points, 10.0);

    match item.impact_score {
        Some(impact) if (0.0..=100.0).contains(&impact) => {
            outcome.award(format!("{prefix}.impactScore"), 10.0, 10.0);
        }
        Some(impact) => {
            outcome.award(format!("{prefix}.impactScore"), 0.0, 10.0);
            outcome.flag(ValidationIssue::warning(
                Severity::Low,
                CATEGORY,
                format!("{prefix}.impactScore"),
                format!("impact score {impact} is outside 0-100"),
            ));
        }
        None => outcome.award(format!("{prefix}.impactScore"), 0.0, 10.0),
    }

    if let Some(issue) = obsolescence_issue(&prefix, item, today) {
        outcome.flag(issue);
    }

    outcome
}

/// Negative items past their FCRA §605(a) reporting period.
fn obsolescence_issue(prefix: &str, item: &NegativeItem, today: NaiveDate) -> Option<ValidationIssue> {
    let kind = item.item_type?;
    let anchor = parse_optional(item.delinquency_date.as_deref())
        .or_else(|| parse_optional(item.date.as_deref()))?;
    let period = kind.reporting_period_years();
    let age = years_between(anchor, today);
    if age < period {
        return None;
    }

    let creditor = non_blank(&item.creditor).unwrap_or("unknown creditor");
    Some(
        ValidationIssue::warning(
            Severity::Medium,
            "fcra",
            prefix.to_string(),
            format!(
                "{creditor} item is {age} years old and exceeds the {period}-year reporting period"
            ),
        )
        .with_suggestion("Dispute the item as obsolete (reason code OBSOLETE)"),
    )
}

pub(crate) fn score_inquiry(index: usize, inquiry: &Inquiry, today: NaiveDate) -> SectionOutcome {
    const CATEGORY: &str = "inquiries";
    let mut outcome = SectionOutcome::default();
    let prefix = format!("inquiries[{index}]");

    if non_blank(&inquiry.creditor).is_some() {
        outcome.award(format!("{prefix}.creditor"), 30.0, 30.0);
    } else {
        outcome.award(format!("{prefix}.creditor"), 0.0, 30.0);
        outcome.flag(ValidationIssue::warning(
            Severity::Medium,
            CATEGORY,
            format!("{prefix}.creditor"),
            "inquiry has no creditor",
        ));
    }

    let date_field = format!("{prefix}.date");
    let fraction = score_date(
        &mut outcome,
        &date_field,
        inquiry.date.as_deref(),
        today,
        CATEGORY,
        true,
    );
    outcome.award(date_field, 30.0 * fraction, 30.0);

    if inquiry.inquiry_type.is_some() {
        outcome.award(format!("{prefix}.inquiryType"), 20.0, 20.0);
    } else {
        outcome.award(format!("{prefix}.inquiryType"), 0.0, 20.0);
        outcome.flag(ValidationIssue::info(
            CATEGORY,
            format!("{prefix}.inquiryType"),
            "inquiry is not marked hard or soft",
        ));
    }

    let bureau_points = if inquiry.bureau.is_some() { 20.0 } else { 0.0 };
    outcome.award(format!("{prefix}.bureau"), bureau_points, 20.0);

    outcome
}

pub(crate) fn score_public_record(
    index: usize,
    record: &PublicRecord,
    today: NaiveDate,
) -> SectionOutcome {
    const CATEGORY: &str = "public_records";
    let mut outcome = SectionOutcome::default();
    let prefix = format!("publicRecords[{index}]");

    match record.record_type {
        Some(kind) if kind != PublicRecordType::Unknown => {
            outcome.award(format!("{prefix}.recordType"), 30.0, 30.0);
        }
        _ => {
            outcome.award(format!("{prefix}.recordType"), 0.0, 30.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.recordType"),
                "public record type is missing or unrecognised",
            ));
        }
    }

    let date_field = format!("{prefix}.date");
    let fraction = score_date(
        &mut outcome,
        &date_field,
        record.date.as_deref(),
        today,
        CATEGORY,
        true,
    );
    outcome.award(date_field, 30.0 * fraction, 30.0);

    match record.amount {
        Some(amount) if !amount.is_finite() || amount < 0.0 => {
            outcome.award(format!("{prefix}.amount"), 0.0, 20.0);
            outcome.flag(ValidationIssue::error(
                Severity::Medium,
                CATEGORY,
                format!("{prefix}.amount"),
                format!("amount {amount} is not a valid amount"),
            ));
        }
        _ => outcome.award(format!("{prefix}.amount"), 20.0, 20.0),
    }

    let status_points = if non_blank(&record.status).is_some() { 20.0 } else { 0.0 };
    outcome.award(format!("{prefix}.status"), status_points, 20.0);

    outcome
}
