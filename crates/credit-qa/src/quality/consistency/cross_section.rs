use chrono::NaiveDate;

use super::super::dates::{days_between, parse_optional};
use super::super::domain::{
    creditor_matches, last_four, normalize_name, AccountStatus, CreditAccount, CreditReport,
    NegativeItem, NegativeItemType, PublicRecordType, Severity, ValidationIssue,
};
use super::CheckOutcome;

const CATEGORY: &str = "cross_section";

const IDENTITY_ANCHOR_PENALTY: f64 = 15.0;
const ORPHAN_NEGATIVE_PENALTY: f64 = 20.0;
const SCORE_PLAUSIBILITY_PENALTY: f64 = 15.0;
const INQUIRY_CORRELATION_PENALTY: f64 = 10.0;
const BANKRUPTCY_CORRELATION_PENALTY: f64 = 20.0;
const ADDRESS_REUSE_PENALTY: f64 = 10.0;

/// Average score above which a severe derogatory is implausible.
const HIGH_SCORE_WITH_DEROGATORY: f64 = 780.0;
/// Days after a hard inquiry within which the resulting account should be opened.
const INQUIRY_ACCOUNT_WINDOW_DAYS: i64 = 90;

pub(super) fn check(report: &CreditReport, today: NaiveDate) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    identity_anchor(report, &mut outcome);
    orphan_negatives(report, &mut outcome);
    score_plausibility(report, &mut outcome);
    inquiry_correlation(report, today, &mut outcome);
    bankruptcy_correlation(report, &mut outcome);
    address_reuse(report, &mut outcome);
    outcome
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|raw| !raw.trim().is_empty())
}

/// Tradelines must hang off an identified consumer: a name plus an address or SSN.
fn identity_anchor(report: &CreditReport, outcome: &mut CheckOutcome) {
    if !report.has_tradelines() {
        return;
    }

    let info = &report.personal_info;
    let anchored = present(&info.name) && (present(&info.address) || present(&info.ssn));
    if !anchored {
        outcome.penalize(
            IDENTITY_ANCHOR_PENALTY,
            ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                "personalInfo",
                "tradelines are present but the consumer identity (name with address or SSN) is incomplete",
            )
            .with_suggestion("Extract the consumer header before trusting account-level data"),
        );
    }
}

fn matches_account(item: &NegativeItem, account: &CreditAccount) -> bool {
    let creditor_match = match (item.creditor.as_deref(), account.creditor.as_deref()) {
        (Some(left), Some(right)) => creditor_matches(left, right),
        _ => false,
    };
    if creditor_match {
        return true;
    }

    match (item.account_number.as_deref().and_then(last_four), account.last_four()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Payment-related negatives can only come from a tradeline on the report.
fn orphan_negatives(report: &CreditReport, outcome: &mut CheckOutcome) {
    let orphans: Vec<(usize, &NegativeItem)> = report
        .negative_items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.item_type.is_some_and(NegativeItemType::is_payment_related))
        .filter(|(_, item)| {
            !report
                .accounts
                .iter()
                .any(|account| matches_account(item, account))
        })
        .collect();

    if orphans.is_empty() {
        return;
    }

    outcome.penalty += ORPHAN_NEGATIVE_PENALTY;
    for (index, item) in orphans {
        let creditor = item.creditor.as_deref().unwrap_or("unknown creditor");
        outcome.note(
            ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                format!("negativeItems[{index}]"),
                format!("payment-related negative item from {creditor} has no matching account"),
            )
            .with_suggestion("Link the negative item to its tradeline or verify the creditor name"),
        );
    }
}

fn score_plausibility(report: &CreditReport, outcome: &mut CheckOutcome) {
    let Some(average) = report.average_score() else {
        return;
    };
    if average <= HIGH_SCORE_WITH_DEROGATORY {
        return;
    }

    let severe = report
        .negative_items
        .iter()
        .filter(|item| item.item_type.is_some_and(NegativeItemType::is_severe))
        .count();
    if severe > 0 {
        outcome.penalize(
            SCORE_PLAUSIBILITY_PENALTY,
            ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                "creditScores",
                format!(
                    "average score {average:.0} is implausible alongside {severe} severe derogatory item(s)"
                ),
            )
            .with_suggestion("Confirm the scores and the derogatory items come from the same report"),
        );
    }
}

/// Hard inquiries old enough to have produced an account should line up with one.
fn inquiry_correlation(report: &CreditReport, today: NaiveDate, outcome: &mut CheckOutcome) {
    let opened: Vec<NaiveDate> = report
        .accounts
        .iter()
        .filter_map(|account| parse_optional(account.date_opened.as_deref()))
        .collect();

    let mut unmatched = Vec::new();
    for (index, inquiry) in report.inquiries.iter().enumerate() {
        if !inquiry.is_hard() {
            continue;
        }
        let Some(date) = parse_optional(inquiry.date.as_deref()) else {
            continue;
        };
        if days_between(date, today) < INQUIRY_ACCOUNT_WINDOW_DAYS {
            continue;
        }
        let correlated = opened.iter().any(|open| {
            let gap = days_between(date, *open);
            (0..=INQUIRY_ACCOUNT_WINDOW_DAYS).contains(&gap)
        });
        if !correlated {
            unmatched.push(index);
        }
    }

    if unmatched.is_empty() {
        return;
    }

    outcome.penalty += INQUIRY_CORRELATION_PENALTY;
    for index in unmatched {
        outcome.note(ValidationIssue::warning(
            Severity::Low,
            CATEGORY,
            format!("inquiries[{index}]"),
            format!(
                "hard inquiry has no account opened within {INQUIRY_ACCOUNT_WINDOW_DAYS} days; it may be unauthorized"
            ),
        ));
    }
}

fn bankruptcy_correlation(report: &CreditReport, outcome: &mut CheckOutcome) {
    let has_bankruptcy = report
        .public_records
        .iter()
        .any(|record| record.record_type == Some(PublicRecordType::Bankruptcy));
    if !has_bankruptcy {
        return;
    }

    let derogatory_account = report
        .accounts
        .iter()
        .any(|account| account.status.is_some_and(AccountStatus::is_derogatory));
    let derogatory_item = report.negative_items.iter().any(|item| {
        matches!(
            item.item_type,
            Some(NegativeItemType::ChargeOff | NegativeItemType::Collection)
        )
    });

    if !derogatory_account && !derogatory_item {
        outcome.penalize(
            BANKRUPTCY_CORRELATION_PENALTY,
            ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                "publicRecords",
                "bankruptcy is reported but no account is charged off or in collection",
            )
            .with_suggestion("Verify the bankruptcy record belongs to this consumer"),
        );
    }
}

fn address_reuse(report: &CreditReport, outcome: &mut CheckOutcome) {
    let info = &report.personal_info;
    let Some(current) = info.address.as_deref().map(normalize_name) else {
        return;
    };
    if current.is_empty() {
        return;
    }

    let repeated = info
        .previous_addresses
        .iter()
        .any(|previous| normalize_name(previous) == current);
    if repeated {
        outcome.penalize(
            ADDRESS_REUSE_PENALTY,
            ValidationIssue::warning(
                Severity::Low,
                CATEGORY,
                "personalInfo.previousAddresses",
                "current address is also listed as a previous address",
            )
            .with_suggestion("Drop the duplicate from the previous-address list"),
        );
    }
}
