use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::super::dates::{days_between, parse_optional};
use super::super::domain::{
    normalize_name, AccountStatus, CreditReport, Severity, ValidationIssue,
};
use super::CheckOutcome;

const CATEGORY: &str = "logical";

const HIGH_SCORE: f64 = 750.0;
const LOW_SCORE: f64 = 500.0;
const RECENT_NEGATIVE_DAYS: i64 = 730;
const RECENT_NEGATIVE_LIMIT: usize = 2;

const HIGH_SCORE_PENALTY: f64 = 20.0;
const LOW_SCORE_PENALTY: f64 = 15.0;
const OVER_LIMIT_PENALTY: f64 = 15.0;
const CLOSED_BALANCE_PENALTY: f64 = 10.0;
const DUPLICATE_PENALTY: f64 = 10.0;
const LATE_ZERO_BALANCE_PENALTY: f64 = 5.0;
const PAID_BALANCE_PENALTY: f64 = 10.0;

pub(super) fn check(report: &CreditReport, today: NaiveDate) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    score_versus_negatives(report, today, &mut outcome);
    account_states(report, &mut outcome);
    duplicate_accounts(report, &mut outcome);
    outcome
}

fn score_versus_negatives(report: &CreditReport, today: NaiveDate, outcome: &mut CheckOutcome) {
    let Some(average) = report.average_score() else {
        return;
    };

    let recent = report
        .negative_items
        .iter()
        .filter_map(|item| {
            parse_optional(item.date.as_deref())
                .or_else(|| parse_optional(item.delinquency_date.as_deref()))
        })
        .filter(|date| (0..=RECENT_NEGATIVE_DAYS).contains(&days_between(*date, today)))
        .count();

    if average > HIGH_SCORE && recent > RECENT_NEGATIVE_LIMIT {
        outcome.penalize(
            HIGH_SCORE_PENALTY,
            ValidationIssue::warning(
                Severity::High,
                CATEGORY,
                "creditScores",
                format!(
                    "average score {average:.0} is implausible with {recent} negative items in the last two years"
                ),
            )
            .with_suggestion("Confirm the scores were pulled on the same date as the tradelines"),
        );
    }

    if average < LOW_SCORE && report.negative_items.is_empty() {
        outcome.penalize(
            LOW_SCORE_PENALTY,
            ValidationIssue::warning(
                Severity::Medium,
                CATEGORY,
                "creditScores",
                format!("average score {average:.0} is implausible with no negative items"),
            )
            .with_suggestion("Look for negative items the extraction may have missed"),
        );
    }
}

fn account_states(report: &CreditReport, outcome: &mut CheckOutcome) {
    for (index, account) in report.accounts.iter().enumerate() {
        let prefix = format!("accounts[{index}]");
        let balance = account.balance.filter(|value| value.is_finite());

        if account.is_revolving() {
            if let (Some(balance), Some(limit)) = (balance, account.credit_limit) {
                if limit > 0.0 && balance > limit {
                    outcome.penalize(
                        OVER_LIMIT_PENALTY,
                        ValidationIssue::error(
                            Severity::High,
                            CATEGORY,
                            format!("{prefix}.balance"),
                            format!(
                                "balance exceeds credit limit ({balance:.2} over a limit of {limit:.2})"
                            ),
                        )
                        .with_suggestion("Dispute the balance or the reported limit as inaccurate"),
                    );
                }
            }
        }

        let Some(status) = account.status else {
            continue;
        };
        let positive = balance.is_some_and(|value| value > 0.0);

        if status == AccountStatus::Closed && positive {
            outcome.penalize(
                CLOSED_BALANCE_PENALTY,
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    format!("{prefix}.status"),
                    "closed account still reports a positive balance",
                ),
            );
        }

        if status.is_late() && balance == Some(0.0) {
            outcome.penalize(
                LATE_ZERO_BALANCE_PENALTY,
                ValidationIssue::warning(
                    Severity::Low,
                    CATEGORY,
                    format!("{prefix}.status"),
                    "account is reported late with a zero balance",
                )
                .with_suggestion("Dispute the late status as inaccurate (reason code INACCURATE_STATUS)"),
            );
        }

        if status == AccountStatus::Paid && positive {
            outcome.penalize(
                PAID_BALANCE_PENALTY,
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    format!("{prefix}.balance"),
                    "paid account still reports a positive balance",
                )
                .with_suggestion("Dispute the balance (reason code PAID_IN_FULL)"),
            );
        }
    }
}

/// Same creditor and same account ending reported more than once.
fn duplicate_accounts(report: &CreditReport, outcome: &mut CheckOutcome) {
    let mut seen: BTreeMap<(String, String), usize> = BTreeMap::new();

    for (index, account) in report.accounts.iter().enumerate() {
        let (Some(creditor), Some(last_four)) = (account.creditor.as_deref(), account.last_four())
        else {
            continue;
        };
        let creditor = normalize_name(creditor);
        if creditor.is_empty() {
            continue;
        }

        let key = (creditor, last_four);
        match seen.get(&key).copied() {
            Some(first) => outcome.penalize(
                DUPLICATE_PENALTY,
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    format!("accounts[{index}]"),
                    format!(
                        "account duplicates accounts[{first}] (same creditor, ending {})",
                        key.1
                    ),
                )
                .with_suggestion("Dispute the duplicate tradeline (reason code DUPLICATE)"),
            ),
            None => {
                seen.insert(key, index);
            }
        }
    }
}
