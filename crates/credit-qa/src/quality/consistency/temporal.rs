use chrono::{Datelike, NaiveDate};

use super::super::dates::{days_between, parse_month, parse_optional};
use super::super::domain::{CreditReport, Severity, ValidationIssue};
use super::CheckOutcome;

const CATEGORY: &str = "temporal";

const FUTURE_DATE_PENALTY: f64 = 15.0;
const OPEN_AFTER_REPORTED_PENALTY: f64 = 10.0;
const DELINQUENCY_ORDER_PENALTY: f64 = 10.0;
const PAYMENT_BEFORE_OPEN_PENALTY: f64 = 5.0;

/// Hard inquiries older than this no longer affect scoring models.
const INQUIRY_RELEVANCE_DAYS: i64 = 730;

pub(super) fn check(report: &CreditReport, today: NaiveDate) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    for (field, raw) in dated_fields(report) {
        if let Some(date) = parse_optional(raw) {
            if date > today {
                outcome.penalize(
                    FUTURE_DATE_PENALTY,
                    ValidationIssue::error(
                        Severity::High,
                        CATEGORY,
                        field,
                        format!("{date} is after the evaluation date {today}"),
                    )
                    .with_suggestion("Re-extract the date; reports cannot describe future events"),
                );
            }
        }
    }

    account_ordering(report, &mut outcome);
    delinquency_ordering(report, &mut outcome);
    stale_inquiries(report, today, &mut outcome);
    outcome
}

/// Every single date on the record, tagged with its field path.
fn dated_fields(report: &CreditReport) -> Vec<(String, Option<&str>)> {
    let mut fields = Vec::new();

    for (bureau, slot) in report.credit_scores.entries() {
        fields.push((
            format!("creditScores.{}.date", bureau.code()),
            slot.date.as_deref(),
        ));
    }
    for (index, account) in report.accounts.iter().enumerate() {
        fields.push((
            format!("accounts[{index}].dateOpened"),
            account.date_opened.as_deref(),
        ));
        fields.push((
            format!("accounts[{index}].lastReported"),
            account.last_reported.as_deref(),
        ));
    }
    for (index, item) in report.negative_items.iter().enumerate() {
        fields.push((format!("negativeItems[{index}].date"), item.date.as_deref()));
        fields.push((
            format!("negativeItems[{index}].delinquencyDate"),
            item.delinquency_date.as_deref(),
        ));
    }
    for (index, inquiry) in report.inquiries.iter().enumerate() {
        fields.push((format!("inquiries[{index}].date"), inquiry.date.as_deref()));
    }
    for (index, record) in report.public_records.iter().enumerate() {
        fields.push((format!("publicRecords[{index}].date"), record.date.as_deref()));
    }

    fields
}

fn account_ordering(report: &CreditReport, outcome: &mut CheckOutcome) {
    for (index, account) in report.accounts.iter().enumerate() {
        let Some(opened) = parse_optional(account.date_opened.as_deref()) else {
            continue;
        };

        if let Some(reported) = parse_optional(account.last_reported.as_deref()) {
            if opened > reported {
                outcome.penalize(
                    OPEN_AFTER_REPORTED_PENALTY,
                    ValidationIssue::error(
                        Severity::Medium,
                        CATEGORY,
                        format!("accounts[{index}].dateOpened"),
                        format!("account opened {opened} after it was last reported {reported}"),
                    ),
                );
            }
        }

        let opened_month = (opened.year(), opened.month());
        let early = account
            .payment_history
            .iter()
            .filter_map(|entry| parse_month(&entry.month))
            .filter(|month| (month.year(), month.month()) < opened_month)
            .count();
        if early > 0 {
            outcome.penalize(
                PAYMENT_BEFORE_OPEN_PENALTY,
                ValidationIssue::warning(
                    Severity::Low,
                    CATEGORY,
                    format!("accounts[{index}].paymentHistory"),
                    format!("{early} payment history month(s) precede the open date {opened}"),
                ),
            );
        }
    }
}

fn delinquency_ordering(report: &CreditReport, outcome: &mut CheckOutcome) {
    for (index, item) in report.negative_items.iter().enumerate() {
        let (Some(delinquent), Some(dated)) = (
            parse_optional(item.delinquency_date.as_deref()),
            parse_optional(item.date.as_deref()),
        ) else {
            continue;
        };

        if delinquent > dated {
            outcome.penalize(
                DELINQUENCY_ORDER_PENALTY,
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    format!("negativeItems[{index}].delinquencyDate"),
                    format!("delinquency date {delinquent} is after the item date {dated}"),
                )
                .with_suggestion("The date of first delinquency anchors the FCRA reporting period"),
            );
        }
    }
}

fn stale_inquiries(report: &CreditReport, today: NaiveDate, outcome: &mut CheckOutcome) {
    for (index, inquiry) in report.inquiries.iter().enumerate() {
        if !inquiry.is_hard() {
            continue;
        }
        let Some(date) = parse_optional(inquiry.date.as_deref()) else {
            continue;
        };
        if days_between(date, today) > INQUIRY_RELEVANCE_DAYS {
            outcome.note(ValidationIssue::info(
                CATEGORY,
                format!("inquiries[{index}].date"),
                format!("hard inquiry from {date} is older than two years and no longer scored"),
            ));
        }
    }
}
