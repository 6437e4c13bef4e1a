use super::common::*;
use crate::quality::domain::{
    Bureau, IssueKind, NegativeItem, NegativeItemType, ReportSection, Severity,
};
use crate::quality::DataQualityValidator;

#[test]
fn clean_report_scores_full_marks_without_findings() {
    let report = DataQualityValidator::new().validate(&clean_report(), today());

    assert_eq!(report.overall_score, 100.0);
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);
    assert!(report.recommendations.is_empty());
    assert!(report.failed_fields.is_empty());
    assert_eq!(report.section_metrics.len(), 6);
}

#[test]
fn out_of_range_score_is_a_high_severity_error() {
    let mut record = clean_report();
    record.credit_scores.experian = score(Bureau::Experian, 900);

    let report = DataQualityValidator::new().validate(&record, today());

    let issue = issue_at(&report.issues, "creditScores.experian.score")
        .expect("score range issue");
    assert_eq!(issue.kind, IssueKind::Error);
    assert_eq!(issue.severity, Severity::High);
    assert!(report.section_score(ReportSection::CreditScores).unwrap_or(100.0) < 100.0);
    assert!(report
        .failed_fields
        .iter()
        .any(|field| field == "creditScores.experian.score"));
}

#[test]
fn missing_name_and_future_dates_are_errors() {
    let mut record = clean_report();
    record.personal_info.name = None;
    record.accounts[0].date_opened = Some("2026-01-01".to_string());

    let report = DataQualityValidator::new().validate(&record, today());

    let name = issue_at(&report.issues, "personalInfo.name").expect("name issue");
    assert!(name.is_critical());

    let opened = issue_at(&report.issues, "accounts[0].dateOpened").expect("date issue");
    assert_eq!(opened.kind, IssueKind::Error);
    assert_eq!(opened.severity, Severity::Medium);
    assert!(opened.message.contains("future"));
    assert!(report.overall_score < 100.0);
}

#[test]
fn widely_spread_bureau_scores_raise_a_warning() {
    let mut record = clean_report();
    record.credit_scores = scores(720, 730, 600);

    let report = DataQualityValidator::new().validate(&record, today());

    let spread = issue_at(&report.issues, "creditScores").expect("spread warning");
    assert_eq!(spread.kind, IssueKind::Warning);
    assert!(spread.message.contains("130"));
}

#[test]
fn negative_items_past_the_reporting_period_are_flagged_obsolete() {
    let mut record = clean_report();
    record.negative_items.push(NegativeItem {
        item_type: Some(NegativeItemType::LatePayment),
        creditor: Some("Chase Bank".to_string()),
        account_number: Some("****1234".to_string()),
        amount: Some(75.0),
        date: Some("2016-02-01".to_string()),
        delinquency_date: Some("2016-01-01".to_string()),
        impact_score: Some(20.0),
        bureaus: vec![Bureau::Experian],
        dispute_reasons: Vec::new(),
    });

    let report = DataQualityValidator::new().validate(&record, today());

    let obsolete = report
        .issues
        .iter()
        .find(|issue| issue.category == "fcra")
        .expect("obsolescence warning");
    assert_eq!(obsolete.field, "negativeItems[0]");
    assert!(obsolete.message.contains("7-year"));
}

#[test]
fn empty_tradelines_are_noted_but_neutral() {
    let mut record = clean_report();
    record.accounts.clear();

    let report = DataQualityValidator::new().validate(&record, today());

    assert_eq!(report.section_score(ReportSection::Accounts), Some(100.0));
    let note = issue_at(&report.issues, "accounts").expect("empty accounts note");
    assert_eq!(note.kind, IssueKind::Info);
}

#[test]
fn ssn_accepts_any_pattern_match_without_zero_groups() {
    let mut record = clean_report();
    record.personal_info.ssn = Some("900-12-3456".to_string());

    let report = DataQualityValidator::new().validate(&record, today());

    assert!(issue_at(&report.issues, "personalInfo.ssn").is_none());
    assert_eq!(report.section_score(ReportSection::PersonalInfo), Some(100.0));

    for rejected in ["123-00-4567", "000-12-3456", "12-345-6789"] {
        record.personal_info.ssn = Some(rejected.to_string());
        let report = DataQualityValidator::new().validate(&record, today());
        let issue = issue_at(&report.issues, "personalInfo.ssn").expect("ssn error");
        assert_eq!(issue.severity, Severity::High, "{rejected}");
        assert!(report.section_score(ReportSection::PersonalInfo).unwrap_or(100.0) < 100.0);
    }
}
