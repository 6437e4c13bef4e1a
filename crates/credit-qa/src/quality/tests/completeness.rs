use super::common::*;
use crate::quality::domain::{IssueKind, ReportSection, Severity};
use crate::quality::CompletenessValidator;

#[test]
fn fully_populated_record_is_complete() {
    let report = CompletenessValidator::new().validate(&clean_report());

    assert_eq!(report.overall_completeness, 100.0);
    assert!(report.critical_missing.is_empty());
    assert!(report.optional_missing.is_empty());
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);
    assert!(report.recommendations.is_empty());
}

#[test]
fn missing_creditor_is_reported_as_critical() {
    let mut record = clean_report();
    record.accounts[1].creditor = Some("   ".to_string());

    let report = CompletenessValidator::new().validate(&record);

    assert_eq!(report.critical_missing, vec!["accounts[1].creditor".to_string()]);
    let issue = issue_at(&report.issues, "accounts[1].creditor").expect("missing creditor");
    assert!(issue.is_critical());
    assert!(report
        .recommendations
        .iter()
        .any(|line| line.contains("accounts[1].creditor")));

    let accounts = report.section(ReportSection::Accounts).expect("accounts section");
    assert_eq!(accounts.completeness, 87.5);
    assert_eq!(accounts.entries, 2);
}

#[test]
fn optional_and_important_fields_use_lower_severities() {
    let mut record = clean_report();
    record.personal_info.phone = None;
    record.personal_info.date_of_birth = None;

    let report = CompletenessValidator::new().validate(&record);

    let phone = issue_at(&report.issues, "personalInfo.phone").expect("phone note");
    assert_eq!(phone.kind, IssueKind::Info);
    assert_eq!(report.optional_missing, vec!["personalInfo.phone".to_string()]);

    let birth = issue_at(&report.issues, "personalInfo.dateOfBirth").expect("dob warning");
    assert_eq!(birth.kind, IssueKind::Warning);
    assert_eq!(birth.severity, Severity::Medium);
    assert!(report.critical_missing.is_empty());

    let personal = report
        .section(ReportSection::PersonalInfo)
        .expect("personal section");
    assert_eq!(personal.completeness, 85.0);
}

#[test]
fn report_without_accounts_is_half_complete_in_that_section() {
    let mut record = clean_report();
    record.accounts.clear();

    let report = CompletenessValidator::new().validate(&record);

    let accounts = report.section(ReportSection::Accounts).expect("accounts section");
    assert_eq!(accounts.completeness, 50.0);
    let warning = issue_at(&report.issues, "accounts").expect("empty accounts warning");
    assert_eq!(warning.kind, IssueKind::Warning);
    assert_eq!(warning.severity, Severity::Medium);
    assert_eq!(report.overall_completeness, 87.5);
}

#[test]
fn empty_optional_sections_count_as_complete() {
    let mut record = clean_report();
    record.inquiries.clear();

    let report = CompletenessValidator::new().validate(&record);

    let inquiries = report.section(ReportSection::Inquiries).expect("inquiries section");
    assert_eq!(inquiries.completeness, 100.0);
    assert_eq!(inquiries.entries, 0);
}
