use super::common::*;
use crate::quality::compliance::{BureauRules, LetterSection, ReasonCode};
use crate::quality::domain::{Bureau, IssueKind, Severity};
use crate::quality::{ComplianceGrade, ComplianceValidator};

#[test]
fn well_formed_letter_is_fully_compliant() {
    let report = ComplianceValidator::new().validate(&clean_letter());

    assert!(report.is_compliant);
    assert_eq!(report.compliance_score, 100.0);
    assert_eq!(report.overall_grade, ComplianceGrade::A);
    assert_eq!(report.required_fields_compliance, 100.0);
    assert_eq!(report.format_compliance, 100.0);
    assert_eq!(report.bureau_specific_compliance, 100.0);
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);
    assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
    assert!(report.recommendations.is_empty());
}

#[test]
fn missing_footer_costs_exactly_one_required_section() {
    let mut letter = clean_letter();
    letter.footer = None;

    let report = ComplianceValidator::new().validate(&letter);

    assert_eq!(report.required_fields_compliance, 75.0);
    let footer = report.section(LetterSection::Footer).expect("footer entry");
    assert_eq!(footer.score, 0.0);
    let issue = issue_at(&report.issues, "footer").expect("missing footer error");
    assert_eq!(issue.severity, Severity::High);
    assert!(report.compliance_score < 100.0);
}

#[test]
fn exceeding_the_experian_item_limit_is_a_high_severity_error() {
    let letter = letter_with_items(11);

    let report = ComplianceValidator::new().validate(&letter);

    let issue = report
        .issues
        .iter()
        .find(|issue| issue.category == "bureau_rules" && issue.field == "disputeItems")
        .expect("item limit error");
    assert_eq!(issue.kind, IssueKind::Error);
    assert_eq!(issue.severity, Severity::High);
    assert!(issue.message.contains("limit of 10"));
    assert_eq!(report.bureau_specific_compliance, 86.7);

    let within = ComplianceValidator::new().validate(&letter_with_items(10));
    assert_eq!(within.bureau_specific_compliance, 100.0);
}

#[test]
fn incompatible_reason_and_action_is_an_error() {
    let mut letter = clean_letter();
    letter.dispute_items[0].requested_action = Some("UPDATE".to_string());

    let report = ComplianceValidator::new().validate(&letter);

    let issue = issue_at(&report.issues, "disputeItems[0].requestedAction")
        .expect("pairing error");
    assert_eq!(issue.kind, IssueKind::Error);
    assert!(issue.message.contains("DELETE, REMOVE"));
}

#[test]
fn equifax_requires_creditor_codes_and_rejects_discharge_reason() {
    let mut letter = clean_letter();
    letter.bureau = Some(Bureau::Equifax);
    if let Some(header) = letter.header.as_mut() {
        header.target_bureau = Some("equifax".to_string());
    }
    letter.dispute_items[0].creditor_code = None;
    letter.dispute_items[0].reason_code = Some("BANKRUPTCY_DISCHARGED".to_string());
    letter.dispute_items[0].requested_action = Some("UPDATE".to_string());

    let report = ComplianceValidator::new().validate(&letter);

    assert!(issue_at(&report.issues, "disputeItems.creditorCode").is_some());
    assert!(issue_at(&report.issues, "disputeItems[0].reasonCode").is_some());
    assert_eq!(report.bureau_specific_compliance, 33.3);
    assert!(!BureauRules::for_bureau(Bureau::Equifax).supports(ReasonCode::BankruptcyDischarged));
}

#[test]
fn footer_total_must_match_item_count() {
    let mut letter = clean_letter();
    if let Some(footer) = letter.footer.as_mut() {
        footer.total_items = Some(3);
    }

    let report = ComplianceValidator::new().validate(&letter);

    let issue = issue_at(&report.issues, "footer.totalItems").expect("total mismatch");
    assert_eq!(issue.severity, Severity::Medium);
    assert!(issue.message.contains("declares 3 items"));
}

#[test]
fn sequence_gaps_and_duplicates_are_penalised() {
    let mut letter = letter_with_items(2);
    letter.dispute_items[1] = letter.dispute_items[0].clone();
    letter.dispute_items[1].sequence_number = Some(3);

    let report = ComplianceValidator::new().validate(&letter);

    assert!(issue_at(&report.issues, "disputeItems.sequenceNumber").is_some());
    assert!(issue_at(&report.issues, "disputeItems[1]").is_some());
    let items = report
        .section(LetterSection::DisputeItems)
        .expect("dispute items entry");
    assert_eq!(items.score, 80.0);
}

#[test]
fn long_response_window_is_only_a_warning() {
    let mut letter = clean_letter();
    if let Some(footer) = letter.footer.as_mut() {
        footer.expected_response_date = Some("2025-07-30".to_string());
    }

    let report = ComplianceValidator::new().validate(&letter);

    assert!(report.issues.is_empty());
    let warning = issue_at(&report.warnings, "footer.expectedResponseDate")
        .expect("response window warning");
    assert_eq!(warning.severity, Severity::Low);
    assert_eq!(report.compliance_score, 100.0);
}

#[test]
fn bureau_labels_load_regardless_of_case() {
    let mut raw = serde_json::to_value(clean_letter()).expect("letter serializes");
    raw["bureau"] = serde_json::json!("EXPERIAN");
    let letter: crate::quality::DisputeLetter =
        serde_json::from_value(raw.clone()).expect("letter loads");
    assert_eq!(letter.bureau, Some(Bureau::Experian));
    assert_eq!(ComplianceValidator::new().validate(&letter).compliance_score, 100.0);

    raw["bureau"] = serde_json::json!("Innovis");
    let letter: crate::quality::DisputeLetter =
        serde_json::from_value(raw).expect("letter loads");
    assert_eq!(letter.bureau, None);
    assert_eq!(letter.target_bureau(), Some(Bureau::Experian));
}
