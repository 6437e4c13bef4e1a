use chrono::NaiveDate;
use credit_qa::quality::engine::{
    generate_quality_dashboard, AlertLevel, QualityGrade, QuickCheck, TrendDirection,
};
use credit_qa::quality::{CreditReport, DisputeLetter};
use credit_qa::{QualityAssuranceEngine, QualityConfig};
use serde_json::json;

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid evaluation date")
}

fn extracted_report() -> CreditReport {
    serde_json::from_value(json!({
        "personalInfo": {
            "name": "Morgan Lee",
            "address": "88 Harbor Road, Portland, ME 04101",
            "ssn": "234-56-7890",
            "dateOfBirth": "04/02/1979",
            "phone": "207-555-0199",
            "employers": ["Harbor Freight Lines"],
            "confidence": { "name": 0.91, "address": 0.88, "ssn": 0.94 }
        },
        "creditScores": {
            "experian": { "score": 720, "bureau": "experian", "date": "2025-05-10", "model": "FICO 8" },
            "equifax": { "score": 730, "bureau": "equifax", "date": "2025-05-10", "model": "FICO 8" },
            "transunion": { "score": 600, "bureau": "transunion", "date": "2025-05-10", "model": "VantageScore 3.0" }
        },
        "accounts": [
            {
                "creditor": "Citi Card Services",
                "accountNumber": "XXXX-4411",
                "accountType": "credit_card",
                "balance": 1200.0,
                "creditLimit": 1000.0,
                "status": "current",
                "dateOpened": "2019-08-01",
                "lastReported": "2025-05-01",
                "paymentHistory": [{ "month": "2025-05", "status": "OK" }],
                "bureauBalances": { "experian": 1200.0, "equifax": 1200.0, "transunion": 950.0 }
            }
        ],
        "negativeItems": [
            {
                "itemType": "collection",
                "creditor": "Portfolio Recovery",
                "accountNumber": "PRA-7781",
                "amount": 410.0,
                "date": "2023-11-01",
                "bureaus": ["transunion"]
            }
        ],
        "inquiries": [
            { "creditor": "Ally Bank", "date": "2025-03-02", "inquiryType": "hard", "bureau": "equifax" }
        ],
        "processingMetadata": { "processingTimeMs": 12500, "confidence": 82.0 }
    }))
    .expect("extraction output deserialises")
}

fn generated_letter() -> DisputeLetter {
    serde_json::from_value(json!({
        "bureau": "transunion",
        "header": {
            "transmissionId": "TU-20250528-0042",
            "submissionDate": "2025-05-28",
            "submitterName": "Morgan Lee",
            "targetBureau": "transunion",
            "formatVersion": "4.0"
        },
        "consumerInfo": {
            "firstName": "Morgan",
            "lastName": "Lee",
            "ssn": "234-56-7890",
            "dateOfBirth": "1979-04-02",
            "currentAddress": { "street": "88 Harbor Road", "city": "Portland", "state": "ME", "zipCode": "04101" }
        },
        "disputeItems": [
            {
                "sequenceNumber": 1,
                "itemType": "COLLECTION",
                "creditorName": "Portfolio Recovery",
                "accountNumber": "PRA-7781",
                "reasonCode": "NOT_MINE",
                "description": "I have never had an account with this collector.",
                "requestedAction": "DELETE"
            }
        ],
        "footer": {
            "totalItems": 1,
            "submissionDate": "2025-05-28",
            "expectedResponseDate": "2025-06-27",
            "signature": "Morgan Lee"
        }
    }))
    .expect("letter deserialises")
}

#[test]
fn extracted_report_flows_through_every_validator() {
    let engine = QualityAssuranceEngine::new(QualityConfig::default());

    let result = engine.assess_quality(&extracted_report(), Some(&generated_letter()), evaluation_date());

    let consistency = result.consistency.as_ref().expect("consistency ran");
    assert_eq!(consistency.discrepancies.len(), 4);
    assert!(consistency
        .issues
        .iter()
        .any(|issue| issue.field == "accounts[0].balance" && issue.is_critical()));

    let compliance = result.compliance.as_ref().expect("compliance ran");
    assert!(compliance.is_compliant);

    assert!(result
        .alerts
        .iter()
        .any(|alert| alert.level == AlertLevel::Critical));
    assert!(!result.action_items.is_empty());
    assert!(result.overall_score < 100.0);
    assert_eq!(result.overall_grade, QualityGrade::from_score(result.overall_score));
    assert!(!result.report.summary.is_empty());
}

#[test]
fn quick_check_and_dashboard_share_the_engine() {
    let engine = QualityAssuranceEngine::new(QualityConfig::default());
    let report = extracted_report();

    let quick = engine.quick_quality_check(
        &report,
        None,
        &[QuickCheck::DataQuality, QuickCheck::Consistency],
        evaluation_date(),
    );
    assert!(quick
        .critical_alerts
        .iter()
        .any(|line| line.contains("balance exceeds credit limit")));

    let history = vec![
        engine.assess_quality(&report, None, evaluation_date()),
        engine.assess_quality(&report, None, evaluation_date() + chrono::Duration::days(1)),
    ];
    let dashboard = generate_quality_dashboard(&history).expect("dashboard");
    assert_eq!(dashboard.assessments, 2);
    let overall = dashboard.trend(None).expect("overall trend");
    assert_eq!(overall.direction, TrendDirection::Stable);
    assert_eq!(overall.change, 0.0);
}
