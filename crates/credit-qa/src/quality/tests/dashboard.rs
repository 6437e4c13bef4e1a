use super::common::*;
use crate::quality::engine::{
    generate_quality_dashboard, Dimension, HealthStatus, QualityGrade, TrendDirection,
};
use crate::quality::{CreditReport, QualityAssuranceEngine, QualityAssuranceResult, QualityConfig};

/// Assessments are dated after every date on the fixtures.
fn assessed(record: &CreditReport, year: i32, month: u32, day: u32) -> QualityAssuranceResult {
    QualityAssuranceEngine::new(QualityConfig::default()).assess_quality(
        record,
        None,
        date(year, month, day),
    )
}

fn degraded_report() -> CreditReport {
    let mut record = clean_report();
    record.personal_info.ssn = None;
    record.personal_info.date_of_birth = None;
    record.accounts[1].creditor = None;
    record
}

#[test]
fn latest_assessment_drives_health_and_trends() {
    let history = vec![
        assessed(&degraded_report(), 2025, 6, 1),
        assessed(&clean_report(), 2025, 6, 10),
    ];

    let dashboard = generate_quality_dashboard(&history).expect("dashboard");

    assert_eq!(dashboard.assessments, 2);
    assert_eq!(dashboard.latest_assessed_on, date(2025, 6, 10));
    assert_eq!(dashboard.latest_grade, QualityGrade::APlus);
    assert_eq!(dashboard.overall_health, HealthStatus::Excellent);

    let overall = dashboard.trend(None).expect("overall trend");
    assert_eq!(overall.direction, TrendDirection::Up);
    assert_eq!(overall.previous, Some(history[0].overall_score));

    let compliance = dashboard
        .trend(Some(Dimension::Compliance))
        .expect("compliance trend");
    assert_eq!(compliance.direction, TrendDirection::Stable);
    assert_eq!(dashboard.trends.len(), 7);
}

#[test]
fn history_order_does_not_matter() {
    let older = assessed(&clean_report(), 2025, 6, 1);
    let newer = assessed(&degraded_report(), 2025, 6, 10);

    let dashboard = generate_quality_dashboard(&[newer.clone(), older]).expect("dashboard");

    assert_eq!(dashboard.latest_score, newer.overall_score);
    let overall = dashboard.trend(None).expect("overall trend");
    assert_eq!(overall.direction, TrendDirection::Down);
    assert!(overall.change < -2.0);
}

#[test]
fn single_assessment_is_stable() {
    let dashboard =
        generate_quality_dashboard(&[assessed(&clean_report(), 2025, 6, 1)]).expect("dashboard");

    assert!(dashboard
        .trends
        .iter()
        .all(|trend| trend.direction == TrendDirection::Stable && trend.previous.is_none()));
    assert!(dashboard.top_issues.is_empty());
    assert!(dashboard.top_opportunities.is_empty());
}

#[test]
fn recurring_issues_rank_first() {
    let history = vec![
        assessed(&degraded_report(), 2025, 6, 1),
        assessed(&degraded_report(), 2025, 6, 5),
        assessed(&clean_report(), 2025, 6, 10),
    ];

    let dashboard = generate_quality_dashboard(&history).expect("dashboard");

    assert!(dashboard.top_issues.len() <= 5);
    let first = dashboard.top_issues.first().expect("top issue");
    assert_eq!(first.occurrences, 2);
    assert!(dashboard
        .top_issues
        .windows(2)
        .all(|pair| pair[0].occurrences >= pair[1].occurrences));
    assert!(dashboard
        .top_opportunities
        .iter()
        .any(|entry| entry.dimension == Dimension::Completeness));
    assert_eq!(
        dashboard.average_score,
        ((history[0].overall_score * 2.0 + history[2].overall_score) / 3.0 * 10.0).round() / 10.0
    );
}
