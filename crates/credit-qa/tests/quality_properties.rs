use chrono::NaiveDate;
use credit_qa::quality::domain::{
    AccountStatus, AccountType, Bureau, CreditAccount, CreditScore, CreditScores, PersonalInfo,
};
use credit_qa::quality::engine::{AlertSource, QualityGrade, QuickCheck};
use credit_qa::quality::{CreditReport, DisputeLetter};
use credit_qa::{QualityAssuranceEngine, QualityConfig};
use proptest::prelude::*;

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid evaluation date")
}

fn slot(bureau: Bureau, score: Option<i32>, date: Option<String>) -> Option<CreditScore> {
    Some(CreditScore {
        score,
        bureau: Some(bureau),
        date,
        model: None,
    })
}

prop_compose! {
    fn arbitrary_account()(
        creditor in proptest::option::of("[A-Za-z ]{0,20}"),
        number in proptest::option::of("[0-9X*-]{0,12}"),
        balance in proptest::option::of(-500.0f64..50_000.0),
        limit in proptest::option::of(0.0f64..40_000.0),
        revolving in proptest::bool::ANY,
        opened in proptest::option::of("20[0-3][0-9]-(0[1-9]|1[0-2])-1[0-9]"),
        reported in proptest::option::of("20[0-3][0-9]-(0[1-9]|1[0-2])-0[1-9]"),
    ) -> CreditAccount {
        CreditAccount {
            creditor,
            account_number: number,
            account_type: Some(if revolving { AccountType::CreditCard } else { AccountType::Installment }),
            balance,
            credit_limit: limit,
            status: Some(AccountStatus::Current),
            date_opened: opened,
            last_reported: reported,
            ..CreditAccount::default()
        }
    }
}

prop_compose! {
    fn arbitrary_report()(
        name in proptest::option::of("\\PC{0,30}"),
        ssn in proptest::option::of("[0-9-]{0,12}"),
        experian in proptest::option::of(0i32..1_000),
        equifax in proptest::option::of(0i32..1_000),
        transunion in proptest::option::of(0i32..1_000),
        score_date in proptest::option::of("\\PC{0,12}"),
        accounts in proptest::collection::vec(arbitrary_account(), 0..6),
    ) -> CreditReport {
        CreditReport {
            personal_info: PersonalInfo {
                name,
                ssn,
                ..PersonalInfo::default()
            },
            credit_scores: CreditScores {
                experian: slot(Bureau::Experian, experian, score_date.clone()),
                equifax: slot(Bureau::Equifax, equifax, score_date.clone()),
                transunion: slot(Bureau::TransUnion, transunion, score_date),
            },
            accounts,
            ..CreditReport::default()
        }
    }
}

proptest! {
    #[test]
    fn every_score_stays_in_range(report in arbitrary_report()) {
        let engine = QualityAssuranceEngine::new(QualityConfig::default());
        let result = engine.assess_quality(&report, Some(&DisputeLetter::default()), evaluation_date());

        prop_assert!((0.0..=100.0).contains(&result.overall_score));
        for (_, score) in result.quality_dimensions.entries() {
            prop_assert!((0.0..=100.0).contains(&score));
        }
        prop_assert_eq!(result.overall_grade, QualityGrade::from_score(result.overall_score));
        prop_assert!(result
            .alerts
            .iter()
            .all(|alert| alert.source != AlertSource::ValidatorFailure));
    }

    #[test]
    fn assessment_is_deterministic(report in arbitrary_report()) {
        let engine = QualityAssuranceEngine::new(QualityConfig::default());
        let first = engine.assess_quality(&report, None, evaluation_date());
        let second = engine.assess_quality(&report, None, evaluation_date());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn quick_check_never_exceeds_bounds(report in arbitrary_report()) {
        let engine = QualityAssuranceEngine::new(QualityConfig::default());
        let quick = engine.quick_quality_check(
            &report,
            None,
            &[QuickCheck::DataQuality, QuickCheck::Completeness, QuickCheck::Consistency],
            evaluation_date(),
        );
        prop_assert!((0.0..=100.0).contains(&quick.quality_score));
        prop_assert!(quick.quick_recommendations.len() <= 3);
    }

    #[test]
    fn grade_is_monotonic(low in 0.0f64..=100.0, high in 0.0f64..=100.0) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        prop_assert!(QualityGrade::from_score(low) >= QualityGrade::from_score(high));
    }
}
