use super::super::domain::{Bureau, CreditReport, Severity, ValidationIssue};
use super::{BureauDiscrepancy, CheckOutcome};

const CATEGORY: &str = "bureau";

const MAJOR_SCORE_GAP: f64 = 100.0;
const MINOR_SCORE_GAP: f64 = 50.0;
const BALANCE_GAP: f64 = 100.0;

const MAJOR_SCORE_PENALTY: f64 = 15.0;
const MINOR_SCORE_PENALTY: f64 = 5.0;
const BALANCE_PENALTY: f64 = 10.0;

pub(super) fn check(report: &CreditReport) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    compare_scores(report, &mut outcome);
    compare_balances(report, &mut outcome);
    outcome
}

/// Every unordered pair of bureau readings, in bureau order.
fn pairs(values: &[(Bureau, f64)]) -> Vec<((Bureau, f64), (Bureau, f64))> {
    let mut pairs = Vec::new();
    for (offset, first) in values.iter().enumerate() {
        for second in &values[offset + 1..] {
            pairs.push((*first, *second));
        }
    }
    pairs
}

fn compare_scores(report: &CreditReport, outcome: &mut CheckOutcome) {
    let readings: Vec<(Bureau, f64)> = report
        .credit_scores
        .entries()
        .filter_map(|(bureau, slot)| slot.score.map(|score| (bureau, f64::from(score))))
        .collect();

    for ((first, first_score), (second, second_score)) in pairs(&readings) {
        let gap = (first_score - second_score).abs();
        let field = "creditScores";

        if gap > MAJOR_SCORE_GAP {
            outcome.penalize(
                MAJOR_SCORE_PENALTY,
                ValidationIssue::warning(
                    Severity::High,
                    CATEGORY,
                    field,
                    format!(
                        "{} score {first_score:.0} and {} score {second_score:.0} differ by {gap:.0} points",
                        first.label(),
                        second.label()
                    ),
                )
                .with_suggestion("Check whether one bureau is reporting accounts the others are not"),
            );
            outcome.record(BureauDiscrepancy {
                field: field.to_string(),
                first_bureau: first,
                first_value: first_score,
                second_bureau: second,
                second_value: second_score,
                difference: gap,
                severity: Severity::High,
            });
        } else if gap >= MINOR_SCORE_GAP {
            outcome.penalize(
                MINOR_SCORE_PENALTY,
                ValidationIssue::info(
                    CATEGORY,
                    field,
                    format!(
                        "{} and {} scores differ by {gap:.0} points",
                        first.label(),
                        second.label()
                    ),
                ),
            );
        }
    }
}

fn compare_balances(report: &CreditReport, outcome: &mut CheckOutcome) {
    for (index, account) in report.accounts.iter().enumerate() {
        let field = format!("accounts[{index}].bureauBalances");
        let creditor = account.creditor.as_deref().unwrap_or("account");

        for ((first, first_balance), (second, second_balance)) in
            pairs(&account.bureau_balances.entries())
        {
            let gap = (first_balance - second_balance).abs();
            if gap <= BALANCE_GAP {
                continue;
            }

            outcome.penalize(
                BALANCE_PENALTY,
                ValidationIssue::warning(
                    Severity::Medium,
                    CATEGORY,
                    field.clone(),
                    format!(
                        "{creditor} balance is {first_balance:.2} at {} but {second_balance:.2} at {}",
                        first.label(),
                        second.label()
                    ),
                )
                .with_suggestion("Dispute the stale balance with the bureau reporting it"),
            );
            outcome.record(BureauDiscrepancy {
                field: field.clone(),
                first_bureau: first,
                first_value: first_balance,
                second_bureau: second,
                second_value: second_balance,
                difference: gap,
                severity: Severity::Medium,
            });
        }
    }
}
