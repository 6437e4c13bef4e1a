use serde::{Deserialize, Serialize};

use super::alerts::{AlertLevel, QualityAlert};
use super::benchmark::BenchmarkComparison;
use super::dimensions::{QualityDimensions, QualityGrade};
use super::improvements::QualityImprovement;

/// Human-readable narrative of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub summary: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub next_steps: Vec<String>,
}

pub(crate) fn narrate(
    overall: f64,
    grade: QualityGrade,
    dimensions: &QualityDimensions,
    alerts: &[QualityAlert],
    improvements: &[QualityImprovement],
    benchmark: &BenchmarkComparison,
) -> QualityReport {
    let critical = alerts
        .iter()
        .filter(|alert| alert.level == AlertLevel::Critical)
        .count();

    let mut summary = format!(
        "Overall quality {overall:.1} (grade {}), {} against the industry average of {:.0} ({} percentile).",
        grade.label(),
        benchmark.ranking.label().to_ascii_lowercase(),
        benchmark.industry_average,
        ordinal(benchmark.percentile)
    );
    if critical > 0 {
        summary.push_str(&format!(
            " {critical} critical alert{} need attention before the results are used.",
            if critical == 1 { "" } else { "s" }
        ));
    }

    let strengths = dimensions
        .entries()
        .into_iter()
        .filter(|(_, score)| *score >= 90.0)
        .map(|(dimension, score)| format!("{} is strong at {score:.1}", dimension.label()))
        .collect();

    let concerns = dimensions
        .entries()
        .into_iter()
        .filter(|(_, score)| *score < 75.0)
        .map(|(dimension, score)| format!("{} is weak at {score:.1}", dimension.label()))
        .collect();

    let next_steps = improvements
        .iter()
        .take(3)
        .map(|improvement| improvement.recommendation.clone())
        .collect();

    QualityReport {
        summary,
        strengths,
        concerns,
        next_steps,
    }
}

fn ordinal(value: u8) -> String {
    let suffix = match (value % 10, value % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{value}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_handle_teens() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(50), "50th");
    }
}
