use serde::{Deserialize, Serialize};

use super::config::{DimensionWeights, IndustryBenchmarks};
use super::dimensions::{Dimension, QualityDimensions};

/// Target for dimensions without a published industry benchmark.
const UNBENCHMARKED_TARGET: f64 = 90.0;
const BASE_PRIORITY: i32 = 5;
const HIGH_PRIORITY: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    const fn adjustment(self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 0,
            Self::High => -1,
        }
    }

    const fn for_dimension(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Completeness | Dimension::Compliance | Dimension::Usability => Self::Low,
            Dimension::Accuracy | Dimension::Consistency => Self::Medium,
            Dimension::Reliability => Self::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityImprovement {
    pub dimension: Dimension,
    pub current_score: f64,
    pub target_score: f64,
    /// Overall points recovered by closing the gap.
    pub potential_impact: f64,
    pub priority: u8,
    pub effort: Effort,
    pub recommendation: String,
    pub actions: Vec<String>,
}

impl QualityImprovement {
    pub fn is_high_priority(&self) -> bool {
        self.priority >= HIGH_PRIORITY
    }
}

pub(crate) fn priority(current: f64, impact: f64, effort: Effort) -> u8 {
    let score_boost = if current < 60.0 {
        3
    } else if current < 75.0 {
        2
    } else if current < 85.0 {
        1
    } else {
        0
    };
    let impact_boost = if impact >= 5.0 {
        2
    } else if impact >= 2.0 {
        1
    } else {
        0
    };

    (BASE_PRIORITY + score_boost + impact_boost + effort.adjustment()).clamp(1, 10) as u8
}

fn headline(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Accuracy => "Tighten field-level validation of extracted report data",
        Dimension::Completeness => "Recover missing critical and important fields",
        Dimension::Consistency => "Resolve cross-section and cross-bureau contradictions",
        Dimension::Compliance => "Bring the dispute letter in line with the submission format",
        Dimension::Reliability => "Improve extraction confidence and processing stability",
        Dimension::Usability => "Reduce outstanding recommendations before handing off results",
    }
}

/// One candidate per dimension below its target, highest priority first.
pub(crate) fn recommend(
    dimensions: &QualityDimensions,
    weights: &DimensionWeights,
    benchmarks: &IndustryBenchmarks,
    actions_for: impl Fn(Dimension) -> Vec<String>,
) -> Vec<QualityImprovement> {
    let mut improvements: Vec<QualityImprovement> = dimensions
        .entries()
        .into_iter()
        .filter_map(|(dimension, current)| {
            let target = benchmarks
                .for_dimension(dimension)
                .unwrap_or(UNBENCHMARKED_TARGET);
            if current >= target {
                return None;
            }

            let potential_impact = ((target - current) * weights.weight(dimension) * 10.0).round() / 10.0;
            let effort = Effort::for_dimension(dimension);
            Some(QualityImprovement {
                dimension,
                current_score: current,
                target_score: target,
                potential_impact,
                priority: priority(current, potential_impact, effort),
                effort,
                recommendation: headline(dimension).to_string(),
                actions: actions_for(dimension),
            })
        })
        .collect();

    improvements.sort_by(|left, right| {
        right.priority.cmp(&left.priority).then_with(|| {
            right
                .potential_impact
                .total_cmp(&left.potential_impact)
        })
    });
    improvements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_combines_score_impact_and_effort() {
        assert_eq!(priority(50.0, 6.0, Effort::Low), 10);
        assert_eq!(priority(50.0, 6.0, Effort::High), 9);
        assert_eq!(priority(80.0, 1.0, Effort::Medium), 6);
        assert_eq!(priority(88.0, 0.5, Effort::High), 4);
        assert_eq!(priority(70.0, 3.0, Effort::Low), 9);
    }

    #[test]
    fn dimensions_at_target_are_skipped() {
        let dimensions = QualityDimensions {
            accuracy: 95.0,
            completeness: 50.0,
            consistency: 90.0,
            compliance: 100.0,
            reliability: 95.0,
            usability: 70.0,
        };
        let improvements = recommend(
            &dimensions,
            &DimensionWeights::default(),
            &IndustryBenchmarks::default(),
            |_| Vec::new(),
        );

        let covered: Vec<Dimension> = improvements.iter().map(|entry| entry.dimension).collect();
        assert_eq!(covered, vec![Dimension::Completeness, Dimension::Usability]);
        let completeness = &improvements[0];
        assert_eq!(completeness.target_score, 92.0);
        assert_eq!(completeness.potential_impact, 8.4);
        assert!(completeness.is_high_priority());
    }
}
