use serde::{Deserialize, Serialize};

use super::super::domain::round1;
use super::config::IndustryBenchmarks;
use super::dimensions::{Dimension, QualityDimensions};

/// Percentile points gained per overall point above the industry average.
const PERCENTILE_SLOPE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    TopPerformer,
    AboveAverage,
    Average,
    BelowAverage,
    BottomPerformer,
}

impl Ranking {
    pub fn from_percentile(percentile: u8) -> Self {
        match percentile {
            90.. => Self::TopPerformer,
            60..=89 => Self::AboveAverage,
            40..=59 => Self::Average,
            10..=39 => Self::BelowAverage,
            _ => Self::BottomPerformer,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TopPerformer => "Top performer",
            Self::AboveAverage => "Above average",
            Self::Average => "Average",
            Self::BelowAverage => "Below average",
            Self::BottomPerformer => "Bottom performer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionGap {
    pub dimension: Dimension,
    pub score: f64,
    pub benchmark: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub overall_score: f64,
    pub industry_average: f64,
    pub difference: f64,
    pub percentile: u8,
    pub ranking: Ranking,
    pub dimension_gaps: Vec<DimensionGap>,
}

pub(crate) fn percentile(overall: f64, industry_average: f64) -> u8 {
    let raw = 50.0 + PERCENTILE_SLOPE * (overall - industry_average);
    if raw.is_finite() {
        raw.round().clamp(1.0, 99.0) as u8
    } else {
        1
    }
}

pub(crate) fn compare(
    overall: f64,
    dimensions: &QualityDimensions,
    benchmarks: &IndustryBenchmarks,
) -> BenchmarkComparison {
    let percentile = percentile(overall, benchmarks.overall);

    let dimension_gaps = dimensions
        .entries()
        .into_iter()
        .filter_map(|(dimension, score)| {
            benchmarks.for_dimension(dimension).map(|benchmark| DimensionGap {
                dimension,
                score,
                benchmark,
                difference: round1(score - benchmark),
            })
        })
        .collect();

    BenchmarkComparison {
        overall_score: overall,
        industry_average: benchmarks.overall,
        difference: round1(overall - benchmarks.overall),
        percentile,
        ranking: Ranking::from_percentile(percentile),
        dimension_gaps,
    }
}
