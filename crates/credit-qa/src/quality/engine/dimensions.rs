use serde::{Deserialize, Serialize};

use super::super::domain::{clamp_score, round1};
use super::config::DimensionWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Accuracy,
    Completeness,
    Consistency,
    Compliance,
    Reliability,
    Usability,
}

impl Dimension {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Accuracy,
            Self::Completeness,
            Self::Consistency,
            Self::Compliance,
            Self::Reliability,
            Self::Usability,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Accuracy => "Accuracy",
            Self::Completeness => "Completeness",
            Self::Consistency => "Consistency",
            Self::Compliance => "Compliance",
            Self::Reliability => "Reliability",
            Self::Usability => "Usability",
        }
    }

    pub(crate) const fn weight_name(self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy weight",
            Self::Completeness => "completeness weight",
            Self::Consistency => "consistency weight",
            Self::Compliance => "compliance weight",
            Self::Reliability => "reliability weight",
            Self::Usability => "usability weight",
        }
    }
}

/// The six orthogonal quality scores of one assessment, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDimensions {
    pub accuracy: f64,
    pub completeness: f64,
    pub consistency: f64,
    pub compliance: f64,
    pub reliability: f64,
    pub usability: f64,
}

impl QualityDimensions {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Accuracy => self.accuracy,
            Dimension::Completeness => self.completeness,
            Dimension::Consistency => self.consistency,
            Dimension::Compliance => self.compliance,
            Dimension::Reliability => self.reliability,
            Dimension::Usability => self.usability,
        }
    }

    pub fn entries(&self) -> [(Dimension, f64); 6] {
        Dimension::ordered().map(|dimension| (dimension, self.get(dimension)))
    }

    /// Weighted overall score, rounded to one decimal.
    pub fn overall(&self, weights: &DimensionWeights) -> f64 {
        let raw: f64 = self
            .entries()
            .into_iter()
            .map(|(dimension, score)| score * weights.weight(dimension))
            .sum();
        round1(clamp_score(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl QualityGrade {
    /// Lower bound of each band, best first; anything below the last band is `F`.
    const BANDS: [(f64, Self); 7] = [
        (97.0, Self::APlus),
        (93.0, Self::A),
        (90.0, Self::BPlus),
        (87.0, Self::B),
        (83.0, Self::CPlus),
        (80.0, Self::C),
        (70.0, Self::D),
    ];

    pub fn from_score(score: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Self::F)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_floors_map_to_their_grade() {
        let expectations = [
            (97.0, QualityGrade::APlus),
            (93.0, QualityGrade::A),
            (90.0, QualityGrade::BPlus),
            (87.0, QualityGrade::B),
            (83.0, QualityGrade::CPlus),
            (80.0, QualityGrade::C),
            (70.0, QualityGrade::D),
            (69.0, QualityGrade::F),
            (69.9, QualityGrade::F),
            (100.0, QualityGrade::APlus),
            (0.0, QualityGrade::F),
        ];
        for (score, grade) in expectations {
            assert_eq!(QualityGrade::from_score(score), grade, "score {score}");
        }
    }

    #[test]
    fn grade_labels_serialize_with_plus_signs() {
        let json = serde_json::to_string(&QualityGrade::BPlus).expect("grade serializes");
        assert_eq!(json, "\"B+\"");
    }
}
