use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

use super::dimensions::Dimension;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Weight of each quality dimension in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionWeights {
    pub accuracy: f64,
    pub completeness: f64,
    pub consistency: f64,
    pub compliance: f64,
    pub reliability: f64,
    pub usability: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            accuracy: 0.25,
            completeness: 0.20,
            consistency: 0.20,
            compliance: 0.15,
            reliability: 0.10,
            usability: 0.10,
        }
    }
}

impl DimensionWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Accuracy => self.accuracy,
            Dimension::Completeness => self.completeness,
            Dimension::Consistency => self.consistency,
            Dimension::Compliance => self.compliance,
            Dimension::Reliability => self.reliability,
            Dimension::Usability => self.usability,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::ordered()
            .into_iter()
            .map(|dimension| self.weight(dimension))
            .sum()
    }
}

/// Score boundaries below which a dimension raises an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertThresholds {
    pub critical: f64,
    pub warning: f64,
    pub info: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical: 60.0,
            warning: 75.0,
            info: 85.0,
        }
    }
}

/// Industry reference scores used for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmarks {
    pub accuracy: f64,
    pub completeness: f64,
    pub consistency: f64,
    pub compliance: f64,
    pub overall: f64,
}

impl Default for IndustryBenchmarks {
    fn default() -> Self {
        Self {
            accuracy: 87.0,
            completeness: 92.0,
            consistency: 84.0,
            compliance: 96.0,
            overall: 89.0,
        }
    }
}

impl IndustryBenchmarks {
    /// Benchmark for a dimension, if the industry publishes one.
    pub fn for_dimension(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Accuracy => Some(self.accuracy),
            Dimension::Completeness => Some(self.completeness),
            Dimension::Consistency => Some(self.consistency),
            Dimension::Compliance => Some(self.compliance),
            Dimension::Reliability | Dimension::Usability => None,
        }
    }
}

/// Read-only engine configuration; build once and share.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityConfig {
    pub weights: DimensionWeights,
    pub thresholds: AlertThresholds,
    pub benchmarks: IndustryBenchmarks,
}

impl QualityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for dimension in Dimension::ordered() {
            let weight = self.weights.weight(dimension);
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::OutOfRange {
                    name: dimension.weight_name(),
                    value: weight,
                });
            }
        }

        let total = self.weights.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSumToOne { total });
        }

        let AlertThresholds {
            critical,
            warning,
            info,
        } = self.thresholds;
        for (name, value) in [
            ("critical threshold", critical),
            ("warning threshold", warning),
            ("info threshold", info),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        if !(critical < warning && warning < info) {
            return Err(ConfigError::ThresholdsOutOfOrder {
                critical,
                warning,
                info,
            });
        }

        Ok(())
    }
}
