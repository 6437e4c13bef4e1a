//! Leaf validators and the engine that combines them.

pub mod completeness;
pub mod compliance;
pub mod consistency;
pub mod data_quality;
pub mod dates;
pub mod domain;
pub mod engine;

#[cfg(test)]
mod tests;

pub use completeness::{CompletenessReport, CompletenessValidator};
pub use compliance::{ComplianceGrade, ComplianceReport, ComplianceValidator};
pub use consistency::{ConsistencyChecker, ConsistencyReport};
pub use data_quality::{DataQualityReport, DataQualityValidator};
pub use domain::{CreditReport, DisputeLetter, IssueKind, Severity, ValidationIssue};
pub use engine::{
    generate_quality_dashboard, LeafValidators, QualityAssuranceEngine, QualityAssuranceResult,
    QualityConfig, QuickCheck, QuickCheckResult, StandardValidators,
};
