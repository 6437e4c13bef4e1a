//! Quality assurance pipeline for extracted credit reports and derived dispute letters.
//!
//! The [`quality`] module holds the four leaf validators and the engine that folds their
//! output into a graded assessment. Everything under it is pure and synchronous; callers
//! that need an async boundary wrap a whole assessment once at the call site.

pub mod config;
pub mod quality;
pub mod telemetry;

pub use quality::engine::{QualityAssuranceEngine, QualityAssuranceResult, QualityConfig};
