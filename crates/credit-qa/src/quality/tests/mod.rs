mod common;
mod completeness;
mod compliance;
mod dashboard;
mod data_quality;
