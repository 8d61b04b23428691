//! This crate aggregates American Housing Survey (AHS) microdata into small JSON summary tables
//! of accessibility feature prevalence. Row-level survey records are bucketed by building age and
//! by structure type, and for each (feature, bucket) pair the survey-weighted percentage of units
//! reporting the feature is computed. The resulting tables are written as flat JSON artifacts
//! consumed unmodified by a separate visualisation front end.
//!
//! Aggregation is a pure, single-pass fold over the record sequence; re-running the batch is the
//! only retry strategy required.
//!
//! The tool is built on top of a number of open source components.
//!
//! * [Clap](clap) parses the command line arguments, with environment variable fallbacks.
//! * [csv] reads the microdata extract.
//! * [Serde](serde) serialises the summary tables and metadata to JSON.
//! * [tracing] provides structured progress and skip diagnostics.

pub mod aggregate;
pub mod app;
pub mod categories;
pub mod cli;
pub mod error;
pub mod loader;
pub mod models;
pub mod summary;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
