//! Error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Tabulation error type
///
/// This type encapsulates the fatal errors that may occur during a batch run. Record-level
/// problems (an invalid sampling weight, an unmapped bucket, a missing feature indicator) are not
/// errors; they are absorbed by excluding the record from the relevant sums.
#[derive(Debug, Error)]
pub enum TabulationError {
    /// The microdata source could not be opened
    #[error("failed to open microdata source {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the source header
    #[error("microdata source is missing required column {column}")]
    SchemaMismatch { column: &'static str },

    /// The source is not structurally valid CSV
    #[error("failed to read microdata records")]
    MalformedSource(#[from] csv::Error),

    /// A summary artifact could not be written
    #[error("failed to write summary artifact {path}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error serialising a summary table
    #[error("failed to serialise summary table")]
    Serialize(#[from] serde_json::Error),
}
