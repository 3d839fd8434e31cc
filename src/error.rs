//! Error type for the payout engine
//!
//! The computation core itself is infallible (missing amounts, unknown
//! people, and unused categories are all defined defaults); errors only
//! arise at the edges — loading deal rows and configuration tables, and
//! exporting the report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The deal data source could not be retrieved or read.
    /// Surfaced to the caller, never silently treated as zero revenue.
    #[error("deal data unavailable: {0}")]
    DataUnavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
