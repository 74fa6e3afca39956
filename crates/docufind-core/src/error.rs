//! Error types for the docufind-core library.

use thiserror::Error;

/// Internal error taxonomy for the extraction engine.
///
/// None of these variants cross the public extraction boundary: the
/// non-fatal ones degrade into record warnings or log lines, and
/// [`ExtractionError::TotalExtractionFailure`] is absorbed by the
/// pipeline, which answers with the guaranteed fallback record instead.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Content normalization produced degraded, best-effort text.
    #[error("normalization degraded: {0}")]
    NormalizationDegraded(String),

    /// A single pattern failed to compile and was skipped.
    #[error("pattern skipped for {field}: {reason}")]
    PatternSkipped { field: String, reason: String },

    /// An amount candidate could not be parsed.
    #[error("unparseable amount: {0}")]
    AmountUnparsed(String),

    /// Extraction could not proceed at all.
    #[error("extraction failed: {0}")]
    TotalExtractionFailure(String),
}

/// Result type for the docufind-core library.
pub type Result<T> = std::result::Result<T, ExtractionError>;
