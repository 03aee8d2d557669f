//! Error handling for attachment processing operations.
//!
//! Fatal errors abort the current document only; the batch runner catches
//! them at the document boundary and records the failure. Recoverable
//! anomalies (mixed-integrality columns, total mismatches, serialization
//! round-trip findings) are not errors at all - they go through the
//! per-document warning log instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown attachment id: {id}")]
    UnknownAttachment { id: String },

    #[error("invalid extraction dump {path}: {reason}")]
    InvalidDump { path: PathBuf, reason: String },

    #[error("empty input table in {source_id} (page {page}, table {table})")]
    EmptyTable {
        source_id: String,
        page: usize,
        table: usize,
    },

    #[error("page {page} of {source_id} holds {found} sub-tables, expected at least {expected}")]
    MissingSubTables {
        source_id: String,
        page: usize,
        expected: usize,
        found: usize,
    },

    #[error("unparseable row {row_index} in {source_id}: '{raw}'")]
    UnparseableRow {
        source_id: String,
        row_index: usize,
        raw: String,
    },

    #[error("unrecognized numeric token '{token}'")]
    UnrecognizedNumber { token: String },

    #[error("empty value where a number was required")]
    EmptyNumber,

    #[error("document {source_id} timed out after {seconds}s")]
    Timeout { source_id: String, seconds: u64 },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Convenience constructor for row-level parse failures
    pub fn unparseable_row(
        source_id: impl Into<String>,
        row_index: usize,
        raw: impl Into<String>,
    ) -> Self {
        Self::UnparseableRow {
            source_id: source_id.into(),
            row_index,
            raw: raw.into(),
        }
    }

    /// Convenience constructor for configuration problems
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
