//! Batch-fatal error types
//!
//! Per-document problems never surface here; they are recorded as result
//! rows by the classifier. This enum covers only failures that invalidate
//! the whole run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the batch
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The output table could not be opened or written
    #[error("result store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be serialized or appended
    #[error("result store write error: {0}")]
    Csv(#[from] csv::Error),

    /// The existing output table could not be scanned when resuming
    #[error("cannot read existing output {path}: {message}")]
    Resume {
        /// The output table being resumed
        path: PathBuf,
        /// Underlying scan failure
        message: String,
    },
}
