//! Result-table record types

use serde::{Deserialize, Serialize};

/// One row of the result table
///
/// Created exactly once per processed document and never mutated after
/// being written. Failure rows carry empty category fields and a
/// diagnostic note; every row, success or failure, has a non-empty
/// `case_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// De-duplicated base file name acting as the primary key
    pub case_id: String,

    /// Source URL from the manifest, empty when unknown
    pub url: String,

    /// Level 1 taxonomy label, empty on failure
    pub category_level_1: String,

    /// Level 2 taxonomy label, empty on failure
    pub category_level_2: String,

    /// One-sentence insight produced by the model
    pub insights: String,

    /// Diagnostic tags and model notes, joined by `"; "`
    pub notes: String,

    /// `Passed` or `Failed` per the model, empty on failure
    pub status: String,
}

impl ClassificationRecord {
    /// Column order of the result table header
    pub const FIELD_NAMES: [&'static str; 7] = [
        "case_id",
        "url",
        "category_level_1",
        "category_level_2",
        "insights",
        "notes",
        "status",
    ];

    /// A failure row: identifier, URL and note, all category fields empty
    pub fn failure(case_id: impl Into<String>, url: impl Into<String>, notes: String) -> Self {
        Self {
            case_id: case_id.into(),
            url: url.into(),
            notes,
            ..Self::default()
        }
    }
}

/// Counters aggregated over a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Rows written this run, failures included
    pub written: usize,

    /// Rows written with empty categories and a diagnostic note
    pub failed: usize,

    /// Documents skipped because their identifier was already recorded
    pub skipped: usize,
}
