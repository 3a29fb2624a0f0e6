//! Append-only CSV result store
//!
//! The output table doubles as the resume checkpoint: on resume the existing
//! rows are scanned to rebuild the seen-identifier set, and new rows are
//! appended without a header. Every append is flushed so a killed process
//! loses at most the in-flight document.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use docket_domain::ClassificationRecord;
use tracing::{debug, info};

use crate::error::ClassifierError;

/// The open result table plus the identifiers it already contains
pub struct ResultStore {
    writer: csv::Writer<File>,
    seen: HashSet<String>,
    path: PathBuf,
}

impl ResultStore {
    /// Open the table, resuming when asked and a previous table exists
    ///
    /// Resume against a missing file silently falls back to a fresh table,
    /// matching the first run of a resumable job.
    pub fn open(path: &Path, resume: bool) -> Result<Self, ClassifierError> {
        if resume && path.is_file() {
            Self::resume(path)
        } else {
            Self::create(path)
        }
    }

    /// Truncate (or create) the table and write the header row
    pub fn create(path: &Path) -> Result<Self, ClassifierError> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(ClassificationRecord::FIELD_NAMES)?;
        writer.flush()?;

        Ok(Self {
            writer,
            seen: HashSet::new(),
            path: path.to_path_buf(),
        })
    }

    /// Append to an existing table, pre-scanning it for seen identifiers
    ///
    /// An unreadable checkpoint is fatal: resuming against a table we cannot
    /// trust would re-classify (and duplicate) unknown rows.
    pub fn resume(path: &Path) -> Result<Self, ClassifierError> {
        let seen = scan_seen_ids(path).map_err(|e| ClassifierError::Resume {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), existing = seen.len(), "resuming result table");

        let file = OpenOptions::new().append(true).open(path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        Ok(Self {
            writer,
            seen,
            path: path.to_path_buf(),
        })
    }

    /// True when the identifier is already recorded (or reserved this run)
    pub fn is_seen(&self, case_id: &str) -> bool {
        self.seen.contains(case_id)
    }

    /// Number of identifiers recorded or reserved so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// The table's path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Claim a unique identifier for this run
    ///
    /// A base identifier that is already taken gets `_2`, `_3`, … appended
    /// until unique; the result is registered before it is returned, so
    /// identifiers are unique in the table at all times.
    pub fn reserve_id(&mut self, base: &str) -> String {
        let mut case_id = base.to_string();
        if self.seen.contains(&case_id) {
            let mut suffix = 2usize;
            while self.seen.contains(&format!("{base}_{suffix}")) {
                suffix += 1;
            }
            case_id = format!("{base}_{suffix}");
            debug!(base, %case_id, "identifier collision, suffixed");
        }
        self.seen.insert(case_id.clone());
        case_id
    }

    /// Write one row and flush it to disk
    pub fn append(&mut self, record: &ClassificationRecord) -> Result<(), ClassifierError> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for ResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultStore")
            .field("path", &self.path)
            .field("seen", &self.seen.len())
            .finish()
    }
}

/// Collect the `case_id` column of an existing table
fn scan_seen_ids(path: &Path) -> Result<HashSet<String>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let id_index = reader
        .headers()?
        .iter()
        .position(|h| h == "case_id");

    let mut seen = HashSet::new();
    if let Some(index) = id_index {
        for row in reader.records() {
            let row = row?;
            if let Some(id) = row.get(index) {
                seen.insert(id.to_string());
            }
        }
    }
    Ok(seen)
}
