//! Docket Domain Layer
//!
//! Core data model for the case classification pipeline. This crate defines
//! the two-level taxonomy, label validation and repair, and the record types
//! written to the result table. Infrastructure (HTTP, filesystem, CSV) lives
//! in other crates.
//!
//! ## Key Concepts
//!
//! - **Taxonomy**: ordered Level 1 → Level 2 category map, immutable for the
//!   process lifetime, loadable from JSON or embedded
//! - **Label validation**: repair heuristic favoring the more specific
//!   Level 2 label when the model pairs it with the wrong Level 1
//! - **Classification Record**: one row per processed document, keyed by a
//!   case identifier derived from the file name

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod record;
pub mod taxonomy;

// Re-exports for convenience
pub use record::{ClassificationRecord, RunStats};
pub use taxonomy::{LabelCheck, Taxonomy, NOTE_INVALID_LABEL, NOTE_LEVEL1_CORRECTED};
