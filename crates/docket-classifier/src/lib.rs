//! Docket Classification Pipeline
//!
//! Turns an unordered set of case files into a durable, append-safe result
//! table. One document at a time: load text, build the prompt, call the
//! model, parse and validate the output, write the row. Any failure
//! attributable to a single document becomes a diagnostic row instead of
//! aborting the batch; only conditions that make the batch meaningless
//! (no inputs, unreadable resume checkpoint, row-write failure) are fatal.
//!
//! # Modules
//!
//! - [`loader`]: file → text, with a content-signature check for PDFs
//! - [`prompt`]: deterministic system/user prompt construction
//! - [`parser`]: tolerant JSON extraction from noisy model output
//! - [`manifest`]: case id → source URL lookup
//! - [`store`]: the CSV result table, fresh or resumed
//! - [`classifier`]: the per-document state machine and run loop
//! - [`discover`]: input file enumeration

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod discover;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod parser;
pub mod prompt;
pub mod store;

pub use classifier::Classifier;
pub use config::RunConfig;
pub use discover::{collect_case_files, parse_extension_list};
pub use error::ClassifierError;
pub use manifest::Manifest;
pub use store::ResultStore;
