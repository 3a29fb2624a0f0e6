//! The per-document pipeline and run loop
//!
//! Each discovered file is carried through load → prompt → model call →
//! parse → validate → write, strictly one at a time. Every short-circuit
//! exit still ends in exactly one written row; the pipeline never drops a
//! document silently.

use std::path::{Path, PathBuf};

use docket_domain::{ClassificationRecord, RunStats, Taxonomy};
use docket_llm::{ChatClient, ChatMessage, ChatRequest, LlmError};
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::ClassifierError;
use crate::loader::load_text;
use crate::manifest::Manifest;
use crate::parser::parse_verdict;
use crate::prompt::PromptBuilder;
use crate::store::ResultStore;

/// Note tag for documents with no usable text
pub const NOTE_EMPTY_TEXT: &str = "empty_text";

/// Drives the classification pipeline over a set of case files
///
/// Generic over the chat client so tests can substitute a scripted mock for
/// the HTTP endpoint.
pub struct Classifier<C: ChatClient> {
    client: C,
    taxonomy: Taxonomy,
    manifest: Manifest,
    config: RunConfig,
}

impl<C: ChatClient> Classifier<C> {
    /// Create a classifier for one run
    pub fn new(client: C, taxonomy: Taxonomy, manifest: Manifest, config: RunConfig) -> Self {
        Self {
            client,
            taxonomy,
            manifest,
            config,
        }
    }

    /// Process `files` in order, writing one row per document
    ///
    /// Applies the run controls: the processed-count limit, resume skips
    /// (before any loading, the cheapest possible skip), and the
    /// inter-request delay after every written row.
    pub async fn run(
        &self,
        files: &[PathBuf],
        store: &mut ResultStore,
    ) -> Result<RunStats, ClassifierError> {
        let mut stats = RunStats::default();

        for path in files {
            if self.config.limit > 0 && stats.written >= self.config.limit {
                info!(limit = self.config.limit, "processed-count limit reached");
                break;
            }

            let base_id = case_id_from(path);
            if self.config.resume && store.is_seen(&base_id) {
                debug!(case_id = %base_id, "already recorded, skipping");
                stats.skipped += 1;
                continue;
            }

            let case_id = store.reserve_id(&base_id);
            let url = self
                .manifest
                .url_for(&base_id)
                .unwrap_or_default()
                .to_string();

            let (record, failed) = self.classify_one(&case_id, url, path).await;
            store.append(&record)?;
            stats.written += 1;
            if failed {
                stats.failed += 1;
            }

            if !self.config.sleep.is_zero() {
                tokio::time::sleep(self.config.sleep).await;
            }
        }

        info!(
            written = stats.written,
            failed = stats.failed,
            skipped = stats.skipped,
            "run complete"
        );
        Ok(stats)
    }

    /// Carry one document through the pipeline
    ///
    /// Infallible by design: every failure mode is folded into the returned
    /// row. The boolean reports whether the row is a diagnostic one.
    async fn classify_one(
        &self,
        case_id: &str,
        url: String,
        path: &Path,
    ) -> (ClassificationRecord, bool) {
        debug!(%case_id, path = %path.display(), "classifying");

        let (raw_text, load_note) = match load_text(path, self.config.allow_non_pdf) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(%case_id, error = %e, "load failed");
                let row = ClassificationRecord::failure(case_id, url, format!("load_error: {e}"));
                return (row, true);
            }
        };

        let raw_text = raw_text.replace('\0', "");
        let mut notes: Vec<String> = Vec::new();
        if let Some(note) = load_note {
            notes.push(note.to_string());
        }

        if raw_text.trim().is_empty() {
            notes.push(NOTE_EMPTY_TEXT.to_string());
            let row = ClassificationRecord::failure(case_id, url, notes.join("; "));
            return (row, true);
        }

        let clipped = truncate_chars(&raw_text, self.config.max_chars);
        let prompt = PromptBuilder::new(&self.taxonomy, clipped).build();

        let mut request = ChatRequest::new(
            &self.config.model,
            vec![
                ChatMessage::system(prompt.system),
                ChatMessage::user(prompt.user),
            ],
            self.config.max_output_tokens,
        );
        if self.config.use_json_format {
            request = request.with_json_object_format();
        }

        let content = match self.client.complete(&request).await {
            Ok(content) => content,
            Err(LlmError::Http { status, body }) => {
                warn!(%case_id, status, %body, "model endpoint returned an error");
                notes.push(format!("llm_http_error: {status}"));
                let row = ClassificationRecord::failure(case_id, url, notes.join("; "));
                return (row, true);
            }
            Err(e) => {
                warn!(%case_id, error = %e, "model call failed");
                notes.push(format!("llm_error: {e}"));
                let row = ClassificationRecord::failure(case_id, url, notes.join("; "));
                return (row, true);
            }
        };

        let verdict = match parse_verdict(&content) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(%case_id, error = %e, "model output is not the contract object");
                notes.push(format!("llm_parse_error: {e}"));
                let row = ClassificationRecord::failure(case_id, url, notes.join("; "));
                return (row, true);
            }
        };

        let check = self
            .taxonomy
            .validate_labels(&verdict.category_level_1, &verdict.category_level_2);
        if !check.note.is_empty() {
            notes.push(check.note.to_string());
        }
        if !verdict.notes.is_empty() {
            notes.insert(0, verdict.notes.clone());
        }

        let row = ClassificationRecord {
            case_id: case_id.to_string(),
            url,
            category_level_1: check.level1,
            category_level_2: check.level2,
            insights: verdict.insights,
            notes: notes.join("; "),
            status: verdict.status,
        };
        (row, false)
    }
}

/// Case identifier: the file name without its final extension
pub fn case_id_from(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Truncate to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_id_strips_one_extension() {
        assert_eq!(case_id_from(Path::new("/data/case_100.txt")), "case_100");
        assert_eq!(case_id_from(Path::new("case.2021.pdf")), "case.2021");
        assert_eq!(case_id_from(Path::new("no_extension")), "no_extension");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 10), "ab");
        // Multi-byte chars count as one
        assert_eq!(truncate_chars("éééé", 2), "éé");
    }
}
