//! Case identifier → source URL lookup
//!
//! The manifest is produced by the download tooling as a JSON object mapping
//! file names (with extension) to the URL each case was fetched from. Keys
//! are normalized to base names on load so lookups match case identifiers.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

/// Read-only URL lookup table
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    urls: HashMap<String, String>,
}

impl Manifest {
    /// An empty manifest; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a manifest file, tolerating its absence
    ///
    /// A missing or malformed manifest degrades to an empty lookup with a
    /// warning: URLs are enrichment, not a requirement for classification.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "manifest not loaded");
                return Self::empty();
            }
        };

        let entries: HashMap<String, String> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "manifest is not a JSON object of strings");
                return Self::empty();
            }
        };

        let urls = entries
            .into_iter()
            .map(|(name, url)| (strip_extension(&name), url))
            .collect::<HashMap<_, _>>();

        info!(path = %path.display(), entries = urls.len(), "manifest loaded");
        Self { urls }
    }

    /// Source URL for a case identifier, if the manifest has one
    pub fn url_for(&self, case_id: &str) -> Option<&str> {
        self.urls.get(case_id).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// True when no entries are loaded
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

fn strip_extension(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn keys_are_stripped_to_base_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"case_100.pdf": "https://example.org/100", "case_200.txt": "https://example.org/200"}}"#
        )
        .unwrap();

        let manifest = Manifest::load(&path);
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.url_for("case_100"), Some("https://example.org/100"));
        assert_eq!(manifest.url_for("case_200"), Some("https://example.org/200"));
        assert_eq!(manifest.url_for("case_300"), None);
    }

    #[test]
    fn missing_manifest_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(&dir.path().join("absent.json"));
        assert!(manifest.is_empty());
    }

    #[test]
    fn malformed_manifest_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(Manifest::load(&path).is_empty());
    }
}
