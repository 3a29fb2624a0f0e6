//! Two-level category taxonomy and label validation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Note emitted when the Level 1 label was repaired from the Level 2 label
pub const NOTE_LEVEL1_CORRECTED: &str = "level1_corrected";

/// Note emitted when neither label could be matched against the taxonomy
pub const NOTE_INVALID_LABEL: &str = "invalid_label";

/// Ordered mapping from Level 1 category names to their Level 2 categories
///
/// The taxonomy is loaded once (embedded default or a JSON file) and is
/// immutable for the process lifetime. Iteration order follows the source
/// JSON, which matters both for prompt construction (deterministic prompts)
/// and for label repair (first match in taxonomy order wins).
///
/// Level 2 names are unique within their Level 1 list but need not be
/// globally unique; the repair heuristic relies on a scan in declaration
/// order rather than a reverse index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: IndexMap<String, Vec<String>>,
}

/// Outcome of validating a `(level1, level2)` pair against the taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCheck {
    /// The (possibly corrected) Level 1 label
    pub level1: String,
    /// The Level 2 label, passed through unchanged
    pub level2: String,
    /// Empty, [`NOTE_LEVEL1_CORRECTED`] or [`NOTE_INVALID_LABEL`]
    pub note: &'static str,
}

impl Taxonomy {
    /// The default security-clearance taxonomy compiled into the binary
    pub fn embedded() -> Self {
        // The asset is validated by tests; a parse failure here means the
        // crate itself is broken.
        serde_json::from_str(include_str!("../assets/taxonomy.json"))
            .expect("embedded taxonomy.json is valid")
    }

    /// Parse a taxonomy from a JSON object mapping Level 1 names to
    /// Level 2 name arrays
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of Level 1 categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the taxonomy has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate Level 1 names in declaration order
    pub fn level1_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Level 2 categories under the given Level 1 name, if it exists
    pub fn level2_of(&self, level1: &str) -> Option<&[String]> {
        self.categories.get(level1).map(Vec::as_slice)
    }

    /// True when `level2` is listed under `level1`
    pub fn contains(&self, level1: &str, level2: &str) -> bool {
        self.level2_of(level1)
            .is_some_and(|options| options.iter().any(|o| o == level2))
    }

    /// First Level 1 category (in declaration order) listing `level2`
    pub fn level1_for(&self, level2: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|(_, options)| options.iter().any(|o| o == level2))
            .map(|(name, _)| name.as_str())
    }

    /// Serialize the taxonomy as pretty-printed JSON for prompt embedding
    ///
    /// Deterministic: same taxonomy always yields the same string.
    pub fn to_prompt_json(&self) -> String {
        // IndexMap serializes in insertion order, so this cannot fail and
        // stays stable across calls.
        serde_json::to_string_pretty(&self.categories).expect("taxonomy serializes")
    }

    /// Validate a `(level1, level2)` pair returned by the model
    ///
    /// - Known pair: returned unchanged with an empty note.
    /// - `level2` listed under a different Level 1: that Level 1 is adopted
    ///   and the note is [`NOTE_LEVEL1_CORRECTED`]. Models frequently emit a
    ///   correct Level 2 paired with an inconsistent Level 1 guess; the
    ///   repair favors the more specific field.
    /// - Otherwise: both values pass through with [`NOTE_INVALID_LABEL`].
    pub fn validate_labels(&self, level1: &str, level2: &str) -> LabelCheck {
        if self.contains(level1, level2) {
            return LabelCheck {
                level1: level1.to_string(),
                level2: level2.to_string(),
                note: "",
            };
        }

        if !level2.is_empty() {
            if let Some(corrected) = self.level1_for(level2) {
                return LabelCheck {
                    level1: corrected.to_string(),
                    level2: level2.to_string(),
                    note: NOTE_LEVEL1_CORRECTED,
                };
            }
        }

        LabelCheck {
            level1: level1.to_string(),
            level2: level2.to_string(),
            note: NOTE_INVALID_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_taxonomy() -> Taxonomy {
        Taxonomy::from_json(
            r#"{
                "Drugs": ["Use during clearance process", "Failure to disclose use"],
                "Financial": ["Unpaid taxes", "Failure to disclose use"],
                "Criminal Conduct": ["Felony conviction"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn embedded_taxonomy_parses() {
        let taxonomy = Taxonomy::embedded();
        assert_eq!(taxonomy.len(), 9);
        assert!(taxonomy.contains("Drugs", "Use during clearance process"));
        assert!(taxonomy.contains(
            "Technology Misuse / Information Security",
            "Unauthorized access to systems"
        ));
    }

    #[test]
    fn embedded_taxonomy_preserves_order() {
        let taxonomy = Taxonomy::embedded();
        let names: Vec<&str> = taxonomy.level1_names().collect();
        assert_eq!(names[0], "Drugs");
        assert_eq!(names[1], "Financial");
        assert_eq!(names[8], "Technology Misuse / Information Security");
    }

    #[test]
    fn valid_pairs_pass_unchanged() {
        let taxonomy = Taxonomy::embedded();
        for level1 in taxonomy.level1_names() {
            for level2 in taxonomy.level2_of(level1).unwrap() {
                let check = taxonomy.validate_labels(level1, level2);
                assert_eq!(check.level1, level1);
                assert_eq!(&check.level2, level2);
                assert_eq!(check.note, "");
            }
        }
    }

    #[test]
    fn level1_corrected_from_level2() {
        let taxonomy = Taxonomy::embedded();
        let check = taxonomy.validate_labels("Financial", "Felony conviction");
        assert_eq!(check.level1, "Criminal Conduct");
        assert_eq!(check.level2, "Felony conviction");
        assert_eq!(check.note, NOTE_LEVEL1_CORRECTED);
    }

    #[test]
    fn correction_prefers_first_in_taxonomy_order() {
        // "Failure to disclose use" appears under both Drugs and Financial
        // in this fixture; the scan adopts the first declaration.
        let taxonomy = small_taxonomy();
        let check = taxonomy.validate_labels("Criminal Conduct", "Failure to disclose use");
        assert_eq!(check.level1, "Drugs");
        assert_eq!(check.note, NOTE_LEVEL1_CORRECTED);
    }

    #[test]
    fn unknown_labels_pass_through_as_invalid() {
        let taxonomy = Taxonomy::embedded();
        let check = taxonomy.validate_labels("Gardening", "Overwatering");
        assert_eq!(check.level1, "Gardening");
        assert_eq!(check.level2, "Overwatering");
        assert_eq!(check.note, NOTE_INVALID_LABEL);
    }

    #[test]
    fn empty_level2_is_invalid_not_corrected() {
        let taxonomy = Taxonomy::embedded();
        let check = taxonomy.validate_labels("Drugs", "");
        assert_eq!(check.note, NOTE_INVALID_LABEL);
    }

    #[test]
    fn prompt_json_is_deterministic() {
        let taxonomy = Taxonomy::embedded();
        assert_eq!(taxonomy.to_prompt_json(), taxonomy.to_prompt_json());
        assert!(taxonomy.to_prompt_json().starts_with("{\n  \"Drugs\""));
    }

    #[test]
    fn from_json_rejects_non_object() {
        assert!(Taxonomy::from_json("[1, 2, 3]").is_err());
    }
}
