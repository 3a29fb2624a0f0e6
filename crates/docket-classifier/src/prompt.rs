//! Classification prompt construction
//!
//! The system instruction pins the model to a five-field JSON object; the
//! output parser depends on that contract. Same taxonomy and text always
//! produce the same prompt.

use docket_domain::Taxonomy;

const SYSTEM_INSTRUCTIONS: &str = "You are a classification assistant for security clearance cases.\n\
Return ONLY a JSON object with these keys:\n\
category_level_1, category_level_2, insights, notes, status\n\
- category_level_1 must be one of the Level 1 keys in the taxonomy.\n\
- category_level_2 must be one of the Level 2 values for that Level 1.\n\
- insights must be a one-sentence insight/advice for current applicants based on this decision.\n\
- notes must be a brief ASCII-only summary (<=120 chars) or empty.\n\
- status must be either 'Passed' or 'Failed' based on the decision.\n\
No additional keys. No markdown.";

/// A rendered prompt pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// The fixed system instruction
    pub system: String,
    /// Taxonomy plus sentinel-delimited case text
    pub user: String,
}

/// Builds the classification prompt for one case
///
/// The caller truncates the text to its character budget first; the builder
/// embeds whatever it is given.
pub struct PromptBuilder<'a> {
    taxonomy: &'a Taxonomy,
    case_text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder over the run taxonomy and one case's text
    pub fn new(taxonomy: &'a Taxonomy, case_text: &'a str) -> Self {
        Self {
            taxonomy,
            case_text,
        }
    }

    /// Render the system and user messages
    pub fn build(&self) -> Prompt {
        let user = format!(
            "Taxonomy (Level 1 -> Level 2):\n{}\n\nCase text:\n<<<\n{}\n>>>",
            self.taxonomy.to_prompt_json(),
            self.case_text
        );

        Prompt {
            system: SYSTEM_INSTRUCTIONS.to_string(),
            user,
        }
    }
}
