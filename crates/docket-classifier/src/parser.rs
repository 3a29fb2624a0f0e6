//! Tolerant parsing of model output
//!
//! Models reliably violate strict JSON-only contracts, so the parser takes
//! the substring from the first `{` to the last `}` before parsing. This is
//! a deliberate best-effort heuristic, not a fallback to tighten later.

use serde_json::Value;
use thiserror::Error;

/// The five-field object the prompt contract requires
///
/// Missing keys default to empty strings; all values are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelVerdict {
    /// Claimed Level 1 label, unvalidated
    pub category_level_1: String,
    /// Claimed Level 2 label, unvalidated
    pub category_level_2: String,
    /// One-sentence insight for applicants
    pub insights: String,
    /// Model-reported notes
    pub notes: String,
    /// `Passed` or `Failed`
    pub status: String,
}

/// Model output that could not be interpreted as the contract object
#[derive(Error, Debug)]
pub enum ParseError {
    /// No parseable JSON in the text
    #[error("model output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON but not an object
    #[error("model output is not a JSON object")]
    NotAnObject,
}

/// Slice out the candidate JSON object from raw model text
///
/// Leading and trailing prose is discarded; when no braces are present the
/// trimmed input is returned unchanged and left to fail JSON parsing.
pub fn extract_json(text: &str) -> &str {
    let text = text.trim();
    if text.starts_with('{') && text.ends_with('}') {
        return text;
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

/// Parse raw model text into a [`ModelVerdict`]
pub fn parse_verdict(content: &str) -> Result<ModelVerdict, ParseError> {
    let value: Value = serde_json::from_str(extract_json(content))?;
    let object = value.as_object().ok_or(ParseError::NotAnObject)?;

    let field = |key: &str| -> String {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    Ok(ModelVerdict {
        category_level_1: field("category_level_1"),
        category_level_2: field("category_level_2"),
        insights: field("insights"),
        notes: field("notes"),
        status: field("status"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_parses() {
        let verdict = parse_verdict(
            r#"{"category_level_1": "Drugs", "category_level_2": "Failure to disclose use",
                "insights": "Disclose early.", "notes": "", "status": "Failed"}"#,
        )
        .unwrap();
        assert_eq!(verdict.category_level_1, "Drugs");
        assert_eq!(verdict.category_level_2, "Failure to disclose use");
        assert_eq!(verdict.status, "Failed");
    }

    #[test]
    fn surrounding_prose_is_discarded() {
        let content = r#"Sure! Here is the JSON: {"category_level_1":"Drugs","category_level_2":"Use during clearance process","insights":"...","notes":"","status":"Failed"} Hope that helps!"#;
        let verdict = parse_verdict(content).unwrap();
        assert_eq!(verdict.category_level_1, "Drugs");
        assert_eq!(verdict.category_level_2, "Use during clearance process");
        assert_eq!(verdict.insights, "...");
    }

    #[test]
    fn markdown_fenced_object_parses() {
        let content = "```json\n{\"category_level_1\": \"Financial\", \"status\": \"Passed\"}\n```";
        let verdict = parse_verdict(content).unwrap();
        assert_eq!(verdict.category_level_1, "Financial");
        assert_eq!(verdict.status, "Passed");
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let verdict = parse_verdict(r#"{"category_level_1": "Drugs"}"#).unwrap();
        assert_eq!(verdict.category_level_2, "");
        assert_eq!(verdict.insights, "");
        assert_eq!(verdict.notes, "");
        assert_eq!(verdict.status, "");
    }

    #[test]
    fn values_are_trimmed() {
        let verdict = parse_verdict(r#"{"status": "  Passed  "}"#).unwrap();
        assert_eq!(verdict.status, "Passed");
    }

    #[test]
    fn no_json_at_all_is_an_error() {
        assert!(parse_verdict("I could not classify this case.").is_err());
    }

    #[test]
    fn json_array_is_not_an_object() {
        let err = parse_verdict("[1, 2]").unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject));
    }

    #[test]
    fn extract_json_prefers_outermost_braces() {
        assert_eq!(extract_json("ab {\"x\": {\"y\": 1}} cd"), "{\"x\": {\"y\": 1}}");
        assert_eq!(extract_json("  {\"x\": 1}  "), "{\"x\": 1}");
        assert_eq!(extract_json("no braces here"), "no braces here");
    }
}
