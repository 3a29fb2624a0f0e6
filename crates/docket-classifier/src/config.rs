//! Run configuration for the classifier

use std::time::Duration;

/// Knobs for one classification run
///
/// Endpoint, credential and timeout live in the chat client; this struct
/// carries everything the orchestrator itself consults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Model name sent with every request
    pub model: String,

    /// Maximum characters of case text embedded in the prompt
    pub max_chars: usize,

    /// `max_tokens` for the model's reply
    pub max_output_tokens: u32,

    /// Send the `json_object` structured-output hint
    pub use_json_format: bool,

    /// Stop after this many written rows; 0 means no limit
    pub limit: usize,

    /// Pause after every written row, success or failure alike
    pub sleep: Duration,

    /// Skip documents whose identifier is already in the table
    pub resume: bool,

    /// Read mislabeled `.pdf` files as plain text instead of failing them
    pub allow_non_pdf: bool,

    /// Review threshold carried through for downstream tooling; the core
    /// records it but computes nothing from it
    pub review_threshold: f64,
}

impl RunConfig {
    /// Basic sanity checks on the knobs
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_chars == 0 {
            return Err("max_chars must be greater than 0".to_string());
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.review_threshold) {
            return Err("review_threshold must be within 0.0..=1.0".to_string());
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_chars: 12_000,
            max_output_tokens: 256,
            use_json_format: true,
            limit: 0,
            sleep: Duration::from_secs(2),
            resume: false,
            allow_non_pdf: false,
            review_threshold: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_chars_is_rejected() {
        let config = RunConfig {
            max_chars: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let config = RunConfig {
            review_threshold: 1.5,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
