//! Command-line definition and input defaulting rules

use std::path::{Path, PathBuf};

use clap::Parser;

/// Default endpoint when neither the flag nor `LLM_ENDPOINT` is set
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Classify case documents with an LLM and write results to CSV.
#[derive(Debug, Parser)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory or file containing case PDFs or text files
    /// (default: txt_formatted if it exists, else txt, else pdfs)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "classified_cases.csv")]
    pub output: PathBuf,

    /// Comma-separated list of file extensions to include
    /// (default: .txt for txt/txt_formatted input, else .pdf,.txt)
    #[arg(long)]
    pub extensions: Option<String>,

    /// Allow .pdf files that are not actual PDFs
    #[arg(long)]
    pub allow_non_pdf: bool,

    /// LLM API endpoint (OpenAI compatible)
    #[arg(long, env = "LLM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// LLM model name
    #[arg(long, env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// LLM API key (or set LLM_API_KEY / OPENAI_API_KEY)
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Network timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Max characters of case text to send to the LLM
    #[arg(long, default_value_t = 12_000)]
    pub max_chars: usize,

    /// Max tokens for LLM output
    #[arg(long, default_value_t = 256)]
    pub max_output_tokens: u32,

    /// Threshold to flag cases for human review (recorded for downstream
    /// tooling; not computed here)
    #[arg(long, default_value_t = 0.7)]
    pub confidence_threshold: f64,

    /// Disable the JSON response format hint
    #[arg(long)]
    pub no_response_format: bool,

    /// Limit number of cases (0 means no limit)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Seconds to sleep between LLM calls
    #[arg(long, default_value_t = 2.0)]
    pub sleep: f64,

    /// Count the cases that would be classified, then exit
    #[arg(long)]
    pub dry_run: bool,

    /// Resume from existing CSV output, skipping already classified cases
    #[arg(long)]
    pub resume: bool,

    /// Path to manifest JSON mapping filenames to URLs
    #[arg(long, default_value = "pdfs/manifest.json")]
    pub manifest: PathBuf,

    /// Taxonomy JSON file overriding the built-in taxonomy
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,
}

/// The conventional input directories, most-processed first
pub fn default_input() -> PathBuf {
    for candidate in ["txt_formatted", "txt"] {
        if Path::new(candidate).is_dir() {
            return PathBuf::from(candidate);
        }
    }
    PathBuf::from("pdfs")
}

/// Extension filter to use when `--extensions` is not given
///
/// A single-file input defaults to its own extension; the text directories
/// default to `.txt`; anything else admits both `.pdf` and `.txt`.
pub fn default_extensions(input: &Path) -> Vec<String> {
    if input.is_file() {
        return match input.extension() {
            Some(ext) => vec![format!(".{}", ext.to_string_lossy().to_lowercase())],
            None => Vec::new(),
        };
    }

    let dir_name = input
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if dir_name == "txt" || dir_name == "txt_formatted" {
        vec![".txt".to_string()]
    } else {
        vec![".pdf".to_string(), ".txt".to_string()]
    }
}
