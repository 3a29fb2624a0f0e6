//! `docket` — classify case documents with an LLM and record results to CSV

mod cli;

use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use docket_classifier::{
    collect_case_files, parse_extension_list, Classifier, Manifest, ResultStore, RunConfig,
};
use docket_domain::Taxonomy;
use docket_llm::HttpChatClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{default_extensions, default_input, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Cli::parse();

    let input = args.input.clone().unwrap_or_else(default_input);
    let extensions = match &args.extensions {
        Some(raw) => parse_extension_list(raw),
        None => default_extensions(&input),
    };

    let files = collect_case_files(&input, &extensions);
    if files.is_empty() {
        bail!("no input files found under {}", input.display());
    }
    info!(count = files.len(), input = %input.display(), "discovered case files");

    if args.dry_run {
        println!("Found {} case files.", files.len());
        return Ok(());
    }

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());
    let Some(api_key) = api_key else {
        bail!("no API key: pass --api-key or set LLM_API_KEY / OPENAI_API_KEY");
    };

    let taxonomy = match &args.taxonomy {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading taxonomy file {}", path.display()))?;
            Taxonomy::from_json(&raw)
                .with_context(|| format!("parsing taxonomy file {}", path.display()))?
        }
        None => Taxonomy::embedded(),
    };

    let manifest = Manifest::load(&args.manifest);

    if args.sleep < 0.0 {
        bail!("--sleep must not be negative");
    }
    let config = RunConfig {
        model: args.model.clone(),
        max_chars: args.max_chars,
        max_output_tokens: args.max_output_tokens,
        use_json_format: !args.no_response_format,
        limit: args.limit,
        sleep: Duration::from_secs_f64(args.sleep),
        resume: args.resume,
        allow_non_pdf: args.allow_non_pdf,
        review_threshold: args.confidence_threshold,
    };
    config.validate().map_err(anyhow::Error::msg)?;

    let client = HttpChatClient::new(&args.endpoint, &api_key, Duration::from_secs(args.timeout))
        .context("building the chat client")?;

    let mut store = ResultStore::open(&args.output, args.resume)
        .with_context(|| format!("opening result table {}", args.output.display()))?;

    let classifier = Classifier::new(client, taxonomy, manifest, config);
    let stats = classifier.run(&files, &mut store).await?;

    println!(
        "Wrote {} cases to {} ({} failed, {} skipped)",
        stats.written,
        args.output.display(),
        stats.failed,
        stats.skipped
    );
    Ok(())
}
