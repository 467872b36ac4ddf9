use clap::Parser;
use page_digest::Digest;
use page_digest::utils::parse_url_list;
use std::path::PathBuf;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let input = match read_input(&args) {
        Ok(input) => input,
        Err(e) => {
            ::log::error!("Failed to read URL list: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let urls = parse_url_list(&input);
    if urls.is_empty() {
        ::log::warn!("No URLs given, nothing to do");
        eprintln!("Provide at least one URL (one per line).");
        return ExitCode::FAILURE;
    }

    let digest = match build_digest(&args, urls) {
        Ok(digest) => digest,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!("Building document from {} URLs", digest.urls().len());

    // Run the batch as its own task so the shell only waits on its result
    let task = tokio::spawn(digest.generate());
    let document = match task.await {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            ::log::error!("Failed to build document: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            ::log::error!("Document task did not complete: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(document.file_name()));

    if let Err(e) = document.write_to(&path) {
        ::log::error!("Failed to write {}: {}", path.display(), e);
        eprintln!("Error: could not write {}: {}", path.display(), e);
        return ExitCode::FAILURE;
    }

    println!("Generated: {}", path.display());
    ExitCode::SUCCESS
}

fn read_input(args: &Args) -> std::io::Result<String> {
    match &args.urls_file {
        Some(path) if !args.reads_stdin() => std::fs::read_to_string(path),
        _ => std::io::read_to_string(std::io::stdin()),
    }
}

/// Apply the config file first, then command-line overrides
fn build_digest(args: &Args, urls: Vec<String>) -> Result<Digest, Box<dyn std::error::Error>> {
    let mut digest = Digest::new(urls);

    if let Some(config_file) = &args.config {
        ::log::info!("Loading configuration from file: {}", config_file.display());
        digest = digest.with_config_file(config_file)?;
    }
    if let Some(title) = &args.title {
        digest = digest.with_doc_title(title);
    }
    if args.no_toc {
        digest = digest.with_toc(false);
    }
    if args.no_metadata {
        digest = digest.with_metadata(false);
    }
    if let Some(user_agent) = &args.user_agent {
        digest = digest.with_user_agent(user_agent);
    }
    if let Some(timeout) = args.timeout {
        digest = digest.with_timeout(timeout);
    }
    if let Some(concurrency) = args.concurrency {
        digest = digest.with_max_concurrency(concurrency);
    }

    Ok(digest)
}
