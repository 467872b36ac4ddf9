use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-digest")]
#[command(about = "Fetch a list of web pages and merge their main content into one Markdown file")]
#[command(version)]
pub struct Args {
    /// File with one URL per line (reads stdin when omitted or "-")
    pub urls_file: Option<PathBuf>,

    /// Output file (defaults to a name derived from the document title)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Document title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Do not generate a table of contents
    #[arg(long)]
    pub no_toc: bool,

    /// Do not include the generation timestamp and source lines
    #[arg(long)]
    pub no_metadata: bool,

    /// User-Agent header for requests
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Timeout per request in seconds (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Number of pages fetched concurrently
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

impl Args {
    /// Whether URLs should be read from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.urls_file {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Args::try_parse_from(["page-digest", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_timeout_and_stdin() {
        let args = Args::try_parse_from(["page-digest", "--timeout", "5", "-"]).unwrap();
        assert_eq!(args.timeout, Some(5));
        assert!(args.reads_stdin());
    }
}
