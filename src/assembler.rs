use crate::anchor::{AnchorRegistry, derive_anchor};
use crate::config::AssemblyConfig;
use crate::fetchers::Fetcher;
use crate::parsers::Parser;
use crate::parsers::escape::escape_markdown;
use crate::results::{ExtractionResult, TocEntry};
use crate::utils::safe_file_name;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// Heading of the table of contents
pub const TOC_HEADING: &str = "Table of Contents";

/// Heading of a section whose URL could not be converted
pub const FAILURE_HEADING: &str = "Failed to fetch content";

/// Format of the generation timestamp
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The assembled document: one TOC entry and one section per input URL, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    title: String,
    generated_at: Option<String>,
    include_toc: bool,
    include_metadata: bool,
    toc: Vec<TocEntry>,
    sections: Vec<ExtractionResult>,
}

impl MarkdownDocument {
    /// Build a document from already converted sections. `generated_at` is
    /// only rendered when metadata is enabled.
    pub fn new(
        config: &AssemblyConfig,
        sections: Vec<ExtractionResult>,
        generated_at: Option<String>,
    ) -> Self {
        let toc = sections.iter().map(TocEntry::from).collect();
        Self {
            title: config.effective_title().to_string(),
            generated_at: if config.include_metadata {
                generated_at
            } else {
                None
            },
            include_toc: config.include_toc,
            include_metadata: config.include_metadata,
            toc,
            sections,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    pub fn sections(&self) -> &[ExtractionResult] {
        &self.sections
    }

    /// Suggested output file name
    pub fn file_name(&self) -> String {
        format!("{}.md", safe_file_name(&self.title))
    }

    /// Render the final Markdown text
    pub fn render(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", escape_markdown(&self.title)));

        if let Some(ts) = &self.generated_at {
            md.push_str(&format!("> Generated on {}\n\n", ts));
        }

        if self.include_toc {
            md.push_str(&format!("## {}\n\n", TOC_HEADING));
            for entry in &self.toc {
                md.push_str(&format!(
                    "- [{}](#{})\n",
                    escape_markdown(&entry.title),
                    entry.anchor
                ));
            }
            md.push('\n');
        }

        for section in &self.sections {
            md.push_str(&format!("<a id=\"{}\"></a>\n", section.anchor));
            if section.ok {
                md.push_str(&format!("## {}\n\n", escape_markdown(&section.title)));
                if self.include_metadata {
                    md.push_str(&format!("> Source: {}\n\n", section.url));
                }
                md.push_str(&section.body);
                md.push_str("\n\n");
            } else {
                md.push_str(&format!("## {}\n\n", FAILURE_HEADING));
                md.push_str(&format!("> URL: {}\n\n", section.url));
                let message = section.error.as_deref().unwrap_or(&section.body);
                md.push_str(&format!("Error: {}\n\n", escape_markdown(message)));
            }
        }

        format!("{}\n", md.trim_end())
    }

    /// Write the rendered document as UTF-8
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.render())
    }
}

impl fmt::Display for MarkdownDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Converts a list of URLs into a [`MarkdownDocument`]
pub struct DocumentAssembler {
    config: AssemblyConfig,
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<Parser>,
}

impl DocumentAssembler {
    pub fn new(config: AssemblyConfig, fetcher: Arc<dyn Fetcher>, parser: Parser) -> Self {
        Self {
            config,
            fetcher,
            parser: Arc::new(parser),
        }
    }

    /// Convert every URL and assemble the document, stamped with the local time
    pub async fn assemble(&self, urls: &[String]) -> MarkdownDocument {
        let sections = self.extract_all(urls).await;
        let generated_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        MarkdownDocument::new(&self.config, sections, Some(generated_at))
    }

    /// Convert every URL exactly once. Pages are fetched concurrently (bounded
    /// by `max_concurrency`) but the returned results follow input order, and
    /// anchors are de-duplicated in that same order.
    pub async fn extract_all(&self, urls: &[String]) -> Vec<ExtractionResult> {
        let total = urls.len();
        let start = std::time::Instant::now();
        ::log::info!(
            "Converting {} URLs with concurrency {}",
            total,
            self.config.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let (result_tx, mut result_rx) = mpsc::channel::<(usize, ExtractionResult)>(total.max(1));

        for (i, url) in urls.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let parser = Arc::clone(&self.parser);
            let result_tx = result_tx.clone();
            let url = url.clone();

            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    ::log::error!("Semaphore closed before {} could start", url);
                    return;
                };
                let result = extract_one(i + 1, &url, fetcher.as_ref(), &parser).await;
                if let Err(e) = result_tx.send((i, result)).await {
                    ::log::error!("Failed to send result for {}: {}", url, e);
                }
            });
        }

        // Drop the original sender so the channel closes when all tasks are done
        drop(result_tx);

        let mut slots: Vec<Option<ExtractionResult>> = vec![None; total];
        while let Some((i, result)) = result_rx.recv().await {
            slots[i] = Some(result);
        }

        let mut anchors = AnchorRegistry::new();
        let results: Vec<ExtractionResult> = slots
            .into_iter()
            .zip(urls)
            .enumerate()
            .map(|(i, (slot, url))| {
                let result = slot.unwrap_or_else(|| {
                    ::log::error!("Conversion task for {} did not finish", url);
                    let anchor = derive_anchor(&crate::results::failed_title(url), i + 1);
                    ExtractionResult::failure(
                        url.clone(),
                        anchor,
                        "conversion task did not finish".to_string(),
                    )
                });
                let anchor = anchors.claim(&result.anchor);
                result.with_anchor(anchor)
            })
            .collect();

        let failed = results.iter().filter(|r| !r.ok).count();
        ::log::info!(
            "Converted {} URLs ({} ok, {} failed) in {:.2} seconds",
            total,
            total - failed,
            failed,
            start.elapsed().as_secs_f64()
        );

        results
    }
}

/// Fetch and convert one page. `index` is its 1-based input position.
pub async fn extract_one(
    index: usize,
    url: &str,
    fetcher: &dyn Fetcher,
    parser: &Parser,
) -> ExtractionResult {
    ::log::info!("Fetching [{}]: {}", index, url);

    let converted = match fetcher.fetch(url).await {
        Ok(html) => parser.parse(&html, url),
        Err(e) => Err(e),
    };

    match converted {
        Ok(page) => {
            let anchor = derive_anchor(&page.title, index);
            ExtractionResult::success(url.to_string(), page.title, anchor, page.content)
        }
        Err(e) => {
            ::log::warn!("Failed [{}] {}: {}", index, url, e);
            let anchor = derive_anchor(&crate::results::failed_title(url), index);
            ExtractionResult::failure(url.to_string(), anchor, e.to_string())
        }
    }
}
