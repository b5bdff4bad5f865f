//! Crawl coordinator - main harvest orchestration logic
//!
//! Drives the two-stage traversal: for each search-results page, fetch
//! and parse the listing summaries, then fetch each listing's detail
//! page, extract its fields, and buffer the assembled record. The whole
//! sequence is single-pass; the rate governor's spacing dominates the
//! wall clock.
//!
//! Failure containment is the defining property here: no listing- or
//! page-level failure ever escalates. A page with no body contributes
//! zero records and the walk continues; a detail page with no body
//! contributes a summary-only record.

use crate::config::Config;
use crate::crawler::extractor::DetailPatterns;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::governor::RateGovernor;
use crate::crawler::walker::{page_url, parse_listing_page};
use crate::output::{DatasetSink, ProgressReporter, RequestLog};
use crate::record::assemble;
use crate::HarvestError;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counters returned by a completed (or interrupted) run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_visited: u32,
    pub listings_collected: usize,
    pub interrupted: bool,
}

/// Main harvest coordinator
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    patterns: DetailPatterns,
    sink: DatasetSink,
    progress: ProgressReporter,
    cancel: Arc<AtomicBool>,
}

impl Coordinator {
    /// Sets up everything that can fail before network activity starts
    ///
    /// Opens the request logs, verifies the dataset path is writable,
    /// compiles the detail patterns, and builds the HTTP client. Any
    /// failure here aborts the run with a non-zero exit; nothing has
    /// been fetched yet.
    pub fn new(
        config: Config,
        cancel: Arc<AtomicBool>,
        progress_enabled: bool,
    ) -> Result<Self, HarvestError> {
        let log = RequestLog::open(
            Path::new(&config.output.request_log_path),
            Path::new(&config.output.error_log_path),
        )?;

        ensure_writable(Path::new(&config.output.dataset_path))?;

        let patterns = DetailPatterns::compile(&config.patterns)?;

        let governor = Arc::new(RateGovernor::new(Duration::from_secs(
            config.crawl.request_interval_seconds,
        )));
        let fetcher = Fetcher::new(&config.crawl, governor, log)?;

        let total_pages = if config.crawl.end_page < config.crawl.start_page {
            0
        } else {
            config.crawl.end_page - config.crawl.start_page + 1
        };
        let progress = ProgressReporter::new(total_pages, progress_enabled);

        Ok(Self {
            config,
            fetcher,
            patterns,
            sink: DatasetSink::new(),
            progress,
            cancel,
        })
    }

    /// Runs the harvest and writes the dataset
    ///
    /// Returns `Ok` regardless of how many pages or listings failed;
    /// those are logged and skipped. The dataset is flushed exactly
    /// once, including after an interrupt, so a cancelled run keeps
    /// everything assembled so far.
    pub async fn run(mut self) -> Result<RunSummary, HarvestError> {
        let start = self.config.crawl.start_page;
        let end = self.config.crawl.end_page;
        tracing::info!(
            "Starting harvest: pages {}..={}, 1 request per {}s",
            start,
            end,
            self.config.crawl.request_interval_seconds
        );

        let mut pages_visited = 0u32;
        let started = std::time::Instant::now();

        // An inverted range iterates zero times: empty walk, header-only file.
        'pages: for page in start..=end {
            if self.cancelled() {
                break;
            }

            pages_visited += 1;
            let url = page_url(&self.config.crawl.listing_url_template, page);
            tracing::debug!("Fetching listing page {}: {}", page, url);

            let outcome = self.fetcher.fetch(&url).await;
            self.progress.report(pages_visited, &url);

            // Page-level partial failure: nothing to parse, keep walking
            let Some(body) = outcome.body else {
                tracing::warn!("Skipping page {} ({})", page, outcome.status);
                continue;
            };

            let summaries = parse_listing_page(&body);
            tracing::info!("Page {}: {} listings discovered", page, summaries.len());

            for summary in summaries {
                if self.cancelled() {
                    break 'pages;
                }

                let outcome = self.fetcher.fetch(&summary.url).await;
                self.progress.report(pages_visited, &summary.url);

                let detail = match outcome.body {
                    Some(body) => self.patterns.extract(&body),
                    None => {
                        tracing::warn!(
                            "Detail fetch failed for {} ({}), keeping summary fields",
                            summary.url,
                            outcome.status
                        );
                        Default::default()
                    }
                };

                self.sink.append(assemble(summary, detail));
            }
        }

        let interrupted = self.cancelled();
        let summary = RunSummary {
            pages_visited,
            listings_collected: self.sink.len(),
            interrupted,
        };

        self.sink.flush(Path::new(&self.config.output.dataset_path))?;

        tracing::info!(
            "Harvest {}: {} pages visited, {} listings collected in {:?}",
            if interrupted { "interrupted" } else { "complete" },
            summary.pages_visited,
            summary.listings_collected,
            started.elapsed()
        );

        Ok(summary)
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

// Touching the file up front keeps "output path unwritable" a setup
// failure instead of a surprise after ten hours of crawling.
fn ensure_writable(path: &Path) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(())
}

/// Runs a complete harvest with interrupt handling
///
/// Ctrl-C sets the cancel flag; the in-flight fetch completes, then the
/// run winds down and flushes whatever was assembled.
pub async fn run_harvest(config: Config, progress_enabled: bool) -> Result<RunSummary, HarvestError> {
    let cancel = Arc::new(AtomicBool::new(false));

    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received; finishing in-flight fetch and flushing");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let coordinator = Coordinator::new(config, cancel, progress_enabled)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlConfig, OutputConfig, PatternConfig};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn test_config(dir: &Path, start: u32, end: u32) -> Config {
        Config {
            crawl: CrawlConfig {
                start_page: start,
                end_page: end,
                request_interval_seconds: 1,
                user_agent: "TestAgent/1.0".to_string(),
                listing_url_template: "https://rentals.example.com/search?p={page}".to_string(),
            },
            output: OutputConfig {
                dataset_path: dir.join("rentals.csv").to_string_lossy().into_owned(),
                request_log_path: dir.join("requests.log").to_string_lossy().into_owned(),
                error_log_path: dir.join("errors.log").to_string_lossy().into_owned(),
            },
            patterns: PatternConfig::default(),
        }
    }

    #[test]
    fn test_setup_fails_on_unwritable_dataset_path() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path(), 1, 1);
        config.output.dataset_path = "/proc/nope/rentals.csv".to_string();

        let cancel = Arc::new(AtomicBool::new(false));
        assert!(Coordinator::new(config, cancel, false).is_err());
    }

    #[tokio::test]
    async fn test_empty_range_writes_header_only_without_fetching() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), 3, 2);
        let dataset_path = PathBuf::from(&config.output.dataset_path);
        let request_log = PathBuf::from(&config.output.request_log_path);

        let cancel = Arc::new(AtomicBool::new(false));
        let coordinator = Coordinator::new(config, cancel, false).unwrap();
        let summary = coordinator.run().await.unwrap();

        assert_eq!(summary.pages_visited, 0);
        assert_eq!(summary.listings_collected, 0);

        let content = std::fs::read_to_string(&dataset_path).unwrap();
        assert_eq!(content.lines().count(), 1);

        // No network activity at all
        let log = std::fs::read_to_string(&request_log).unwrap();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_pre_set_cancel_flag_skips_all_pages() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), 1, 5);
        let dataset_path = PathBuf::from(&config.output.dataset_path);

        let cancel = Arc::new(AtomicBool::new(true));
        let coordinator = Coordinator::new(config, cancel, false).unwrap();
        let summary = coordinator.run().await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.pages_visited, 0);
        // Flush still ran
        assert!(dataset_path.exists());
    }

    // Crawls against live responses are covered by the wiremock
    // integration tests in tests/crawl_tests.rs.
}
