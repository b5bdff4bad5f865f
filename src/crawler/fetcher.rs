//! HTTP fetcher
//!
//! One GET per call, gated by the shared [`RateGovernor`] and recorded
//! in the append-only request logs. The fetcher never fails the run:
//! non-2xx responses and transport-level failures both come back as an
//! outcome with no body, logged to the error log, for the caller to
//! skip past.

use crate::config::CrawlConfig;
use crate::crawler::governor::RateGovernor;
use crate::output::RequestLog;
use chrono::{DateTime, Local};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Status of one fetch attempt as recorded in the logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// An HTTP response was received (any status code)
    Http(u16),
    /// The request never produced a response (DNS, connect, timeout)
    Transport,
}

impl FetchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchStatus::Http(code) if (200..300).contains(code))
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Http(code) => write!(f, "{}", code),
            // Sentinel for transport-level failures in the logs
            FetchStatus::Transport => write!(f, "ERR"),
        }
    }
}

/// Result of one fetch attempt
///
/// `body` is `Some` only for 2xx responses whose body was read in full.
#[derive(Debug)]
pub struct FetchOutcome {
    pub url: String,
    pub status: FetchStatus,
    pub timestamp: DateTime<Local>,
    pub body: Option<String>,
}

/// Performs governed, logged HTTP GET requests
pub struct Fetcher {
    client: Client,
    governor: Arc<RateGovernor>,
    log: RequestLog,
}

impl Fetcher {
    /// Builds the HTTP client and wires it to the governor and logs
    pub fn new(
        config: &CrawlConfig,
        governor: Arc<RateGovernor>,
        log: RequestLog,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            governor,
            log,
        })
    }

    /// Fetches one URL through the governor
    ///
    /// Appends one request-log line per attempt; failed attempts get a
    /// second line in the error log. No retry is performed here; a
    /// failed page or listing is simply skipped by the caller.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        self.governor.acquire().await;

        let timestamp = Local::now();

        let (status, body) = match self.client.get(url).send().await {
            Ok(response) => {
                let status = FetchStatus::Http(response.status().as_u16());
                if status.is_success() {
                    match response.text().await {
                        Ok(body) => (status, Some(body)),
                        Err(e) => {
                            tracing::warn!("Failed to read body from {}: {}", url, e);
                            (FetchStatus::Transport, None)
                        }
                    }
                } else {
                    (status, None)
                }
            }
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
                (FetchStatus::Transport, None)
            }
        };

        let status_text = status.to_string();
        self.log.record(timestamp, &status_text, url);
        if body.is_none() {
            self.log.record_error(timestamp, &status_text, url);
        }

        FetchOutcome {
            url: url.to_string(),
            status,
            timestamp,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success_range() {
        assert!(FetchStatus::Http(200).is_success());
        assert!(FetchStatus::Http(204).is_success());
        assert!(!FetchStatus::Http(301).is_success());
        assert!(!FetchStatus::Http(404).is_success());
        assert!(!FetchStatus::Http(500).is_success());
        assert!(!FetchStatus::Transport.is_success());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(FetchStatus::Http(200).to_string(), "200");
        assert_eq!(FetchStatus::Http(503).to_string(), "503");
        assert_eq!(FetchStatus::Transport.to_string(), "ERR");
    }

    // Fetch behavior against live responses is covered by the wiremock
    // integration tests.
}
