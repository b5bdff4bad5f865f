//! Append-only request and error logs
//!
//! Two plain-text logs: every request attempt lands in the request log,
//! failed attempts (non-2xx or transport failure) additionally land in
//! the error log. Both use the same line format:
//!
//! ```text
//! Time: 2020-03-14 09:26:53 | Code: 200 | url: https://...
//! ```

use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Handle to the pair of append-only request logs
pub struct RequestLog {
    requests: Mutex<File>,
    errors: Mutex<File>,
}

impl RequestLog {
    /// Opens both logs in append mode, creating parent directories
    ///
    /// Failure here is a fatal setup error; the run must not start
    /// without its logs.
    pub fn open(request_path: &Path, error_path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            requests: Mutex::new(open_append(request_path)?),
            errors: Mutex::new(open_append(error_path)?),
        })
    }

    /// Appends one line to the request log
    pub fn record(&self, timestamp: DateTime<Local>, status: &str, url: &str) {
        append_line(&self.requests, timestamp, status, url);
    }

    /// Appends one line to the error log
    pub fn record_error(&self, timestamp: DateTime<Local>, status: &str, url: &str) {
        append_line(&self.errors, timestamp, status, url);
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

// A write failure mid-run is not worth aborting hours of crawling over;
// warn and keep going.
fn append_line(file: &Mutex<File>, timestamp: DateTime<Local>, status: &str, url: &str) {
    let line = format!(
        "Time: {} | Code: {} | url: {}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        status,
        url
    );
    let mut file = file.lock().expect("log mutex poisoned");
    if let Err(e) = file.write_all(line.as_bytes()) {
        tracing::warn!("Failed to append to request log: {}", e);
    }
}
