//! Output surfaces of a crawl run
//!
//! Three artifacts leave the process: the CSV dataset (written once at
//! run end), the append-only request/error logs (written per request),
//! and the stdout progress line (ephemeral).

mod dataset;
mod progress;
mod reqlog;

pub use dataset::{DatasetSink, COLUMNS};
pub use progress::ProgressReporter;
pub use reqlog::RequestLog;
