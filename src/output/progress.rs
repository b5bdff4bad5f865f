//! Single-line progress reporting
//!
//! Purely observational: the reporter is invoked after each fetch and
//! has no effect on control flow. Disabling it (quiet mode, piped
//! output) changes nothing about the crawl itself.

/// Prints one progress line per visited URL
///
/// ```text
/// Looking at: https://rentals.example.com/ads/123    [##########          ] 50%
/// ```
pub struct ProgressReporter {
    total_pages: u32,
    enabled: bool,
}

const BAR_WIDTH: usize = 20;
const MESSAGE_COLUMN: usize = 100;

impl ProgressReporter {
    pub fn new(total_pages: u32, enabled: bool) -> Self {
        Self {
            total_pages,
            enabled,
        }
    }

    /// Reports the currently-visited URL at the given page index
    ///
    /// Completion percentage is page-granular: every URL visited while
    /// on page N reports N's share of the total.
    pub fn report(&self, current_page: u32, url: &str) {
        if !self.enabled {
            return;
        }
        println!("{}", render(current_page, self.total_pages, url));
    }
}

fn render(current: u32, total: u32, url: &str) -> String {
    let fraction = if total == 0 {
        1.0
    } else {
        f64::from(current) / f64::from(total)
    };

    let filled = (BAR_WIDTH as f64 * fraction).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled));

    let message = format!("Looking at: {}", url);
    let padding = MESSAGE_COLUMN.saturating_sub(message.len());

    format!(
        "{}{} {} {:.0}%",
        message,
        " ".repeat(padding),
        bar,
        100.0 * fraction
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_bar_at_start() {
        let line = render(0, 10, "https://rentals.example.com/search?p=1");
        assert!(line.contains(&format!("[{}]", " ".repeat(BAR_WIDTH))));
        assert!(line.ends_with("0%"));
    }

    #[test]
    fn test_render_half_bar() {
        let line = render(5, 10, "https://rentals.example.com/search?p=5");
        assert!(line.contains(&format!("[{}{}]", "#".repeat(10), " ".repeat(10))));
        assert!(line.ends_with("50%"));
    }

    #[test]
    fn test_render_full_bar() {
        let line = render(10, 10, "https://rentals.example.com/search?p=10");
        assert!(line.contains(&format!("[{}]", "#".repeat(BAR_WIDTH))));
        assert!(line.ends_with("100%"));
    }

    #[test]
    fn test_render_starts_with_url_message() {
        let line = render(1, 4, "https://rentals.example.com/ads/123");
        assert!(line.starts_with("Looking at: https://rentals.example.com/ads/123"));
    }

    #[test]
    fn test_render_handles_long_url() {
        let url = format!("https://rentals.example.com/{}", "x".repeat(200));
        let line = render(2, 4, &url);
        assert!(line.ends_with("50%"));
    }

    #[test]
    fn test_render_zero_total() {
        // An empty page range reports 100% rather than dividing by zero
        let line = render(0, 0, "https://rentals.example.com/search?p=1");
        assert!(line.ends_with("100%"));
    }
}
