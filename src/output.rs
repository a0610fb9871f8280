//! CLI output formatting.
//!
//! Each reporting concern has a `format_*` function (pure, returns the
//! lines) and a `print_*` wrapper that writes them out. Format functions do
//! no I/O, which is what the tests exercise.
//!
//! Failures go to stderr with the full request context — title, avatar,
//! output location, and the resolved options — so a broken page in a big
//! batch build can be diagnosed from the build log alone.

use crate::config::CardConfig;
use crate::generate::{CardRequest, GenerateError, PageResult};

/// One-line success report for a single generated card.
pub fn format_generated(title: &str, url: &str) -> String {
    format!("{title} → {url}")
}

/// Failure report with full context, one line per item.
pub fn format_failure(
    request: &CardRequest,
    config: &CardConfig,
    err: &GenerateError,
) -> Vec<String> {
    vec![
        format!("social-card error: {err}"),
        format!("    Title: {:?}", request.title),
        format!("    Avatar: {}", request.avatar.display()),
        format!("    Output: {}", request.output_dir.display()),
        format!("    Options: {config:?}"),
    ]
}

/// Write a failure report to stderr.
pub fn print_failure(request: &CardRequest, config: &CardConfig, err: &GenerateError) {
    for line in format_failure(request, config, err) {
        eprintln!("{line}");
    }
}

/// Per-page batch report plus a summary line.
///
/// ```text
/// 001 Hello, World! → /img/preview/hello-world.png
/// 002 Broken page FAILED
///
/// Generated 1 card, 1 failed
/// ```
pub fn format_batch_report(results: &[PageResult]) -> Vec<String> {
    let mut lines = Vec::new();
    for (pos, result) in results.iter().enumerate() {
        let index = format!("{:0>3}", pos + 1);
        match &result.url {
            Some(url) => lines.push(format!("{index} {} → {url}", result.title)),
            None => lines.push(format!("{index} {} FAILED", result.title)),
        }
    }

    let generated = results.iter().filter(|r| r.url.is_some()).count();
    let failed = results.len() - generated;
    let plural = if generated == 1 { "card" } else { "cards" };
    lines.push(String::new());
    lines.push(format!("Generated {generated} {plural}, {failed} failed"));
    lines
}

/// Write the batch report to stdout.
pub fn print_batch_report(results: &[PageResult]) {
    for line in format_batch_report(results) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::CardRequest;

    fn sample_request() -> CardRequest {
        CardRequest {
            title: "Hello".to_string(),
            site_name: "example.com".to_string(),
            avatar: "assets/avatar.png".into(),
            output_dir: "_site/img/preview".into(),
            url_path: "/img/preview".to_string(),
        }
    }

    #[test]
    fn generated_line_shows_title_and_url() {
        assert_eq!(
            format_generated("Hello", "/img/preview/hello.png"),
            "Hello → /img/preview/hello.png"
        );
    }

    #[test]
    fn failure_report_carries_the_full_context() {
        let lines = format_failure(
            &sample_request(),
            &CardConfig::default(),
            &GenerateError::MissingField("url_path"),
        );

        assert!(lines[0].contains("missing required field: url_path"));
        assert!(lines.iter().any(|l| l.contains("Title: \"Hello\"")));
        assert!(lines.iter().any(|l| l.contains("assets/avatar.png")));
        assert!(lines.iter().any(|l| l.contains("line_break_at: 35")));
    }

    #[test]
    fn batch_report_lists_pages_and_summarizes() {
        let results = vec![
            PageResult {
                title: "First".to_string(),
                url: Some("/p/first.png".to_string()),
            },
            PageResult {
                title: "Second".to_string(),
                url: None,
            },
        ];

        let lines = format_batch_report(&results);
        assert_eq!(lines[0], "001 First → /p/first.png");
        assert_eq!(lines[1], "002 Second FAILED");
        assert_eq!(lines.last().unwrap(), "Generated 1 card, 1 failed");
    }

    #[test]
    fn empty_batch_summarizes_to_zero() {
        let lines = format_batch_report(&[]);
        assert_eq!(lines.last().unwrap(), "Generated 0 cards, 0 failed");
    }
}
