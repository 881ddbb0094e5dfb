//! CLI output formatting.
//!
//! Output is organized by page and region, not by file: the header line of
//! each page is its position, title and output path; indented lines below it
//! say what each region did. File paths stay secondary.
//!
//! ## Build
//!
//! ```text
//! 001 Home → index.html
//!     home: 4 shown, 1 skipped
//! 003 Sellers → pages/sellers.html
//!     sellers: 3 shown, 1 skipped
//! 006 Social → pages/social.html
//!     social: failed (fetch /content/social.json failed (404))
//!
//! Copied 14 assets
//! Built 7 pages, 1 region failed
//! ```
//!
//! ## Check
//!
//! ```text
//! Collections
//! 001 sellers.json: 3 records
//!     skipped item 2: missing `logo`
//! 002 sponsors.json: missing
//!
//! Documents
//!     home.json: ok
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::export::{BuildResult, CheckStatus, DocumentCheck};
use crate::site::{RegionOutcome, SiteReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// One line per region that ran on the page.
fn region_lines(report: &SiteReport) -> Vec<String> {
    report
        .present()
        .map(|(region, outcome)| {
            let detail = match outcome {
                RegionOutcome::Rendered { shown, skipped: 0 } => format!("{shown} shown"),
                RegionOutcome::Rendered { shown, skipped } => {
                    format!("{shown} shown, {skipped} skipped")
                }
                RegionOutcome::Failed(reason) => format!("failed ({reason})"),
                RegionOutcome::Absent => String::new(),
            };
            format!("{}{}: {}", indent(1), region.name(), detail)
        })
        .collect()
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(result: &BuildResult) -> Vec<String> {
    let mut lines = Vec::new();
    let mut failed = 0;

    for (idx, built) in result.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(idx + 1),
            built.page.title(),
            built.page.output_path()
        ));
        lines.extend(region_lines(&built.report));
        failed += built.report.failures().count();
    }

    lines.push(String::new());
    lines.push(format!("Copied {}", plural(result.assets.len(), "asset", "assets")));
    let summary = format!("Built {}", plural(result.pages.len(), "page", "pages"));
    if failed > 0 {
        lines.push(format!(
            "{summary}, {} failed",
            plural(failed, "region", "regions")
        ));
    } else {
        lines.push(summary);
    }
    lines
}

pub fn print_build_output(result: &BuildResult) {
    for line in format_build_output(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

fn status_text(status: &CheckStatus) -> String {
    match status {
        CheckStatus::Records { accepted, .. } => plural(*accepted, "record", "records"),
        CheckStatus::Parsed => "ok".to_string(),
        CheckStatus::Missing => "missing".to_string(),
        CheckStatus::Failed(reason) => format!("failed: {reason}"),
    }
}

pub fn format_check_output(checks: &[DocumentCheck]) -> Vec<String> {
    let (collections, documents): (Vec<_>, Vec<_>) = checks
        .iter()
        .partition(|c| is_collection(c));

    let mut lines = vec!["Collections".to_string()];
    for (idx, check) in collections.iter().enumerate() {
        lines.push(format!(
            "{} {}: {}",
            format_index(idx + 1),
            check.document,
            status_text(&check.status)
        ));
        if let CheckStatus::Records { skipped, .. } = &check.status {
            for (pos, reason) in skipped {
                lines.push(format!("{}skipped item {pos}: {reason}", indent(1)));
            }
        }
    }

    lines.push(String::new());
    lines.push("Documents".to_string());
    for check in documents {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            check.document,
            status_text(&check.status)
        ));
    }
    lines
}

/// Collection documents stay in their section even when they failed to load.
fn is_collection(check: &DocumentCheck) -> bool {
    crate::content::CollectionKind::ALL
        .iter()
        .any(|kind| kind.document() == check.document)
}

pub fn print_check_output(checks: &[DocumentCheck]) {
    for line in format_check_output(checks) {
        println!("{}", line);
    }
}
