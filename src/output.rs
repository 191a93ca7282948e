//! CLI output formatting for `check` and `build`.
//!
//! Output reads as a content inventory: each collection (or site section)
//! is a numbered header, with detail lines indented beneath it.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Collections
//! 001 posts (5 records)
//! 002 authors (3 records)
//! ...
//!
//! Broken references
//!     posts/p5 author → ghost
//!
//! Generation 3f2a9c81d07e
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Blog (8 pages)
//!     blog/index.html
//!     blog/category/engineering/index.html
//! 002 Work (4 pages)
//!     ...
//!
//! Generated 23 pages, 1 fallback reference
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::content::{ContentStore, Kind};
use crate::generate::BuildReport;
use crate::resolve::BrokenLink;

/// Width of the generation prefix shown to humans.
const GENERATION_PREFIX: usize = 12;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `"1 page"`, `"3 pages"`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Numbered header with a counted detail.
///
/// ```text
/// 001 posts (5 records)
/// ```
fn entity_header(index: usize, title: &str, count: usize, noun: &str) -> String {
    format!("{} {} ({})", format_index(index), title, plural(count, noun))
}

fn short_generation(generation: &str) -> &str {
    &generation[..generation.len().min(GENERATION_PREFIX)]
}

fn broken_link_line(link: &BrokenLink) -> String {
    let missing = if link.missing_id.is_empty() {
        "(empty)"
    } else {
        link.missing_id.as_str()
    };
    format!(
        "{}{}/{} {} → {}",
        indent(1),
        link.kind,
        link.record_id,
        link.relation,
        missing
    )
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(store: &ContentStore, broken: &[BrokenLink]) -> Vec<String> {
    let mut lines = vec!["Collections".to_string()];
    for (i, kind) in Kind::ALL.into_iter().enumerate() {
        lines.push(entity_header(i + 1, kind.name(), store.count(kind), "record"));
    }

    lines.push(String::new());
    if broken.is_empty() {
        lines.push("No broken references".to_string());
    } else {
        lines.push("Broken references".to_string());
        lines.extend(broken.iter().map(broken_link_line));
    }

    if !store.generation().is_empty() {
        lines.push(String::new());
        lines.push(format!("Generation {}", short_generation(store.generation())));
    }
    lines
}

pub fn print_check_output(store: &ContentStore, broken: &[BrokenLink]) {
    for line in format_check_output(store, broken) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Sections in the order they are reported. Pages outside them (home, 404)
/// are listed under "Site".
const SECTIONS: [(&str, &str); 4] = [
    ("Blog", "blog"),
    ("Work", "work"),
    ("Careers", "careers"),
    ("FAQ", "faq"),
];

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    let top_level: Vec<&String> = report.pages.iter().filter(|p| !p.contains('/')).collect();
    let mut index = 0;
    if !top_level.is_empty() {
        index += 1;
        lines.push(entity_header(index, "Site", top_level.len(), "page"));
        lines.extend(top_level.iter().map(|p| format!("{}{}", indent(1), p)));
    }

    for (title, dir) in SECTIONS {
        let prefix = format!("{dir}/");
        let pages: Vec<&String> = report.pages.iter().filter(|p| p.starts_with(&prefix)).collect();
        if pages.is_empty() {
            continue;
        }
        index += 1;
        lines.push(entity_header(index, title, pages.len(), "page"));
        lines.extend(pages.iter().map(|p| format!("{}{}", indent(1), p)));
    }

    lines.push(String::new());
    let mut summary = format!("Generated {}", plural(report.pages.len(), "page"));
    if report.broken_links > 0 {
        summary.push_str(&format!(
            ", {}",
            plural(report.broken_links, "fallback reference")
        ));
    }
    lines.push(summary);
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
