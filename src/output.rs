//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each stream and
//! topic leads with its display name and size, with the file it maps to as
//! secondary context. This makes the output readable as an inventory of the
//! archive while still letting users find the generated pages.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Streams
//! 001 general (2 topics)
//!     Source: 1-general/
//!     001 a/b (1 message)
//!         Source: 1-general/a.2Fb.json
//!     002 welcome (4 messages)
//!         Source: 1-general/welcome.json
//!
//! Checked 1 stream, 2 topics
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html (1 stream)
//! building: general (2 topics) → stream/1-general/index.html
//!     a/b (1 message) → stream/1-general/topic/a.2Fb.html
//!     welcome (4 messages) → stream/1-general/topic/welcome.html
//! Assets: 1 file → style.css, assets/, .nojekyll
//! Generated 1 index, 1 stream page, 2 topic pages (5 messages)
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns lines) for testability and,
//! where the CLI needs it, a `print_*` wrapper that writes to stdout.

use crate::generate::{BuildEvent, BuildReport};
use crate::naming::{sanitize, sanitize_stream};
use crate::render::plural;
use crate::types::StreamInfo;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Check
// ============================================================================

/// Format the stream/topic inventory of an export.
pub fn format_check_output(info: &StreamInfo) -> Vec<String> {
    let mut lines = vec!["Streams".to_string()];

    for (i, (name, stream)) in info.streams.iter().enumerate() {
        let sanitized_stream = sanitize_stream(name, stream.id);
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            name,
            plural(stream.topic_data.len(), "topic")
        ));
        lines.push(format!("{}Source: {}/", indent(1), sanitized_stream));

        for (j, (topic_name, topic)) in stream.topic_data.iter().enumerate() {
            lines.push(format!(
                "{}{} {} ({})",
                indent(1),
                format_index(j + 1),
                topic_name,
                plural(topic.size, "message")
            ));
            lines.push(format!(
                "{}Source: {}/{}.json",
                indent(2),
                sanitized_stream,
                sanitize(topic_name)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Checked {}, {}",
        plural(info.streams.len(), "stream"),
        plural(info.topic_count(), "topic")
    ));
    lines
}

/// Print the export inventory to stdout.
pub fn print_check_output(info: &StreamInfo) {
    for line in format_check_output(info) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::MainPageWritten { stream_count } => {
            vec![format!(
                "Home \u{2192} index.html ({})",
                plural(*stream_count, "stream")
            )]
        }
        BuildEvent::StreamStarted {
            name,
            topic_count,
            path,
        } => vec![format!(
            "building: {} ({}) \u{2192} {}",
            name,
            plural(*topic_count, "topic"),
            path
        )],
        BuildEvent::TopicWritten {
            name,
            message_count,
            path,
        } => vec![format!(
            "{}{} ({}) \u{2192} {}",
            indent(1),
            name,
            plural(*message_count, "message"),
            path
        )],
        BuildEvent::AssetsPublished { file_count } => vec![format!(
            "Assets: {} \u{2192} style.css, assets/, .nojekyll",
            plural(*file_count, "file")
        )],
    }
}

/// One-line summary of a finished build.
pub fn format_build_summary(report: &BuildReport) -> String {
    format!(
        "Generated 1 index, {}, {} ({})",
        plural(report.streams, "stream page"),
        plural(report.topics, "topic page"),
        plural(report.messages, "message")
    )
}

// ============================================================================
// Tests
// ============================================================================
