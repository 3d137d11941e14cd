//! Filesystem- and URL-safe identifiers for stream and topic names.
//!
//! Raw names come straight from the chat server and may contain anything:
//! slashes, spaces, emoji. Every page path and archive URL is built from the
//! sanitized form instead, and the exporter uses the same encoding for its
//! per-topic message files, so the two line up.
//!
//! ## Encoding
//!
//! The encoding is the chat server's own URL-fragment scheme:
//!
//! 1. Percent-encode every byte outside `[A-Za-z0-9_.~-]`.
//! 2. Replace `.` with `%2E`.
//! 3. Replace `%` with `.`.
//!
//! - `"welcome"` → `"welcome"`
//! - `"a/b"` → `"a.2Fb"`
//! - `"hello world"` → `"hello.20world"`
//! - `"v1.0"` → `"v1.2E0"`
//!
//! The mapping is injective, and stream identifiers carry the numeric stream
//! id as a prefix (`"1-general"`). Identifiers can still clash on
//! case-insensitive filesystems, which [`check_collisions`] detects before
//! anything is written.

use crate::types::StreamMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashMap;
use thiserror::Error;

/// Bytes left untouched by the first encoding step.
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'-');

/// Two distinct raw names whose identifiers would land on the same output file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} names {first:?} and {second:?} both map to identifier {identifier:?}")]
pub struct CollisionError {
    /// `"stream"` or `"topic in stream <name>"`.
    pub kind: String,
    pub first: String,
    pub second: String,
    pub identifier: String,
}

/// Sanitize a topic (or any) name.
pub fn sanitize(name: &str) -> String {
    utf8_percent_encode(name, NAME_ENCODE_SET)
        .to_string()
        .replace('.', "%2E")
        .replace('%', ".")
}

/// Sanitize a stream name, prefixing the stream id for uniqueness.
pub fn sanitize_stream(name: &str, id: u64) -> String {
    format!("{id}-{}", sanitize(name))
}

/// Reject stream or topic names whose identifiers differ only by ASCII case.
///
/// Streams are compared across the whole collection, topics within their
/// stream (topic pages live under the stream's directory).
pub fn check_collisions(streams: &StreamMap) -> Result<(), CollisionError> {
    find_collision(
        "stream".to_string(),
        streams
            .iter()
            .map(|(name, stream)| (name.as_str(), sanitize_stream(name, stream.id))),
    )?;

    for (stream_name, stream) in streams {
        find_collision(
            format!("topic in stream {stream_name:?}:"),
            stream
                .topic_data
                .keys()
                .map(|topic| (topic.as_str(), sanitize(topic))),
        )?;
    }
    Ok(())
}

fn find_collision<'a>(
    kind: String,
    entries: impl Iterator<Item = (&'a str, String)>,
) -> Result<(), CollisionError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (raw, identifier) in entries {
        let folded = identifier.to_ascii_lowercase();
        if let Some(first) = seen.insert(folded, raw) {
            return Err(CollisionError {
                kind,
                first: first.to_string(),
                second: raw.to_string(),
                identifier,
            });
        }
    }
    Ok(())
}
