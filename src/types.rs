//! Shared types read from the chat export.
//!
//! These mirror the JSON written by the exporter. Everything here is loaded
//! once per build and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Streams keyed by their raw display name.
///
/// A `BTreeMap` so that page emission and index listing follow name order on
/// every run.
pub type StreamMap = BTreeMap<String, Stream>;

/// Topics of one stream keyed by their raw display name.
pub type TopicMap = BTreeMap<String, Topic>;

/// Top-level `stream_info.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Unix time (seconds) the export was taken. Drives the "last updated" footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    pub streams: StreamMap,
}

impl StreamInfo {
    /// Total number of topics across all streams.
    pub fn topic_count(&self) -> usize {
        self.streams.values().map(|s| s.topic_data.len()).sum()
    }
}

/// A stream: a top-level channel holding topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stream {
    /// Server-assigned id, stable across exports. Disambiguates sanitized names.
    pub id: u64,
    #[serde(default)]
    pub topic_data: TopicMap,
}

/// Listing metadata for one topic. Messages live in a separate file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Number of messages in the topic.
    pub size: usize,
    /// Unix time (seconds) of the newest message.
    pub latest_date: i64,
}

/// A single message, with content already rendered to HTML by the chat server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender_full_name: String,
    /// Unix time (seconds) the message was sent.
    pub timestamp: i64,
    pub content: String,
}
