//! Shared test utilities for the chat-archive test suite.
//!
//! [`ExportBuilder`] assembles a small export in memory, writes it in the
//! exporter's on-disk layout inside a temp directory, and hands back a
//! [`BuildConfig`] pointing at it.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let export = ExportBuilder::new()
//!     .stream("general", 1)
//!     .topic("general", "welcome", &[(1, "Alice", "<p>hi</p>")]);
//! let config = export.write();
//! build_website(&config, None).unwrap();
//!
//! let page = read_output(&config, "stream/1-general/topic/welcome.html");
//! assert!(page.contains("<p>hi</p>"));
//! ```

use std::fs;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::generate::BuildConfig;
use crate::naming::{sanitize, sanitize_stream};
use crate::reader::STREAM_INFO_FILENAME;
use crate::types::{Message, Stream, StreamInfo, StreamMap, Topic};
use chrono::{DateTime, Utc};

/// `(id, sender, content)`; the timestamp is derived from the id.
pub type MessageSpec<'a> = (u64, &'a str, &'a str);

/// Fixed fallback "now" so footers are reproducible.
pub const GENERATED_AT: i64 = 1_700_000_000;

// =========================================================================
// Export builder
// =========================================================================

pub struct ExportBuilder {
    tmp: TempDir,
    time: Option<f64>,
    streams: StreamMap,
    messages: Vec<(String, String, Vec<Message>)>,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
            time: None,
            streams: StreamMap::new(),
            messages: Vec::new(),
        }
    }

    pub fn time(mut self, time: f64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn stream(mut self, name: &str, id: u64) -> Self {
        self.streams.insert(
            name.to_string(),
            Stream {
                id,
                topic_data: Default::default(),
            },
        );
        self
    }

    /// Add a topic to an existing stream. Panics if the stream is unknown.
    pub fn topic(mut self, stream: &str, topic: &str, messages: &[MessageSpec<'_>]) -> Self {
        let messages: Vec<Message> = messages
            .iter()
            .map(|(id, sender, content)| Message {
                id: *id,
                sender_full_name: sender.to_string(),
                timestamp: 1_600_000_000 + *id as i64 * 60,
                content: content.to_string(),
            })
            .collect();
        let latest_date = messages.iter().map(|m| m.timestamp).max().unwrap_or(0);

        let entry = self
            .streams
            .get_mut(stream)
            .unwrap_or_else(|| panic!("stream '{stream}' not added yet"));
        entry.topic_data.insert(
            topic.to_string(),
            Topic {
                size: messages.len(),
                latest_date,
            },
        );
        self.messages
            .push((stream.to_string(), topic.to_string(), messages));
        self
    }

    pub fn info(&self) -> StreamInfo {
        StreamInfo {
            time: self.time,
            streams: self.streams.clone(),
        }
    }

    /// Config pointing at this builder's directories, without writing anything.
    pub fn config(&self) -> BuildConfig {
        let mut settings = SiteConfig::default();
        settings.site.url = "https://archive.example.org".to_string();
        settings.site.title = "Test Archive".to_string();
        settings.platform.url = "https://chat.example.com".to_string();

        BuildConfig {
            input_root: self.tmp.path().join("json"),
            output_root: self.tmp.path().join("site"),
            site_root: self.tmp.path().join("repo"),
            settings,
            generated_at: DateTime::<Utc>::from_timestamp(GENERATED_AT, 0).unwrap(),
        }
    }

    /// Write the export in the exporter's layout and return a config for it.
    pub fn write(&self) -> BuildConfig {
        let config = self.config();
        fs::create_dir_all(&config.input_root).unwrap();
        fs::create_dir_all(&config.site_root).unwrap();

        let info = serde_json::to_string_pretty(&self.info()).unwrap();
        fs::write(config.input_root.join(STREAM_INFO_FILENAME), info).unwrap();

        for (stream, topic, messages) in &self.messages {
            let id = self.streams[stream].id;
            let dir = config.input_root.join(sanitize_stream(stream, id));
            fs::create_dir_all(&dir).unwrap();
            let json = serde_json::to_string_pretty(messages).unwrap();
            fs::write(dir.join(format!("{}.json", sanitize(topic))), json).unwrap();
        }
        config
    }
}

// =========================================================================
// Output lookups (panic with a clear message on miss)
// =========================================================================

/// Read a generated file relative to the output root.
pub fn read_output(config: &BuildConfig, relative: &str) -> String {
    let path = config.output_root.join(relative);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read generated {}: {e}", path.display()))
}
