//! Readers for the JSON chat export.
//!
//! The export root holds one `stream_info.json` describing every stream and
//! topic, and one directory per stream (named by its sanitized identifier)
//! with a `<sanitized topic>.json` message array per topic:
//!
//! ```text
//! json/
//! ├── stream_info.json
//! ├── 1-general/
//! │   ├── welcome.json
//! │   └── a.2Fb.json
//! └── 7-social/
//!     └── lunch.json
//! ```

use crate::types::{Message, StreamInfo};
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the stream/topic index within the export root.
pub const STREAM_INFO_FILENAME: &str = "stream_info.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Export file not found: {0}")]
    Missing(PathBuf),
    #[error("Malformed export file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load the full stream/topic hierarchy from `<json_root>/stream_info.json`.
pub fn read_stream_info(json_root: &Path) -> Result<StreamInfo, LoadError> {
    read_json(&json_root.join(STREAM_INFO_FILENAME))
}

/// Load the messages of one topic, in the order the exporter wrote them.
///
/// Both names must already be sanitized; they are used verbatim as the
/// directory and file stem.
pub fn read_messages_for_topic(
    json_root: &Path,
    sanitized_stream: &str,
    sanitized_topic: &str,
) -> Result<Vec<Message>, LoadError> {
    let path = json_root
        .join(sanitized_stream)
        .join(format!("{sanitized_topic}.json"));
    read_json(&path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::Missing(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
