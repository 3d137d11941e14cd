//! Output file placement.
//!
//! ```text
//! site/
//! ├── index.html
//! └── stream/
//!     └── 1-general/
//!         ├── index.html
//!         └── topic/
//!             ├── welcome.html
//!             └── a.2Fb.html
//! ```
//!
//! Each `open_*` function creates missing parent directories and truncates
//! any existing page. A [`PageFile`] is consumed by [`PageFile::write_with`],
//! so the handle is closed when the page write returns, whether it succeeded
//! or not.

use crate::links::{stream_page_path, topic_page_path};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to create or write an output file.
#[derive(Error, Debug)]
#[error("cannot write {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl WriteError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// An open output page.
pub struct PageFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl PageFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the page through `body`, then flush and close it.
    pub fn write_with<F>(self, body: F) -> Result<(), WriteError>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let Self { path, mut writer } = self;
        body(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|source| WriteError::new(path, source))
    }
}

pub fn main_page_path(output_root: &Path) -> PathBuf {
    output_root.join("index.html")
}

pub fn stream_topics_page_path(output_root: &Path, sanitized_stream: &str) -> PathBuf {
    output_root.join(stream_page_path(sanitized_stream))
}

pub fn topic_messages_page_path(
    output_root: &Path,
    sanitized_stream: &str,
    sanitized_topic: &str,
) -> PathBuf {
    output_root.join(topic_page_path(sanitized_stream, sanitized_topic))
}

pub fn open_main_page(output_root: &Path) -> Result<PageFile, WriteError> {
    open_page(main_page_path(output_root))
}

pub fn open_stream_topics_page(
    output_root: &Path,
    sanitized_stream: &str,
) -> Result<PageFile, WriteError> {
    open_page(stream_topics_page_path(output_root, sanitized_stream))
}

pub fn open_topic_messages_page(
    output_root: &Path,
    sanitized_stream: &str,
    sanitized_topic: &str,
) -> Result<PageFile, WriteError> {
    open_page(topic_messages_page_path(
        output_root,
        sanitized_stream,
        sanitized_topic,
    ))
}

fn open_page(path: PathBuf) -> Result<PageFile, WriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| WriteError::new(parent, e))?;
    }
    match File::create(&path) {
        Ok(file) => Ok(PageFile {
            path,
            writer: BufWriter::new(file),
        }),
        Err(e) => Err(WriteError::new(path, e)),
    }
}
