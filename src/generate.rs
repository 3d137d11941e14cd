//! HTML site generation.
//!
//! Walks the stream/topic hierarchy exactly once and writes the archive:
//!
//! - **Index page** (`/index.html`): every stream with its topic count
//! - **Stream pages** (`/stream/{stream}/index.html`): every topic of a stream
//! - **Topic pages** (`/stream/{stream}/topic/{topic}.html`): every message
//!   of a topic, in export order
//!
//! followed by the static assets (see [`crate::assets`]).
//!
//! ## Page Framing
//!
//! Every page is `head + body + last-updated footer + closing footer`. The
//! head, footers, and stream hierarchy are computed once per build into a
//! [`PageFrame`] and a [`StreamInfo`] and only borrowed afterwards, so all
//! pages of one build carry the same footer. Topic pages swap the shared head
//! for one titled after the topic, so search results show which thread a
//! page holds.
//!
//! ## Failure
//!
//! Any load or write failure aborts the build. Pages written before the
//! failure stay on disk; rerun the build to get a consistent tree.

use crate::assets;
use crate::config::SiteConfig;
use crate::links::{
    archive_stream_url, archive_topic_url, platform_topic_url, stream_page_path, topic_page_path,
};
use crate::naming::{self, CollisionError, sanitize, sanitize_stream};
use crate::reader::{self, LoadError};
use crate::render::{self, MessageContext, TopicLinks};
use crate::target::{self, WriteError};
use crate::types::{Stream, StreamInfo, StreamMap};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Write error: {0}")]
    Write(#[from] WriteError),
    #[error("Name collision: {0}")]
    Collision(#[from] CollisionError),
}

/// Everything a build needs, fixed before the first page is written.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root of the JSON export (`stream_info.json` + per-stream directories).
    pub input_root: PathBuf,
    /// Directory the site is written into.
    pub output_root: PathBuf,
    /// Directory holding `style.css`, `assets/` and `.nojekyll`.
    pub site_root: PathBuf,
    pub settings: SiteConfig,
    /// Stamp for the "last updated" footer when the export has no time of its own.
    pub generated_at: DateTime<Utc>,
}

/// Shared framing for every page of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFrame {
    /// Head of index and stream pages.
    pub head_html: String,
    /// "Last updated" footer, derived from the loaded export.
    pub date_footer_html: String,
    /// Closing HTML of every page.
    pub footer_html: String,
}

impl PageFrame {
    /// Compute the frame from the same snapshot the pages are built from.
    pub fn new(config: &BuildConfig, info: &StreamInfo) -> Self {
        let head_html = if config.settings.page.head_html.is_empty() {
            let site = &config.settings.site;
            render::default_page_head(&site.title, &site.url, &site.html_root)
        } else {
            config.settings.page.head_html.clone()
        };
        Self {
            head_html,
            date_footer_html: render::last_updated_footer(last_updated(info, config.generated_at)),
            footer_html: config.settings.page.footer_html.clone(),
        }
    }
}

/// Export time from `stream_info.json`, or `fallback` when absent or out of range.
fn last_updated(info: &StreamInfo, fallback: DateTime<Utc>) -> DateTime<Utc> {
    info.time
        .filter(|t| t.is_finite())
        .and_then(|t| DateTime::<Utc>::from_timestamp(t.floor() as i64, 0))
        .unwrap_or(fallback)
}

/// Progress notifications, one per unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    MainPageWritten {
        stream_count: usize,
    },
    StreamStarted {
        name: String,
        topic_count: usize,
        /// Page path relative to the output root.
        path: String,
    },
    TopicWritten {
        name: String,
        message_count: usize,
        /// Page path relative to the output root.
        path: String,
    },
    AssetsPublished {
        file_count: usize,
    },
}

/// What a successful build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub streams: usize,
    pub topics: usize,
    pub messages: usize,
    pub asset_files: usize,
}

fn notify(progress: Option<&Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = progress {
        // A gone receiver only means nobody is watching.
        let _ = tx.send(event);
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Build the whole archive from scratch.
///
/// Order: load the export, check identifiers, compute the frame, write the
/// index, publish the stylesheet, then each stream page followed by its topic
/// pages, and finally the asset tree and marker file.
pub fn build_website(
    config: &BuildConfig,
    progress: Option<Sender<BuildEvent>>,
) -> Result<BuildReport, BuildError> {
    let progress = progress.as_ref();
    let info = reader::read_stream_info(&config.input_root)?;
    naming::check_collisions(&info.streams)?;

    let frame = PageFrame::new(config, &info);
    let mut report = BuildReport::default();

    write_main_page(config, &info.streams, &frame)?;
    notify(
        progress,
        BuildEvent::MainPageWritten {
            stream_count: info.streams.len(),
        },
    );

    assets::publish_stylesheet(&config.site_root, &config.output_root)?;

    for (stream_name, stream) in &info.streams {
        let sanitized_stream = sanitize_stream(stream_name, stream.id);
        notify(
            progress,
            BuildEvent::StreamStarted {
                name: stream_name.clone(),
                topic_count: stream.topic_data.len(),
                path: stream_page_path(&sanitized_stream),
            },
        );
        write_stream_topics(config, stream_name, stream, &frame)?;
        report.streams += 1;

        for topic_name in stream.topic_data.keys() {
            let message_count =
                write_topic_messages(config, stream_name, stream, topic_name, &frame)?;
            notify(
                progress,
                BuildEvent::TopicWritten {
                    name: topic_name.clone(),
                    message_count,
                    path: topic_page_path(&sanitized_stream, &sanitize(topic_name)),
                },
            );
            report.topics += 1;
            report.messages += message_count;
        }
    }

    report.asset_files = assets::publish_assets(&config.site_root, &config.output_root)?;
    notify(
        progress,
        BuildEvent::AssetsPublished {
            file_count: report.asset_files,
        },
    );

    Ok(report)
}

// ============================================================================
// Page writers
// ============================================================================

/// Write `index.html`: shared head, stream list, footers.
pub fn write_main_page(
    config: &BuildConfig,
    streams: &StreamMap,
    frame: &PageFrame,
) -> Result<(), BuildError> {
    let page = target::open_main_page(&config.output_root)?;
    let content = render::stream_list(streams).into_string();

    page.write_with(|out| {
        out.write_all(frame.head_html.as_bytes())?;
        out.write_all(content.as_bytes())?;
        out.write_all(frame.date_footer_html.as_bytes())?;
        out.write_all(frame.footer_html.as_bytes())
    })?;
    Ok(())
}

/// Write one stream page: shared head, topic list, footers.
pub fn write_stream_topics(
    config: &BuildConfig,
    stream_name: &str,
    stream: &Stream,
    frame: &PageFrame,
) -> Result<(), BuildError> {
    let sanitized_stream = sanitize_stream(stream_name, stream.id);
    let page = target::open_stream_topics_page(&config.output_root, &sanitized_stream)?;

    let stream_url = archive_stream_url(
        &config.settings.site.url,
        &config.settings.site.html_root,
        &sanitized_stream,
    );
    let content = render::topic_list(stream_name, &stream_url, &stream.topic_data).into_string();

    page.write_with(|out| {
        out.write_all(frame.head_html.as_bytes())?;
        out.write_all(content.as_bytes())?;
        out.write_all(frame.date_footer_html.as_bytes())?;
        out.write_all(frame.footer_html.as_bytes())
    })?;
    Ok(())
}

/// Write one topic page and return how many messages it holds.
///
/// Layout: topic-specific head, navigation links, stylesheet link, every
/// message followed by a blank line, footers.
pub fn write_topic_messages(
    config: &BuildConfig,
    stream_name: &str,
    stream: &Stream,
    topic_name: &str,
    frame: &PageFrame,
) -> Result<usize, BuildError> {
    let site = &config.settings.site;
    let platform = &config.settings.platform;

    let sanitized_stream = sanitize_stream(stream_name, stream.id);
    let sanitized_topic = sanitize(topic_name);

    let messages =
        reader::read_messages_for_topic(&config.input_root, &sanitized_stream, &sanitized_topic)?;

    let page = target::open_topic_messages_page(
        &config.output_root,
        &sanitized_stream,
        &sanitized_topic,
    )?;

    let stream_url = archive_stream_url(&site.url, &site.html_root, &sanitized_stream);
    let topic_url = archive_topic_url(
        &site.url,
        &site.html_root,
        &sanitized_stream,
        &sanitized_topic,
    );
    let platform_url = platform_topic_url(&platform.url, &sanitized_stream, &sanitized_topic);
    let links = render::topic_page_links(&TopicLinks {
        stream_name,
        topic_name,
        stream_url: &stream_url,
        topic_url: &topic_url,
        platform_topic_url: &platform_url,
        platform_icon_url: &platform.icon_url,
    })
    .into_string();

    let ctx = MessageContext {
        site_url: &site.url,
        html_root: &site.html_root,
        platform_url: &platform.url,
        platform_icon_url: &platform.icon_url,
        sanitized_stream: &sanitized_stream,
        sanitized_topic: &sanitized_topic,
    };

    page.write_with(|out| {
        let head = render::topic_page_head(topic_name, stream_name, &site.title);
        out.write_all(head.as_bytes())?;
        out.write_all(links.as_bytes())?;
        out.write_all(render::stylesheet_link(&site.url, &site.html_root).as_bytes())?;

        for msg in &messages {
            out.write_all(render::message(&ctx, msg).into_string().as_bytes())?;
            out.write_all(b"\n\n")?;
        }

        out.write_all(frame.date_footer_html.as_bytes())?;
        out.write_all(frame.footer_html.as_bytes())
    })?;

    Ok(messages.len())
}

// ============================================================================
// Tests
// ============================================================================
