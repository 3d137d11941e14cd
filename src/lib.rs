//! # Chat Archive
//!
//! Turns a chat export into a static website anyone can browse without an
//! account on the chat server. The export is a three-level hierarchy:
//! streams contain topics, topics contain messages.
//!
//! # Architecture: One Pass, Full Rebuild
//!
//! ```text
//! json/stream_info.json ──► load once ──► check identifiers ──► PageFrame
//!                                                              │
//!      index.html ◄────────────────────────────────────────────┤
//!      style.css                                               │
//!      for each stream:  stream/<s>/index.html ◄───────────────┤
//!        for each topic: stream/<s>/topic/<t>.html ◄── json/<s>/<t>.json
//!      assets/, .nojekyll
//! ```
//!
//! The stream hierarchy and the shared page framing are computed once and
//! only borrowed by the page writers. Every run regenerates every page;
//! there is no incremental mode, and a failed run should simply be rerun.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Orchestrator and the three page writers |
//! | [`reader`] | Loads `stream_info.json` and per-topic message files |
//! | [`types`] | Serde types of the export (`StreamInfo`, `Stream`, `Topic`, `Message`) |
//! | [`naming`] | Filesystem-safe identifiers and collision checks |
//! | [`links`] | Archive and chat-server URLs |
//! | [`target`] | Output file placement and scoped page handles |
//! | [`render`] | HTML fragments via Maud |
//! | [`assets`] | Stylesheet, asset tree and `.nojekyll` publication |
//! | [`config`] | `config.toml` loading, defaults and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Ordered Maps
//!
//! Streams and topics are `BTreeMap`s keyed by display name. Page emission
//! and the index listing follow name order, so two runs over the same
//! export produce byte-identical trees.
//!
//! ## Maud for Fragments, Raw Strings for Framing
//!
//! Body fragments are built with [Maud](https://maud.lambda.xyz/), which
//! escapes every interpolated name. The shared head and closing footer are
//! raw HTML from `config.toml` and are written verbatim, as is message
//! content, which the chat server has already rendered.

pub mod assets;
pub mod config;
pub mod generate;
pub mod links;
pub mod naming;
pub mod output;
pub mod reader;
pub mod render;
pub mod target;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
