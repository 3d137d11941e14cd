//! HTML fragments for archive pages.
//!
//! Pages are not whole maud documents: every page is the concatenation of a
//! shared head, a body fragment, the "last updated" footer and a shared
//! closing footer, the head and closing footer being raw HTML supplied by
//! the site configuration. This module renders the pieces; the writers in
//! [`crate::generate`] stitch them together.
//!
//! All interpolated names go through maud and are escaped. Message bodies are
//! the chat server's own rendered HTML and are emitted as-is.

use crate::links::{archive_message_url, archive_stylesheet_url, platform_message_url};
use crate::naming::{sanitize, sanitize_stream};
use crate::types::{Message, StreamMap, TopicMap};
use chrono::{DateTime, Utc};
use maud::{Markup, PreEscaped, html};

/// Display format for every date on the site, always in UTC.
pub const DATE_FORMAT: &str = "%b %d %Y at %H:%M";

/// Format a Unix timestamp with [`DATE_FORMAT`].
///
/// Out-of-range timestamps fall back to the raw number rather than failing
/// the page.
pub fn format_timestamp(unix_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_seconds, 0)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| unix_seconds.to_string())
}

/// `"1 topic"`, `"2 topics"`.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Frame pieces
// ============================================================================

/// Opening `<html>` plus a `<head>` carrying only a charset and a title.
fn open_document(title: &str) -> String {
    let head = html! {
        head {
            meta charset="utf-8";
            title { (title) }
        }
    };
    format!("<html>\n{}\n", head.into_string())
}

/// Shared page head used when the site configuration doesn't provide one.
///
/// Links the published stylesheet, so index and stream pages are styled
/// like topic pages.
pub fn default_page_head(site_title: &str, site_url: &str, html_root: &str) -> String {
    let heading = html! { h2 { (site_title) } };
    format!(
        "{}{}{}\n",
        open_document(site_title),
        stylesheet_link(site_url, html_root).trim_start(),
        heading.into_string()
    )
}

/// Head for a topic page, titled `"{topic} · {stream} · {site title}"`.
pub fn topic_page_head(topic_name: &str, stream_name: &str, site_title: &str) -> String {
    open_document(&format!("{topic_name} · {stream_name} · {site_title}"))
}

/// Stylesheet reference, pointing at `style.css` under the archive root.
pub fn stylesheet_link(site_url: &str, html_root: &str) -> String {
    let link = html! {
        head {
            link href=(archive_stylesheet_url(site_url, html_root)) rel="stylesheet";
        }
    };
    format!("\n{}\n", link.into_string())
}

/// Footer stamped with the export time.
pub fn last_updated_footer(updated: DateTime<Utc>) -> String {
    let footer = html! {
        hr;
        p { "Last updated: " (updated.format(DATE_FORMAT)) " UTC" }
    };
    format!("\n{}\n", footer.into_string())
}

// ============================================================================
// Body fragments
// ============================================================================

/// Index body: every stream with its topic count, linked relative to the site root.
pub fn stream_list(streams: &StreamMap) -> Markup {
    html! {
        hr;
        h2 { "Streams:" }
        ul {
            @for (name, stream) in streams {
                li {
                    a href={ "stream/" (sanitize_stream(name, stream.id)) "/index.html" } { (name) }
                    " (" (plural(stream.topic_data.len(), "topic")) ")"
                }
            }
        }
    }
}

/// Stream body: heading linking to the stream's canonical URL, then every
/// topic, most recently active first.
///
/// Topic links are relative to the stream page (`stream/<s>/index.html`).
pub fn topic_list(stream_name: &str, stream_url: &str, topics: &TopicMap) -> Markup {
    let mut ordered: Vec<_> = topics.iter().collect();
    ordered.sort_by(|(name_a, a), (name_b, b)| {
        b.latest_date
            .cmp(&a.latest_date)
            .then_with(|| name_a.cmp(name_b))
    });

    html! {
        h2 { "Stream: " a href=(stream_url) { (stream_name) } }
        hr;
        h3 { "Topics:" }
        ul {
            @for (name, topic) in ordered {
                li {
                    a href={ "topic/" (sanitize(name)) ".html" } { (name) }
                    " (" (plural(topic.size, "message")) ", latest: " (format_timestamp(topic.latest_date)) ")"
                }
            }
        }
    }
}

/// Everything a topic page needs to link to, with identifiers already sanitized.
pub struct TopicLinks<'a> {
    pub stream_name: &'a str,
    pub topic_name: &'a str,
    pub stream_url: &'a str,
    pub topic_url: &'a str,
    pub platform_topic_url: &'a str,
    pub platform_icon_url: &'a str,
}

/// Navigation block at the top of a topic page.
pub fn topic_page_links(links: &TopicLinks<'_>) -> Markup {
    html! {
        h2 { "Stream: " a href=(links.stream_url) { (links.stream_name) } }
        h3 { "Topic: " a href=(links.topic_url) { (links.topic_name) } }
        p.platform-link {
            a href=(links.platform_topic_url) {
                img src=(links.platform_icon_url) alt="" style="width:20px;height:20px;";
                " View this topic on the chat server"
            }
        }
        hr;
    }
}

/// Site-wide parameters shared by every message on one topic page.
pub struct MessageContext<'a> {
    pub site_url: &'a str,
    pub html_root: &'a str,
    pub platform_url: &'a str,
    pub platform_icon_url: &'a str,
    pub sanitized_stream: &'a str,
    pub sanitized_topic: &'a str,
}

/// One message: anchor, header line with platform and archive permalinks, body.
///
/// The fragment never ends in a newline; the writer owns message separation.
pub fn message(ctx: &MessageContext<'_>, msg: &Message) -> Markup {
    let archive_url = archive_message_url(
        ctx.site_url,
        ctx.html_root,
        ctx.sanitized_stream,
        ctx.sanitized_topic,
        msg.id,
    );
    let platform_url = platform_message_url(
        ctx.platform_url,
        ctx.sanitized_stream,
        ctx.sanitized_topic,
        msg.id,
    );

    html! {
        a name=(msg.id) {}
        h4 {
            a.zl href=(platform_url) {
                img src=(ctx.platform_icon_url) alt="view this post on the chat server" style="width:20px;height:20px;";
            }
            " " (msg.sender_full_name) " "
            a href=(archive_url) { "(" (format_timestamp(msg.timestamp)) ")" }
            ":"
        }
        (PreEscaped(msg.content.trim_end()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Stream, Topic};

    fn topic(size: usize, latest_date: i64) -> Topic {
        Topic { size, latest_date }
    }

    fn sample_message() -> Message {
        Message {
            id: 42,
            sender_full_name: "Ada <Lovelace>".to_string(),
            timestamp: 1_600_000_000,
            content: "<p>Hello <strong>there</strong></p>\n".to_string(),
        }
    }

    fn sample_context() -> MessageContext<'static> {
        MessageContext {
            site_url: "https://archive.example.org",
            html_root: "",
            platform_url: "https://chat.example.com",
            platform_icon_url: "https://chat.example.com/icon.png",
            sanitized_stream: "1-general",
            sanitized_topic: "welcome",
        }
    }

    #[test]
    fn timestamp_format() {
        assert_eq!(format_timestamp(1_600_000_000), "Sep 13 2020 at 12:26");
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_number() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn default_head_escapes_title() {
        let head = default_page_head("Q&A Archive", "https://archive.example.org", "");
        assert!(head.starts_with("<html>\n<head><meta charset=\"utf-8\">"));
        assert!(head.contains("<title>Q&amp;A Archive</title>"));
        assert!(head.contains("<h2>Q&amp;A Archive</h2>"));
    }

    #[test]
    fn default_head_links_stylesheet_before_heading() {
        let head = default_page_head("Archive", "https://example.org", "archive");
        let link = head
            .find(r#"<link href="https://example.org/archive/style.css" rel="stylesheet">"#)
            .unwrap();
        let heading = head.find("<h2>Archive</h2>").unwrap();
        assert!(link < heading);
    }

    #[test]
    fn topic_head_joins_names_with_middle_dots() {
        let head = topic_page_head("<b>lunch</b>", "social", "Archive");
        assert_eq!(
            head,
            "<html>\n<head><meta charset=\"utf-8\"><title>&lt;b&gt;lunch&lt;/b&gt; · social · Archive</title></head>\n"
        );
    }

    #[test]
    fn stylesheet_link_points_at_site_root() {
        assert_eq!(
            stylesheet_link("https://archive.example.org/", ""),
            "\n<head><link href=\"https://archive.example.org/style.css\" rel=\"stylesheet\"></head>\n"
        );
    }

    #[test]
    fn stylesheet_link_includes_html_root() {
        assert_eq!(
            stylesheet_link("https://example.org", "archive"),
            "\n<head><link href=\"https://example.org/archive/style.css\" rel=\"stylesheet\"></head>\n"
        );
    }

    #[test]
    fn plural_picks_noun_form() {
        assert_eq!(plural(1, "stream"), "1 stream");
        assert_eq!(plural(0, "topic"), "0 topics");
        assert_eq!(plural(7, "message"), "7 messages");
    }

    #[test]
    fn footer_shows_utc_date() {
        let updated = DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap();
        let footer = last_updated_footer(updated);
        assert_eq!(
            footer,
            "\n<hr><p>Last updated: Sep 13 2020 at 12:26 UTC</p>\n"
        );
    }

    #[test]
    fn stream_list_counts_topics() {
        let mut streams = StreamMap::new();
        let mut topics = TopicMap::new();
        topics.insert("welcome".into(), topic(3, 10));
        streams.insert(
            "general".into(),
            Stream {
                id: 1,
                topic_data: topics,
            },
        );
        let mut many = TopicMap::new();
        many.insert("a".into(), topic(1, 1));
        many.insert("b".into(), topic(1, 2));
        streams.insert(
            "social".into(),
            Stream {
                id: 2,
                topic_data: many,
            },
        );

        let html = stream_list(&streams).into_string();
        assert!(html.contains(r#"<a href="stream/1-general/index.html">general</a> (1 topic)"#));
        assert!(html.contains(r#"<a href="stream/2-social/index.html">social</a> (2 topics)"#));
    }

    #[test]
    fn topic_list_orders_by_latest_activity() {
        let mut topics = TopicMap::new();
        topics.insert("old".into(), topic(1, 100));
        topics.insert("new".into(), topic(5, 300));
        topics.insert("middle".into(), topic(2, 200));

        let html = topic_list("general", "https://x/stream/1-general/index.html", &topics)
            .into_string();
        let new = html.find(">new<").unwrap();
        let middle = html.find(">middle<").unwrap();
        let old = html.find(">old<").unwrap();
        assert!(new < middle && middle < old);
        assert!(html.contains("(1 message, latest:"));
        assert!(html.contains("(5 messages, latest:"));
    }

    #[test]
    fn topic_list_links_sanitized_topic_files() {
        let mut topics = TopicMap::new();
        topics.insert("a/b".into(), topic(1, 1));
        let html = topic_list("general", "u", &topics).into_string();
        assert!(html.contains(r#"href="topic/a.2Fb.html""#));
        assert!(html.contains(">a/b</a>"));
    }

    #[test]
    fn empty_topic_list_renders_empty_ul() {
        let html = topic_list("quiet", "u", &TopicMap::new()).into_string();
        assert!(html.contains("<ul></ul>"));
    }

    #[test]
    fn topic_links_reference_stream_and_platform() {
        let links = TopicLinks {
            stream_name: "general",
            topic_name: "welcome",
            stream_url: "https://x/stream/1-general/index.html",
            topic_url: "https://x/stream/1-general/topic/welcome.html",
            platform_topic_url: "https://chat/#narrow/stream/1-general/topic/welcome",
            platform_icon_url: "https://chat/icon.png",
        };
        let html = topic_page_links(&links).into_string();
        assert!(html.contains(r#"<a href="https://x/stream/1-general/index.html">general</a>"#));
        assert!(html.contains(r#"href="https://chat/#narrow/stream/1-general/topic/welcome""#));
    }

    #[test]
    fn message_escapes_sender_but_not_content() {
        let html = message(&sample_context(), &sample_message()).into_string();
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(html.contains("<p>Hello <strong>there</strong></p>"));
    }

    #[test]
    fn message_has_anchor_and_permalinks() {
        let html = message(&sample_context(), &sample_message()).into_string();
        assert!(html.starts_with(r#"<a name="42"></a>"#));
        assert!(html.contains(
            r#"href="https://archive.example.org/stream/1-general/topic/welcome.html#42""#
        ));
        assert!(html.contains(
            r#"href="https://chat.example.com/#narrow/stream/1-general/topic/welcome/near/42""#
        ));
    }

    #[test]
    fn message_never_ends_with_newline() {
        let html = message(&sample_context(), &sample_message()).into_string();
        assert!(!html.ends_with('\n'));
    }
}
