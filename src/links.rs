//! URL construction for archive pages and for the source chat server.
//!
//! All functions take already-sanitized identifiers.

/// Join URL segments with exactly one `/` between them, skipping empty ones.
fn join_url(segments: &[&str]) -> String {
    let mut url = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let segment = if i == 0 {
            segment.trim_end_matches('/')
        } else {
            segment.trim_matches('/')
        };
        if segment.is_empty() {
            continue;
        }
        if !url.is_empty() {
            url.push('/');
        }
        url.push_str(segment);
    }
    url
}

/// Path of a stream page relative to the archive root.
pub fn stream_page_path(sanitized_stream: &str) -> String {
    format!("stream/{sanitized_stream}/index.html")
}

/// Path of a topic page relative to the archive root.
pub fn topic_page_path(sanitized_stream: &str, sanitized_topic: &str) -> String {
    format!("stream/{sanitized_stream}/topic/{sanitized_topic}.html")
}

/// Absolute URL of the published `style.css`, which sits at the archive root.
pub fn archive_stylesheet_url(site_url: &str, html_root: &str) -> String {
    join_url(&[site_url, html_root, "style.css"])
}

/// Canonical absolute URL of a stream page.
pub fn archive_stream_url(site_url: &str, html_root: &str, sanitized_stream: &str) -> String {
    join_url(&[site_url, html_root, &stream_page_path(sanitized_stream)])
}

/// Canonical absolute URL of a topic page.
pub fn archive_topic_url(
    site_url: &str,
    html_root: &str,
    sanitized_stream: &str,
    sanitized_topic: &str,
) -> String {
    join_url(&[
        site_url,
        html_root,
        &topic_page_path(sanitized_stream, sanitized_topic),
    ])
}

/// Permalink to a message's anchor on its topic page.
pub fn archive_message_url(
    site_url: &str,
    html_root: &str,
    sanitized_stream: &str,
    sanitized_topic: &str,
    message_id: u64,
) -> String {
    format!(
        "{}#{message_id}",
        archive_topic_url(site_url, html_root, sanitized_stream, sanitized_topic)
    )
}

/// The stream's narrow on the chat server.
pub fn platform_stream_url(platform_url: &str, sanitized_stream: &str) -> String {
    format!(
        "{}/#narrow/stream/{sanitized_stream}",
        platform_url.trim_end_matches('/')
    )
}

/// The topic's narrow on the chat server.
pub fn platform_topic_url(
    platform_url: &str,
    sanitized_stream: &str,
    sanitized_topic: &str,
) -> String {
    format!(
        "{}/topic/{sanitized_topic}",
        platform_stream_url(platform_url, sanitized_stream)
    )
}

/// A single message in its topic on the chat server.
pub fn platform_message_url(
    platform_url: &str,
    sanitized_stream: &str,
    sanitized_topic: &str,
    message_id: u64,
) -> String {
    format!(
        "{}/near/{message_id}",
        platform_topic_url(platform_url, sanitized_stream, sanitized_topic)
    )
}
