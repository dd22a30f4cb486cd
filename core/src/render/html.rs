//! HTML and URL helpers shared by the page renderers.

use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;

use crate::config::SiteConfig;

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters left alone by `encodeURI`.
const URI: &AsciiSet = &COMPONENT
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

static NICO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:nicovideo\.jp/watch/|nico\.ms/)([a-z0-9]+)").unwrap());

const EMBED_BOX: &str = r#"<div style="position:relative;padding-bottom:56.25%;height:0;overflow:hidden;">"#;
const EMBED_FILL: &str = r#"style="position:absolute;top:0;left:0;width:100%;height:100%;""#;

#[must_use]
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[must_use]
pub fn nl2br(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Shorten `text` to at most `n` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, n: usize) -> String {
    if text.chars().count() > n {
        let mut short: String = text.chars().take(n.saturating_sub(1)).collect();
        short.push('…');
        short
    } else {
        text.to_string()
    }
}

/// Percent-encode a query value the way `encodeURIComponent` does.
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-encode a whole URL the way `encodeURI` does.
#[must_use]
pub fn encode_uri(url: &str) -> String {
    utf8_percent_encode(url, URI).to_string()
}

/// The cover to show, falling back to the site's default cover.
#[must_use]
pub fn thumb_or_placeholder(url: Option<&str>, config: &SiteConfig) -> String {
    url.filter(|url| !url.is_empty())
        .map_or_else(|| config.default_cover(), str::to_string)
}

/// Markup embedding the video at `url`.
///
/// YouTube and niconico links become responsive iframes, anything else a
/// plain link.
#[must_use]
pub fn embed_video_html(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let href = escape_html(url);

    if url.contains("youtube.com") || url.contains("youtu.be") {
        return youtube_id(url).map_or_else(
            || format!(r#"<a href="{href}" target="_blank">{href}</a>"#),
            |id| {
                format!(
                    r#"{EMBED_BOX}<iframe src="https://www.youtube.com/embed/{}" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen {EMBED_FILL}></iframe></div>"#,
                    escape_html(&id)
                )
            },
        );
    }

    if let Some(id) = NICO_ID.captures(url).and_then(|caps| caps.get(1)) {
        return format!(
            r#"{EMBED_BOX}<iframe src="https://embed.nicovideo.jp/watch/{}" frameborder="0" scrolling="no" allowfullscreen {EMBED_FILL}></iframe></div>"#,
            id.as_str()
        );
    }

    format!(r#"<p><a href="{href}" target="_blank" rel="noopener">{href}</a></p>"#)
}

/// The video id of a YouTube link, from `youtu.be/<id>` or a `v=<id>` query.
fn youtube_id(url: &str) -> Option<String> {
    let short = url
        .split_once("youtu.be/")
        .and_then(|(_, rest)| rest.split(['?', '&']).next())
        .map(str::to_string);

    let query = url
        .split('?')
        .nth(1)
        .and_then(|query| query.split('#').next())
        .unwrap_or_default();
    let v = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("v="))
        .map(|v| percent_decode_str(&v.replace('+', " ")).decode_utf8_lossy().into_owned())
        .filter(|v| !v.is_empty());

    v.or(short).filter(|id| !id.is_empty())
}
