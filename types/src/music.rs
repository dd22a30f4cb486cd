#![allow(clippy::module_name_repetitions)]
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::lenient;

/// `[title](url)`, the only link syntax accepted in a [`MusicItem`]'s `albums` list.
static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[([^\]]+)\]\(([^)]+)\)\s*$").unwrap());

/// This struct holds everything the site knows about a particular song.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MusicItem {
    /// The unique identifier for this [`MusicItem`].
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    /// Release date.
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    /// Runtime as written by the author, e.g. `"3:45"`.
    #[serde(deserialize_with = "lenient::string")]
    pub duration: String,
    /// URL of a playable audio file.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub audio: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub note: String,
    /// Inline lyrics.
    #[serde(deserialize_with = "lenient::string")]
    pub lyrics: String,
    /// Lyrics kept in a separate text asset, preferred over [`MusicItem::lyrics`].
    #[serde(rename = "lyricsFile", deserialize_with = "lenient::opt_string")]
    pub lyrics_file: Option<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub credits: Vec<String>,
    /// Informational only, album pages never display it.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub composer: Option<String>,
    /// Releases outside the site's own discography.
    #[serde(deserialize_with = "lenient::strings")]
    pub albums: Vec<String>,
}

impl MusicItem {
    /// The entries of [`MusicItem::albums`], parsed.
    pub fn external_albums(&self) -> impl Iterator<Item = ExternalAlbum<'_>> {
        self.albums.iter().map(|album| ExternalAlbum::parse(album))
    }
}

/// An entry of a [`MusicItem`]'s external album list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExternalAlbum<'a> {
    /// A markdown-style `[title](url)` link.
    Link { title: &'a str, url: &'a str },
    /// Anything else, shown verbatim.
    Plain(&'a str),
}

impl<'a> ExternalAlbum<'a> {
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        MARKDOWN_LINK.captures(raw).map_or(Self::Plain(raw), |caps| {
            let title = caps.get(1).map_or("", |m| m.as_str().trim());
            let url = caps.get(2).map_or("", |m| m.as_str().trim());
            Self::Link { title, url }
        })
    }
}
