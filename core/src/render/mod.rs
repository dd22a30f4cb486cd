//! Renders the HTML fragments the site's pages insert into their containers.
//!
//! Every operation returns `Some(html)` when the container should be replaced
//! and `None` when it should be left as it is. Failures of the page's primary
//! collection are logged here and never reach the caller.

use log::error;
use serde::de::DeserializeOwned;
use strum::{Display, EnumIter};

use ruichiji_types::Record;

use crate::{
    config::SiteConfig,
    errors::RenderError,
    source::{ContentKind, DataSource, load},
};

mod discography;
pub mod html;
mod latest;
mod live;
mod movies;
mod music;
pub mod order;
mod topics;

pub use html::{embed_video_html, escape_html, nl2br, thumb_or_placeholder, truncate};
pub use order::sort_by_date_desc;

pub const NO_ID: &str = "<p>idが指定されていません。</p>";

/// The pages the site links between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum Link {
    #[strum(to_string = "topic.html?id=")]
    Topic,
    #[strum(to_string = "track.html?id=")]
    Track,
    #[strum(to_string = "album.html?id=")]
    Album,
    #[strum(to_string = "movie.html?id=")]
    Movie,
    #[strum(to_string = "movie.html#movie-")]
    MovieCard,
    #[strum(to_string = "live-event.html?id=")]
    Live,
}

impl Link {
    /// The link to the record with the given id.
    #[must_use]
    pub fn to(self, id: &str) -> String {
        format!("{self}{}", html::encode_component(id))
    }
}

/// The page listing every record of a collection.
#[must_use]
pub const fn list_page(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Topics => "topics.html",
        ContentKind::Music => "music.html",
        ContentKind::Movies => "movie.html",
        ContentKind::Discography => "discography.html",
        ContentKind::Live => "live.html",
    }
}

/// What a detail page shows when its record does not exist.
#[must_use]
pub const fn not_found(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Topics => "<p>記事が見つかりません。</p>",
        ContentKind::Music => "<p>曲が見つかりません。</p>",
        ContentKind::Movies => "<p>動画が見つかりません。</p>",
        ContentKind::Discography => "<p>アルバムが見つかりません。</p>",
        ContentKind::Live => "<p>ライブ情報が見つかりません。</p>",
    }
}

/// A page of the site, as selected by its file name and query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    /// The newest record of a collection, as shown on the front page.
    Latest(ContentKind),
    List(ContentKind),
    /// A single record, selected by the `id` query parameter.
    Detail { kind: ContentKind, id: Option<String> },
}

/// Renders pages from the collections of a [`DataSource`].
#[derive(Debug, Clone)]
pub struct Renderer<S> {
    source: S,
    config: SiteConfig,
}

impl<S: DataSource> Renderer<S> {
    #[must_use]
    pub const fn new(source: S, config: SiteConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    pub async fn render(&self, page: &Page) -> Option<String> {
        match page {
            Page::Latest(kind) => self.latest(*kind).await,
            Page::List(ContentKind::Topics) => self.topics_list().await,
            Page::List(ContentKind::Music) => self.music_list().await,
            Page::List(ContentKind::Movies) => self.movie_list().await,
            Page::List(ContentKind::Discography) => self.discography().await,
            Page::List(ContentKind::Live) => self.live_list().await,
            Page::Detail { kind, id } => {
                let id = id.as_deref();
                match kind {
                    ContentKind::Topics => self.topic_page(id).await,
                    ContentKind::Music => self.track_page(id).await,
                    ContentKind::Movies => self.movie_page(id).await,
                    ContentKind::Discography => self.album_page(id).await,
                    ContentKind::Live => self.live_page(id).await,
                }
            }
        }
    }

    /// A collection, newest first.
    async fn sorted<T>(&self, kind: ContentKind) -> Result<Vec<T>, RenderError>
    where
        T: Record + DeserializeOwned,
    {
        Ok(sort_by_date_desc(load(&self.source, kind).await?))
    }

    /// The record of `kind` whose id is exactly `id`.
    async fn find<T>(&self, kind: ContentKind, id: &str) -> Result<Option<T>, RenderError>
    where
        T: Record + DeserializeOwned,
    {
        let items: Vec<T> = load(&self.source, kind).await?;
        Ok(items.into_iter().find(|item| item.id() == id))
    }
}

/// The id a detail page was asked for, if any.
fn requested(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}

/// Log a failed render and leave the container alone.
fn finish(operation: &str, result: Result<String, RenderError>) -> Option<String> {
    match result {
        Ok(html) => Some(html),
        Err(e) => {
            error!("{operation} error: {e}");
            None
        }
    }
}

/// `Some(html)` for a found record, the not-found message otherwise.
fn found_or_missing(
    kind: ContentKind,
    lookup: Result<Option<String>, RenderError>,
) -> Result<String, RenderError> {
    lookup.map(|html| html.unwrap_or_else(|| not_found(kind).to_string()))
}
