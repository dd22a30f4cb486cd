//! Fixtures shared by the tests of this crate and its dependents.

use std::collections::HashMap;

use serde_json::Value;

use ruichiji_types::{Album, LiveEvent, MovieItem, MusicItem};

use crate::{
    errors::FetchError,
    source::{ContentKind, DataSource},
};

/// A music item with only an id and a title.
#[must_use]
pub fn music(id: &str, title: &str) -> MusicItem {
    MusicItem {
        id: id.into(),
        title: title.into(),
        ..MusicItem::default()
    }
}

/// A movie with the given id and extra fields.
///
/// # Panics
///
/// Panics if `fields` is not an object or does not decode.
#[must_use]
pub fn movie(id: &str, mut fields: Value) -> MovieItem {
    fields
        .as_object_mut()
        .expect("movie fields must be an object")
        .insert("id".into(), id.into());
    serde_json::from_value(fields).expect("invalid movie fixture")
}

/// # Panics
///
/// Panics if `value` does not decode.
#[must_use]
pub fn album(value: Value) -> Album {
    serde_json::from_value(value).expect("invalid album fixture")
}

/// # Panics
///
/// Panics if `value` does not decode.
#[must_use]
pub fn live(value: Value) -> LiveEvent {
    serde_json::from_value(value).expect("invalid live fixture")
}

/// An in-memory [`DataSource`].
///
/// Collections that were never added fail with a 404, like a missing file on
/// a static host would.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    collections: HashMap<ContentKind, Result<String, u16>>,
    texts: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `kind`.
    #[must_use]
    pub fn with(mut self, kind: ContentKind, document: &Value) -> Self {
        self.collections.insert(kind, Ok(document.to_string()));
        self
    }

    /// Serve raw, possibly malformed, text for `kind`.
    #[must_use]
    pub fn with_raw(mut self, kind: ContentKind, text: &str) -> Self {
        self.collections.insert(kind, Ok(text.to_string()));
        self
    }

    /// Answer requests for `kind` with an HTTP error status.
    #[must_use]
    pub fn failing(mut self, kind: ContentKind, status: u16) -> Self {
        self.collections.insert(kind, Err(status));
        self
    }

    /// Serve `text` for the text asset at `path`.
    #[must_use]
    pub fn with_text(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(path.to_string(), text.to_string());
        self
    }
}

impl DataSource for MemorySource {
    async fn fetch_collection(&self, kind: ContentKind) -> Result<String, FetchError> {
        match self.collections.get(&kind) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                resource: kind.file_name(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                resource: kind.file_name(),
                status: 404,
            }),
        }
    }

    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.texts
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                resource: path.to_string(),
                status: 404,
            })
    }
}
