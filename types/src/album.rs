#![allow(clippy::module_name_repetitions)]
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::lenient;

/// Keys a track entry object may carry its music reference under, highest priority first.
pub const TRACK_REFERENCE_KEYS: [&str; 6] =
    ["musicID", "musicId", "music_id", "id", "track", "track_id"];

/// This struct holds all the metadata about a particular [`Album`] of the discography.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Album {
    /// The unique identifier for this [`Album`].
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    /// Release date.
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub cover: Option<String>,
    /// Participating artists.
    #[serde(deserialize_with = "lenient::strings")]
    pub artists: Vec<String>,
    /// Declared track count, only meaningful while [`Album::tracks`] is missing.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub track_count: Option<String>,
    /// `None` when the data file has no track list at all.
    #[serde(deserialize_with = "lenient::opt_vec")]
    pub tracks: Option<Vec<TrackEntry>>,
}

impl Album {
    /// The track list, empty when missing.
    #[must_use]
    pub fn track_entries(&self) -> &[TrackEntry] {
        self.tracks.as_deref().unwrap_or_default()
    }
}

/// An entry of an [`Album`]'s track list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TrackEntry {
    /// A bare string, taken verbatim as the music reference.
    Reference(String),
    Detailed(TrackDetails),
}

/// The object form of a [`TrackEntry`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackDetails {
    /// Title shown when the reference does not resolve.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub track_no: Option<String>,
    /// Album-local credit.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub author: Option<String>,
    /// Every other key, including the reference keys.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TrackDetails {
    /// The non-empty text stored under `key`, if any.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(lenient::text_of)
            .filter(|s| !s.is_empty())
    }
}

impl TrackEntry {
    /// The music reference of this entry.
    ///
    /// A bare string is used verbatim. An object yields the first non-empty
    /// value found under [`TRACK_REFERENCE_KEYS`].
    #[must_use]
    pub fn reference(&self) -> Option<String> {
        match self {
            Self::Reference(r) if r.is_empty() => None,
            Self::Reference(r) => Some(r.clone()),
            Self::Detailed(details) => TRACK_REFERENCE_KEYS
                .iter()
                .find_map(|key| details.field(key)),
        }
    }

    /// The detailed form, if this entry has one.
    #[must_use]
    pub const fn details(&self) -> Option<&TrackDetails> {
        match self {
            Self::Reference(_) => None,
            Self::Detailed(details) => Some(details),
        }
    }

    #[must_use]
    pub fn track_no(&self) -> Option<&str> {
        self.details().and_then(|d| d.track_no.as_deref())
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.details().and_then(|d| d.author.as_deref())
    }

    /// The entry's own title, a bare reference has none.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.details().and_then(|d| d.title.as_deref())
    }
}
