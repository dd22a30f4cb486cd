#![allow(clippy::module_name_repetitions)]
use serde::Deserialize;

use crate::lenient;

/// A published video, usually a music video.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MovieItem {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    /// Hosting service name, e.g. `YouTube`.
    #[serde(deserialize_with = "lenient::string")]
    pub service: String,
    #[serde(deserialize_with = "lenient::string")]
    pub uploader: String,
    /// URL of the video itself, embedded when possible.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub video: Option<String>,
    /// External page for the video, used when there is no [`MovieItem::video`].
    #[serde(deserialize_with = "lenient::opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,

    // related music
    #[serde(rename = "musicID", deserialize_with = "lenient::opt_string")]
    pub music_id: Option<String>,
    #[serde(rename = "musicIDs", deserialize_with = "lenient::strings")]
    pub music_ids: Vec<String>,
    #[serde(deserialize_with = "lenient::vec")]
    pub tracks: Vec<MovieTrack>,

    // legacy related music fields
    #[serde(deserialize_with = "lenient::opt_string")]
    pub track: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub track_id: Option<String>,
}

/// An entry of [`MovieItem::tracks`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MovieTrack {
    #[serde(rename = "musicID", deserialize_with = "lenient::opt_string")]
    pub music_id: Option<String>,
    /// Legacy spelling of [`MovieTrack::music_id`].
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
}

impl MovieItem {
    /// References declared with the current schema, in declaration order:
    /// `musicID`, then `musicIDs`, then `tracks[].musicID`.
    pub fn music_references(&self) -> impl Iterator<Item = &str> {
        self.music_id
            .as_deref()
            .into_iter()
            .chain(self.music_ids.iter().map(String::as_str))
            .chain(self.tracks.iter().filter_map(|t| t.music_id.as_deref()))
    }

    /// References declared with the earlier schema: `track`, `track_id`, `tracks[].id`.
    pub fn legacy_references(&self) -> impl Iterator<Item = &str> {
        self.track
            .as_deref()
            .into_iter()
            .chain(self.track_id.as_deref())
            .chain(self.tracks.iter().filter_map(|t| t.id.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_reference_order() {
        let movie: MovieItem = serde_json::from_value(json!({
            "id": "mv-1",
            "tracks": [{"musicID": "c"}, {"id": "legacy-b"}, "not an object"],
            "musicIDs": ["b", 3],
            "musicID": "a",
            "track": "legacy-a",
        }))
        .unwrap();

        assert_eq!(
            movie.music_references().collect::<Vec<_>>(),
            vec!["a", "b", "3", "c"]
        );
        assert_eq!(
            movie.legacy_references().collect::<Vec<_>>(),
            vec!["legacy-a", "legacy-b"]
        );
    }

    #[test]
    fn test_no_references() {
        let movie: MovieItem = serde_json::from_value(json!({"id": "mv-2"})).unwrap();
        assert_eq!(movie.music_references().count(), 0);
        assert_eq!(movie.legacy_references().count(), 0);
    }
}
