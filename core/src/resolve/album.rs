//! Album track lists, in both directions.

use std::collections::{HashMap, HashSet};

use ruichiji_types::{Album, MusicItem, TrackEntry};

use super::find_music_by_id;

/// A track entry of an album, after resolution against the music collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedTrack<'a> {
    /// The entry's reference matched a music item.
    Linked {
        track_no: Option<&'a str>,
        music: &'a MusicItem,
        /// The entry's own `author`, never the music item's credits.
        credit: Option<&'a str>,
    },
    /// Nothing matched, only the entry's own fields are shown.
    Unlinked {
        track_no: Option<&'a str>,
        title: &'a str,
        credit: Option<&'a str>,
    },
}

impl<'a> ResolvedTrack<'a> {
    #[must_use]
    pub fn resolve(entry: &'a TrackEntry, music: &'a [MusicItem]) -> Self {
        let track_no = entry.track_no();
        let credit = entry.author();

        match entry
            .reference()
            .and_then(|reference| find_music_by_id(music, &reference))
        {
            Some(music) => Self::Linked {
                track_no,
                music,
                credit,
            },
            None => Self::Unlinked {
                track_no,
                title: entry.title().unwrap_or_default(),
                credit,
            },
        }
    }

    #[must_use]
    pub const fn track_no(&self) -> Option<&'a str> {
        match self {
            Self::Linked { track_no, .. } | Self::Unlinked { track_no, .. } => *track_no,
        }
    }

    #[must_use]
    pub const fn credit(&self) -> Option<&'a str> {
        match self {
            Self::Linked { credit, .. } | Self::Unlinked { credit, .. } => *credit,
        }
    }
}

/// Resolve every track of `album`, in album order.
#[must_use]
pub fn resolve_album_tracks<'a>(album: &'a Album, music: &'a [MusicItem]) -> Vec<ResolvedTrack<'a>> {
    album
        .track_entries()
        .iter()
        .map(|entry| ResolvedTrack::resolve(entry, music))
        .collect()
}

/// Which albums of the discography contain a given music id.
///
/// Built from scratch for every render, keys are the references exactly as
/// written in the track lists.
#[derive(Debug, Default)]
pub struct AlbumIndex<'a> {
    by_music_id: HashMap<String, Vec<&'a Album>>,
}

impl<'a> AlbumIndex<'a> {
    #[must_use]
    pub fn build(albums: &'a [Album]) -> Self {
        let mut by_music_id: HashMap<String, Vec<&'a Album>> = HashMap::new();

        for album in albums {
            let references: HashSet<String> = album
                .track_entries()
                .iter()
                .filter_map(TrackEntry::reference)
                .collect();
            for reference in references {
                by_music_id.entry(reference).or_default().push(album);
            }
        }

        Self { by_music_id }
    }

    /// The albums listing `music_id`, in discography order.
    #[must_use]
    pub fn albums_for(&self, music_id: &str) -> &[&'a Album] {
        self.by_music_id
            .get(music_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{album, music};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_author_is_the_only_credit() {
        let mut song = music("trk-01", "Song");
        song.composer = Some("B".into());
        song.credits = vec!["B".into()];
        let items = vec![song];
        let album = album(json!({
            "id": "al-1",
            "tracks": [
                {"music_id": "trk-01", "author": "A"},
                {"musicID": "trk-01"},
            ],
        }));

        let tracks = resolve_album_tracks(&album, &items);

        assert_eq!(tracks.len(), 2);
        assert!(matches!(tracks[0], ResolvedTrack::Linked { music, credit: Some("A"), .. } if music.id == "trk-01"));
        assert!(matches!(tracks[1], ResolvedTrack::Linked { credit: None, .. }));
    }

    #[test]
    fn test_unresolved_tracks_keep_their_own_fields() {
        let items = vec![music("trk-01", "Song")];
        let album = album(json!({
            "id": "al-1",
            "tracks": [
                {"id": "missing", "title": "Lost Song", "author": "C", "track_no": 2},
                "also-missing",
                {"title": "Song"},
            ],
        }));

        let tracks = resolve_album_tracks(&album, &items);

        assert_eq!(
            tracks,
            vec![
                ResolvedTrack::Unlinked {
                    track_no: Some("2"),
                    title: "Lost Song",
                    credit: Some("C")
                },
                ResolvedTrack::Unlinked {
                    track_no: None,
                    title: "",
                    credit: None
                },
                // titles are never used to resolve album tracks
                ResolvedTrack::Unlinked {
                    track_no: None,
                    title: "Song",
                    credit: None
                },
            ]
        );
    }

    #[test]
    fn test_track_resolution_is_case_insensitive() {
        let items = vec![music("trk-01", "Song")];
        let album = album(json!({"id": "al-1", "tracks": ["TRK-01"]}));

        let tracks = resolve_album_tracks(&album, &items);
        assert!(matches!(tracks[0], ResolvedTrack::Linked { music, .. } if music.title == "Song"));
    }

    #[test]
    fn test_album_index() {
        let albums = vec![
            album(json!({"id": "al-1", "tracks": ["trk-01", {"musicID": "trk-02"}, "trk-01"]})),
            album(json!({"id": "al-2", "tracks": [{"track_id": "trk-01"}]})),
            album(json!({"id": "al-3"})),
        ];

        let index = AlbumIndex::build(&albums);

        let ids = |music_id| {
            index
                .albums_for(music_id)
                .iter()
                .map(|a| a.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids("trk-01"), vec!["al-1", "al-2"]);
        assert_eq!(ids("trk-02"), vec!["al-1"]);
        assert!(ids("trk-03").is_empty());
    }

    #[test]
    fn test_album_index_uses_key_priority() {
        // only the highest priority key counts as the entry's reference
        let albums = vec![album(json!({"id": "al-1", "tracks": [{"musicID": "a", "id": "b"}]}))];
        let index = AlbumIndex::build(&albums);

        assert_eq!(index.albums_for("a").len(), 1);
        assert!(index.albums_for("b").is_empty());
    }
}
