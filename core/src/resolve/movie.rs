//! Movie ↔ music association.

use ruichiji_types::{MovieItem, MusicItem};

use super::find_music_by_id;

/// Every movie that references `music_id`.
///
/// Both the current (`musicID`, `musicIDs`, `tracks[].musicID`) and the legacy
/// (`track`, `track_id`, `tracks[].id`) fields are consulted. Matching is a
/// trimmed, case-insensitive equality, never fuzzy.
#[must_use]
pub fn movies_for_music<'a>(movies: &'a [MovieItem], music_id: &str) -> Vec<&'a MovieItem> {
    let wanted = music_id.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    movies
        .iter()
        .filter(|movie| {
            movie
                .music_references()
                .chain(movie.legacy_references())
                .any(|reference| reference.trim().to_lowercase() == wanted)
        })
        .collect()
}

/// The music items a movie declares, in declaration order.
///
/// Only the current schema's fields are used, each resolved with
/// [`find_music_by_id`]. Unresolved references are dropped.
#[must_use]
pub fn music_for_movie<'a>(movie: &MovieItem, music: &'a [MusicItem]) -> Vec<&'a MusicItem> {
    movie
        .music_references()
        .filter_map(|reference| find_music_by_id(music, reference))
        .collect()
}
