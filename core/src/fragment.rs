//! URL fragment handling for in-page and cross-page deep links.
//!
//! Movie cards carry `id="movie-<id>"`, and links to them may be written either
//! as `#movie-<id>` or as a bare `#<id>`.

use percent_encoding::percent_decode_str;

pub const MOVIE_PREFIX: &str = "movie-";

/// The element id a fragment points at.
///
/// A leading `#` is ignored and the rest is percent-decoded. Returns `None` for an empty fragment.
#[must_use]
pub fn element_id_for_fragment(raw: &str) -> Option<String> {
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    let decoded = percent_decode_str(raw).decode_utf8_lossy().into_owned();
    Some(decoded).filter(|id| !id.is_empty())
}

/// The id of the movie card a fragment points at, always `movie-<id>`.
#[must_use]
pub fn movie_element_id(raw: &str) -> Option<String> {
    element_id_for_fragment(raw).map(|id| {
        if id.starts_with(MOVIE_PREFIX) {
            id
        } else {
            format!("{MOVIE_PREFIX}{id}")
        }
    })
}

/// The movie record id a fragment points at, without the `movie-` prefix.
#[must_use]
pub fn movie_record_id(raw: &str) -> Option<String> {
    element_id_for_fragment(raw)
        .map(|id| strip_movie_prefix(&id).to_string())
        .filter(|id| !id.is_empty())
}

/// `movie-<id>` → `<id>`, anything else unchanged.
#[must_use]
pub fn strip_movie_prefix(id: &str) -> &str {
    id.strip_prefix(MOVIE_PREFIX).unwrap_or(id)
}
