//! Cross-reference resolution between the content collections.
//!
//! Two matching strategies exist. [`find_music_by_id`] is strict and is used
//! wherever the data author wrote a structured `musicID`-style field.
//! [`find_music_ref`] is a staged fuzzy fallback for free-form references,
//! only used where a false positive is harmless.
//!
//! A miss is never an error: callers degrade to unlinked text.

pub mod album;
pub mod live;
pub mod movie;

use once_cell::sync::Lazy;
use regex::Regex;
use ruichiji_types::MusicItem;

pub use album::{AlbumIndex, ResolvedTrack, resolve_album_tracks};
pub use live::{SetlistSlot, resolve_setlist};
pub use movie::{movies_for_music, music_for_movie};

/// Runs of characters outside `[A-Za-z0-9_]`.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Trim, lowercase, and collapse whitespace runs to a single space.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, replace every run of non-word characters with one hyphen, and
/// strip leading and trailing hyphens.
///
/// Word characters are ASCII letters, digits and `_`, so a title written
/// entirely in other scripts slugifies to the empty string.
#[must_use]
pub fn slugify(s: &str) -> String {
    NON_WORD
        .replace_all(&s.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Look up a music item by identifier only.
///
/// Tries an exact match on the trimmed reference first, then a
/// case-insensitive one. Titles are never consulted.
#[must_use]
pub fn find_music_by_id<'a>(music: &'a [MusicItem], reference: &str) -> Option<&'a MusicItem> {
    let r = reference.trim();
    if r.is_empty() {
        return None;
    }
    let lower = r.to_lowercase();

    music.iter().find(|m| m.id == r).or_else(|| {
        music
            .iter()
            .find(|m| !m.id.is_empty() && m.id.to_lowercase() == lower)
    })
}

/// Look up a music item from a loosely written reference.
///
/// Each rule is tried against the whole collection before moving to the next:
///
/// 1. exact id
/// 2. case-insensitive id
/// 3. id contains the reference (case-insensitive, one direction only)
/// 4. normalized title equals the normalized reference
/// 5. normalized title contains the normalized reference
/// 6. normalized reference contains the normalized title
/// 7. the slug of the title or of the id equals the slug of the reference
///
/// Empty titles and empty slugs never match anything.
#[must_use]
pub fn find_music_ref<'a>(music: &'a [MusicItem], reference: &str) -> Option<&'a MusicItem> {
    let r = reference.trim();
    if r.is_empty() {
        return None;
    }

    if let Some(found) = find_music_by_id(music, r) {
        return Some(found);
    }

    let lower = r.to_lowercase();
    if let Some(found) = music
        .iter()
        .find(|m| !m.id.is_empty() && m.id.to_lowercase().contains(&lower))
    {
        return Some(found);
    }

    let wanted = normalize(r);
    let titles: Vec<_> = music
        .iter()
        .map(|m| (m, normalize(&m.title)))
        .filter(|(_, title)| !title.is_empty())
        .collect();
    if let Some((found, _)) = titles
        .iter()
        .find(|(_, title)| *title == wanted)
        .or_else(|| titles.iter().find(|(_, title)| title.contains(&wanted)))
        .or_else(|| titles.iter().find(|(_, title)| wanted.contains(title.as_str())))
    {
        return Some(*found);
    }

    let wanted_slug = slugify(r);
    if wanted_slug.is_empty() {
        return None;
    }
    music.iter().find(|m| {
        slugify(&m.title) == wanted_slug || (!m.id.is_empty() && slugify(&m.id) == wanted_slug)
    })
}
