//! Live setlists.

use ruichiji_types::{LiveEvent, MusicItem, SetlistEntry};

/// A setlist entry, after resolution against the music collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetlistSlot<'a> {
    Linked(&'a MusicItem),
    /// The entry's own title, shown as-is.
    Unlinked(&'a str),
}

impl<'a> SetlistSlot<'a> {
    /// Match `entry` by id or by title in a single pass, first match wins.
    #[must_use]
    pub fn resolve(entry: &'a SetlistEntry, music: &'a [MusicItem]) -> Self {
        let id = entry.id();
        let title = entry.title();

        music
            .iter()
            .find(|m| id == Some(m.id.as_str()) || title == Some(m.title.as_str()))
            .map_or_else(
                || Self::Unlinked(title.unwrap_or_default()),
                Self::Linked,
            )
    }
}

/// Resolve the setlist of `live`, in order.
#[must_use]
pub fn resolve_setlist<'a>(live: &'a LiveEvent, music: &'a [MusicItem]) -> Vec<SetlistSlot<'a>> {
    live.setlist
        .iter()
        .map(|entry| SetlistSlot::resolve(entry, music))
        .collect()
}
