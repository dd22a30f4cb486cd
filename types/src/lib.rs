//! Types for the content collections of the site.
//!
//! Each collection lives in its own JSON document and is decoded leniently,
//! see [`lenient`] and [`collection`].

pub mod album;
pub mod collection;
pub mod lenient;
pub mod live;
pub mod movie;
pub mod music;
pub mod topic;

pub use album::{Album, TrackDetails, TrackEntry};
pub use live::{LiveEvent, SetlistEntry};
pub use movie::{MovieItem, MovieTrack};
pub use music::{ExternalAlbum, MusicItem};
pub use topic::Topic;

/// Fields every record of every collection carries.
pub trait Record {
    /// The identifier, unique within the record's collection.
    fn id(&self) -> &str;
    /// The display title.
    fn title(&self) -> &str;
    /// The publication date as written in the data file.
    fn date(&self) -> &str;
}

/// Implement [`Record`] for a struct with `id`, `title` and `date` string fields.
macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Record for $ty {
                #[inline]
                fn id(&self) -> &str {
                    &self.id
                }
                #[inline]
                fn title(&self) -> &str {
                    &self.title
                }
                #[inline]
                fn date(&self) -> &str {
                    &self.date
                }
            }
        )+
    };
}

impl_record!(Album, LiveEvent, MovieItem, MusicItem, Topic);
