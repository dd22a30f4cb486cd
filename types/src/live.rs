use serde::Deserialize;

use crate::lenient;

/// A concert.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LiveEvent {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub venue: String,
    #[serde(deserialize_with = "lenient::string")]
    pub note: String,
    /// Flyer or venue photo.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub image: Option<String>,
    /// Songs played, in order.
    #[serde(deserialize_with = "lenient::vec")]
    pub setlist: Vec<SetlistEntry>,
}

/// An entry of a [`LiveEvent`]'s setlist.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SetlistEntry {
    /// A bare string, both the title and the reference.
    Title(String),
    Detailed {
        #[serde(default, deserialize_with = "lenient::opt_string")]
        id: Option<String>,
        #[serde(default, deserialize_with = "lenient::opt_string")]
        title: Option<String>,
    },
}

impl SetlistEntry {
    /// The identifier to match against music ids.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Title(s) => Some(s.as_str()).filter(|s| !s.is_empty()),
            Self::Detailed { id, .. } => id.as_deref(),
        }
    }

    /// The title to match against music titles, also the literal label shown when nothing matches.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Title(s) => Some(s.as_str()).filter(|s| !s.is_empty()),
            Self::Detailed { title, .. } => title.as_deref(),
        }
    }
}
