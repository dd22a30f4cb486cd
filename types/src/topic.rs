use serde::Deserialize;

use crate::lenient;

/// A news post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Topic {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    /// Free text, newlines are kept.
    #[serde(deserialize_with = "lenient::string")]
    pub content: String,
}
