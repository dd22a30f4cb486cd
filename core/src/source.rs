//! Where the content collections come from.
//!
//! A [`DataSource`] hands out raw documents, [`load`] turns them into records.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use ruichiji_types::collection::parse_collection;

use crate::errors::FetchError;

/// The content collections of the site, one data file each.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    Topics,
    Music,
    Movies,
    Discography,
    Live,
}

impl ContentKind {
    /// The name of the collection's data file, e.g. `music.json`.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{self}.json")
    }
}

/// Produces the raw documents the site is rendered from.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// The raw JSON document of a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the document could not be read.
    async fn fetch_collection(&self, kind: ContentKind) -> Result<String, FetchError>;

    /// An arbitrary text asset, such as a lyrics file.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset could not be read.
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetch and decode a collection.
///
/// # Errors
///
/// Returns an error if the document could not be fetched or is not valid JSON.
pub async fn load<T, S>(source: &S, kind: ContentKind) -> Result<Vec<T>, FetchError>
where
    T: DeserializeOwned,
    S: DataSource,
{
    let text = source.fetch_collection(kind).await?;
    let records = parse_collection(&text).map_err(|source| FetchError::Parse {
        resource: kind.file_name(),
        source,
    })?;
    debug!("loaded {} records from {}", records.len(), kind.file_name());
    Ok(records)
}

/// Fetch and decode a collection that is not essential to the page.
///
/// Any failure is logged and treated as an empty collection.
pub async fn load_or_empty<T, S>(source: &S, kind: ContentKind) -> Vec<T>
where
    T: DeserializeOwned,
    S: DataSource,
{
    load(source, kind).await.unwrap_or_else(|e| {
        warn!("{kind} unavailable, continuing without it: {e}");
        Vec::new()
    })
}

/// Reads the site's content from a directory on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirSource {
    /// The directory holding the collection documents.
    data_dir: PathBuf,
    /// The directory relative text assets are resolved against.
    asset_dir: PathBuf,
}

impl DirSource {
    /// A source reading from `data_dir`.
    ///
    /// Text assets are resolved against the parent of `data_dir`, matching the
    /// site's `assets/data` + `assets/<text>` layout.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let asset_dir = data_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| data_dir.clone(), Path::to_path_buf);
        Self {
            data_dir,
            asset_dir,
        }
    }

    #[must_use]
    pub fn with_asset_dir(mut self, asset_dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = asset_dir.into();
        self
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Where a text asset lives on disk.
    ///
    /// Paths starting with `/` are taken relative to the site root (the parent
    /// of the asset directory), others relative to the asset directory.
    /// Absolute URLs cannot be read from disk.
    fn text_path(&self, path: &str) -> Result<PathBuf, FetchError> {
        if is_absolute_url(path) {
            return Err(FetchError::Unsupported(path.to_string()));
        }
        Ok(path.strip_prefix('/').map_or_else(
            || self.asset_dir.join(path),
            |rooted| {
                self.asset_dir
                    .parent()
                    .unwrap_or(&self.asset_dir)
                    .join(rooted)
            },
        ))
    }
}

impl DataSource for DirSource {
    async fn fetch_collection(&self, kind: ContentKind) -> Result<String, FetchError> {
        read(self.data_dir.join(kind.file_name())).await
    }

    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        if path.is_empty() {
            return Ok(String::new());
        }
        read(self.text_path(path)?).await
    }
}

async fn read(path: PathBuf) -> Result<String, FetchError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| FetchError::IO { path, source })
}

/// `scheme://...`
fn is_absolute_url(path: &str) -> bool {
    path.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use ruichiji_types::MusicItem;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(ContentKind::Topics, "topics.json")]
    #[case(ContentKind::Music, "music.json")]
    #[case(ContentKind::Movies, "movies.json")]
    #[case(ContentKind::Discography, "discography.json")]
    #[case(ContentKind::Live, "live.json")]
    fn test_file_name(#[case] kind: ContentKind, #[case] expected: &str) {
        assert_eq!(kind.file_name(), expected);
        assert_eq!(ContentKind::from_str(kind.as_ref()).unwrap(), kind);
    }

    #[test]
    fn test_every_kind_is_listed() {
        assert_eq!(ContentKind::iter().count(), 5);
    }

    #[rstest]
    #[case("https://example.com/a.txt", true)]
    #[case("HTTP://example.com/a.txt", true)]
    #[case("lyrics/a.txt", false)]
    #[case("/assets/lyrics/a.txt", false)]
    #[case("://odd", false)]
    #[case("c:/windows", false)]
    fn test_is_absolute_url(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_absolute_url(path), expected);
    }

    #[test]
    fn test_asset_dir_defaults_to_parent() {
        let source = DirSource::new("/srv/site/assets/data");
        assert_eq!(source.asset_dir(), Path::new("/srv/site/assets"));

        let source = DirSource::new("data");
        assert_eq!(source.asset_dir(), Path::new("data"));
    }

    #[test]
    fn test_text_path() {
        let source = DirSource::new("/srv/site/assets/data");
        assert_eq!(
            source.text_path("lyrics/a.txt").unwrap(),
            PathBuf::from("/srv/site/assets/lyrics/a.txt")
        );
        assert_eq!(
            source.text_path("/assets/lyrics/a.txt").unwrap(),
            PathBuf::from("/srv/site/assets/lyrics/a.txt")
        );
        assert!(matches!(
            source.text_path("https://example.com/a.txt"),
            Err(FetchError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn test_dir_source_reads_collections() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let data_dir = temp_dir.path().join("assets").join("data");
        std::fs::create_dir_all(&data_dir)?;
        std::fs::create_dir_all(temp_dir.path().join("assets").join("lyrics"))?;
        std::fs::write(
            data_dir.join("music.json"),
            r#"{"items": [{"id": "trk-01", "title": "Song"}]}"#,
        )?;
        std::fs::write(
            temp_dir.path().join("assets").join("lyrics").join("trk-01.txt"),
            "la la la",
        )?;

        let source = DirSource::new(&data_dir);

        let music: Vec<MusicItem> = load(&source, ContentKind::Music).await?;
        assert_eq!(music.len(), 1);
        assert_eq!(music[0].title, "Song");

        assert_eq!(source.fetch_text("lyrics/trk-01.txt").await?, "la la la");
        assert_eq!(source.fetch_text("").await?, "");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_collection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(temp_dir.path());

        let result: Result<Vec<MusicItem>, _> = load(&source, ContentKind::Music).await;
        assert!(matches!(result, Err(FetchError::IO { .. })));

        let empty: Vec<MusicItem> = load_or_empty(&source, ContentKind::Music).await;
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_collection() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("live.json"), "{ not json").unwrap();
        let source = DirSource::new(temp_dir.path());

        let result: Result<Vec<MusicItem>, _> = load(&source, ContentKind::Live).await;
        assert!(matches!(result, Err(FetchError::Parse { resource, .. }) if resource == "live.json"));
    }
}
