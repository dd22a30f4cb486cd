use std::fmt::Write;

use ruichiji_types::{Album, MusicItem};

use super::{
    Link, NO_ID, Renderer, finish, found_or_missing,
    html::{escape_html, nl2br, thumb_or_placeholder, truncate},
    requested,
};
use crate::{
    errors::RenderError,
    resolve::{ResolvedTrack, resolve_album_tracks},
    source::{ContentKind, DataSource, load_or_empty},
};

impl<S: DataSource> Renderer<S> {
    /// Album cards, newest first.
    pub async fn discography(&self) -> Option<String> {
        finish("discography", self.try_discography().await)
    }

    /// An album with its track list resolved against the music collection.
    pub async fn album_page(&self, id: Option<&str>) -> Option<String> {
        let Some(id) = requested(id) else {
            return Some(NO_ID.to_string());
        };
        finish(
            "album_page",
            found_or_missing(ContentKind::Discography, self.try_album_page(id).await),
        )
    }

    async fn try_discography(&self) -> Result<String, RenderError> {
        let albums: Vec<Album> = self.sorted(ContentKind::Discography).await?;

        let mut output = String::new();
        for album in &albums {
            writeln!(output, r#"<article class="card">"#)?;
            writeln!(output, r#"<div style="display:flex;gap:1rem;align-items:center;">"#)?;
            writeln!(
                output,
                r#"<img src="{}" alt="" class="thumb">"#,
                escape_html(&thumb_or_placeholder(album.cover.as_deref(), self.config()))
            )?;
            writeln!(output, "<div>")?;
            writeln!(
                output,
                r#"<h3><a href="{}">{}</a></h3>"#,
                Link::Album.to(&album.id),
                escape_html(&album.title)
            )?;
            writeln!(
                output,
                r#"<div class="meta-small">参加アーティスト: {}</div>"#,
                escape_html(&artists(album))
            )?;
            writeln!(
                output,
                r#"<div class="meta-small">トラック数: {}</div>"#,
                escape_html(&track_count(album))
            )?;
            writeln!(
                output,
                r#"<p class="preview">{}</p>"#,
                escape_html(&truncate(&album.description, 20))
            )?;
            writeln!(output, "</div>\n</div>")?;
            writeln!(output, "</article>")?;
        }
        Ok(output)
    }

    async fn try_album_page(&self, id: &str) -> Result<Option<String>, RenderError> {
        let Some(album) = self.find::<Album>(ContentKind::Discography, id).await? else {
            return Ok(None);
        };
        let music: Vec<MusicItem> = load_or_empty(&self.source, ContentKind::Music).await;
        let tracks = resolve_album_tracks(&album, &music);

        let mut output = String::new();
        writeln!(output, r#"<article class="card">"#)?;
        writeln!(output, r#"<div style="display:flex;gap:1rem;align-items:flex-start;">"#)?;
        writeln!(
            output,
            r#"<img src="{}" alt="{}" class="thumb">"#,
            escape_html(&thumb_or_placeholder(album.cover.as_deref(), self.config())),
            escape_html(&album.title)
        )?;
        writeln!(output, "<div>")?;
        writeln!(
            output,
            r#"<h2 id="album-{}">{}</h2>"#,
            escape_html(&album.id),
            escape_html(&album.title)
        )?;
        writeln!(
            output,
            r#"<div class="meta-small">参加アーティスト: {}</div>"#,
            escape_html(&artists(&album))
        )?;
        writeln!(output, r#"<div class="meta-small">リリース: {}</div>"#, escape_html(&album.date))?;
        writeln!(
            output,
            r#"<div class="content">{}</div>"#,
            nl2br(&escape_html(&album.description))
        )?;
        writeln!(output, "</div>\n</div>")?;

        writeln!(output, r#"<section style="margin-top:1rem">"#)?;
        writeln!(output, "<h3>収録曲</h3>")?;
        writeln!(output, r#"<ol class="manual-number">"#)?;
        if tracks.is_empty() {
            writeln!(output, "<li>収録曲データがありません</li>")?;
        }
        for track in &tracks {
            writeln!(output, "{}", track_item(track))?;
        }
        writeln!(output, "</ol>")?;
        writeln!(output, "</section>")?;
        writeln!(output, "</article>")?;
        Ok(Some(output))
    }
}

fn artists(album: &Album) -> String {
    if album.artists.is_empty() {
        "未設定".to_string()
    } else {
        album.artists.join(", ")
    }
}

/// The listed tracks, else the declared count, else `不明`.
fn track_count(album: &Album) -> String {
    match (&album.tracks, &album.track_count) {
        (Some(tracks), _) => tracks.len().to_string(),
        (None, Some(count)) => count.clone(),
        (None, None) => "不明".to_string(),
    }
}

/// `<li>` for one resolved track: `no. title — credit`.
fn track_item(track: &ResolvedTrack<'_>) -> String {
    let track_no = escape_html(track.track_no().unwrap_or_default());
    let credit = track
        .credit()
        .map(|credit| format!(" — {}", escape_html(credit)))
        .unwrap_or_default();

    match track {
        ResolvedTrack::Linked { music, .. } => format!(
            r#"<li>{track_no}. <a href="{}">{}</a>{credit}</li>"#,
            Link::Track.to(&music.id),
            escape_html(&music.title)
        ),
        ResolvedTrack::Unlinked { title, .. } => {
            format!("<li>{track_no}. {}{credit}</li>", escape_html(title))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::tests::renderer, test_utils::{self, MemorySource}};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn source() -> MemorySource {
        MemorySource::new()
            .with(
                ContentKind::Discography,
                &json!({"items": [
                    {
                        "id": "al-01",
                        "title": "First",
                        "date": "2023-10-10",
                        "artists": ["Rui", "Chiji"],
                        "description": "debut\nalbum",
                        "tracks": [
                            {"track_no": 1, "music_id": "trk-01", "author": "A"},
                            {"track_no": "2", "musicID": "TRK-02"},
                            {"track_no": 3, "id": "trk-99", "title": "Bonus <live>", "author": "Guest"},
                            "trk-98",
                        ],
                    },
                    {"id": "al-02", "title": "Second", "date": "2024-10-10", "track_count": "12"},
                ]}),
            )
            .with(
                ContentKind::Music,
                &json!([
                    {"id": "trk-01", "title": "Song", "composer": "B", "credits": ["B"]},
                    {"id": "trk-02", "title": "Other Song", "composer": "C"},
                ]),
            )
    }

    #[rstest]
    #[case(json!({"tracks": ["a", "b"], "track_count": "9"}), "2")]
    #[case(json!({"tracks": [], "track_count": "9"}), "0")]
    #[case(json!({"track_count": "9"}), "9")]
    #[case(json!({"track_count": 9}), "9")]
    #[case(json!({}), "不明")]
    fn test_track_count(#[case] album: Value, #[case] expected: &str) {
        assert_eq!(track_count(&test_utils::album(album)), expected);
    }

    #[tokio::test]
    async fn test_discography() {
        let html = renderer(source()).discography().await.unwrap();

        assert!(html.find("album.html?id=al-02").unwrap() < html.find("album.html?id=al-01").unwrap());
        assert!(html.contains("トラック数: 4"));
        assert!(html.contains("トラック数: 12"));
        assert!(html.contains("参加アーティスト: 未設定"));
        assert!(html.contains("参加アーティスト: Rui, Chiji"));
    }

    #[tokio::test]
    async fn test_album_page() {
        let html = renderer(source()).album_page(Some("al-01")).await.unwrap();

        assert!(html.contains(r#"<h2 id="album-al-01">First</h2>"#));
        assert!(html.contains("debut<br>album"));
        assert!(html.contains(r#"<li>1. <a href="track.html?id=trk-01">Song</a> — A</li>"#));
        assert!(html.contains(r#"<li>2. <a href="track.html?id=trk-02">Other Song</a></li>"#));
        assert!(html.contains("<li>3. Bonus &lt;live&gt; — Guest</li>"));
        assert!(html.contains("<li>. </li>"));
        assert!(!html.contains("— B"));
        assert!(!html.contains("— C"));
        assert!(!html.contains("trk-99"));
        assert!(!html.contains("trk-98"));
    }

    #[tokio::test]
    async fn test_album_page_without_music() {
        let source = source().failing(ContentKind::Music, 500);

        let html = renderer(source).album_page(Some("al-01")).await.unwrap();

        // no title on the entry, only the local credit is left
        assert!(html.contains("<li>1.  — A</li>"));
        assert!(html.contains("<li>3. Bonus &lt;live&gt; — Guest</li>"));
        assert!(!html.contains("<a href=\"track.html"));
    }

    #[tokio::test]
    async fn test_album_without_tracks() {
        let html = renderer(source()).album_page(Some("al-02")).await.unwrap();
        assert!(html.contains("<li>収録曲データがありません</li>"));
    }
}
