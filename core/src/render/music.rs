use std::fmt::Write;

use log::warn;

use ruichiji_types::{Album, ExternalAlbum, MovieItem, MusicItem};

use super::{
    Link, NO_ID, Renderer, finish, found_or_missing,
    html::{escape_html, nl2br, thumb_or_placeholder, truncate},
    list_page, requested,
};
use crate::{
    errors::RenderError,
    resolve::{AlbumIndex, movies_for_music},
    source::{ContentKind, DataSource, load, load_or_empty},
};

impl<S: DataSource> Renderer<S> {
    /// Every song, newest first, with the albums it appears on.
    ///
    /// The discography is fetched alongside the music and may be missing.
    pub async fn music_list(&self) -> Option<String> {
        finish("music_list", self.try_music_list().await)
    }

    /// A song with its lyrics, related movies, credits and albums.
    pub async fn track_page(&self, id: Option<&str>) -> Option<String> {
        let Some(id) = requested(id) else {
            return Some(NO_ID.to_string());
        };
        finish(
            "track_page",
            found_or_missing(ContentKind::Music, self.try_track_page(id).await),
        )
    }

    async fn try_music_list(&self) -> Result<String, RenderError> {
        let (music, albums) = tokio::join!(
            load::<MusicItem, _>(&self.source, ContentKind::Music),
            load_or_empty::<Album, _>(&self.source, ContentKind::Discography),
        );
        let music = super::sort_by_date_desc(music?);
        let index = AlbumIndex::build(&albums);

        let mut output = String::new();
        for item in &music {
            let playback = match item.audio.as_deref() {
                Some(audio) => format!(r#"<audio controls src="{}"></audio>"#, escape_html(audio)),
                None => {
                    let note = truncate(&item.note, 20);
                    let note = if note.is_empty() { "（再生無し）".to_string() } else { note };
                    format!(r#"<p class="preview">{}</p>"#, escape_html(&note))
                }
            };

            writeln!(output, r#"<div class="item">"#)?;
            writeln!(
                output,
                r#"<img src="{}" alt="" class="thumb">"#,
                escape_html(&thumb_or_placeholder(item.cover.as_deref(), self.config()))
            )?;
            writeln!(output, "<div>")?;
            writeln!(
                output,
                r#"<div class="kicker"><a href="{}">{}</a></div>"#,
                Link::Track.to(&item.id),
                escape_html(&item.title)
            )?;
            writeln!(
                output,
                r#"<div class="meta-small">リリース: {} ・ {}</div>"#,
                escape_html(&item.date),
                escape_html(&item.duration)
            )?;
            if let Some(albums) = internal_albums_html(index.albums_for(&item.id)) {
                writeln!(output, "{albums}")?;
            }
            if let Some(albums) = external_albums_html(item) {
                writeln!(output, "{albums}")?;
            }
            writeln!(output, "<div>{playback}</div>")?;
            writeln!(output, "</div>\n</div>")?;
        }
        Ok(output)
    }

    async fn try_track_page(&self, id: &str) -> Result<Option<String>, RenderError> {
        let Some(item) = self.find::<MusicItem>(ContentKind::Music, id).await? else {
            return Ok(None);
        };

        let lyrics = self.lyrics(&item).await;
        let movies: Vec<MovieItem> = load_or_empty(&self.source, ContentKind::Movies).await;
        let albums: Vec<Album> = load_or_empty(&self.source, ContentKind::Discography).await;
        let index = AlbumIndex::build(&albums);

        let related = movies_for_music(&movies, &item.id);
        let credits = if item.credits.is_empty() {
            "未設定".to_string()
        } else {
            item.credits.join(", ")
        };
        let lyrics: &str = if lyrics.is_empty() { "歌詞は未設定です。" } else { &lyrics };

        let mut output = String::new();
        writeln!(output, r#"<article class="card">"#)?;
        writeln!(
            output,
            r#"<h2 id="track-{}">{}</h2>"#,
            escape_html(&item.id),
            escape_html(&item.title)
        )?;
        writeln!(
            output,
            r#"<div class="meta-small">リリース: {} ・ {}</div>"#,
            escape_html(&item.date),
            escape_html(&item.duration)
        )?;
        writeln!(output, r#"<div style="margin: .8rem 0;">"#)?;
        match item.audio.as_deref() {
            Some(audio) => writeln!(output, r#"<audio controls src="{}"></audio>"#, escape_html(audio))?,
            None => writeln!(output, r#"<p class="meta-small">この曲の音源は用意されていません。</p>"#)?,
        }
        writeln!(output, "</div>")?;

        if !related.is_empty() {
            write!(output, "<section><h3>関連MV</h3><ul>")?;
            for movie in related {
                write!(
                    output,
                    r#"<li><a href="{}">{}</a>（{}）</li>"#,
                    Link::MovieCard.to(&movie.id),
                    escape_html(&movie.title),
                    escape_html(&movie.date)
                )?;
            }
            writeln!(output, "</ul></section>")?;
        }

        writeln!(
            output,
            r#"<section><h3>Credits</h3><p class="meta-small">{}</p></section>"#,
            escape_html(&credits)
        )?;
        writeln!(
            output,
            r#"<section><h3>Lyrics</h3><div class="content" id="lyrics-content">{}</div></section>"#,
            nl2br(&escape_html(lyrics))
        )?;
        if let Some(albums) = internal_albums_html(index.albums_for(&item.id)) {
            writeln!(output, "<section><h3>収録アルバム</h3>{albums}</section>")?;
        }
        if let Some(albums) = external_albums_html(&item) {
            writeln!(output, "<section><h3>収録アルバム (外部)</h3>{albums}</section>")?;
        }
        writeln!(output, "</article>")?;
        Ok(Some(output))
    }

    /// The song's lyrics, from its lyrics file when it has one.
    ///
    /// A lyrics file that cannot be read falls back to the inline lyrics.
    async fn lyrics(&self, item: &MusicItem) -> String {
        let Some(path) = item.lyrics_file.as_deref() else {
            return item.lyrics.clone();
        };
        match self.source.fetch_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to load lyrics file {path}: {e}");
                item.lyrics.clone()
            }
        }
    }
}

/// `収録アルバム: ...` for the albums of the discography listing a song.
fn internal_albums_html(albums: &[&Album]) -> Option<String> {
    if albums.is_empty() {
        return None;
    }
    let links = albums
        .iter()
        .map(|album| {
            let text = [album.title.as_str(), album.id.as_str()]
                .into_iter()
                .find(|text| !text.is_empty())
                .unwrap_or("（無題のアルバム）");
            let href = if album.id.is_empty() {
                list_page(ContentKind::Discography).to_string()
            } else {
                Link::Album.to(&album.id)
            };
            format!(r#"<a href="{href}">{}</a>"#, escape_html(text))
        })
        .collect::<Vec<_>>();
    Some(format!(
        r#"<div class="meta-small">収録アルバム: {}</div>"#,
        links.join(" ・ ")
    ))
}

/// `収録アルバム (外部): ...` for the song's own album references.
fn external_albums_html(item: &MusicItem) -> Option<String> {
    if item.albums.is_empty() {
        return None;
    }
    let parts = item
        .external_albums()
        .map(|album| match album {
            ExternalAlbum::Link { title, url } => format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                escape_html(url),
                escape_html(title)
            ),
            ExternalAlbum::Plain(text) => escape_html(text),
        })
        .collect::<Vec<_>>();
    Some(format!(
        r#"<div class="meta-small">収録アルバム (外部): {}</div>"#,
        parts.join(" ・ ")
    ))
}

#[cfg(test)]
mod tests {
    use crate::{render::tests::renderer, source::ContentKind, test_utils::MemorySource};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn music() -> serde_json::Value {
        json!({"items": [
            {
                "id": "trk-01",
                "title": "Song",
                "date": "2024-03-01",
                "duration": "3:45",
                "credits": ["Vo. Rui", "Gt. Chiji"],
                "composer": "B",
                "lyrics": "inline\nlyrics",
                "albums": ["[Compilation](https://example.com/c)", "Split EP"],
            },
            {"id": "trk-02", "title": "Other Song", "date": "2023-01-01", "note": "demo only"},
        ]})
    }

    #[tokio::test]
    async fn test_music_list() {
        let source = MemorySource::new()
            .with(ContentKind::Music, &music())
            .with(
                ContentKind::Discography,
                &json!([
                    {"id": "al-01", "title": "First", "tracks": [{"musicID": "trk-01"}, "trk-01"]},
                    {"id": "", "title": "", "tracks": ["trk-01"]},
                ]),
            );

        let html = renderer(source).music_list().await.unwrap();

        assert!(html.find("track.html?id=trk-01").unwrap() < html.find("track.html?id=trk-02").unwrap());
        assert!(html.contains("リリース: 2024-03-01 ・ 3:45"));
        assert!(html.contains(
            r#"収録アルバム: <a href="album.html?id=al-01">First</a> ・ <a href="discography.html">（無題のアルバム）</a>"#
        ));
        assert!(html.contains(
            r#"収録アルバム (外部): <a href="https://example.com/c" target="_blank" rel="noopener noreferrer">Compilation</a> ・ Split EP"#
        ));
        assert!(html.contains(r#"<p class="preview">demo only</p>"#));
        assert!(html.contains("（再生無し）"));
    }

    #[tokio::test]
    async fn test_music_list_without_discography() {
        let source = MemorySource::new()
            .with(ContentKind::Music, &music())
            .failing(ContentKind::Discography, 500);

        let html = renderer(source).music_list().await.unwrap();

        assert!(html.contains(r#"<a href="track.html?id=trk-01">Song</a>"#));
        assert!(!html.contains("収録アルバム:"));
    }

    #[tokio::test]
    async fn test_track_page() {
        let source = MemorySource::new()
            .with(ContentKind::Music, &music())
            .with(
                ContentKind::Movies,
                &json!([
                    {"id": "mv-01", "title": "Song MV", "date": "2024-04-01", "musicIDs": ["TRK-01"]},
                    {"id": "mv-02", "title": "Unrelated", "musicID": "trk-02"},
                ]),
            )
            .with(
                ContentKind::Discography,
                &json!([{"id": "al-01", "title": "First", "tracks": [{"music_id": "trk-01"}]}]),
            );

        let html = renderer(source).track_page(Some("trk-01")).await.unwrap();

        assert!(html.contains(r#"<h2 id="track-trk-01">Song</h2>"#));
        assert!(html.contains("この曲の音源は用意されていません。"));
        assert!(html.contains(
            r#"<section><h3>関連MV</h3><ul><li><a href="movie.html#movie-mv-01">Song MV</a>（2024-04-01）</li></ul></section>"#
        ));
        assert!(!html.contains("Unrelated"));
        assert!(html.contains(r#"<p class="meta-small">Vo. Rui, Gt. Chiji</p>"#));
        assert!(html.contains("inline<br>lyrics"));
        assert!(html.contains(r#"<section><h3>収録アルバム</h3><div class="meta-small">収録アルバム: <a href="album.html?id=al-01">First</a></div></section>"#));
        assert!(html.contains("<h3>収録アルバム (外部)</h3>"));
    }

    #[tokio::test]
    async fn test_track_page_with_failing_secondaries() {
        let source = MemorySource::new()
            .with(ContentKind::Music, &music())
            .failing(ContentKind::Movies, 500)
            .failing(ContentKind::Discography, 500);

        let html = renderer(source).track_page(Some("trk-02")).await.unwrap();

        assert!(html.contains(r#"<h2 id="track-trk-02">Other Song</h2>"#));
        assert!(!html.contains("関連MV"));
        assert!(html.contains(r#"<p class="meta-small">未設定</p>"#));
        assert!(html.contains("歌詞は未設定です。"));
        assert!(!html.contains("<h3>収録アルバム</h3>"));
    }

    #[tokio::test]
    async fn test_lyrics_file() {
        let music = json!([
            {"id": "trk-01", "title": "Song", "lyricsFile": "lyrics/trk-01.txt", "lyrics": "fallback"},
            {"id": "trk-02", "title": "Other", "lyricsFile": "lyrics/missing.txt", "lyrics": "fallback"},
        ]);
        let source = MemorySource::new()
            .with(ContentKind::Music, &music)
            .with_text("lyrics/trk-01.txt", "from <file>");
        let renderer = renderer(source);

        let html = renderer.track_page(Some("trk-01")).await.unwrap();
        assert!(html.contains("from &lt;file&gt;"));

        let html = renderer.track_page(Some("trk-02")).await.unwrap();
        assert!(html.contains(r#"id="lyrics-content">fallback</div>"#));
    }

    #[tokio::test]
    async fn test_track_page_not_found() {
        let source = MemorySource::new().with(ContentKind::Music, &music());
        assert_eq!(
            renderer(source).track_page(Some("trk-99")).await.as_deref(),
            Some("<p>曲が見つかりません。</p>")
        );
    }
}
