use std::fmt::Write;

use ruichiji_types::{MovieItem, MusicItem};

use super::{
    Link, NO_ID, Renderer, finish, found_or_missing,
    html::{embed_video_html, encode_uri, escape_html, nl2br},
    requested,
};
use crate::{
    errors::RenderError,
    fragment::MOVIE_PREFIX,
    resolve::music_for_movie,
    source::{ContentKind, DataSource, load_or_empty},
};

impl<S: DataSource> Renderer<S> {
    /// Every movie, newest first, each card addressable as `#movie-<id>`.
    pub async fn movie_list(&self) -> Option<String> {
        finish("movie_list", self.try_movie_list().await)
    }

    pub async fn movie_page(&self, id: Option<&str>) -> Option<String> {
        let Some(id) = requested(id) else {
            return Some(NO_ID.to_string());
        };
        finish(
            "movie_page",
            found_or_missing(ContentKind::Movies, self.try_movie_page(id).await),
        )
    }

    async fn try_movie_list(&self) -> Result<String, RenderError> {
        let movies: Vec<MovieItem> = self.sorted(ContentKind::Movies).await?;
        let music: Vec<MusicItem> = load_or_empty(&self.source, ContentKind::Music).await;

        let mut output = String::new();
        for movie in &movies {
            let href = movie
                .video
                .clone()
                .or_else(|| movie.url.clone())
                .unwrap_or_else(|| Link::Movie.to(&movie.id));
            let media = movie.video.as_deref().map_or_else(
                || r#"<p class="preview">リンクのみ</p>"#.to_string(),
                embed_video_html,
            );
            let songs = music_for_movie(movie, &music)
                .into_iter()
                .map(song_link)
                .collect::<Vec<_>>();

            writeln!(
                output,
                r#"<div class="item" id="{MOVIE_PREFIX}{}">"#,
                escape_html(&movie.id)
            )?;
            writeln!(output, r#"<div class="meta">{}</div>"#, escape_html(&movie.date))?;
            writeln!(output, "<div>")?;
            writeln!(
                output,
                r#"<div class="kicker"><a href="{}" target="_blank" rel="noopener">{}</a></div>"#,
                encode_uri(&href),
                escape_html(&movie.title)
            )?;
            writeln!(
                output,
                r#"<div class="meta-small">{} {}</div>"#,
                escape_html(&movie.service),
                escape_html(&movie.uploader)
            )?;
            writeln!(output, r#"<div style="margin-top:.5rem">{media}</div>"#)?;
            if !songs.is_empty() {
                writeln!(output, r#"<p class="meta-small">関連曲: {}</p>"#, songs.join(" ・ "))?;
            }
            writeln!(output, "</div>\n</div>")?;
        }
        Ok(output)
    }

    async fn try_movie_page(&self, id: &str) -> Result<Option<String>, RenderError> {
        let Some(movie) = self.find::<MovieItem>(ContentKind::Movies, id).await? else {
            return Ok(None);
        };
        let music: Vec<MusicItem> = load_or_empty(&self.source, ContentKind::Music).await;
        let songs = music_for_movie(&movie, &music);

        let mut output = String::new();
        writeln!(output, r#"<article class="card">"#)?;
        writeln!(
            output,
            r#"<h2 id="{MOVIE_PREFIX}{}">{}</h2>"#,
            escape_html(&movie.id),
            escape_html(&movie.title)
        )?;
        writeln!(
            output,
            r#"<div class="meta-small">公開: {} ・ {} {}</div>"#,
            escape_html(&movie.date),
            escape_html(&movie.service),
            escape_html(&movie.uploader)
        )?;
        writeln!(output, r#"<div style="margin-top:.8rem">"#)?;
        match movie.video.as_deref() {
            Some(video) => writeln!(output, "{}", embed_video_html(video))?,
            None => writeln!(
                output,
                r#"<p class="preview">{}</p>"#,
                escape_html(&movie.description)
            )?,
        }
        writeln!(output, "</div>")?;

        if !songs.is_empty() {
            write!(output, r#"<section style="margin-top:1rem"><h3>関連曲</h3><ul>"#)?;
            for song in songs {
                write!(output, "<li>{}</li>", song_link(song))?;
            }
            writeln!(output, "</ul></section>")?;
        }

        writeln!(output, r#"<section style="margin-top:1rem">"#)?;
        writeln!(output, "<h3>詳細</h3>")?;
        writeln!(
            output,
            r#"<div class="content">{}</div>"#,
            nl2br(&escape_html(&movie.description))
        )?;
        writeln!(output, "</section>")?;
        writeln!(output, "</article>")?;
        Ok(Some(output))
    }
}

fn song_link(song: &MusicItem) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        Link::Track.to(&song.id),
        escape_html(&song.title)
    )
}

#[cfg(test)]
mod tests {
    use crate::{render::tests::renderer, source::ContentKind, test_utils::MemorySource};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn source() -> MemorySource {
        MemorySource::new()
            .with(
                ContentKind::Movies,
                &json!({"items": [
                    {
                        "id": "mv-01",
                        "title": "Song MV",
                        "date": "2024-04-01",
                        "service": "YouTube",
                        "uploader": "ruichiji",
                        "video": "https://www.youtube.com/watch?v=abc",
                        "musicID": "TRK-01",
                        "musicIDs": ["missing", "trk-02"],
                        "track": "trk-03",
                    },
                    {
                        "id": "mv-00",
                        "title": "Live clip",
                        "date": "2023-01-01",
                        "url": "https://example.com/clip one",
                        "description": "from the\ntour",
                    },
                ]}),
            )
            .with(
                ContentKind::Music,
                &json!([
                    {"id": "trk-01", "title": "Song"},
                    {"id": "trk-02", "title": "Other Song"},
                    {"id": "trk-03", "title": "Legacy"},
                ]),
            )
    }

    #[tokio::test]
    async fn test_movie_list() {
        let html = renderer(source()).movie_list().await.unwrap();

        assert!(html.find(r#"id="movie-mv-01""#).unwrap() < html.find(r#"id="movie-mv-00""#).unwrap());
        assert!(html.contains("https://www.youtube.com/embed/abc"));
        assert!(html.contains(
            r#"<p class="meta-small">関連曲: <a href="track.html?id=trk-01">Song</a> ・ <a href="track.html?id=trk-02">Other Song</a></p>"#
        ));
        assert!(!html.contains("Legacy"));
        assert!(html.contains(r#"<a href="https://example.com/clip%20one" target="_blank" rel="noopener">Live clip</a>"#));
        assert!(html.contains("リンクのみ"));
    }

    #[tokio::test]
    async fn test_movie_list_without_music() {
        let source = source().failing(ContentKind::Music, 500);

        let html = renderer(source).movie_list().await.unwrap();

        assert!(html.contains(r#"id="movie-mv-01""#));
        assert!(!html.contains("関連曲"));
    }

    #[tokio::test]
    async fn test_movie_page() {
        let renderer = renderer(source());

        let html = renderer.movie_page(Some("mv-01")).await.unwrap();
        assert!(html.contains(r#"<h2 id="movie-mv-01">Song MV</h2>"#));
        assert!(html.contains("公開: 2024-04-01 ・ YouTube ruichiji"));
        assert!(html.contains(
            r#"<h3>関連曲</h3><ul><li><a href="track.html?id=trk-01">Song</a></li><li><a href="track.html?id=trk-02">Other Song</a></li></ul>"#
        ));

        let html = renderer.movie_page(Some("mv-00")).await.unwrap();
        assert!(html.contains(r#"<p class="preview">from the
tour</p>"#));
        assert!(html.contains("from the<br>tour"));
        assert!(!html.contains("関連曲"));
    }

    #[tokio::test]
    async fn test_movie_page_not_found() {
        assert_eq!(
            renderer(source()).movie_page(Some("movie-mv-01")).await.as_deref(),
            Some("<p>動画が見つかりません。</p>")
        );
    }
}
