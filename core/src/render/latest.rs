//! The front page's "latest" cards.

use std::fmt::Write;

use serde::de::DeserializeOwned;

use ruichiji_types::{Album, LiveEvent, MovieItem, MusicItem, Record, Topic};

use super::{
    Link, Renderer, finish,
    html::{embed_video_html, escape_html, thumb_or_placeholder, truncate},
    list_page,
};
use crate::{
    errors::RenderError,
    source::{ContentKind, DataSource},
};

impl<S: DataSource> Renderer<S> {
    /// The newest record of `kind` as a summary card.
    ///
    /// An empty collection leaves the container alone.
    pub async fn latest(&self, kind: ContentKind) -> Option<String> {
        let result = match kind {
            ContentKind::Topics => self.newest(kind, |t: Topic| latest_topic(&t)).await,
            ContentKind::Music => self.newest(kind, |m: MusicItem| latest_music(&m)).await,
            ContentKind::Movies => self.newest(kind, |m: MovieItem| latest_movie(&m)).await,
            ContentKind::Discography => {
                self.newest(kind, |a: Album| self.latest_album(&a)).await
            }
            ContentKind::Live => self.newest(kind, |l: LiveEvent| latest_live(&l)).await,
        };
        result.and_then(|result| finish("latest", result))
    }

    async fn newest<T, F>(
        &self,
        kind: ContentKind,
        card: F,
    ) -> Option<Result<String, RenderError>>
    where
        T: Record + DeserializeOwned,
        F: FnOnce(T) -> Result<String, std::fmt::Error>,
    {
        match self.sorted::<T>(kind).await {
            Ok(items) => items
                .into_iter()
                .next()
                .map(|item| card(item).map_err(RenderError::from)),
            Err(e) => Some(Err(e)),
        }
    }

    fn latest_album(&self, album: &Album) -> Result<String, std::fmt::Error> {
        let description: &str = if album.description.is_empty() {
            "（説明未設定）"
        } else {
            &album.description
        };

        let mut output = String::new();
        writeln!(output, r#"<div style="float:left;margin-right:12px;text-align:center;">"#)?;
        writeln!(
            output,
            r#"<img src="{}" alt="" class="thumb" style="display:block;margin-bottom:8px">"#,
            escape_html(&thumb_or_placeholder(album.cover.as_deref(), self.config()))
        )?;
        writeln!(
            output,
            r#"<div><a href="{}">Discography一覧へ</a></div>"#,
            list_page(ContentKind::Discography)
        )?;
        writeln!(output, "</div>")?;
        writeln!(output, r#"<div style="overflow:hidden;">"#)?;
        writeln!(
            output,
            r#"<h2 class="kicker"><a href="{}">{}</a></h2>"#,
            Link::Album.to(&album.id),
            escape_html(&album.title)
        )?;
        writeln!(
            output,
            r#"<div class="meta-small">参加アーティスト: {}</div>"#,
            escape_html(&album.artists.join(", "))
        )?;
        writeln!(output, r#"<p class="preview">{}</p>"#, escape_html(description))?;
        writeln!(output, "</div>")?;
        writeln!(output, r#"<div style="clear:both"></div>"#)?;
        Ok(output)
    }
}

fn latest_topic(topic: &Topic) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    writeln!(
        output,
        r#"<h2 class="kicker"><a href="{}">{}</a></h2>"#,
        Link::Topic.to(&topic.id),
        escape_html(&topic.title)
    )?;
    writeln!(output, r#"<div class="meta-small">{}</div>"#, escape_html(&topic.date))?;
    writeln!(
        output,
        r#"<p class="preview">{}</p>"#,
        escape_html(&truncate(&topic.content, 140))
    )?;
    writeln!(
        output,
        r#"<p><a class="more" href="{}">Topic一覧へ</a></p>"#,
        list_page(ContentKind::Topics)
    )?;
    Ok(output)
}

fn latest_music(music: &MusicItem) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    writeln!(
        output,
        r#"<h2 class="kicker"><a href="{}">{}</a></h2>"#,
        Link::Track.to(&music.id),
        escape_html(&music.title)
    )?;
    writeln!(output, r#"<div class="meta-small">リリース: {}</div>"#, escape_html(&music.date))?;
    match music.audio.as_deref() {
        Some(audio) => writeln!(output, r#"<audio controls src="{}"></audio>"#, escape_html(audio))?,
        None => writeln!(
            output,
            r#"<p class="preview">{}</p>"#,
            escape_html(&truncate(&music.note, 120))
        )?,
    }
    writeln!(
        output,
        r#"<p><a class="more" href="{}">Music一覧へ</a></p>"#,
        list_page(ContentKind::Music)
    )?;
    Ok(output)
}

fn latest_movie(movie: &MovieItem) -> Result<String, std::fmt::Error> {
    let href = movie
        .video
        .clone()
        .or_else(|| movie.url.clone())
        .unwrap_or_else(|| Link::Movie.to(&movie.id));

    let mut output = String::new();
    writeln!(
        output,
        r#"<h2 class="kicker"><a href="{}" target="_blank" rel="noopener">{}</a></h2>"#,
        escape_html(&href),
        escape_html(&movie.title)
    )?;
    writeln!(output, r#"<div class="meta-small">公開: {}</div>"#, escape_html(&movie.date))?;
    match movie.video.as_deref() {
        Some(video) => writeln!(output, "{}", embed_video_html(video))?,
        None => writeln!(
            output,
            r#"<p class="preview">{}</p>"#,
            escape_html(&truncate(&movie.description, 120))
        )?,
    }
    writeln!(
        output,
        r#"<p><a class="more" href="{}">動画一覧へ</a></p>"#,
        list_page(ContentKind::Movies)
    )?;
    Ok(output)
}

fn latest_live(live: &LiveEvent) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    writeln!(
        output,
        r#"<h2 class="kicker"><a href="{}">{}</a></h2>"#,
        Link::Live.to(&live.id),
        escape_html(&live.title)
    )?;
    writeln!(
        output,
        r#"<div class="meta-small">{} ・ {}</div>"#,
        escape_html(&live.date),
        escape_html(&live.venue)
    )?;
    writeln!(
        output,
        r#"<p class="preview">{}</p>"#,
        escape_html(&truncate(&live.note, 140))
    )?;
    writeln!(
        output,
        r#"<p><a class="more" href="{}">Live一覧へ</a></p>"#,
        list_page(ContentKind::Live)
    )?;
    Ok(output)
}
