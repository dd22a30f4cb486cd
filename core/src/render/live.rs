use std::fmt::Write;

use ruichiji_types::{LiveEvent, MusicItem};

use super::{
    Link, NO_ID, Renderer, finish, found_or_missing,
    html::{escape_html, nl2br, thumb_or_placeholder, truncate},
    requested,
};
use crate::{
    errors::RenderError,
    resolve::{SetlistSlot, resolve_setlist},
    source::{ContentKind, DataSource, load_or_empty},
};

impl<S: DataSource> Renderer<S> {
    pub async fn live_list(&self) -> Option<String> {
        finish("live_list", self.try_live_list().await)
    }

    /// A live event with its setlist resolved against the music collection.
    pub async fn live_page(&self, id: Option<&str>) -> Option<String> {
        let Some(id) = requested(id) else {
            return Some(NO_ID.to_string());
        };
        finish(
            "live_page",
            found_or_missing(ContentKind::Live, self.try_live_page(id).await),
        )
    }

    async fn try_live_list(&self) -> Result<String, RenderError> {
        let events: Vec<LiveEvent> = self.sorted(ContentKind::Live).await?;

        let mut output = String::new();
        for event in &events {
            writeln!(output, r#"<div class="item">"#)?;
            writeln!(
                output,
                r#"<img src="{}" alt="" class="thumb">"#,
                escape_html(&thumb_or_placeholder(event.image.as_deref(), self.config()))
            )?;
            writeln!(output, "<div>")?;
            writeln!(
                output,
                r#"<div class="kicker"><a href="{}">{}</a></div>"#,
                Link::Live.to(&event.id),
                escape_html(&event.title)
            )?;
            writeln!(
                output,
                r#"<div class="meta-small">{} ・ {}</div>"#,
                escape_html(&event.date),
                escape_html(&event.venue)
            )?;
            writeln!(
                output,
                r#"<div class="preview">{}</div>"#,
                escape_html(&truncate(&event.note, 20))
            )?;
            writeln!(output, "</div>\n</div>")?;
        }
        Ok(output)
    }

    async fn try_live_page(&self, id: &str) -> Result<Option<String>, RenderError> {
        let Some(event) = self.find::<LiveEvent>(ContentKind::Live, id).await? else {
            return Ok(None);
        };
        let music: Vec<MusicItem> = load_or_empty(&self.source, ContentKind::Music).await;
        let setlist = resolve_setlist(&event, &music);

        let mut output = String::new();
        writeln!(output, r#"<article class="card">"#)?;
        writeln!(
            output,
            r#"<h2 id="live-{}">{}</h2>"#,
            escape_html(&event.id),
            escape_html(&event.title)
        )?;
        writeln!(
            output,
            r#"<div class="meta-small">{} ・ {}</div>"#,
            escape_html(&event.date),
            escape_html(&event.venue)
        )?;
        writeln!(
            output,
            r#"<div style="margin-top:.8rem"><img src="{}" alt="" style="width:100%;max-height:300px;object-fit:cover;border-radius:8px"></div>"#,
            escape_html(&thumb_or_placeholder(event.image.as_deref(), self.config()))
        )?;
        writeln!(output, r#"<section style="margin-top:1rem">"#)?;
        writeln!(output, "<h3>説明</h3>")?;
        writeln!(
            output,
            r#"<div class="content">{}</div>"#,
            nl2br(&escape_html(&event.note))
        )?;
        writeln!(output, "</section>")?;
        writeln!(output, r#"<section style="margin-top:1rem">"#)?;
        writeln!(output, "<h3>セットリスト</h3>")?;
        write!(output, r#"<ol class="manual-number">"#)?;
        if setlist.is_empty() {
            write!(output, "<li>セットリスト情報がありません</li>")?;
        }
        for (idx, slot) in setlist.iter().enumerate() {
            match slot {
                SetlistSlot::Linked(song) => write!(
                    output,
                    r#"<li>{}. <a href="{}">{}</a></li>"#,
                    idx + 1,
                    Link::Track.to(&song.id),
                    escape_html(&song.title)
                )?,
                SetlistSlot::Unlinked(title) => {
                    write!(output, "<li>{}. {}</li>", idx + 1, escape_html(title))?;
                }
            }
        }
        writeln!(output, "</ol>")?;
        writeln!(output, "</section>")?;
        writeln!(output, "</article>")?;
        Ok(Some(output))
    }
}
