use std::fmt::Write;

use ruichiji_types::Topic;

use super::{
    Link, NO_ID, Renderer, finish, found_or_missing,
    html::{escape_html, nl2br, truncate},
    requested,
};
use crate::{
    errors::RenderError,
    source::{ContentKind, DataSource},
};

impl<S: DataSource> Renderer<S> {
    /// Every topic, newest first, with a short preview.
    pub async fn topics_list(&self) -> Option<String> {
        finish("topics_list", self.try_topics_list().await)
    }

    pub async fn topic_page(&self, id: Option<&str>) -> Option<String> {
        let Some(id) = requested(id) else {
            return Some(NO_ID.to_string());
        };
        finish(
            "topic_page",
            found_or_missing(ContentKind::Topics, self.try_topic_page(id).await),
        )
    }

    async fn try_topics_list(&self) -> Result<String, RenderError> {
        let topics: Vec<Topic> = self.sorted(ContentKind::Topics).await?;

        let mut output = String::new();
        for topic in &topics {
            writeln!(output, r#"<div class="item">"#)?;
            writeln!(output, r#"<div class="meta">{}</div>"#, escape_html(&topic.date))?;
            writeln!(output, "<div>")?;
            writeln!(
                output,
                r#"<div class="kicker"><a href="{}">{}</a></div>"#,
                Link::Topic.to(&topic.id),
                escape_html(&topic.title)
            )?;
            writeln!(
                output,
                r#"<div class="preview">{}</div>"#,
                escape_html(&truncate(&topic.content, 20))
            )?;
            writeln!(output, "</div>\n</div>")?;
        }
        Ok(output)
    }

    async fn try_topic_page(&self, id: &str) -> Result<Option<String>, RenderError> {
        let Some(topic) = self.find::<Topic>(ContentKind::Topics, id).await? else {
            return Ok(None);
        };

        let mut output = String::new();
        writeln!(output, r#"<article class="card">"#)?;
        writeln!(
            output,
            r#"<h2 id="topic-{}">{}</h2>"#,
            escape_html(&topic.id),
            escape_html(&topic.title)
        )?;
        writeln!(output, r#"<div class="meta-small">{}</div>"#, escape_html(&topic.date))?;
        writeln!(
            output,
            r#"<div class="content">{}</div>"#,
            nl2br(&escape_html(&topic.content))
        )?;
        writeln!(output, "</article>")?;
        Ok(Some(output))
    }
}
