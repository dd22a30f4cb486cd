use anyhow::bail;
use log::debug;
use ruichiji_core::{
    fragment,
    render::{Page, Renderer},
    source::DataSource,
};

use super::{Command, CommandHandler};

impl CommandHandler for Command {
    type Output = anyhow::Result<()>;

    async fn handle<S: DataSource, W1: std::fmt::Write + Send, W2: std::fmt::Write + Send>(
        &self,
        renderer: &Renderer<S>,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output {
        let page = match self {
            Self::Latest { kind } => Page::Latest((*kind).into()),
            Self::List { kind } => Page::List((*kind).into()),
            Self::Show { kind, id } => Page::Detail {
                kind: (*kind).into(),
                id: id.clone(),
            },
            Self::Fragment { hash, movie } => {
                let id = if *movie {
                    fragment::movie_element_id(hash)
                } else {
                    fragment::element_id_for_fragment(hash)
                };
                return match id {
                    Some(id) => Ok(writeln!(stdout, "{id}")?),
                    None => {
                        writeln!(stderr, "The fragment is empty")?;
                        bail!("Nothing to resolve")
                    }
                };
            }
        };

        debug!("rendering {page:?}");
        match renderer.render(&page).await {
            Some(html) => Ok(write!(stdout, "{html}")?),
            None => {
                writeln!(
                    stderr,
                    "Nothing was rendered, the container would be left as it is. Check the log for details"
                )?;
                bail!("Failed to render {page:?}")
            }
        }
    }
}
