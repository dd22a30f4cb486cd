pub mod implementations;
pub mod utils;

#[cfg(test)]
mod smoke_tests;

use clap::{Subcommand, ValueEnum};
use ruichiji_core::{render::Renderer, source::DataSource};

pub trait CommandHandler {
    type Output;

    async fn handle<S: DataSource, W1: std::fmt::Write + Send, W2: std::fmt::Write + Send>(
        &self,
        renderer: &Renderer<S>,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output;
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the newest record of a collection as a summary card
    Latest { kind: Kind },
    /// Render the list page of a collection
    List { kind: Kind },
    /// Render the detail page of a single record
    Show {
        kind: Kind,
        /// The id of the record, as given in the page's `id` query parameter
        #[clap(long)]
        id: Option<String>,
    },
    /// Resolve a URL fragment to the element id it points at
    Fragment {
        /// The fragment, with or without the leading `#`
        hash: String,
        /// Resolve against the cards of the movie list (`movie-<id>`)
        #[clap(long)]
        movie: bool,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
pub enum Kind {
    Topics,
    Music,
    Movies,
    Discography,
    Live,
}
