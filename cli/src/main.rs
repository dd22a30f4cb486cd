use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use ruichiji_core::{config::Settings, logger::init_logger, render::Renderer, source::DirSource};

mod handlers;

use handlers::{CommandHandler, utils::WriteAdapter};

/// Options configurable via the CLI.
#[derive(Debug, Parser)]
#[command(name = "ruichiji", version = env!("CARGO_PKG_VERSION"), about)]
struct Flags {
    /// config file path
    #[clap(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// The directory holding the collection documents (e.g. `assets/data`)
    #[clap(long, value_hint = clap::ValueHint::DirPath)]
    data_dir: Option<PathBuf>,
    /// log level
    #[clap(long)]
    log_level: Option<log::LevelFilter>,
    /// subcommand to run
    #[clap(subcommand)]
    subcommand: Option<handlers::Command>,
}

#[test]
fn verify_cli() {
    Flags::command().debug_assert();
}

#[cfg(not(tarpaulin_include))]
fn main() -> anyhow::Result<()> {
    clap_complete::CompleteEnv::with_factory(Flags::command).complete();

    let flags = Flags::parse();

    let config_file = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };
    let settings = Settings::init(config_file, flags.data_dir, flags.log_level)?;
    init_logger(settings.site.log_level);

    let data_dir = settings.site.resolve_data_dir(&std::env::current_dir()?);
    log::debug!("reading content from {}", data_dir.display());
    let renderer = Renderer::new(DirSource::new(data_dir), settings.site.site_config());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut stdout_adapter = WriteAdapter(std::io::stdout());
        let mut stderr_adapter = WriteAdapter(std::io::stderr());

        if let Some(command) = flags.subcommand {
            command
                .handle(&renderer, &mut stdout_adapter, &mut stderr_adapter)
                .await?;
        } else {
            eprintln!("No subcommand provided");
        }

        Ok(())
    })
}
