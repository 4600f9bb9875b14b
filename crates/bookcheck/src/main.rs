use anyhow::Result;
use clap::Parser;

use bookcheck::cli::{self, Cli, Commands};
use bookcheck_core::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    dispatch(cli.command, cli.json).await
}

async fn dispatch(command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Identify { image } => cli::identify::run(&settings()?, &image, json).await,
        Commands::Search(args) => cli::search::run(&settings()?, args, json).await,
        Commands::Enrich {
            title,
            author,
            isbn,
        } => {
            cli::enrich::run(
                &settings()?,
                &title,
                author.as_deref(),
                isbn.as_deref(),
                json,
            )
            .await
        }
        Commands::Check { image } => cli::check::run(&settings()?, &image, json).await,
        Commands::Parse { file } => cli::parse::run(&file, json),
    }
}

fn settings() -> Result<Settings> {
    Ok(Settings::from_env()?)
}
