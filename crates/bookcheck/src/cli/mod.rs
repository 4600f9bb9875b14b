pub mod check;
pub mod enrich;
pub mod identify;
pub mod output;
pub mod parse;
pub mod search;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bookcheck",
    about = "Identify books in a photo and check them against the library catalogue",
    version
)]
pub struct Cli {
    /// Print JSON instead of the human-readable layout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the books in an image with the vision model
    Identify {
        /// Image file (jpeg, png, gif or webp)
        image: PathBuf,
    },
    /// Search the library catalogue
    Search(SearchArgs),
    /// Look up an ISBN on Open Library
    Enrich {
        /// Book title
        title: String,
        /// Author, if known
        #[arg(long)]
        author: Option<String>,
        /// ISBN already known; returned unchanged
        #[arg(long)]
        isbn: Option<String>,
    },
    /// Identify, enrich and search every book in an image
    Check {
        /// Image file (jpeg, png, gif or webp)
        image: PathBuf,
    },
    /// Parse saved vision model output without any network access
    Parse {
        /// File holding the model reply, or `-` for stdin
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    /// Results per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: u32,
}

/// Exactly one of these selects the kind of search
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct QueryArgs {
    /// Search by title
    #[arg(long)]
    pub title: Option<String>,
    /// Search by author
    #[arg(long)]
    pub author: Option<String>,
    /// Search by ISBN
    #[arg(long)]
    pub isbn: Option<String>,
    /// Free-text keyword search
    #[arg(long)]
    pub keyword: Option<String>,
}
