use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_TIMEOUT_SECS;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up a book by title and save its info as a Markdown note.
    Find(FindArgs),
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Book title to search for.
    #[arg(long)]
    pub title: String,

    /// Folder the note is written to.
    #[arg(long, default_value = ".")]
    pub out: String,

    /// Print the note to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,

    /// With --stdout, print `{title, document}` as JSON.
    #[arg(long, requires = "stdout")]
    pub json: bool,

    /// Retailer base URL (must be http/https).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request HTTP timeout.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}
