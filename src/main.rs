use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    bookinfo::logging::init().context("init logging")?;

    let cli = bookinfo::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bookinfo::cli::Command::Find(args) => {
            bookinfo::find::run(args).await.context("find")?;
        }
    }

    Ok(())
}
