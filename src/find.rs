use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::FindArgs;
use crate::config::SiteConfig;
use crate::note_store::write_note;
use crate::pipeline::Pipeline;

pub async fn run(args: FindArgs) -> anyhow::Result<()> {
    let site = match args.base_url.as_deref() {
        Some(base_url) => SiteConfig::new(base_url).context("--base-url")?,
        None => SiteConfig::retailer()?,
    }
    .with_timeout(Duration::from_secs(args.timeout_secs));

    let pipeline = Pipeline::http(site).context("build pipeline")?;
    tracing::debug!(base_url = %pipeline.site().base_url, title = %args.title, "looking up book");
    let record = pipeline.run(&args.title).await?;

    let mut stdout = std::io::stdout().lock();
    if args.stdout {
        if args.json {
            serde_json::to_writer(&mut stdout, &record).context("serialize book record")?;
            stdout.write_all(b"\n").context("write newline")?;
        } else {
            stdout
                .write_all(record.document.as_bytes())
                .context("write document")?;
        }
        return Ok(());
    }

    let path = write_note(&PathBuf::from(&args.out), &record).context("write note")?;
    tracing::info!(path = %path.display(), "saved book info");
    writeln!(stdout, "{}", path.display()).context("write note path")?;
    Ok(())
}
