use anyhow::Context as _;

// The HTML parser and HTTP stack are chatty at debug level; keep them at warn
// unless RUST_LOG asks otherwise.
const DEFAULT_DIRECTIVES: &str = "info,html5ever=warn,selectors=warn,hyper_util=warn,reqwest=warn";

pub fn init() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_DIRECTIVES))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    tracing::debug!("logging initialized");
    Ok(())
}
