use anyhow::Result;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Logs go to stderr, so stdout stays clean for the scraped data. `RUST_LOG`
/// overrides `level`.
pub fn init(level: tracing::Level) -> Result<()> {
    let debug = level >= tracing::Level::DEBUG;
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .from_env()?,
        )
        .with_writer(std::io::stderr)
        .with_ansi(debug)
        .with_file(debug)
        .with_line_number(debug)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
