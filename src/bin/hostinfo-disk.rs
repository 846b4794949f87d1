use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use hostinfo::{
    host::{Config, Host},
    process::{CommandLine, Exec},
};

#[derive(Parser, Debug)]
struct Cli {
    /// Log level.
    #[clap(short, long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,

    #[clap(long, default_value_t = Config::default().df)]
    df: CommandLine,

    #[clap(long, default_value = "C")]
    locale: String,

    /// Command timeout, in seconds.
    #[clap(long, default_value = "5")]
    timeout: u64,

    /// Prints the size (in KB) of the partition holding this path.
    #[clap(default_value = "/")]
    path: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    hostinfo::logger::init(cli.log_level)?;
    tracing::info!("cli: {:#?}", &cli);
    let config = Config {
        df: cli.df.clone(),
        ..Config::default()
    };
    let exec = Exec {
        locale: cli.locale.clone(),
        timeout: Some(Duration::from_secs(cli.timeout)),
    };
    let size = Host::new(config, exec).partition_size_kb(&cli.path)?;
    println!("{size}");
    Ok(())
}
