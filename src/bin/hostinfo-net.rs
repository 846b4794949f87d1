use std::{io::Write, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;

use hostinfo::{
    host::{Config, Host},
    net::ifconfig::{InterfaceRecord, InterfaceRecordSet},
    process::{CommandLine, Exec},
};

#[derive(Debug, clap::Subcommand)]
enum Cmd {
    /// Interface names, in the order ifconfig reports them.
    Names,

    /// Interfaces with their fields.
    List {
        /// Only interfaces with this exact encapsulation label, e.g.
        /// "Ethernet" or "Local Loopback".
        #[clap(long = "type", short = 't')]
        encapsulation: Option<String>,
    },

    /// A single interface.
    Show { name: String },
}

#[derive(Debug, Parser)]
struct Cli {
    /// Log level.
    #[clap(short, long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,

    #[clap(long, default_value_t = Config::default().ifconfig)]
    ifconfig: CommandLine,

    /// Parse a saved dump instead of running ifconfig.
    #[clap(long, short = 'f')]
    input: Option<PathBuf>,

    #[clap(long, default_value = "C")]
    locale: String,

    /// Command timeout, in seconds.
    #[clap(long, default_value = "5")]
    timeout: u64,

    #[clap(long)]
    json: bool,

    #[clap(subcommand)]
    cmd: Cmd,
}

fn write_record<W: Write>(mut buf: W, record: &InterfaceRecord) -> Result<()> {
    writeln!(buf, "{} ({})", record.name(), record.encapsulation())?;
    for (field, value) in record.fields() {
        writeln!(buf, "    {field}: {value}")?;
    }
    Ok(())
}

fn write_records<W: Write>(
    mut buf: W,
    records: &[&InterfaceRecord],
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut buf, records)?;
        writeln!(buf)?;
    } else {
        for record in records {
            write_record(&mut buf, record)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    hostinfo::logger::init(cli.log_level)?;
    tracing::info!("cli: {:#?}", &cli);
    let interfaces = match &cli.input {
        Some(path) => InterfaceRecordSet::parse(&std::fs::read_to_string(path)?)?,
        None => {
            let config = Config {
                ifconfig: cli.ifconfig.clone(),
                ..Config::default()
            };
            let exec = Exec {
                locale: cli.locale.clone(),
                timeout: Some(Duration::from_secs(cli.timeout)),
            };
            Host::new(config, exec).interfaces()?
        }
    };
    let mut stdout = std::io::stdout().lock();
    match &cli.cmd {
        Cmd::Names => {
            if cli.json {
                serde_json::to_writer(&mut stdout, &interfaces.names())?;
                writeln!(stdout)?;
            } else {
                for name in interfaces.names() {
                    writeln!(stdout, "{name}")?;
                }
            }
        }
        Cmd::List { encapsulation } => {
            let records = interfaces.by_type(encapsulation.as_deref());
            write_records(&mut stdout, &records, cli.json)?;
        }
        Cmd::Show { name } => {
            let record = interfaces.get(name)?;
            write_records(&mut stdout, &[record], cli.json)?;
        }
    }
    Ok(())
}
