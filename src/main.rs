use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wavemeter::{Mode, manager::Manager};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Info,

    Statistics {
        #[arg(long, default_value = "frequency")]
        mode: String,
    },

    Stability {
        #[arg(long, allow_hyphen_values = true)]
        time_delta: f64,

        #[arg(long, default_value = "frequency")]
        mode: String,
    },

    Analyze,

    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.data_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Info => mgr.show_info()?,
        Command::Statistics { mode } => {
            let mode: Mode = mode.parse().context("failed to parse mode")?;
            mgr.show_statistics(mode)?
        }
        Command::Stability { time_delta, mode } => {
            let mode: Mode = mode.parse().context("failed to parse mode")?;
            mgr.show_stability(time_delta, mode)?
        }
        Command::Analyze => mgr.analyze()?,
        Command::Clean => mgr.clean()?,
    }

    Ok(())
}
