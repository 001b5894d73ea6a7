use std::path::PathBuf;

use anyhow::{Context, Result};
use async_std::task;
use clap::Parser;
use rp_conf::{default_conf_path, load_conf};
use rp_log::log_full_error;
use rp_replay_lib::replay;
use tracing::info;

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SHA: &str = env!("GIT_SHA");

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(
        short,
        long,
        value_parser,
        help = "Path of a scenario YAML file. Defaults to rp/conf.yaml in the user's \
                configuration directory."
    )]
    conf: Option<PathBuf>,
    #[clap(
        short,
        long,
        value_parser,
        help = "Number of replayed control ticks. Overrides the scenario."
    )]
    ticks: Option<u32>,
    #[clap(
        long,
        value_parser,
        default_value = "logs",
        help = "Directory of log files."
    )]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let guard = rp_log::init(args.log_dir.as_path()).context("Failed to initialize logging")?;

    info!(
        "Starting RP {{ \"Version\": \"{}\", \"GitSha\": \"{}\" }}",
        CARGO_PKG_VERSION,
        GIT_SHA.trim()
    );

    if let Err(error) = run(&args) {
        let error: &(dyn std::error::Error + 'static) = error.as_ref();
        log_full_error!(error);
        drop(guard);
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let path = match args.conf {
        Some(ref path) => path.clone().into(),
        None => default_conf_path()?,
    };
    let conf = task::block_on(load_conf(path.as_path()))?;
    let ticks = args.ticks.unwrap_or(conf.scenario().ticks());

    let summary = replay(&conf, ticks);
    info!(
        "Replayed {} ticks: {} plans, {} blocked, {} failed, {} random free points",
        summary.ticks, summary.plans, summary.blocked, summary.failed, summary.free_points
    );
    Ok(())
}
