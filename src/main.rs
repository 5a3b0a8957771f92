//! Binary entry point: argument parsing, configuration, terminal session.

use clap::Parser;

use skywx::app;
use skywx::config::Config;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = Config::from_env()?;
    let location = args
        .location
        .unwrap_or_else(|| app::DEFAULT_LOCATION.to_string());

    app::run(config, location)
}
