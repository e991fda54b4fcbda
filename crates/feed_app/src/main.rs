mod cli;
mod config;
mod effects;
mod render;
mod runner;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    feed_logging::initialize(cli.log.into(), cli.log_level());
    let config = config::resolve(&cli)?;
    runner::run(config)
}
