// src/bin/cli.rs
use chd_activities::cli::{self, Cli};
use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    chd_activities::log::init();
    cli::run(Cli::parse())
}
