use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};
use crate::util;

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write logs to this file (the terminal is used by the game)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Maximum log level
    #[clap(long, global = true, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Watch the AI play, or play yourself (default)
    Play(#[clap(flatten)] PlayArg),
    /// Play games with the AI without a terminal UI and report the results
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_logging(args.log_file.as_deref(), args.log_level)?;

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
