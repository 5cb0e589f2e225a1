//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pmixer_core::Command;

/// pmixer -- PulseAudio volume control from the shell.
#[derive(Debug, Parser)]
#[command(name = "pmixer", version, about)]
pub struct Cli {
    /// Enable detailed output
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file to use instead of the default location
    #[arg(short, long, env = "PMIXER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Adjustment to apply to the default sink
    #[arg(value_enum)]
    pub command: CommandArg,
}

/// Command words accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CommandArg {
    /// Increase volume one step
    Inc,
    /// Decrease volume one step
    Dec,
    /// Toggle mute
    Mute,
}

impl From<CommandArg> for Command {
    fn from(arg: CommandArg) -> Self {
        match arg {
            CommandArg::Inc => Self::Inc,
            CommandArg::Dec => Self::Dec,
            CommandArg::Mute => Self::Mute,
        }
    }
}
