//! pmixer - PulseAudio volume control from the shell.
//!
//! Connects to the sound server, looks up the default sink and applies one
//! adjustment: `inc`, `dec` or `mute`.

use anyhow::{Context, Result};
use clap::Parser;
use pmixer_core::Command;
use pmixer_pulse::PulseServer;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;

    // Initialize logging
    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("pmixer={level}").parse()?)
                .add_directive(format!("pmixer_core={level}").parse()?)
                .add_directive(format!("pmixer_pulse={level}").parse()?),
        )
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), ?config, "Starting pmixer");

    let step = config.volume.step(PulseServer::ui_max_volume())?;
    let command = Command::from(cli.command);

    let server = PulseServer::new(&config.client.name, config.client.server.clone())
        .context("Failed to set up PulseAudio client")?;

    let outcome = pmixer_pulse::execute(server, command, &step)
        .with_context(|| format!("Failed to apply `{command}` to the default sink"))?;

    debug!(index = outcome.sink.index, mutation = ?outcome.mutation, "Applied {command}");
    Ok(())
}
