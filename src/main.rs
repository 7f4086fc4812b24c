//! Bunch - concatenate, preprocess and minify script and stylesheet bundles.

#![allow(dead_code)]

mod bundle;
mod cli;
mod config;
mod context;
mod core;
mod embed;
mod error;
mod freshness;
mod logger;
mod monitor;
mod packager;
mod render;
mod report;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { dry } => cli::init::new_manifest(&cli.config, *dry),
        Commands::Pack { compress, bundles } => {
            cli::pack::pack(&cli.config, bundles, *compress).await
        }
        Commands::Monitor { compress, interval } => {
            cli::monitor::monitor(&cli.config, *compress, *interval).await
        }
    }
}
