//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Bunch asset bundler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Manifest path; bundle paths are relative to its directory
    #[arg(short = 'C', long, global = true, default_value = "Bunchfile", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a starter Bunchfile into the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the template instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Build bundles once
    #[command(visible_alias = "p")]
    Pack {
        /// Minify the artifacts
        #[arg(short = 'x', long)]
        compress: bool,

        /// Bundles to build (default: all)
        #[arg(value_name = "BUNDLE")]
        bundles: Vec<String>,
    },

    /// Build everything, then rebuild whatever changes
    #[command(visible_alias = "m")]
    Monitor {
        /// Minify the artifacts
        #[arg(short = 'x', long)]
        compress: bool,

        /// Poll interval in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        interval: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_args() {
        let cli = Cli::try_parse_from(["bunch", "pack", "-x", "app.js", "site.css"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("Bunchfile"));
        match cli.command {
            Commands::Pack { compress, bundles } => {
                assert!(compress);
                assert_eq!(bundles, ["app.js", "site.css"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_monitor_defaults_and_global_flags() {
        let cli =
            Cli::try_parse_from(["bunch", "monitor", "--config", "web/Bunchfile", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("web/Bunchfile"));
        match cli.command {
            Commands::Monitor { compress, interval } => {
                assert!(!compress);
                assert_eq!(interval, 1000);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_init_dry() {
        let cli = Cli::try_parse_from(["bunch", "init", "--dry"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { dry: true }));
    }
}
