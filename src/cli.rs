//! Command-line interface for quarto.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quarto - rules engine for the two-player placement game
#[derive(Parser, Debug)]
#[command(name = "quarto")]
#[command(about = "Replay and inspect Quarto games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the sixteen pieces with their codes and attributes
    Pieces,

    /// Replay a TOML game record and print the final position
    Replay {
        /// Path to the game record
        record: PathBuf,

        /// Count 2x2 squares as winning lines (overrides record and config)
        #[arg(long)]
        extended: bool,

        /// Write a JSON snapshot of the final state to this path
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },

    /// Validate a JSON snapshot and print its position
    Show {
        /// Path to the snapshot
        snapshot: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from([
            "quarto",
            "replay",
            "game.toml",
            "--extended",
            "--snapshot-out",
            "out.json",
        ])
        .unwrap();
        match cli.command {
            Command::Replay {
                record,
                extended,
                snapshot_out,
            } => {
                assert_eq!(record, PathBuf::from("game.toml"));
                assert!(extended);
                assert_eq!(snapshot_out, Some(PathBuf::from("out.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["quarto", "pieces", "--config", "quarto.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("quarto.toml")));
        assert!(matches!(cli.command, Command::Pieces));
    }
}
