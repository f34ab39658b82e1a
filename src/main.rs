//! Quarto - command-line front end for the rules engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use quarto::{GameConfig, GameRecord, GameState, Piece};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref())?;
    init_tracing(config.log_filter());

    match cli.command {
        Command::Pieces => list_pieces(),
        Command::Replay {
            record,
            extended,
            snapshot_out,
        } => replay(&config, &record, extended, snapshot_out),
        Command::Show { snapshot } => show(&snapshot),
    }
}

/// Logs go to stderr so stdout carries only game output.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();
}

fn list_pieces() -> Result<()> {
    for piece in Piece::all() {
        println!(
            "{:>2}  {}  {} {} {} {}",
            piece.index(),
            piece,
            piece.color(),
            piece.size(),
            piece.shape(),
            piece.top()
        );
    }
    Ok(())
}

#[instrument(skip(config))]
fn replay(config: &GameConfig, path: &Path, extended: bool, snapshot_out: Option<PathBuf>) -> Result<()> {
    let record = GameRecord::from_file(path)?;
    let extended = extended || *record.extended_rules() || *config.extended_rules();
    let game = record.with_extended_rules(extended).play()?;

    print_game(&game);

    if let Some(out) = snapshot_out {
        std::fs::write(&out, game.to_json()?)
            .with_context(|| format!("Failed to write snapshot to {}", out.display()))?;
        info!(path = %out.display(), "Snapshot written");
    }
    Ok(())
}

#[instrument]
fn show(path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let game = GameState::from_json(&json)?;
    print_game(&game);
    Ok(())
}

fn print_game(game: &GameState) {
    println!("{}", game.board());
    println!();
    println!("rules:  {}", if game.extended_rules() { "extended" } else { "standard" });
    println!("phase:  {}", game.current_phase());
    match game.outcome() {
        Some(outcome) => println!("result: {}", outcome),
        None => {
            println!("to act: {}", game.active_player());
            if let Some(piece) = game.selected_piece() {
                println!("piece:  {}", piece);
            }
            println!("pool:   {} pieces", game.pool().len());
        }
    }
}
