//! CLI module - Command-line interface for Anime Shelf
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Anime Shelf - personal anime tracking API
#[derive(Parser, Debug)]
#[command(name = "anime-shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (skips the default search path)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "s")]
    Serve,

    /// Write a default config file
    Init,

    /// Connect to the database, apply migrations and print shelf stats
    #[command(alias = "c")]
    Check,
}

impl Cli {
    #[must_use]
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
