//! CLI module for Favorite Chicken
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `usage`: offline usage report over a JSON export

pub mod serve;
pub mod usage;

use clap::{Parser, Subcommand};

/// Favorite Chicken - inventory, sales and item usage tracking
#[derive(Parser)]
#[command(name = "favorite-chicken")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Aggregate a JSON array of usage records and print the report
    Usage(usage::UsageArgs),
}
