//! CLI module for claimcheck
//!
//! Provides subcommands for the two input kinds and the HTTP server:
//! - `text`: fact-check a block of text
//! - `url`: fact-check the contents of a web page
//! - `serve`: run the HTTP API

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

/// Claimcheck - extract factual claims, gather web evidence, judge each claim
#[derive(Parser)]
#[command(name = "claimcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fact-check a block of text
    Text(check::TextArgs),

    /// Fact-check the contents of a web page
    Url(check::UrlArgs),

    /// Run the HTTP API server
    Serve,
}
