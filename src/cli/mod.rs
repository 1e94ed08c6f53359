//! CLI module for Reelsmith.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Reelsmith - topics in, narrated slideshow videos out
///
/// Reads one topic per line, writes a narration script with an LLM, voices it,
/// pulls stock photos and encodes everything into a short video per topic.
#[derive(Parser, Debug)]
#[command(name = "reelsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Runs the pipeline with default options when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a video for every topic in the topics file
    Run {
        /// Topics file (one topic per line)
        #[arg(short, long)]
        topics: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<String>,

        /// Keep going after a topic fails and report failures at the end
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Print the slug a topic maps to
    Slug {
        /// Topic text
        topic: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Cli {
    /// Level for the `reelsmith` log target. `-v` flags take precedence over
    /// the configured level.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
