//! CLI module for Svar.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Svar - Customer Service Lookups with LLM Tool Calling
///
/// A local-first CLI tool that packages customer service lookup functions
/// as catalog functions callable by an LLM agent.
/// The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
#[derive(Parser, Debug)]
#[command(name = "svar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Svar: create config, database, and demo data
    Init,

    /// Check configuration and data store health
    Doctor,

    /// Load the demo dataset into the service tables
    Seed {
        /// Wipe existing rows before seeding
        #[arg(short, long)]
        force: bool,
    },

    /// Look up the most recent service interaction for a customer
    Latest {
        /// Full or partial customer name (case-insensitive)
        name: String,

        /// Emit the row as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show all company policies
    Policy {
        /// Emit the rows as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show issue counts per category for a customer
    History {
        /// Full or partial customer name (case-insensitive)
        name: String,

        /// Emit the rows as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Run the agent on a one-shot customer service task
    Agent {
        /// The task for the agent (e.g. "Process the latest return for Nicolas Pelaez")
        task: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start an interactive playground session with tool calling
    Playground {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
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
