//! Command definitions and structures for the CLI
//!
//! Clap-based argument definitions for the fcm-composer binary, a thin
//! diagnostic shell over the library core.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "fcm-composer")]
#[command(about = "Push-notification request validation and FCM message assembly")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project path for project-level configuration
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a provider message from a request (default mode when no subcommand)
    Compose {
        /// Read the request JSON from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Fallback device token, overriding the configured one
        #[arg(long, env = "FCM_FALLBACK_TOKEN")]
        fallback_token: Option<String>,

        /// Pretty-print the resulting message JSON
        #[arg(long)]
        pretty: bool,

        /// Hand the message to the dry-run sender after building it
        #[arg(long)]
        dry_run: bool,
    },

    /// Check a request's structure without building a message
    Validate {
        /// Read the request JSON from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Initialize configuration
    Init {
        /// Initialize global configuration (default is project-level)
        #[arg(short, long)]
        global: bool,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the full configuration
    Show,

    /// Get a single configuration value
    Get {
        /// Configuration key, e.g. fallback.token
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key, e.g. fallback.token
        key: String,
        /// New value; an empty string clears optional keys
        value: String,
    },
}
