//! CLI module providing command-line interface functionality
//!
//! Handles argument parsing, context setup, and routing to handlers while
//! keeping the compose pipeline itself inside the library modules.

pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

pub use commands::{Cli, Commands, ConfigAction};
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and execute the requested command
    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let context = CliContext::new(cli.project.clone(), cli.verbose)?;
        context.init_logging()?;

        let handler = CommandHandler::new(context);

        // Compose from stdin is the default mode when called without subcommand.
        // Clap only applies the env attribute when it parses the subcommand, so
        // the hand-built default reads the fallback override itself.
        let command = cli.command.unwrap_or_else(|| Commands::Compose {
            input: None,
            fallback_token: std::env::var("FCM_FALLBACK_TOKEN").ok(),
            pretty: false,
            dry_run: false,
        });

        handler.handle_command(command)
    }
}
