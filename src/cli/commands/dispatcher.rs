//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, `info` runs: diagnostics are the safe default.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                let cmd = super::install::InstallCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Setup(args)) => {
                let cmd = super::setup::SetupCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Info(args)) => {
                let cmd = super::info::InfoCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd =
                    super::info::InfoCommand::new(crate::cli::args::InfoArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
