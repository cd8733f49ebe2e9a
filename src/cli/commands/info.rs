//! Info command implementation.
//!
//! `netlify-lm info` shows read-only diagnostics: versions of git, git-lfs
//! and the credential helper. Checks run concurrently; failures are reported
//! next to successes and never produce a non-zero exit.

use crate::cli::args::InfoArgs;
use crate::error::{LmError, Result};
use crate::requirements;
use crate::runner::{run_concurrent, TaskStatus};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The info command implementation.
pub struct InfoCommand {
    #[allow(dead_code)]
    args: InfoArgs,
}

impl InfoCommand {
    /// Create a new info command.
    pub fn new(args: InfoArgs) -> Self {
        Self { args }
    }
}

impl Command for InfoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Netlify Large Media");

        let outcomes = run_concurrent(requirements::diagnostic_tasks(), ui);

        let helper_missing = outcomes.iter().any(|o| {
            matches!(
                &o.status,
                TaskStatus::Failed(LmError::NotInstalled { tool })
                    if tool == requirements::HELPER_BINARY
            )
        });
        if helper_missing {
            ui.message("");
            ui.message("Run `netlify-lm install` to install the credential helper");
        }

        Ok(CommandResult::success())
    }
}
