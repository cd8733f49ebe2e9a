//! Install command implementation.
//!
//! `netlify-lm install` verifies git/git-lfs, installs the credential helper
//! for the current platform, and wires it into the shell PATH and global Git
//! configuration. The same flow backs the `setup` command.

use std::path::PathBuf;

use crate::cli::args::InstallArgs;
use crate::error::{LmError, Result};
use crate::gitconfig;
use crate::install::{self, Platform};
use crate::requirements;
use crate::runner::{run_concurrent, run_sequential, Task, TaskStatus};
use crate::shellenv::{self, Shell};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// How the install flow ended.
#[derive(Debug)]
pub enum InstallOutcome {
    /// The chain ran to completion (install possibly skipped as already
    /// present; the config merge always runs).
    Completed { helper_path: PathBuf },
    /// Nothing to do on this platform; manual instructions were printed.
    Unsupported,
}

/// The install command implementation.
pub struct InstallCommand {
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(args: InstallArgs) -> Self {
        Self { args }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match install_platform(ui, self.args.force)? {
            InstallOutcome::Completed { .. } => {
                print_source_banner(ui, self.args.force);
                Ok(CommandResult::success())
            }
            InstallOutcome::Unsupported => Ok(CommandResult::success()),
        }
    }
}

/// Run the full install flow for the current platform.
///
/// Version checks run concurrently and are all reported before the first
/// failure aborts; the install→configure chain is strictly sequential.
/// An unsupported platform prints manual instructions and returns
/// [`InstallOutcome::Unsupported`] instead of an error.
pub fn install_platform(ui: &mut dyn UserInterface, force: bool) -> Result<InstallOutcome> {
    let platform = match Platform::current() {
        Ok(platform) => platform,
        Err(err @ LmError::UnsupportedPlatform { .. }) => {
            ui.warning(&err.to_string());
            return Ok(InstallOutcome::Unsupported);
        }
        Err(err) => return Err(err),
    };

    let outcomes = run_concurrent(requirements::git_validator_tasks(), ui);
    for outcome in outcomes {
        if let TaskStatus::Failed(err) = outcome.status {
            return Err(err);
        }
    }

    // Package-manager installs (and previous runs) already put the helper on
    // PATH; only --force redoes the download.
    let already_installed = !force && requirements::check_helper_version().is_ok();

    let install_title = format!(
        "Installing Netlify's Git Credential Helper for {}",
        platform.display_name()
    );
    let tasks = vec![
        Task::new(&install_title, move |ctx| {
            ctx.helper_path = Some(install::install_helper(platform)?);
            Ok(String::new())
        })
        .with_skip(move |_| {
            if already_installed {
                Some("already installed".to_string())
            } else {
                None
            }
        }),
        Task::new(
            "Configuring Git to use Netlify's Git Credential Helper",
            move |ctx| {
                // The merge always runs, even when the install was skipped.
                let helper_path = ctx
                    .helper_path
                    .clone()
                    .unwrap_or_else(install::helper_dir);
                if platform != Platform::Windows {
                    shellenv::configure_path(&helper_path)?;
                }
                gitconfig::configure_git_config(&helper_path)?;
                Ok(String::new())
            },
        ),
    ];

    let ctx = run_sequential(tasks, ui)?;
    Ok(InstallOutcome::Completed {
        helper_path: ctx.helper_path.unwrap_or_else(install::helper_dir),
    })
}

/// Tell the user how to pick up the new PATH in their current shell.
///
/// Suppressed when the helper bin dir is already a PATH component (unless
/// forced) and on Windows, where PATH registration happens in the installer.
pub fn print_source_banner(ui: &mut dyn UserInterface, force: bool) {
    if matches!(Platform::current(), Ok(Platform::Windows) | Err(_)) {
        return;
    }

    let bin_dir = install::helper_bin_dir();
    let on_path = std::env::var("PATH")
        .map(|path| shellenv::bin_in_path(&bin_dir, &path))
        .unwrap_or(false);
    if on_path && !force {
        return;
    }

    let Ok(shell_var) = std::env::var("SHELL") else {
        return;
    };
    let Ok(shell) = Shell::from_shell_var(&shell_var, &bin_dir) else {
        return;
    };

    let snippet = shellenv::snippet_path(&install::helper_dir(), shell);
    let source_line = format!("source {}", snippet.display());
    ui.show_boxed(&[
        "Run this command to use Netlify Large Media in your current shell",
        "",
        &source_line,
    ]);
}
