//! External tool requirements.
//!
//! Netlify Large Media needs `git` and a reasonably recent `git-lfs` on the
//! machine, plus the `git-credential-netlify` helper this tool installs.
//! Each check is an independent probe suitable for the concurrent runner.

pub mod version;

use crate::error::Result;
use crate::runner::Task;

pub use version::{check_version, match_version, parse_loose, probe_output};

/// Minimum Git LFS version with working custom transfer support.
pub const MIN_LFS_VERSION: &str = "2.5.1";

/// Minimum credential helper version.
pub const MIN_HELPER_VERSION: &str = "0.1.1";

/// Executable name of the credential helper.
pub const HELPER_BINARY: &str = "git-credential-netlify";

/// Check that Git can be launched, returning its reported version line.
pub fn check_git_version() -> Result<String> {
    let out = version::probe_output("git", &["--version"])?;
    // The version itself doesn't gate anything; any launchable git will do.
    Ok(out
        .strip_prefix("git version ")
        .unwrap_or(&out)
        .to_string())
}

/// Check that Git LFS is installed and at least [`MIN_LFS_VERSION`].
pub fn check_lfs_version() -> Result<String> {
    version::check_version("git-lfs", &["--version"], r"git-lfs/([\d.]+)", MIN_LFS_VERSION)
}

/// Check that the credential helper is installed and at least
/// [`MIN_HELPER_VERSION`].
pub fn check_helper_version() -> Result<String> {
    version::check_version(
        HELPER_BINARY,
        &["--version"],
        r"git-credential-netlify/([\d.]+)",
        MIN_HELPER_VERSION,
    )
}

/// Build the git/git-lfs validation tasks.
///
/// A fresh list per call; the orchestrator owns the plan for one invocation.
pub fn git_validator_tasks<'a>() -> Vec<Task<'a>> {
    vec![
        Task::new("Checking Git version", |_| check_git_version()),
        Task::new("Checking Git LFS version", |_| check_lfs_version()),
    ]
}

/// Build the full diagnostics task list (git, git-lfs, helper).
pub fn diagnostic_tasks<'a>() -> Vec<Task<'a>> {
    let mut tasks = git_validator_tasks();
    tasks.push(Task::new(
        "Checking Netlify's Git Credential Helper version",
        |_| check_helper_version(),
    ));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_tasks_cover_git_and_lfs() {
        let tasks = git_validator_tasks();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].title().contains("Git version"));
        assert!(tasks[1].title().contains("Git LFS"));
    }

    #[test]
    fn diagnostic_tasks_add_helper_check() {
        let tasks = diagnostic_tasks();
        assert_eq!(tasks.len(), 3);
        assert!(tasks[2].title().contains("Credential Helper"));
    }

    #[test]
    fn each_call_builds_a_fresh_plan() {
        // Two invocations must not share task state.
        let first = git_validator_tasks();
        let second = git_validator_tasks();
        assert_eq!(first.len(), second.len());
    }
}
