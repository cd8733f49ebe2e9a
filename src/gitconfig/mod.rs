//! Global Git credential configuration.
//!
//! The helper is wired in through a standalone fragment file under the
//! helper directory, included from `~/.gitconfig`. Previously configured
//! credential settings are preserved: the old `[credential]` section is
//! renamed to `[credential-backup]` and every setting is re-declared in the
//! fragment after Netlify's helper.

pub mod merge;

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::anyhow;

use crate::error::{LmError, Result};
use crate::shellenv::append_once;

pub use merge::{merge_credential_config, parse_credential_lines, CredentialSetting};

/// Read the existing global `credential.*` settings.
///
/// `git config --get-regexp` exits non-zero when nothing matches; that case
/// is an empty list, not an error.
pub fn read_credential_settings() -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["config", "--global", "--get-regexp", "^credential"])
        .output()
        .map_err(|_| LmError::NotInstalled {
            tool: "git".to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() && !stdout.trim().is_empty() {
        return Err(LmError::Other(anyhow!(
            "git config --get-regexp failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(stdout.lines().map(str::to_string).collect())
}

/// Rename the global `[credential]` section to `[credential-backup]`.
///
/// Having no credential section configured is fine.
pub fn backup_credential_section() -> Result<()> {
    let output = Command::new("git")
        .args([
            "config",
            "--global",
            "--rename-section",
            "credential",
            "credential-backup",
        ])
        .output()
        .map_err(|_| LmError::NotInstalled {
            tool: "git".to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.contains("no such section") {
            return Err(LmError::Other(anyhow!(
                "git config --rename-section failed: {}",
                stderr.trim()
            )));
        }
    }

    Ok(())
}

/// The include block appended to `~/.gitconfig`.
///
/// Git expects the config path to always use `/`, even on Windows.
pub fn include_block(helper_path: &Path) -> String {
    let fragment_path = helper_path
        .join("git-config")
        .display()
        .to_string()
        .replace('\\', "/");
    format!(
        "\n# This next lines include Netlify's Git Credential Helper configuration in your Git configuration.\n[include]\n  path = {}\n",
        fragment_path
    )
}

/// Write the fragment and include it from `<home>/.gitconfig`.
///
/// Split out from [`configure_git_config`] so tests can use a scratch home
/// and canned `--get-regexp` output.
pub fn apply(helper_path: &Path, home: &Path, existing_lines: &[String]) -> Result<()> {
    fs::create_dir_all(helper_path)?;
    let fragment = merge_credential_config(existing_lines);
    fs::write(helper_path.join("git-config"), fragment)?;
    append_once(&home.join(".gitconfig"), &include_block(helper_path))?;
    Ok(())
}

/// Rewrite the global credential configuration to prefer Netlify's helper.
pub fn configure_git_config(helper_path: &Path) -> Result<()> {
    let existing = read_credential_settings()?;
    backup_credential_section()?;

    let home = dirs::home_dir()
        .ok_or_else(|| LmError::Other(anyhow!("unable to resolve home directory")))?;
    apply(helper_path, &home, &existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let helper = temp.path().join("helper");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&helper).unwrap();
        (temp, home, helper)
    }

    #[test]
    fn apply_writes_fragment_and_gitconfig_include() {
        let (_temp, home, helper) = setup();
        fs::write(home.join(".gitconfig"), "[user]\n  name = Test\n").unwrap();

        apply(&helper, &home, &["credential.helper store".to_string()]).unwrap();

        let fragment = fs::read_to_string(helper.join("git-config")).unwrap();
        assert!(fragment.contains("helper = netlify"));
        assert!(fragment.contains("helper=store"));

        let gitconfig = fs::read_to_string(home.join(".gitconfig")).unwrap();
        assert!(gitconfig.starts_with("[user]"));
        assert!(gitconfig.contains("[include]"));
        assert!(gitconfig.contains("git-config"));
    }

    #[test]
    fn apply_twice_includes_exactly_once() {
        let (_temp, home, helper) = setup();
        fs::write(home.join(".gitconfig"), "").unwrap();

        apply(&helper, &home, &[]).unwrap();
        apply(&helper, &home, &[]).unwrap();

        let gitconfig = fs::read_to_string(home.join(".gitconfig")).unwrap();
        assert_eq!(gitconfig.matches("[include]").count(), 1);
    }

    #[test]
    fn apply_does_not_create_a_missing_gitconfig() {
        let (_temp, home, helper) = setup();

        apply(&helper, &home, &[]).unwrap();

        assert!(helper.join("git-config").exists());
        assert!(!home.join(".gitconfig").exists());
    }

    #[test]
    fn include_block_uses_forward_slashes() {
        let block = include_block(Path::new("/home/u/.netlify/helper"));
        assert!(block.contains("path = /home/u/.netlify/helper/git-config"));
        assert!(!block.contains('\\'));
    }
}
