//! Shell PATH configuration.
//!
//! Wires the helper's bin directory into the user's shell: a generated
//! `path.<shell>.inc` snippet in the helper directory, plus one sourcing
//! block appended to the shell's init file. Both writes are idempotent —
//! re-running never duplicates PATH lines or sourcing blocks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::error::{LmError, Result};

/// Shells we know how to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
}

impl Shell {
    /// Parse a shell from the basename of a `$SHELL` value.
    ///
    /// `bin_dir` is only used to build the manual-instructions error for
    /// unsupported shells.
    pub fn from_shell_var(shell_var: &str, bin_dir: &Path) -> Result<Self> {
        let name = Path::new(shell_var)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(shell_var);

        match name {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            other => Err(LmError::UnsupportedShell {
                shell: other.to_string(),
                bin_path: bin_dir.display().to_string(),
            }),
        }
    }

    /// Shell name as used in the snippet file name.
    pub fn name(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
        }
    }

    /// Init file this shell reads, relative to the home directory.
    pub fn rc_file_name(&self) -> &'static str {
        match self {
            Shell::Bash => ".bashrc",
            Shell::Zsh => ".zshrc",
        }
    }

    /// Contents of the PATH-prepending snippet.
    ///
    /// The bash variant resolves the snippet's own directory (following a
    /// symlink if sourced through one) and prepends `<dir>/bin` only when it
    /// is not already a PATH component. zsh can do the same in one line.
    pub fn snippet_content(&self) -> &'static str {
        match self {
            Shell::Bash => {
                r#"script_link="$( command readlink "$BASH_SOURCE" )" || script_link="$BASH_SOURCE"
apparent_sdk_dir="${script_link%/*}"
if [ "$apparent_sdk_dir" == "$script_link" ]; then
apparent_sdk_dir=.
fi
sdk_dir="$( command cd -P "$apparent_sdk_dir" > /dev/null && command pwd -P )"
bin_path="$sdk_dir/bin"
if [[ ":${PATH}:" != *":${bin_path}:"* ]]; then
export PATH=$bin_path:$PATH
fi"#
            }
            Shell::Zsh => "export PATH=${0:A:h}/bin:$PATH",
        }
    }
}

/// Path of the snippet file for a shell inside the helper directory.
pub fn snippet_path(helper_path: &Path, shell: Shell) -> PathBuf {
    helper_path.join(format!("path.{}.inc", shell.name()))
}

/// The block appended to the shell init file to source the snippet.
pub fn source_block(snippet: &Path) -> String {
    format!(
        "\n# The next line updates PATH for Netlify's Git Credential Helper.\nif [ -f '{}' ]; then source '{}'; fi\n",
        snippet.display(),
        snippet.display()
    )
}

/// Configure the user's shell PATH for the helper under `helper_path`.
///
/// Reads `$SHELL` and the real home directory. Returns the snippet path so
/// the caller can tell the user what to `source`.
pub fn configure_path(helper_path: &Path) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LmError::Other(anyhow!("unable to resolve home directory")))?;
    let shell_var = std::env::var("SHELL").ok();
    configure_path_in(helper_path, &home, shell_var.as_deref())
}

/// Testable core of [`configure_path`] with explicit home and `$SHELL`.
///
/// Shell detection happens before any write, so an undetected or
/// unsupported shell leaves the filesystem untouched.
pub fn configure_path_in(
    helper_path: &Path,
    home: &Path,
    shell_var: Option<&str>,
) -> Result<PathBuf> {
    let shell_var = shell_var.ok_or(LmError::ShellUndetected)?;
    let shell = Shell::from_shell_var(shell_var, &helper_path.join("bin"))?;

    fs::create_dir_all(helper_path)?;
    let snippet = snippet_path(helper_path, shell);
    fs::write(&snippet, shell.snippet_content())?;

    let rc_path = home.join(shell.rc_file_name());
    append_once(&rc_path, &source_block(&snippet))?;

    Ok(snippet)
}

/// Append `block` to `path` unless the file already contains it.
///
/// Init files are never created: if the file doesn't exist the user doesn't
/// use that shell's rc mechanism and we have no business making one.
/// Returns whether an append happened.
pub fn append_once(path: &Path, block: &str) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    if content.contains(block) {
        return Ok(false);
    }

    let mut updated = content;
    updated.push_str(block);
    fs::write(path, updated)?;
    Ok(true)
}

/// Check whether `bin_dir` is already a component of a PATH value.
///
/// PATH entries are occasionally quoted on Windows; quotes are stripped
/// before the exact component comparison.
pub fn bin_in_path(bin_dir: &Path, path_var: &str) -> bool {
    let target = bin_dir.display().to_string();
    std::env::split_paths(&path_var.replace('"', ""))
        .any(|part| part.display().to_string() == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let helper = temp.path().join("helper");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&helper).unwrap();
        (temp, home, helper)
    }

    #[test]
    fn bash_and_zsh_parse_from_full_shell_paths() {
        let bin = PathBuf::from("/h/.netlify/helper/bin");
        assert_eq!(Shell::from_shell_var("/bin/bash", &bin).unwrap(), Shell::Bash);
        assert_eq!(
            Shell::from_shell_var("/usr/local/bin/zsh", &bin).unwrap(),
            Shell::Zsh
        );
    }

    #[test]
    fn unsupported_shell_reports_manual_path() {
        let bin = PathBuf::from("/h/.netlify/helper/bin");
        let err = Shell::from_shell_var("/usr/bin/fish", &bin).unwrap_err();
        match err {
            LmError::UnsupportedShell { shell, bin_path } => {
                assert_eq!(shell, "fish");
                assert!(bin_path.contains(".netlify/helper/bin"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn undetected_shell_writes_nothing() {
        let (_temp, home, helper) = setup();
        fs::write(home.join(".bashrc"), "# existing\n").unwrap();

        let err = configure_path_in(&helper, &home, None).unwrap_err();
        assert!(matches!(err, LmError::ShellUndetected));

        assert!(!snippet_path(&helper, Shell::Bash).exists());
        assert_eq!(
            fs::read_to_string(home.join(".bashrc")).unwrap(),
            "# existing\n"
        );
    }

    #[test]
    fn configure_writes_snippet_and_sources_it() {
        let (_temp, home, helper) = setup();
        fs::write(home.join(".bashrc"), "# existing\n").unwrap();

        let snippet = configure_path_in(&helper, &home, Some("/bin/bash")).unwrap();
        assert!(snippet.ends_with("path.bash.inc"));
        assert!(snippet.exists());

        let rc = fs::read_to_string(home.join(".bashrc")).unwrap();
        assert!(rc.starts_with("# existing\n"));
        assert!(rc.contains("updates PATH for Netlify's Git Credential Helper"));
        assert!(rc.contains(&format!("source '{}'", snippet.display())));
    }

    #[test]
    fn configure_twice_sources_exactly_once() {
        let (_temp, home, helper) = setup();
        fs::write(home.join(".zshrc"), "").unwrap();

        configure_path_in(&helper, &home, Some("/bin/zsh")).unwrap();
        configure_path_in(&helper, &home, Some("/bin/zsh")).unwrap();

        let rc = fs::read_to_string(home.join(".zshrc")).unwrap();
        let count = rc.matches("path.zsh.inc']; then source").count();
        assert_eq!(rc.matches("# The next line updates PATH").count(), 1);
        assert!(count <= 1);
    }

    #[test]
    fn missing_rc_file_is_left_missing() {
        let (_temp, home, helper) = setup();

        configure_path_in(&helper, &home, Some("/bin/bash")).unwrap();

        // Snippet is written, but no .bashrc is created
        assert!(snippet_path(&helper, Shell::Bash).exists());
        assert!(!home.join(".bashrc").exists());
    }

    #[test]
    fn bash_snippet_guards_against_duplicate_path_entries() {
        let content = Shell::Bash.snippet_content();
        assert!(content.contains(r#"":${PATH}:" != *":${bin_path}:"*"#));
        assert!(content.contains("export PATH=$bin_path:$PATH"));
    }

    #[test]
    fn zsh_snippet_prepends_bin_dir() {
        assert_eq!(Shell::Zsh.snippet_content(), "export PATH=${0:A:h}/bin:$PATH");
    }

    #[test]
    fn bin_in_path_matches_exact_components_only() {
        let bin = PathBuf::from("/home/u/.netlify/helper/bin");
        assert!(bin_in_path(&bin, "/usr/bin:/home/u/.netlify/helper/bin:/bin"));
        assert!(!bin_in_path(&bin, "/usr/bin:/home/u/.netlify/helper:/bin"));
        assert!(!bin_in_path(&bin, "/usr/bin:/home/u/.netlify/helper/bin2"));
    }

    #[test]
    fn bin_in_path_strips_quotes() {
        let bin = PathBuf::from("/home/u/.netlify/helper/bin");
        assert!(bin_in_path(&bin, "\"/home/u/.netlify/helper/bin\""));
    }
}
