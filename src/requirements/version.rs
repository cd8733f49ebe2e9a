//! Tool version probing.
//!
//! A probe is a synchronous, single-shot `<tool> --version` invocation: no
//! retries, no shell. Launch failure means the tool is not installed; output
//! that doesn't match the expected pattern is reported distinctly from a
//! version that is simply too old.

use std::process::Command;

use regex::Regex;
use semver::Version;

use crate::error::{LmError, Result};

/// Run `tool <args>` and capture its stdout.
///
/// Fails with [`LmError::NotInstalled`] if the executable cannot be launched.
pub fn probe_output(tool: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|_| LmError::NotInstalled {
            tool: tool.to_string(),
        })?;

    if !output.status.success() {
        return Err(LmError::NotInstalled {
            tool: tool.to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a version probe and compare the extracted token against a minimum.
///
/// `pattern` must contain one capture group for the version token. Returns
/// the extracted version string on success.
pub fn check_version(tool: &str, args: &[&str], pattern: &str, minimum: &str) -> Result<String> {
    let out = probe_output(tool, args)?;
    match_version(tool, &out, pattern, minimum)
}

/// Extract a version token from `out` with `pattern` and require it to be at
/// least `minimum` under semantic-version ordering.
pub fn match_version(tool: &str, out: &str, pattern: &str, minimum: &str) -> Result<String> {
    let re = Regex::new(pattern).expect("version pattern is valid");
    let found = re
        .captures(out)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| LmError::UnrecognizedVersion {
            tool: tool.to_string(),
        })?;

    let found_version = parse_loose(&found).ok_or_else(|| LmError::UnrecognizedVersion {
        tool: tool.to_string(),
    })?;
    let min_version = parse_loose(minimum).ok_or_else(|| LmError::UnrecognizedVersion {
        tool: tool.to_string(),
    })?;

    if found_version < min_version {
        return Err(LmError::VersionTooLow {
            tool: tool.to_string(),
            found,
            minimum: minimum.to_string(),
        });
    }

    Ok(found)
}

/// Parse a dotted version string leniently.
///
/// Tools print anything from `2.39` to `2.43.0.windows.1`; take the first
/// three numeric components and pad missing ones with zero.
pub fn parse_loose(v: &str) -> Option<Version> {
    let mut parts = v
        .split('.')
        .map(|p| p.parse::<u64>())
        .take_while(|p| p.is_ok())
        .map(|p| p.unwrap_or(0))
        .take(3);

    let major = parts.next()?;
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    Some(Version::new(major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LFS_PATTERN: &str = r"git-lfs/([\d.]+)";

    #[test]
    fn parse_loose_full_version() {
        assert_eq!(parse_loose("2.5.1"), Some(Version::new(2, 5, 1)));
    }

    #[test]
    fn parse_loose_pads_missing_components() {
        assert_eq!(parse_loose("2.5"), Some(Version::new(2, 5, 0)));
        assert_eq!(parse_loose("3"), Some(Version::new(3, 0, 0)));
    }

    #[test]
    fn parse_loose_ignores_trailing_garbage_components() {
        // Windows git reports e.g. 2.43.0.windows.1
        assert_eq!(parse_loose("2.43.0"), Some(Version::new(2, 43, 0)));
    }

    #[test]
    fn parse_loose_rejects_non_numeric() {
        assert_eq!(parse_loose("abc"), None);
        assert_eq!(parse_loose(""), None);
    }

    #[test]
    fn match_version_accepts_equal_minimum() {
        let out = "git-lfs/2.5.1 (GitHub; linux amd64; go 1.21.0)";
        let found = match_version("git-lfs", out, LFS_PATTERN, "2.5.1").unwrap();
        assert_eq!(found, "2.5.1");
    }

    #[test]
    fn match_version_accepts_above_minimum() {
        let out = "git-lfs/3.4.0 (GitHub; linux amd64; go 1.21.0)";
        assert!(match_version("git-lfs", out, LFS_PATTERN, "2.5.1").is_ok());
    }

    #[test]
    fn match_version_rejects_below_minimum() {
        let out = "git-lfs/2.4.9 (GitHub; linux amd64; go 1.10)";
        let err = match_version("git-lfs", out, LFS_PATTERN, "2.5.1").unwrap_err();
        assert!(matches!(err, LmError::VersionTooLow { found, .. } if found == "2.4.9"));
    }

    #[test]
    fn match_version_rejects_unmatched_output() {
        let err = match_version("git-lfs", "not a version banner", LFS_PATTERN, "2.5.1")
            .unwrap_err();
        assert!(matches!(err, LmError::UnrecognizedVersion { .. }));
    }

    #[test]
    fn succeeds_iff_semver_at_least_minimum() {
        // checkVersion(v) succeeds ⇔ semver(v) ≥ minimum
        let cases = [
            ("2.5.0", false),
            ("2.5.1", true),
            ("2.5.2", true),
            ("2.6.0", true),
            ("2.10.0", true),
            ("10.0.0", true),
            ("1.99.99", false),
        ];
        for (v, expect_ok) in cases {
            let out = format!("git-lfs/{} (GitHub; linux amd64)", v);
            let result = match_version("git-lfs", &out, LFS_PATTERN, "2.5.1");
            assert_eq!(result.is_ok(), expect_ok, "version {}", v);
        }
    }

    #[test]
    fn probe_output_fails_for_missing_tool() {
        let err = probe_output("definitely-not-a-real-tool-xyz", &["--version"]).unwrap_err();
        assert!(matches!(err, LmError::NotInstalled { tool } if tool.contains("xyz")));
    }
}
