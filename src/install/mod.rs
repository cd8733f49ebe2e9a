//! Credential helper installation.
//!
//! Linux and macOS share one code path: resolve the latest release, download
//! the platform tarball, extract it into `~/.netlify/helper/bin`. Windows
//! delegates to the upstream PowerShell installer. Anything else is an
//! unsupported platform with manual instructions.

pub mod extract;
pub mod release;
pub mod windows;

use std::path::PathBuf;

use crate::error::{LmError, Result};

/// Platforms the helper ships binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Result<Self> {
        match std::env::consts::OS {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(LmError::UnsupportedPlatform {
                platform: other.to_string(),
            }),
        }
    }

    /// Key used in release asset names.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "darwin",
            Platform::Windows => "windows",
        }
    }

    /// Human-readable platform name for task titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOs => "Mac OS X",
            Platform::Windows => "Windows",
        }
    }
}

/// The helper's install root, `~/.netlify/helper`.
pub fn helper_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".netlify")
        .join("helper")
}

/// The helper's binary directory, `~/.netlify/helper/bin`.
pub fn helper_bin_dir() -> PathBuf {
    helper_dir().join("bin")
}

/// Download and extract the helper for `platform`.
///
/// Returns the helper install root on success. The install chain aborts on
/// the first failure; nothing is cleaned up (re-running overwrites).
pub fn install_helper(platform: Platform) -> Result<PathBuf> {
    match platform {
        Platform::Windows => {
            windows::install_with_powershell()?;
            Ok(helper_dir())
        }
        _ => {
            let tag = release::resolve_release()?;
            tracing::debug!("resolved credential helper release {}", tag);

            let scratch = tempfile::tempdir()?;
            let archive = scratch.path().join(release::asset_name(platform));
            let url = release::download_url(release::DOWNLOAD_BASE_URL, &tag, platform);
            release::download_asset(&url, &archive)?;

            let bin_dir = helper_bin_dir();
            extract::ensure_bin_dir(&bin_dir)?;
            extract::extract_archive(&archive, &bin_dir)?;
            Ok(helper_dir())
        }
    }
}
