//! Error types for Large Media setup operations.
//!
//! This module defines [`LmError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `LmError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `LmError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use thiserror::Error;

/// Core error type for Large Media setup operations.
#[derive(Debug, Error)]
pub enum LmError {
    /// A required external tool could not be launched.
    #[error("Check that {tool} is installed in your system")]
    NotInstalled { tool: String },

    /// A tool is present but older than the required minimum.
    #[error("Invalid {tool} version. Please update to version {minimum} or above")]
    VersionTooLow {
        tool: String,
        found: String,
        minimum: String,
    },

    /// A tool's version output did not match the expected pattern.
    #[error("Unable to recognize {tool} version output")]
    UnrecognizedVersion { tool: String },

    /// The SHELL environment variable is not set.
    #[error(
        "Unable to detect SHELL type, make sure the variable is defined in your environment"
    )]
    ShellUndetected,

    /// The user's shell is not one we know how to configure.
    #[error(
        "Unable to set credential helper in PATH. We don't know how to set the path for {shell} shell.\nSet the helper path in your environment PATH: {bin_path}"
    )]
    UnsupportedShell { shell: String, bin_path: String },

    /// The operating system has no install path.
    #[error(
        "Platform not supported: {platform}.\nSee manual setup instructions in https://github.com/netlify/netlify-credential-helper#install"
    )]
    UnsupportedPlatform { platform: String },

    /// HTTP transport failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A remote API answered with something we could not interpret.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Asset download failed with a non-success status.
    #[error("Download failed with status {status}: {url}")]
    DownloadFailed { url: String, status: u16 },

    /// Archive extraction failed.
    #[error("Failed to extract credential helper: {message}")]
    ExtractFailed { message: String },

    /// Provisioning was requested without a site to provision for.
    #[error("No site id found, please run inside a site folder or pass --site-id")]
    NoSiteId,

    /// The add-ons API reported an error payload.
    #[error("Error provisioning Large Media add-on: {message}")]
    AddonError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Large Media setup operations.
pub type Result<T> = std::result::Result<T, LmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_installed_names_the_tool() {
        let err = LmError::NotInstalled {
            tool: "git-lfs".into(),
        };
        assert!(err.to_string().contains("git-lfs"));
    }

    #[test]
    fn version_too_low_displays_minimum() {
        let err = LmError::VersionTooLow {
            tool: "git-lfs".into(),
            found: "2.0.0".into(),
            minimum: "2.5.1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git-lfs"));
        assert!(msg.contains("2.5.1"));
    }

    #[test]
    fn unsupported_shell_displays_manual_path() {
        let err = LmError::UnsupportedShell {
            shell: "fish".into(),
            bin_path: "/home/u/.netlify/helper/bin".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fish"));
        assert!(msg.contains("/home/u/.netlify/helper/bin"));
    }

    #[test]
    fn unsupported_platform_points_at_manual_instructions() {
        let err = LmError::UnsupportedPlatform {
            platform: "freebsd".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("freebsd"));
        assert!(msg.contains("netlify-credential-helper#install"));
    }

    #[test]
    fn download_failed_displays_status_and_url() {
        let err = LmError::DownloadFailed {
            url: "https://example.com/helper.tar.gz".into(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("helper.tar.gz"));
    }

    #[test]
    fn addon_error_displays_payload_message() {
        let err = LmError::AddonError {
            message: "site not found".into(),
        };
        assert!(err.to_string().contains("site not found"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LmError = io_err.into();
        assert!(matches!(err, LmError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(LmError::ShellUndetected)
        }
        assert!(returns_error().is_err());
    }
}
