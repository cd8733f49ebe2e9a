//! netlify-lm - Netlify Large Media setup.
//!
//! A CLI that prepares a developer machine to use Netlify Large Media as a
//! Git LFS backend: it checks for `git`/`git-lfs`, installs the
//! `git-credential-netlify` helper, wires the helper into the shell PATH and
//! global Git configuration, and optionally provisions the Large Media
//! add-on for a site.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`gitconfig`] - Global Git credential configuration merging
//! - [`install`] - Helper download, extraction and platform dispatch
//! - [`provision`] - Large Media add-on provisioning
//! - [`requirements`] - External tool version checks
//! - [`runner`] - Task list execution (concurrent checks, sequential chains)
//! - [`shellenv`] - Shell PATH configuration
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use netlify_lm::requirements::parse_loose;
//!
//! // Version tokens from tool output parse leniently
//! let version = parse_loose("2.5.1").unwrap();
//! assert!(version >= parse_loose("2.5").unwrap());
//! ```

pub mod cli;
pub mod error;
pub mod gitconfig;
pub mod install;
pub mod provision;
pub mod requirements;
pub mod runner;
pub mod shellenv;
pub mod ui;

pub use error::{LmError, Result};
