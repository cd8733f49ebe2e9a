//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Netlify Large Media setup.
#[derive(Debug, Parser)]
#[command(name = "netlify-lm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the Git credential helper and configure Git to use it
    Install(InstallArgs),

    /// Install the helper, then provision Large Media for a site
    Setup(SetupArgs),

    /// Show Large Media diagnostics (default if no command specified)
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Force the credentials helper installation even if already present
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Skip the credentials helper installation step
    #[arg(long, conflicts_with = "force_install")]
    pub skip_install: bool,

    /// Force the credentials helper installation even if already present
    #[arg(long)]
    pub force_install: bool,

    /// Site to provision Large Media for
    #[arg(long, value_name = "ID", env = "NETLIFY_SITE_ID")]
    pub site_id: Option<String>,

    /// Netlify access token
    #[arg(long, value_name = "TOKEN", env = "NETLIFY_AUTH_TOKEN", hide_env_values = true)]
    pub auth: Option<String>,
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InfoArgs {}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_verifies() {
        Cli::command().debug_assert();
    }

    #[test]
    fn install_parses_force_flag() {
        let cli = Cli::parse_from(["netlify-lm", "install", "--force"]);
        match cli.command {
            Some(Commands::Install(args)) => assert!(args.force),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn setup_parses_site_and_auth() {
        let cli = Cli::parse_from([
            "netlify-lm",
            "setup",
            "--site-id",
            "abc123",
            "--auth",
            "tok",
        ]);
        match cli.command {
            Some(Commands::Setup(args)) => {
                assert_eq!(args.site_id.as_deref(), Some("abc123"));
                assert_eq!(args.auth.as_deref(), Some("tok"));
                assert!(!args.skip_install);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn setup_rejects_skip_and_force_together() {
        let result = Cli::try_parse_from([
            "netlify-lm",
            "setup",
            "--skip-install",
            "--force-install",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::parse_from(["netlify-lm"]);
        assert!(cli.command.is_none());
    }
}
