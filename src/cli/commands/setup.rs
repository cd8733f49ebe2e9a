//! Setup command implementation.
//!
//! `netlify-lm setup` runs the install flow, then provisions the Large Media
//! add-on for a site and points the site's `.lfsconfig` at it.

use anyhow::anyhow;

use crate::cli::args::SetupArgs;
use crate::error::{LmError, Result};
use crate::provision::{self, ApiClient, ProvisionOutcome};
use crate::runner::{run_sequential, Task};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::install::{install_platform, print_source_banner, InstallOutcome};

/// The setup command implementation.
pub struct SetupCommand {
    args: SetupArgs,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(args: SetupArgs) -> Self {
        Self { args }
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.skip_install {
            match install_platform(ui, self.args.force_install)? {
                InstallOutcome::Completed { .. } => {}
                // Without a helper there is nothing to point LFS at.
                InstallOutcome::Unsupported => return Ok(CommandResult::success()),
            }
        }

        let site_id = self.args.site_id.clone().ok_or(LmError::NoSiteId)?;
        let token = self.args.auth.as_deref().ok_or_else(|| {
            LmError::Other(anyhow!(
                "No access token found, pass --auth or set NETLIFY_AUTH_TOKEN"
            ))
        })?;
        let client = ApiClient::new(token)?;

        let tasks = vec![
            Task::new("Provisioning Netlify Large Media", {
                let client = &client;
                let site_id = site_id.clone();
                move |_ctx| {
                    match provision::provision_large_media(client, Some(&site_id))? {
                        ProvisionOutcome::AlreadyProvisioned => {
                            Ok("already provisioned".to_string())
                        }
                        ProvisionOutcome::Created => Ok(String::new()),
                    }
                }
            }),
            Task::new("Configuring Git LFS for your site", {
                let client = &client;
                let site_id = site_id.clone();
                move |_ctx| {
                    let repo_root = std::env::current_dir()?;
                    provision::configure_site_lfs(client, &site_id, &repo_root)
                }
            }),
        ];

        run_sequential(tasks, ui)?;

        if !self.args.skip_install {
            print_source_banner(ui, self.args.force_install);
        }
        ui.success("Netlify Large Media is configured for this site");
        Ok(CommandResult::success())
    }
}
