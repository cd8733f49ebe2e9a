//! Large Media add-on provisioning.
//!
//! Provisioning is idempotent at the API level: a site that already has a
//! Large Media instance is left alone (and no create call is issued). After
//! provisioning, the site's local `.lfsconfig` is pointed at the per-site
//! LFS endpoint.

pub mod api;

use std::path::Path;
use std::process::Command;

use anyhow::anyhow;

use crate::error::{LmError, Result};

pub use api::{AddonInstance, ApiClient, Site, API_BASE_URL, LARGE_MEDIA_SLUG};

/// Mount path identifying a Large Media instance in the add-on list.
pub const LARGE_MEDIA_PATH: &str = "/.netlify/large-media";

/// How provisioning ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A Large Media instance already existed; nothing was created.
    AlreadyProvisioned,
    /// A new instance was created.
    Created,
}

/// Ensure the Large Media add-on exists for a site.
pub fn provision_large_media(
    client: &ApiClient,
    site_id: Option<&str>,
) -> Result<ProvisionOutcome> {
    let site_id = site_id.ok_or(LmError::NoSiteId)?;

    let addons = client.list_addons(site_id)?;
    if addons
        .iter()
        .any(|a| a.service_path.as_deref() == Some(LARGE_MEDIA_PATH))
    {
        return Ok(ProvisionOutcome::AlreadyProvisioned);
    }

    client.create_addon(site_id)?;
    Ok(ProvisionOutcome::Created)
}

/// LFS endpoint URL for a site domain.
pub fn lfs_url(id_domain: &str) -> String {
    format!("https://{}{}", id_domain, LARGE_MEDIA_PATH)
}

/// Write the LFS endpoint into the site-local `.lfsconfig`.
///
/// Goes through `git config --file` so the file keeps Git's own formatting
/// and an existing `.lfsconfig` is updated in place.
pub fn write_lfs_config(url: &str, repo_root: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["config", "--file", ".lfsconfig", "lfs.url", url])
        .current_dir(repo_root)
        .output()
        .map_err(|_| LmError::NotInstalled {
            tool: "git".to_string(),
        })?;

    if !output.status.success() {
        return Err(LmError::Other(anyhow!(
            "writing .lfsconfig failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}

/// Fetch the site's domain and point its `.lfsconfig` at Large Media.
///
/// Returns the URL that was written.
pub fn configure_site_lfs(
    client: &ApiClient,
    site_id: &str,
    repo_root: &Path,
) -> Result<String> {
    let site = client.get_site(site_id)?;
    let url = lfs_url(&site.id_domain);
    write_lfs_config(&url, repo_root)?;
    Ok(url)
}
