//! Release resolution and asset download.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use crate::error::{LmError, Result};
use crate::install::Platform;

/// Latest-release endpoint of the credential helper project.
pub const RELEASES_LATEST_URL: &str =
    "https://api.github.com/repos/netlify/netlify-credential-helper/releases/latest";

/// Base URL for tag-scoped release assets.
pub const DOWNLOAD_BASE_URL: &str =
    "https://github.com/netlify/netlify-credential-helper/releases/download";

fn http_client() -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("netlify-lm/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

/// Resolve the latest release tag of the credential helper.
pub fn resolve_release() -> Result<String> {
    resolve_release_at(RELEASES_LATEST_URL)
}

/// Resolve the latest release tag from a specific endpoint.
///
/// Split out from [`resolve_release`] so tests can point it at a mock server.
pub fn resolve_release_at(url: &str) -> Result<String> {
    let response: serde_json::Value = http_client()?.get(url).send()?.json()?;

    response["tag_name"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| LmError::MalformedResponse {
            message: "no tag_name in release response".to_string(),
        })
}

/// Deterministic release asset name for a platform.
pub fn asset_name(platform: Platform) -> String {
    format!("git-credential-netlify-{}-amd64.tar.gz", platform.key())
}

/// Full download URL for a resolved tag and platform.
pub fn download_url(base: &str, tag: &str, platform: Platform) -> String {
    format!("{}/{}/{}", base, tag, asset_name(platform))
}

/// Download `url`, streaming the body into `dest`.
pub fn download_asset(url: &str, dest: &Path) -> Result<()> {
    let mut response = http_client()?.get(url).send()?;

    if !response.status().is_success() {
        return Err(LmError::DownloadFailed {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let mut file = File::create(dest)?;
    std::io::copy(&mut response, &mut file)?;
    Ok(())
}
