//! Netlify API client for add-on provisioning.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{LmError, Result};

/// Production API base.
pub const API_BASE_URL: &str = "https://api.netlify.com/api/v1";

/// Add-on slug of the Large Media service.
pub const LARGE_MEDIA_SLUG: &str = "large-media";

/// An add-on instance attached to a site.
#[derive(Debug, Clone, Deserialize)]
pub struct AddonInstance {
    pub id: Option<String>,
    /// Mount path of the service, e.g. `/.netlify/large-media`.
    pub service_path: Option<String>,
}

/// The subset of site attributes this tool needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub id: String,
    /// Canonical per-site domain the LFS endpoint lives under.
    pub id_domain: String,
    pub name: Option<String>,
}

/// Error payload shape the API answers with.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
    message: Option<String>,
}

/// Blocking client for the site/add-ons endpoints.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Create a client against the production API.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Create a client against a specific base URL (tests use a mock server).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("netlify-lm/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List the add-on instances of a site.
    pub fn list_addons(&self, site_id: &str) -> Result<Vec<AddonInstance>> {
        let response = self
            .client
            .get(self.url(&format!("/sites/{}/service-instances", site_id)))
            .bearer_auth(&self.token)
            .send()?;
        Self::parse(response)
    }

    /// Create a Large Media instance for a site.
    pub fn create_addon(&self, site_id: &str) -> Result<AddonInstance> {
        let response = self
            .client
            .post(self.url(&format!(
                "/sites/{}/services/{}/instances",
                site_id, LARGE_MEDIA_SLUG
            )))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({}))
            .send()?;
        Self::parse(response)
    }

    /// Fetch a site.
    pub fn get_site(&self, site_id: &str) -> Result<Site> {
        let response = self
            .client
            .get(self.url(&format!("/sites/{}", site_id)))
            .bearer_auth(&self.token)
            .send()?;
        Self::parse(response)
    }

    /// Decode a success body, or surface the API's error payload.
    fn parse<T: serde::de::DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().map_err(|e| LmError::MalformedResponse {
                message: e.to_string(),
            });
        }

        let message = response
            .json::<ErrorPayload>()
            .ok()
            .and_then(|p| p.error.or(p.message))
            .unwrap_or_else(|| format!("API answered with status {}", status.as_u16()));
        Err(LmError::AddonError { message })
    }
}
