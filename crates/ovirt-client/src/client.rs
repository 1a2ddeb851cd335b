//! oVirt API client
//!
//! Implements the oVirt Engine REST API client for VM NIC operations.
//! Based on the engine API v4 layout: /vms/{vm}/nics and /vms/{vm}/nics/{nic}

use crate::error::OvirtError;
use crate::models::{ActionResponse, Fault, Nic, NicRequest};
use crate::ovirt_trait::OvirtClientTrait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Response, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection options for [`OvirtClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Accept invalid TLS certificates (self-signed engine certs)
    pub insecure: bool,
    /// Additional PEM-encoded root certificate (usually the engine CA)
    pub ca_pem: Option<Vec<u8>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            insecure: false,
            ca_pem: None,
        }
    }
}

/// oVirt API client
pub struct OvirtClient {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl fmt::Debug for OvirtClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OvirtClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OvirtClient {
    /// Create a new oVirt client with default options
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://engine/ovirt-engine/api")
    /// * `username` - User in `user@domain` form (e.g., "admin@internal")
    /// * `password` - Password for `username`
    pub fn new(base_url: String, username: String, password: String) -> Result<Self, OvirtError> {
        Self::with_options(base_url, username, password, ClientOptions::default())
    }

    /// Create a new oVirt client with explicit connection options
    pub fn with_options(
        base_url: String,
        username: String,
        password: String,
        options: ClientOptions,
    ) -> Result<Self, OvirtError> {
        if base_url.trim().is_empty() {
            return Err(OvirtError::InvalidRequest("base URL must not be empty".to_string()));
        }

        let mut builder = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure);

        if let Some(pem) = options.ca_pem.as_deref() {
            let cert = reqwest::Certificate::from_pem(pem)?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build()?;
        let credentials = STANDARD.encode(format!("{}:{}", username, password));

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", credentials),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn nics_url(&self, vm_id: &str) -> String {
        format!("{}/vms/{}/nics", self.base_url, urlencoding::encode(vm_id))
    }

    fn nic_url(&self, vm_id: &str, nic_id: &str) -> String {
        format!("{}/{}", self.nics_url(vm_id), urlencoding::encode(nic_id))
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .header("Version", "4")
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Version", "4")
    }

    fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .header("Version", "4")
    }
}

/// Map a non-success response to an [`OvirtError`].
///
/// `what` names the addressed entity for the error message (e.g. "nic n1 of vm v1").
async fn error_from_response(response: Response, what: &str) -> OvirtError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<Fault>(&body)
        .ok()
        .and_then(|f| f.message())
        .unwrap_or(body);

    match status {
        StatusCode::NOT_FOUND => OvirtError::NotFound(format!("{} not found", what)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            OvirtError::Authentication(format!("{} - {}", status, detail))
        }
        _ => OvirtError::Api(format!("{} ({}): {}", what, status, detail)),
    }
}

fn ensure_ids(vm_id: &str, nic_id: Option<&str>) -> Result<(), OvirtError> {
    if vm_id.is_empty() {
        return Err(OvirtError::InvalidRequest("vm id must not be empty".to_string()));
    }
    if nic_id.is_some_and(str::is_empty) {
        return Err(OvirtError::InvalidRequest("nic id must not be empty".to_string()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl OvirtClientTrait for OvirtClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate credentials by fetching the API root.
    ///
    /// The API root is the cheapest authenticated endpoint the engine exposes.
    async fn validate_connection(&self) -> Result<(), OvirtError> {
        let url = format!("{}/", self.base_url);
        debug!("Validating oVirt credentials and connectivity");

        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, "API root").await);
        }

        debug!("oVirt connection validated");
        Ok(())
    }

    async fn add_nic(&self, vm_id: &str, nic: &NicRequest) -> Result<Option<Nic>, OvirtError> {
        ensure_ids(vm_id, None)?;
        let url = self.nics_url(vm_id);
        debug!("POST {} (nic {}, profile {:?})", url, nic.name, nic.vnic_profile.id);

        let response = self.post(&url).json(nic).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, &format!("vm {}", vm_id)).await);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            warn!("Engine accepted nic {} for vm {} but returned an empty body", nic.name, vm_id);
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(&text)?;
        let empty = match &value {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            return Ok(None);
        }

        let created: Nic = serde_json::from_value(value)?;
        Ok(Some(created))
    }

    async fn get_nic(&self, vm_id: &str, nic_id: &str) -> Result<Nic, OvirtError> {
        ensure_ids(vm_id, Some(nic_id))?;
        let url = self.nic_url(vm_id, nic_id);
        debug!("GET {}", url);

        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            let what = format!("nic {} of vm {}", nic_id, vm_id);
            return Err(error_from_response(response, &what).await);
        }

        let nic: Nic = response.json().await?;
        Ok(nic)
    }

    async fn deactivate_nic(&self, vm_id: &str, nic_id: &str) -> Result<(), OvirtError> {
        ensure_ids(vm_id, Some(nic_id))?;
        let url = format!("{}/deactivate", self.nic_url(vm_id, nic_id));
        debug!("POST {}", url);

        let response = self
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        if !response.status().is_success() {
            let what = format!("nic {} of vm {}", nic_id, vm_id);
            return Err(error_from_response(response, &what).await);
        }

        // Action bodies are informational; only an explicit "failed" status is an error.
        let body = response.text().await.unwrap_or_default();
        let action: ActionResponse = serde_json::from_str(&body).unwrap_or_default();
        if action.status.as_deref() == Some("failed") {
            let detail = action
                .fault
                .and_then(|f| f.message())
                .unwrap_or_else(|| "action failed".to_string());
            return Err(OvirtError::Api(format!(
                "deactivate nic {} of vm {}: {}",
                nic_id, vm_id, detail
            )));
        }

        Ok(())
    }

    async fn remove_nic(&self, vm_id: &str, nic_id: &str) -> Result<(), OvirtError> {
        ensure_ids(vm_id, Some(nic_id))?;
        let url = self.nic_url(vm_id, nic_id);
        debug!("DELETE {}", url);

        let response = self.delete(&url).send().await?;
        if !response.status().is_success() {
            let what = format!("nic {} of vm {}", nic_id, vm_id);
            return Err(error_from_response(response, &what).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let client = OvirtClient::new(
            "https://engine/ovirt-engine/api/".to_string(),
            "admin@internal".to_string(),
            "secret".to_string(),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://engine/ovirt-engine/api");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = OvirtClient::new(" ".to_string(), "u".to_string(), "p".to_string());
        assert!(matches!(result, Err(OvirtError::InvalidRequest(_))));
    }

    #[test]
    fn test_nic_url_encodes_segments() {
        let client = OvirtClient::new(
            "https://engine/api".to_string(),
            "u".to_string(),
            "p".to_string(),
        )
        .unwrap();
        assert_eq!(
            client.nic_url("vm 1", "n/1"),
            "https://engine/api/vms/vm%201/nics/n%2F1"
        );
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = OvirtClient::new(
            "https://engine/api".to_string(),
            "admin@internal".to_string(),
            "hunter2".to_string(),
        )
        .unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("https://engine/api"));
        assert!(!rendered.contains("Basic"));
    }
}
