//! Provider configuration
//!
//! Connection settings come from environment variables:
//! - `OVIRT_URL` (required): API base, e.g. `https://engine/ovirt-engine/api`
//! - `OVIRT_USERNAME` / `OVIRT_PASSWORD` (required)
//! - `OVIRT_INSECURE`: accept invalid TLS certificates (default `false`)
//! - `OVIRT_CA_FILE`: extra PEM root certificate
//! - `OVIRT_TIMEOUT_SECS`: request timeout (default 30)

use crate::error::{ProviderError, ProviderResult};
use ovirt_client::{ClientOptions, OvirtClient};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for connecting to the oVirt engine
#[derive(Clone)]
pub struct ProviderConfig {
    /// API base URL without a trailing `/`
    pub url: String,
    /// Engine user, e.g. `admin@internal`
    pub username: String,
    password: String,
    /// Accept invalid TLS certificates
    pub insecure: bool,
    /// Extra PEM root certificate
    pub ca_file: Option<PathBuf>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("insecure", &self.insecure)
            .field("ca_file", &self.ca_file)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> ProviderResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ProviderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                ProviderError::InvalidConfig(format!("{} environment variable is required", key))
            })
        };

        let url = required("OVIRT_URL")?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ProviderError::InvalidConfig(format!(
                "OVIRT_URL must be an http(s) URL, got '{}'",
                url
            )));
        }

        let insecure = match lookup("OVIRT_INSECURE") {
            Some(raw) => parse_bool("OVIRT_INSECURE", &raw)?,
            None => false,
        };

        let timeout_secs = match lookup("OVIRT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ProviderError::InvalidConfig(format!("OVIRT_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ProviderError::InvalidConfig(
                "OVIRT_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            username: required("OVIRT_USERNAME")?,
            password: required("OVIRT_PASSWORD")?,
            insecure,
            ca_file: lookup("OVIRT_CA_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build an engine client from this configuration
    pub fn connect(&self) -> ProviderResult<OvirtClient> {
        let ca_pem = match &self.ca_file {
            Some(path) => Some(std::fs::read(path).map_err(|e| {
                ProviderError::InvalidConfig(format!(
                    "failed to read CA file {}: {}",
                    path.display(),
                    e
                ))
            })?),
            None => None,
        };

        let options = ClientOptions {
            timeout: self.timeout,
            insecure: self.insecure,
            ca_pem,
        };
        let client = OvirtClient::with_options(
            self.url.clone(),
            self.username.clone(),
            self.password.clone(),
            options,
        )?;
        Ok(client)
    }
}

fn parse_bool(key: &str, raw: &str) -> ProviderResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ProviderError::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("OVIRT_URL", "https://engine.example.com/ovirt-engine/api/"),
        ("OVIRT_USERNAME", "admin@internal"),
        ("OVIRT_PASSWORD", "hunter2"),
    ];

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::from_lookup(lookup_from(BASE)).unwrap();
        assert_eq!(config.url, "https://engine.example.com/ovirt-engine/api");
        assert_eq!(config.username, "admin@internal");
        assert!(!config.insecure);
        assert!(config.ca_file.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_password() {
        let err = ProviderConfig::from_lookup(lookup_from(&BASE[..2])).unwrap_err();
        match err {
            ProviderError::InvalidConfig(msg) => assert!(msg.contains("OVIRT_PASSWORD")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut vars = BASE.to_vec();
        vars[0] = ("OVIRT_URL", "engine.example.com");
        assert!(ProviderConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_optional_settings() {
        let mut vars = BASE.to_vec();
        vars.push(("OVIRT_INSECURE", "TRUE"));
        vars.push(("OVIRT_TIMEOUT_SECS", "90"));
        vars.push(("OVIRT_CA_FILE", "/etc/pki/ovirt-engine/ca.pem"));

        let config = ProviderConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert!(config.insecure);
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.ca_file, Some(PathBuf::from("/etc/pki/ovirt-engine/ca.pem")));
    }

    #[test]
    fn test_invalid_optional_settings() {
        for (key, value) in [
            ("OVIRT_INSECURE", "sometimes"),
            ("OVIRT_TIMEOUT_SECS", "soon"),
            ("OVIRT_TIMEOUT_SECS", "0"),
        ] {
            let mut vars = BASE.to_vec();
            vars.push((key, value));
            assert!(
                ProviderConfig::from_lookup(lookup_from(&vars)).is_err(),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ProviderConfig::from_lookup(lookup_from(BASE)).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_connect_missing_ca_file() {
        let mut vars = BASE.to_vec();
        vars.push(("OVIRT_CA_FILE", "/nonexistent/ca.pem"));
        let config = ProviderConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert!(matches!(config.connect(), Err(ProviderError::InvalidConfig(_))));
    }
}
