//! NRF Configuration
//!
//! YAML configuration for the NRF daemon: SBI bind address, transport
//! security, heart-beat policy and feature gates.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// SBI transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TlsType {
    #[default]
    #[serde(rename = "non-tls")]
    NonTls,
    #[serde(rename = "server-tls")]
    ServerTls,
    #[serde(rename = "mutual-tls")]
    MutualTls,
}

/// TLS settings for the SBI listener.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SbiTlsSettings {
    pub tls_type: TlsType,
    pub key_file: String,
    pub cert_file: String,
    /// Client CA bundle; required for mutual-tls.
    pub ca_file: String,
}

/// Top-level NRF configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NrfConf {
    pub sbi_ip_addr: String,
    pub sbi_port: u16,
    pub sbi_tls_settings: SbiTlsSettings,
    /// When false, the stored heart-beat interval is forced to
    /// `default_heart_beat_timer` regardless of the client's value.
    pub accept_nf_heart_beat_timer: bool,
    pub default_heart_beat_timer: i32,
    /// Master gate for the shared-data routes.
    pub allowed_shared_data: bool,
    /// Require OAuth2 bearer tokens on the nnrf-nfm route group.
    pub oauth2_required: bool,
    /// Emit weak (`W/`) entity tags.
    pub etag_weak_validation: bool,
    /// Cache-Control max-age attached by the conditional-GET stage.
    pub etag_cache_max_age: u32,
    /// OAuth2 client credentials accepted by the token endpoint.
    pub oauth2_client_id: String,
    pub oauth2_client_secret: String,
}

impl Default for NrfConf {
    fn default() -> Self {
        Self {
            sbi_ip_addr: "127.0.0.1".to_string(),
            sbi_port: 7777,
            sbi_tls_settings: SbiTlsSettings::default(),
            accept_nf_heart_beat_timer: true,
            default_heart_beat_timer: 60,
            allowed_shared_data: true,
            oauth2_required: false,
            etag_weak_validation: false,
            etag_cache_max_age: 3600,
            oauth2_client_id: "NRF_Service".to_string(),
            oauth2_client_secret: "123456".to_string(),
        }
    }
}

impl NrfConf {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let conf: NrfConf = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<()> {
        match self.sbi_tls_settings.tls_type {
            TlsType::NonTls => {}
            TlsType::ServerTls => {
                if self.sbi_tls_settings.key_file.is_empty()
                    || self.sbi_tls_settings.cert_file.is_empty()
                {
                    bail!("server-tls requires key_file and cert_file");
                }
            }
            TlsType::MutualTls => {
                if self.sbi_tls_settings.key_file.is_empty()
                    || self.sbi_tls_settings.cert_file.is_empty()
                {
                    bail!("mutual-tls requires key_file and cert_file");
                }
                if self.sbi_tls_settings.ca_file.is_empty() {
                    bail!("mutual-tls requires ca_file");
                }
            }
        }
        if self.default_heart_beat_timer <= 0 {
            bail!("default_heart_beat_timer must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conf = NrfConf::default();
        assert_eq!(conf.sbi_port, 7777);
        assert_eq!(conf.sbi_tls_settings.tls_type, TlsType::NonTls);
        assert!(conf.accept_nf_heart_beat_timer);
        assert_eq!(conf.default_heart_beat_timer, 60);
        assert!(conf.allowed_shared_data);
        assert!(!conf.oauth2_required);
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
sbi_ip_addr: "0.0.0.0"
sbi_port: 8443
sbi_tls_settings:
  tls_type: "server-tls"
  key_file: "/etc/nrf/tls/server.key"
  cert_file: "/etc/nrf/tls/server.crt"
accept_nf_heart_beat_timer: false
default_heart_beat_timer: 30
allowed_shared_data: false
"#;
        let conf: NrfConf = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(conf.sbi_ip_addr, "0.0.0.0");
        assert_eq!(conf.sbi_port, 8443);
        assert_eq!(conf.sbi_tls_settings.tls_type, TlsType::ServerTls);
        assert!(!conf.accept_nf_heart_beat_timer);
        assert_eq!(conf.default_heart_beat_timer, 30);
        assert!(!conf.allowed_shared_data);
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn test_mutual_tls_requires_ca_file() {
        let yaml = r#"
sbi_tls_settings:
  tls_type: "mutual-tls"
  key_file: "/etc/nrf/tls/server.key"
  cert_file: "/etc/nrf/tls/server.crt"
"#;
        let conf: NrfConf = serde_yaml::from_str(yaml).unwrap();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_unknown_tls_type_rejected() {
        let yaml = r#"
sbi_tls_settings:
  tls_type: "psk"
"#;
        assert!(serde_yaml::from_str::<NrfConf>(yaml).is_err());
    }
}
