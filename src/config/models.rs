// src/config/models.rs
use serde::Deserialize;
use std::collections::HashMap;

/// Body size above which a 200 response counts as server-rendered.
pub const DEFAULT_SSR_THRESHOLD: usize = 5 << 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub namespaces: HashMap<String, NamespaceConfig>,
    pub hosts: Vec<String>,
    pub opensearch: Option<OpenSearchConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "Protocol")]
    pub protocol: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "SSRCheck")]
    pub ssr_check: bool,
    #[serde(rename = "SSRThreshold")]
    pub ssr_threshold: usize,
}

impl NamespaceConfig {
    /// Effective SSR threshold in bytes. Zero is treated as "unset", so an
    /// explicit zero cannot be configured.
    pub fn ssr_threshold(&self) -> usize {
        if self.ssr_threshold == 0 {
            DEFAULT_SSR_THRESHOLD
        } else {
            self.ssr_threshold
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenSearchConfig {
    pub hosts: Vec<String>,
    pub index: String,
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn validate(&self) -> Result<(), crate::CheckerError> {
        if self.hosts.is_empty() {
            return Err(crate::CheckerError::NoHosts);
        }
        Ok(())
    }

    /// Sink settings, if they are complete enough to index anything.
    pub fn active_opensearch(&self) -> Option<&OpenSearchConfig> {
        self.opensearch
            .as_ref()
            .filter(|os| !os.hosts.is_empty() && !os.index.is_empty())
    }

    /// Fold one decoded document into the accumulated configuration.
    pub(super) fn merge(&mut self, doc: ConfigDocument) {
        if let Some(namespaces) = doc.namespaces {
            self.namespaces.extend(namespaces);
        }
        if let Some(hosts) = doc.hosts {
            self.hosts = hosts;
        }
        if let Some(patch) = doc.opensearch {
            let target = self.opensearch.get_or_insert_with(OpenSearchConfig::default);
            if let Some(hosts) = patch.hosts {
                target.hosts = hosts;
            }
            if let Some(index) = patch.index {
                target.index = index;
            }
            if let Some(username) = patch.username {
                target.username = username;
            }
            if let Some(password) = patch.password {
                target.password = password;
            }
        }
    }
}

/// One YAML document as written. Absent keys leave earlier values alone.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ConfigDocument {
    #[serde(rename = "Namespaces")]
    pub namespaces: Option<HashMap<String, NamespaceConfig>>,
    #[serde(rename = "Hosts")]
    pub hosts: Option<Vec<String>>,
    #[serde(rename = "OpenSearch")]
    pub opensearch: Option<OpenSearchDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct OpenSearchDocument {
    #[serde(rename = "Hosts")]
    pub hosts: Option<Vec<String>>,
    #[serde(rename = "Index")]
    pub index: Option<String>,
    #[serde(rename = "Username")]
    pub username: Option<String>,
    #[serde(rename = "Password")]
    pub password: Option<String>,
}
