// src/namespace/resolver.rs
use crate::config::NamespaceConfig;
use crate::CheckerError;
use std::collections::HashMap;

/// A host identifier bound to its namespace template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: String,
    pub namespace: String,
    pub address: String,
    pub url: String,
    /// Present only when the namespace asks for the SSR check.
    pub ssr_threshold: Option<usize>,
}

impl ProbeTarget {
    pub fn new(host: &str, namespace: &str, config: &NamespaceConfig) -> Result<Self, CheckerError> {
        let (_, address) = host
            .split_once('-')
            .ok_or_else(|| CheckerError::MalformedHost(host.to_string()))?;

        Ok(Self {
            host: host.to_string(),
            namespace: namespace.to_string(),
            address: address.to_string(),
            url: format!(
                "{}://{}:{}{}",
                config.protocol, address, config.port, config.link
            ),
            ssr_threshold: config.ssr_check.then(|| config.ssr_threshold()),
        })
    }
}

/// Find the namespace whose name prefixes `host`.
///
/// When several names match, the longest one wins so the result does not
/// depend on map iteration order. A matched namespace with an empty link is
/// still a match; its probe URL simply has no path.
pub fn resolve<'a>(
    host: &str,
    namespaces: &'a HashMap<String, NamespaceConfig>,
) -> Result<(&'a str, &'a NamespaceConfig), CheckerError> {
    namespaces
        .iter()
        .filter(|(name, _)| host.starts_with(name.as_str()))
        .max_by_key(|(name, _)| name.len())
        .map(|(name, config)| (name.as_str(), config))
        .ok_or_else(|| CheckerError::NamespaceNotFound(host.to_string()))
}

/// Resolve every host up front, keeping configured order. The first
/// failure aborts the whole run.
pub fn resolve_all(
    hosts: &[String],
    namespaces: &HashMap<String, NamespaceConfig>,
) -> Result<Vec<ProbeTarget>, CheckerError> {
    hosts
        .iter()
        .map(|host| {
            let (name, config) = resolve(host, namespaces)?;
            ProbeTarget::new(host, name, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn namespace(port: u16, protocol: &str, link: &str) -> NamespaceConfig {
        NamespaceConfig {
            port,
            protocol: protocol.to_string(),
            link: link.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_probe_url_is_built_from_template() {
        let mut namespaces = HashMap::new();
        namespaces.insert("ns1".to_string(), namespace(8080, "http", "/health"));

        let targets = resolve_all(&["ns1-10.0.0.5".to_string()], &namespaces).unwrap();

        assert_eq!(targets[0].url, "http://10.0.0.5:8080/health");
        assert_eq!(targets[0].address, "10.0.0.5");
        assert_eq!(targets[0].namespace, "ns1");
        assert_eq!(targets[0].ssr_threshold, None);
    }

    #[test]
    fn test_address_keeps_later_dashes() {
        let mut namespaces = HashMap::new();
        namespaces.insert("edge".to_string(), namespace(443, "https", "/"));

        let (name, config) = resolve("edge-cdn-01.example.com", &namespaces).unwrap();
        let target = ProbeTarget::new("edge-cdn-01.example.com", name, config).unwrap();

        assert_eq!(target.url, "https://cdn-01.example.com:443/");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut namespaces = HashMap::new();
        namespaces.insert("api".to_string(), namespace(80, "http", "/a"));
        namespaces.insert("api-v2".to_string(), namespace(81, "http", "/b"));

        let (name, _) = resolve("api-v2-10.0.0.1", &namespaces).unwrap();
        assert_eq!(name, "api-v2");

        let (name, _) = resolve("api-10.0.0.1", &namespaces).unwrap();
        assert_eq!(name, "api");
    }

    #[test]
    fn test_ssr_threshold_follows_namespace_policy() {
        let mut config = namespace(80, "http", "/");
        config.ssr_check = true;

        let target = ProbeTarget::new("web-h", "web", &config).unwrap();
        assert_eq!(target.ssr_threshold, Some(5120));

        config.ssr_threshold = 100;
        let target = ProbeTarget::new("web-h", "web", &config).unwrap();
        assert_eq!(target.ssr_threshold, Some(100));
    }

    #[test]
    fn test_unresolved_host_fails_whole_batch() {
        let mut namespaces = HashMap::new();
        namespaces.insert("web".to_string(), namespace(80, "http", "/"));

        let hosts = vec!["web-10.0.0.1".to_string(), "db-10.0.0.2".to_string()];
        let err = resolve_all(&hosts, &namespaces).unwrap_err();

        assert!(matches!(err, CheckerError::NamespaceNotFound(h) if h == "db-10.0.0.2"));
    }

    #[test]
    fn test_host_without_separator_is_malformed() {
        let mut namespaces = HashMap::new();
        namespaces.insert("web".to_string(), namespace(80, "http", "/"));

        let err = resolve_all(&["web".to_string()], &namespaces).unwrap_err();
        assert!(matches!(err, CheckerError::MalformedHost(_)));
    }

    #[test]
    fn test_empty_link_still_resolves() {
        let mut namespaces = HashMap::new();
        namespaces.insert("bare".to_string(), namespace(9000, "http", ""));

        let targets = resolve_all(&["bare-10.0.0.7".to_string()], &namespaces).unwrap();
        assert_eq!(targets[0].url, "http://10.0.0.7:9000");
    }

    proptest! {
        #[test]
        fn prop_address_is_everything_after_first_dash(
            ns in "[a-z]{1,8}",
            addr in "[a-z0-9.-]{1,24}",
        ) {
            let config = namespace(8080, "http", "/x");
            let host = format!("{ns}-{addr}");
            let target = ProbeTarget::new(&host, &ns, &config).unwrap();

            prop_assert_eq!(&target.address, &addr);
            prop_assert_eq!(target.url, format!("http://{addr}:8080/x"));
        }
    }
}
