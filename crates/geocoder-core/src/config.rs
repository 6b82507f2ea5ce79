// crates/geocoder-core/src/config.rs

//! Service configuration, usually read from a TOML file:
//!
//! ```toml
//! cache_duration = 999999999
//! default_provider = "chain"
//!
//! [http]
//! adapter = "reqwest"
//! timeout_secs = 15
//!
//! [[providers]]
//! name = "chain"
//! kind = "chain"
//! members = ["google_maps", "geo_plugin"]
//!
//! [[providers]]
//! name = "google_maps"
//! kind = "file"
//! args = ["fixtures/google_maps.json.gz"]
//! ```

use crate::cache::CacheTtl;
use crate::error::{GeocoderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cache lifetime in seconds (roughly 31 years, i.e. permanent).
pub const DEFAULT_CACHE_DURATION: u64 = 999_999_999;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Cache TTL in seconds.
    pub cache_duration: u64,
    /// Provider used when a request does not pick one. Falls back to the
    /// first entry of `providers`.
    pub default_provider: Option<String>,
    /// Result cap applied to every request unless overridden.
    pub limit: Option<usize>,
    pub http: HttpConfig,
    /// Declaration order is registration order.
    pub providers: Vec<ProviderSpec>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            cache_duration: DEFAULT_CACHE_DURATION,
            default_provider: None,
            limit: None,
            http: HttpConfig::default(),
            providers: Vec::new(),
        }
    }
}

impl GeocoderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GeocoderError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn cache_ttl(&self) -> CacheTtl {
        CacheTtl::from_secs(self.cache_duration)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderSpec> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Checks the parts that do not need any provider to be built.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(GeocoderError::Config("limit must be positive".into()));
        }
        for (i, spec) in self.providers.iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(GeocoderError::Config(format!("provider #{i} has no name")));
            }
            if self.providers[..i].iter().any(|p| p.name == spec.name) {
                return Err(GeocoderError::Config(format!(
                    "provider \"{}\" is declared twice",
                    spec.name
                )));
            }
        }
        if let Some(default) = &self.default_provider {
            if self.provider(default).is_none() {
                return Err(GeocoderError::Config(format!(
                    "default provider \"{default}\" is not declared"
                )));
            }
        }
        Ok(())
    }
}

/// One configured backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Registry name, e.g. `"google_maps"`.
    pub name: String,
    /// Factory to build it with, e.g. `"file"` or `"chain"`. Defaults to the name.
    #[serde(default)]
    pub kind: Option<String>,
    /// Positional constructor arguments (locale, region, credentials, paths).
    #[serde(default)]
    pub args: Vec<String>,
    /// Member provider names, for chain-like kinds.
    #[serde(default)]
    pub members: Vec<String>,
}

impl ProviderSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind.into()),
            args: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(&self.name)
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// HTTP transport handed to network backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpAdapter {
    /// Blocking `reqwest` client (feature `http`).
    #[default]
    Reqwest,
    /// No shared client; backends bring their own transport.
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub adapter: HttpAdapter,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            adapter: HttpAdapter::default(),
            timeout_secs: 15,
            user_agent: concat!("geocoder-rs/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        cache_duration = 999999999

        [http]
        adapter = "reqwest"

        [[providers]]
        name = "chain"
        members = ["google_maps", "geo_plugin"]

        [[providers]]
        name = "bing_maps"
        kind = "file"
        args = ["en-US", "bing.json"]

        [[providers]]
        name = "google_maps"
        kind = "file"
        args = ["google.json"]
    "#;

    #[test]
    fn parses_providers_in_declaration_order() {
        let config = GeocoderConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.cache_duration, 999_999_999);
        assert_eq!(config.http.adapter, HttpAdapter::Reqwest);
        assert_eq!(config.http.timeout_secs, 15);
        let names: Vec<_> = config.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["chain", "bing_maps", "google_maps"]);
        assert_eq!(config.provider("chain").unwrap().kind(), "chain");
        assert_eq!(config.provider("bing_maps").unwrap().arg(1), Some("bing.json"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = GeocoderConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeocoderConfig::default());
        assert_eq!(config.cache_ttl().as_duration().map(|d| d.as_secs()), Some(DEFAULT_CACHE_DURATION));
    }

    #[test]
    fn rejects_inconsistent_configs() {
        assert!(GeocoderConfig::from_toml_str("limit = 0").is_err());
        assert!(GeocoderConfig::from_toml_str("default_provider = \"nope\"").is_err());
        let twice = "[[providers]]\nname = \"a\"\n[[providers]]\nname = \"a\"\n";
        assert!(matches!(
            GeocoderConfig::from_toml_str(twice),
            Err(GeocoderError::Config(_))
        ));
        assert!(matches!(
            GeocoderConfig::from_toml_str("cache_duration = \"soon\""),
            Err(GeocoderError::Toml(_))
        ));
    }
}
