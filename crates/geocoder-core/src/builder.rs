// crates/geocoder-core/src/builder.rs

//! # Provider Builder
//!
//! Turns [`GeocoderConfig`] into a [`ProviderRegistry`]. Each configured
//! provider names a `kind`; the kind selects a constructor registered in
//! [`ProviderFactories`]. Chains are assembled last, from the providers
//! built in the first pass.

use crate::config::{GeocoderConfig, HttpAdapter, HttpConfig, ProviderSpec};
use crate::error::{GeocoderError, Result};
use crate::provider::{Chain, FileProvider, ProviderRegistry, SharedProvider, CHAIN_PROVIDER_NAME};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Factory kind of [`FileProvider`].
pub const FILE_PROVIDER_KIND: &str = "file";

/// Constructor for one provider kind.
pub type ProviderFactory = fn(&ProviderSpec, &BuildContext) -> Result<SharedProvider>;

/// Shared resources available to factories.
#[derive(Clone, Debug, Default)]
pub struct BuildContext {
    #[cfg(feature = "http")]
    http: Option<reqwest::blocking::Client>,
}

impl BuildContext {
    /// Builds the shared transport selected by `[http]`.
    pub fn from_http_config(http: &HttpConfig) -> Result<Self> {
        match http.adapter {
            HttpAdapter::None => Ok(Self::default()),
            HttpAdapter::Reqwest => Self::with_reqwest(http),
        }
    }

    #[cfg(feature = "http")]
    fn with_reqwest(http: &HttpConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(http.timeout_secs))
            .user_agent(http.user_agent.clone())
            .build()?;
        Ok(Self { http: Some(client) })
    }

    #[cfg(not(feature = "http"))]
    fn with_reqwest(_http: &HttpConfig) -> Result<Self> {
        debug!("'http' feature disabled, providers get no shared client");
        Ok(Self::default())
    }

    /// Shared blocking client, if the `reqwest` adapter is configured.
    #[cfg(feature = "http")]
    pub fn http_client(&self) -> Option<&reqwest::blocking::Client> {
        self.http.as_ref()
    }
}

/// Kind name → constructor.
#[derive(Clone)]
pub struct ProviderFactories {
    factories: HashMap<String, ProviderFactory>,
}

impl Default for ProviderFactories {
    /// Built-in `file` kind. `chain` is always handled by the builder.
    fn default() -> Self {
        let mut factories = Self {
            factories: HashMap::new(),
        };
        factories.register(FILE_PROVIDER_KIND, build_file_provider);
        factories
    }
}

impl ProviderFactories {
    pub fn register(&mut self, kind: impl Into<String>, factory: ProviderFactory) -> &mut Self {
        self.factories.insert(kind.into(), factory);
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    fn build(&self, spec: &ProviderSpec, ctx: &BuildContext) -> Result<SharedProvider> {
        let factory = self.factories.get(spec.kind()).ok_or_else(|| {
            GeocoderError::Config(format!(
                "provider \"{}\" has unknown kind \"{}\"",
                spec.name,
                spec.kind()
            ))
        })?;
        factory(spec, ctx)
    }

    /// Builds every configured provider, registering them in declaration
    /// order and applying `default_provider`.
    pub fn build_registry(&self, config: &GeocoderConfig) -> Result<ProviderRegistry> {
        config.validate()?;
        let ctx = BuildContext::from_http_config(&config.http)?;

        let mut built: HashMap<&str, SharedProvider> = HashMap::new();
        for spec in config.providers.iter().filter(|s| !is_chain(s)) {
            built.insert(spec.name.as_str(), self.build(spec, &ctx)?);
        }

        let mut registry = ProviderRegistry::new();
        for spec in &config.providers {
            let provider = if is_chain(spec) {
                build_chain(spec, config, &built)?
            } else {
                // Every non-chain spec was built above.
                match built.get(spec.name.as_str()) {
                    Some(p) => Arc::clone(p),
                    None => return Err(GeocoderError::ProviderNotFound(spec.name.clone())),
                }
            };
            registry.register(spec.name.clone(), provider);
        }

        if let Some(default) = &config.default_provider {
            registry.set_default(default)?;
        }
        debug!(providers = ?registry.names(), default = ?registry.default_name(), "provider registry built");
        Ok(registry)
    }
}

impl fmt::Debug for ProviderFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

fn is_chain(spec: &ProviderSpec) -> bool {
    spec.kind() == CHAIN_PROVIDER_NAME
}

fn build_chain(
    spec: &ProviderSpec,
    config: &GeocoderConfig,
    built: &HashMap<&str, SharedProvider>,
) -> Result<SharedProvider> {
    if spec.members.is_empty() {
        return Err(GeocoderError::Config(format!(
            "chain \"{}\" has no members",
            spec.name
        )));
    }
    let members = spec
        .members
        .iter()
        .map(|member| match built.get(member.as_str()) {
            Some(p) => Ok(Arc::clone(p)),
            None if config.provider(member).is_some_and(is_chain) => Err(GeocoderError::Config(
                format!("chain \"{}\" cannot contain chain \"{member}\"", spec.name),
            )),
            None => Err(GeocoderError::Config(format!(
                "chain \"{}\" refers to undeclared provider \"{member}\"",
                spec.name
            ))),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Arc::new(Chain::named(spec.name.clone(), members)))
}

fn build_file_provider(spec: &ProviderSpec, _ctx: &BuildContext) -> Result<SharedProvider> {
    // The fixture path is the last argument; leading ones (locale, region) are ignored.
    let path = spec.args.last().ok_or_else(|| {
        GeocoderError::Config(format!(
            "file provider \"{}\" needs a fixture path argument",
            spec.name
        ))
    })?;
    Ok(Arc::new(FileProvider::open(spec.name.clone(), path)?))
}
