// crates/geocoder-core/src/provider/mod.rs

//! # Provider Registry
//!
//! Named set of geocoding backends. Built once from configuration; updates go
//! through [`ProviderRegistry::register`] on an owned copy, so a registry
//! already shared behind an `Arc` never changes under its readers.

use crate::error::{GeocoderError, Result};
use crate::traits::Provider;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

mod chain;
mod file;

pub use chain::{Chain, CHAIN_PROVIDER_NAME};
pub use file::{FileProvider, ProviderFixture};

/// Shared handle to a backend.
pub type SharedProvider = Arc<dyn Provider>;

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    /// Insertion order is the introspection order.
    entries: Vec<(String, SharedProvider)>,
    default: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `provider` under `name`, replacing any previous entry in place.
    pub fn register(&mut self, name: impl Into<String>, provider: SharedProvider) -> &mut Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => {
                debug!(provider = %name, "replacing registered provider");
                slot.1 = provider;
            }
            None => {
                debug!(provider = %name, "registering provider");
                self.entries.push((name, provider));
            }
        }
        self
    }

    /// Registers a provider under its own [`Provider::name`].
    pub fn register_provider(&mut self, provider: SharedProvider) -> &mut Self {
        let name = provider.name().to_owned();
        self.register(name, provider)
    }

    pub fn resolve(&self, name: &str) -> Result<SharedProvider> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| Arc::clone(p))
            .ok_or_else(|| GeocoderError::ProviderNotFound(name.to_owned()))
    }

    /// Marks `name` as the default. The provider must already be registered.
    pub fn set_default(&mut self, name: &str) -> Result<&mut Self> {
        if !self.contains(name) {
            return Err(GeocoderError::ProviderNotFound(name.to_owned()));
        }
        self.default = Some(name.to_owned());
        Ok(self)
    }

    /// Name of the explicit default, or of the first registered provider.
    pub fn default_name(&self) -> Option<&str> {
        self.default
            .as_deref()
            .or_else(|| self.entries.first().map(|(n, _)| n.as_str()))
    }

    /// Provider behind [`default_name`](Self::default_name).
    pub fn default_provider(&self) -> Result<SharedProvider> {
        let name = self
            .default_name()
            .ok_or_else(|| GeocoderError::ProviderNotFound("<default>".to_owned()))?;
        self.resolve(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Name → provider pairs in registration order.
    pub fn list(&self) -> impl Iterator<Item = (&str, &SharedProvider)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .field("default", &self.default_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddressCollection;
    use crate::query::GeocodeQuery;

    struct Named(&'static str);

    impl Provider for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
            Ok(AddressCollection::empty())
        }
    }

    fn registry() -> ProviderRegistry {
        let mut reg = ProviderRegistry::new();
        reg.register_provider(Arc::new(Named("chain")))
            .register_provider(Arc::new(Named("bing_maps")))
            .register_provider(Arc::new(Named("google_maps")));
        reg
    }

    #[test]
    fn default_is_first_registered_until_marked() {
        let mut reg = registry();
        assert_eq!(reg.default_provider().unwrap().name(), "chain");

        reg.set_default("google_maps").unwrap();
        assert_eq!(reg.default_provider().unwrap().name(), "google_maps");
    }

    #[test]
    fn default_registry_is_empty() {
        let reg = ProviderRegistry::default();
        assert!(reg.is_empty());
        assert_eq!(reg.default_name(), None);
    }

    #[test]
    fn unknown_names_are_reported() {
        let mut reg = registry();
        assert!(matches!(
            reg.resolve("not-a-real-provider"),
            Err(GeocoderError::ProviderNotFound(n)) if n == "not-a-real-provider"
        ));
        assert!(reg.set_default("nope").is_err());
        assert!(ProviderRegistry::new().default_provider().is_err());
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut reg = registry();
        reg.register("chain", Arc::new(Named("replacement")));

        assert_eq!(reg.len(), 3);
        assert_eq!(reg.names(), vec!["chain", "bing_maps", "google_maps"]);
        assert_eq!(reg.resolve("chain").unwrap().name(), "replacement");
    }

    #[test]
    fn clones_are_independent() {
        let original = registry();
        let mut copy = original.clone();
        copy.register_provider(Arc::new(Named("maxmind_binary")));

        assert!(!original.contains("maxmind_binary"));
        assert!(copy.contains("maxmind_binary"));
    }
}
