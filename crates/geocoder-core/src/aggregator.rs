// crates/geocoder-core/src/aggregator.rs

//! # Provider Aggregator
//!
//! The service callers talk to. It owns the provider registry, the dumper
//! registry and the query cache, and hands out immutable [`Request`]
//! descriptors: picking a provider or a limit returns a new descriptor
//! instead of mutating the shared service, so one aggregator can serve
//! concurrent callers.
//!
//! ```rust
//! use geocoder_core::prelude::*;
//! use std::sync::Arc;
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register_provider(Arc::new(FileProvider::from_fixture(
//!     "offline",
//!     ProviderFixture::default(),
//! )?));
//!
//! let geocoder = ProviderAggregator::new(registry, QueryCache::new(Arc::new(MemoryStore::new()), CacheTtl::Forever));
//!
//! let results = geocoder.using("offline")?.limit(1)?.geocode("Seatle, WA").get()?;
//! assert!(results.is_empty());
//! # Ok::<(), GeocoderError>(())
//! ```

use crate::builder::ProviderFactories;
use crate::cache::{CacheStore, QueryCache};
use crate::config::GeocoderConfig;
use crate::dumper::DumperRegistry;
use crate::error::{GeocoderError, Result};
use crate::model::{Address, AddressCollection};
use crate::provider::{ProviderRegistry, SharedProvider};
use crate::query::{GeocodeQuery, Query, ReverseQuery};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

/// Name the aggregator reports for itself, distinct from any provider name.
pub const AGGREGATOR_NAME: &str = "provider_aggregator";

#[derive(Clone)]
pub struct ProviderAggregator {
    registry: Arc<ProviderRegistry>,
    dumpers: Arc<DumperRegistry>,
    cache: QueryCache,
    default_limit: Option<NonZeroUsize>,
}

impl ProviderAggregator {
    /// Aggregator with the built-in dumpers and no result limit.
    pub fn new(registry: ProviderRegistry, cache: QueryCache) -> Self {
        Self {
            registry: Arc::new(registry),
            dumpers: Arc::new(DumperRegistry::default()),
            cache,
            default_limit: None,
        }
    }

    /// Builds providers, cache policy and default limit from configuration.
    pub fn from_config(
        config: &GeocoderConfig,
        factories: &ProviderFactories,
        store: Arc<dyn CacheStore>,
    ) -> Result<Self> {
        let registry = factories.build_registry(config)?;
        let aggregator = Self::new(registry, QueryCache::new(store, config.cache_ttl()));
        match config.limit {
            Some(limit) => aggregator.with_default_limit(limit),
            None => Ok(aggregator),
        }
    }

    pub fn with_dumpers(mut self, dumpers: DumperRegistry) -> Self {
        self.dumpers = Arc::new(dumpers);
        self
    }

    /// Limit applied to requests that do not set their own.
    pub fn with_default_limit(mut self, limit: usize) -> Result<Self> {
        self.default_limit = Some(positive(limit)?);
        Ok(self)
    }

    /// Registers a backend under its own name, bypassing configuration.
    ///
    /// Requests created earlier keep seeing the registry they were created
    /// with.
    pub fn register_provider(&mut self, provider: SharedProvider) -> &mut Self {
        Arc::make_mut(&mut self.registry).register_provider(provider);
        self
    }

    pub fn get_name(&self) -> &'static str {
        AGGREGATOR_NAME
    }

    /// Descriptor targeting the default provider.
    pub fn request(&self) -> Request {
        Request {
            aggregator: self.clone(),
            provider: None,
            limit: self.default_limit,
        }
    }

    /// Descriptor targeting `name`. Fails if `name` is not registered.
    pub fn using(&self, name: &str) -> Result<Request> {
        self.request().using(name)
    }

    /// Descriptor returning at most `limit` results. `limit` must be positive.
    pub fn limit(&self, limit: usize) -> Result<Request> {
        self.request().limit(limit)
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.default_limit.map(NonZeroUsize::get)
    }

    pub fn geocode(&self, text: impl Into<String>) -> StagedQuery {
        self.request().geocode(text)
    }

    pub fn reverse(&self, latitude: f64, longitude: f64) -> StagedQuery {
        self.request().reverse(latitude, longitude)
    }

    pub fn geocode_query(&self, query: GeocodeQuery) -> StagedQuery {
        self.request().geocode_query(query)
    }

    pub fn reverse_query(&self, query: ReverseQuery) -> StagedQuery {
        self.request().reverse_query(query)
    }

    /// The default provider.
    pub fn get_provider(&self) -> Result<SharedProvider> {
        self.registry.default_provider()
    }

    pub fn get_providers(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn dumpers(&self) -> &DumperRegistry {
        &self.dumpers
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

impl fmt::Debug for ProviderAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAggregator")
            .field("registry", &self.registry)
            .field("dumpers", &self.dumpers)
            .field("ttl", &self.cache.ttl())
            .field("default_limit", &self.default_limit)
            .finish()
    }
}

fn positive(limit: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(limit).ok_or(GeocoderError::InvalidLimit(limit))
}

/// Immutable per-request selection of provider and limit.
#[derive(Clone, Debug)]
pub struct Request {
    aggregator: ProviderAggregator,
    /// `None` = the registry default, resolved at execution.
    provider: Option<String>,
    limit: Option<NonZeroUsize>,
}

impl Request {
    pub fn using(self, name: &str) -> Result<Self> {
        if !self.aggregator.registry.contains(name) {
            return Err(GeocoderError::ProviderNotFound(name.to_owned()));
        }
        Ok(Self {
            provider: Some(name.to_owned()),
            ..self
        })
    }

    pub fn limit(self, limit: usize) -> Result<Self> {
        Ok(Self {
            limit: Some(positive(limit)?),
            ..self
        })
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit.map(NonZeroUsize::get)
    }

    /// Provider this request dispatches to.
    pub fn get_provider(&self) -> Result<SharedProvider> {
        match &self.provider {
            Some(name) => self.aggregator.registry.resolve(name),
            None => self.aggregator.registry.default_provider(),
        }
    }

    pub fn geocode(&self, text: impl Into<String>) -> StagedQuery {
        self.stage(GeocodeQuery::new(text).into())
    }

    pub fn reverse(&self, latitude: f64, longitude: f64) -> StagedQuery {
        self.stage(ReverseQuery::from_coordinates(latitude, longitude).into())
    }

    pub fn geocode_query(&self, query: GeocodeQuery) -> StagedQuery {
        self.stage(query.into())
    }

    pub fn reverse_query(&self, query: ReverseQuery) -> StagedQuery {
        self.stage(query.into())
    }

    fn stage(&self, query: Query) -> StagedQuery {
        StagedQuery {
            request: self.clone(),
            query,
        }
    }
}

/// A query bound to a request, not yet executed.
#[derive(Clone, Debug)]
pub struct StagedQuery {
    request: Request,
    query: Query,
}

impl StagedQuery {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Runs the query through the cache against the selected provider and
    /// applies the request limit. Every call executes again; only the cache
    /// can short-circuit the provider.
    ///
    /// Lookups against the default provider share the plain query key. A
    /// provider picked with [`Request::using`] caches under its own key so an
    /// override always reaches that provider's answers.
    pub fn get(&self) -> Result<AddressCollection> {
        self.query.validate()?;
        let provider = self.request.get_provider()?;
        let registry = &self.request.aggregator.registry;
        let scope = self
            .request
            .provider
            .as_deref()
            .filter(|name| registry.default_name() != Some(*name));
        let mut results = self
            .request
            .aggregator
            .cache
            .remember_scoped(&self.query, scope, |q| provider.lookup(q))?;

        if let Some(limit) = self.request.limit {
            results.truncate(limit.get());
        }
        debug!(provider = provider.name(), query = %self.query, hits = results.len(), "lookup done");
        Ok(results)
    }

    /// Same sequence as [`get`](Self::get), as a plain vector.
    pub fn all(&self) -> Result<Vec<Address>> {
        self.get().map(AddressCollection::into_vec)
    }

    /// Serializes the results with the dumper registered for `format`.
    ///
    /// The format is checked before the lookup runs.
    pub fn dump(&self, format: &str) -> Result<Vec<String>> {
        let dumper = self.request.aggregator.dumpers.resolve(format)?;
        self.get()?.iter().map(|a| dumper.dump(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheTtl, MemoryStore};
    use crate::traits::Provider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        name: &'static str,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Provider for Counting {
        fn name(&self) -> &str {
            self.name
        }

        fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..3)
                .map(|_| Address::default().with_provided_by(self.name))
                .collect())
        }
    }

    fn aggregator(providers: &[Arc<Counting>]) -> ProviderAggregator {
        let mut registry = ProviderRegistry::new();
        for p in providers {
            registry.register_provider(p.clone());
        }
        ProviderAggregator::new(
            registry,
            QueryCache::new(Arc::new(MemoryStore::new()), CacheTtl::Forever),
        )
    }

    #[test]
    fn requests_do_not_leak_into_the_service() {
        let geocoder = aggregator(&[Counting::new("chain"), Counting::new("google_maps")]);

        let limited = geocoder.using("google_maps").unwrap().limit(1).unwrap();

        assert_eq!(limited.get_limit(), Some(1));
        assert_eq!(geocoder.get_limit(), None);
        assert_eq!(limited.get_provider().unwrap().name(), "google_maps");
        assert_eq!(geocoder.get_provider().unwrap().name(), "chain");
    }

    #[test]
    fn zero_limit_is_rejected() {
        let geocoder = aggregator(&[Counting::new("chain")]);
        assert!(matches!(geocoder.limit(0), Err(GeocoderError::InvalidLimit(0))));
        assert!(geocoder.clone().with_default_limit(0).is_err());
    }

    #[test]
    fn unknown_dumper_skips_the_lookup() {
        let chain = Counting::new("chain");
        let geocoder = aggregator(&[chain.clone()]);

        let err = geocoder.geocode("Seatle, WA").dump("test").unwrap_err();

        assert!(matches!(err, GeocoderError::InvalidDumper(_)));
        assert_eq!(chain.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn registering_a_provider_does_not_affect_existing_requests() {
        let mut geocoder = aggregator(&[Counting::new("chain")]);
        let before = geocoder.request();

        geocoder.register_provider(Counting::new("maxmind_binary"));

        assert!(geocoder.using("maxmind_binary").is_ok());
        assert!(before.using("maxmind_binary").is_err());
    }

    #[test]
    fn invalid_queries_fail_before_the_provider() {
        let chain = Counting::new("chain");
        let geocoder = aggregator(&[chain.clone()]);

        assert!(matches!(
            geocoder.geocode("  ").get(),
            Err(GeocoderError::InvalidArgument(_))
        ));
        assert_eq!(chain.calls.load(Ordering::SeqCst), 0);
    }

    /// Answers with the locale it was asked for.
    struct EchoLocale {
        calls: AtomicUsize,
    }

    impl Provider for EchoLocale {
        fn name(&self) -> &str {
            "echo"
        }

        fn geocode_query(&self, query: &GeocodeQuery) -> Result<AddressCollection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AddressCollection::new(vec![Address {
                locality: Some(query.locale().unwrap_or("none").to_owned()),
                ..Address::default()
            }]))
        }
    }

    #[test]
    fn text_that_looks_like_a_hint_is_cached_apart_from_the_hint() {
        let echo = Arc::new(EchoLocale {
            calls: AtomicUsize::new(0),
        });
        let mut registry = ProviderRegistry::new();
        registry.register_provider(echo.clone());
        let geocoder = ProviderAggregator::new(
            registry,
            QueryCache::new(Arc::new(MemoryStore::new()), CacheTtl::Forever),
        );

        let plain = geocoder.geocode("Wien|locale=de-DE").get().unwrap();
        let hinted = geocoder
            .geocode_query(GeocodeQuery::new("Wien").with_locale("de-DE"))
            .get()
            .unwrap();

        assert_eq!(plain.first().and_then(Address::locality), Some("none"));
        assert_eq!(hinted.first().and_then(Address::locality), Some("de-DE"));
        assert_eq!(echo.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn overrides_do_not_read_the_default_providers_cache() {
        let chain = Counting::new("chain");
        let google = Counting::new("google_maps");
        let geocoder = aggregator(&[chain.clone(), google.clone()]);

        let shared = geocoder.geocode("Seatle, WA").get().unwrap();
        let overridden = geocoder.using("google_maps").unwrap().geocode("Seatle, WA").get().unwrap();
        geocoder.using("chain").unwrap().geocode("Seatle, WA").get().unwrap();

        assert_eq!(shared.first().and_then(Address::provided_by), Some("chain"));
        assert_eq!(overridden.first().and_then(Address::provided_by), Some("google_maps"));
        assert_eq!(chain.calls.load(Ordering::SeqCst), 1);
        assert_eq!(google.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn name_is_constant() {
        assert_eq!(aggregator(&[]).get_name(), "provider_aggregator");
    }
}
