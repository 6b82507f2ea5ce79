//! geocoder-core prelude: bring common types and traits into scope for demos and tests.

#![allow(unused_imports)]

pub use crate::aggregator::{ProviderAggregator, Request, StagedQuery, AGGREGATOR_NAME};
pub use crate::builder::{BuildContext, ProviderFactories, ProviderFactory, FILE_PROVIDER_KIND};
pub use crate::cache::{
    cache_key, scoped_cache_key, CacheStore, CacheTtl, MemoryStore, QueryCache, CACHE_KEY_PREFIX,
};
pub use crate::config::{GeocoderConfig, HttpAdapter, HttpConfig, ProviderSpec};
pub use crate::dumper::{DumperRegistry, GeoJson};
pub use crate::error::{CacheError, GeocoderError, Result};
pub use crate::model::{Address, AddressCollection, AdminLevel, Bounds, Coordinates, Country};
pub use crate::provider::{
    Chain, FileProvider, ProviderFixture, ProviderRegistry, SharedProvider, CHAIN_PROVIDER_NAME,
};
pub use crate::query::{GeocodeQuery, Query, ReverseQuery};
pub use crate::traits::{Dumper, Provider};
