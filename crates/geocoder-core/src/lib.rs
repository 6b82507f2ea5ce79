// crates/geocoder-core/src/lib.rs

//! # geocoder-core
//!
//! Aggregates geocoding backends behind one service: providers are resolved
//! by name from configuration, lookups go through a content-addressed cache,
//! result sets can be limited per request and dumped into named formats.
//!
//! The crate does no geocoding of its own. Backends implement
//! [`Provider`](traits::Provider); the bundled [`Chain`](provider::Chain)
//! and [`FileProvider`](provider::FileProvider) cover fallback and offline
//! replay.

pub mod aggregator;
pub mod builder;
pub mod cache;
pub mod config;
pub mod dumper;
pub mod error;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod query;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::aggregator::{ProviderAggregator, Request, StagedQuery, AGGREGATOR_NAME};
pub use crate::error::{CacheError, GeocoderError, Result};
pub use crate::model::{Address, AddressCollection, AdminLevel, Bounds, Coordinates, Country};
pub use crate::query::{GeocodeQuery, Query, ReverseQuery};
pub use crate::traits::{Dumper, Provider};
