// crates/geocoder-core/src/traits.rs
use crate::error::{GeocoderError, Result};
use crate::model::{Address, AddressCollection};
use crate::query::{GeocodeQuery, Query, ReverseQuery};

/// A geocoding backend.
///
/// Implementors are text-search services, IP geolocation services, offline
/// databases or meta-providers such as [`Chain`](crate::provider::Chain).
/// The aggregator only relies on this surface.
///
/// Calls are synchronous and block until the backend answers. Any timeout
/// handling belongs to the implementation.
///
/// # Examples
/// ```rust
/// use geocoder_core::prelude::*;
///
/// struct Fixed;
///
/// impl Provider for Fixed {
///     fn name(&self) -> &str { "fixed" }
///
///     fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
///         Ok(AddressCollection::new(vec![Address::default()]))
///     }
/// }
///
/// let fixed = Fixed;
/// assert_eq!(fixed.geocode_query(&GeocodeQuery::new("x")).unwrap().len(), 1);
/// assert!(fixed.reverse_query(&ReverseQuery::from_coordinates(0.0, 0.0)).is_err());
/// ```
pub trait Provider: Send + Sync {
    /// Unique registry name, e.g. `"chain"` or `"google_maps"`.
    fn name(&self) -> &str;

    fn geocode_query(&self, query: &GeocodeQuery) -> Result<AddressCollection>;

    /// Backends without reverse support keep the default.
    fn reverse_query(&self, _query: &ReverseQuery) -> Result<AddressCollection> {
        Err(GeocoderError::FunctionNotFound {
            provider: self.name().to_owned(),
            function: "reverse_query",
        })
    }

    /// Dispatches a staged [`Query`] to the matching method.
    fn lookup(&self, query: &Query) -> Result<AddressCollection> {
        match query {
            Query::Geocode(q) => self.geocode_query(q),
            Query::Reverse(q) => self.reverse_query(q),
        }
    }
}

/// A named output serializer for single addresses.
pub trait Dumper: Send + Sync {
    /// Format name the dumper is registered under (e.g. `"geojson"`).
    fn name(&self) -> &str;

    fn dump(&self, address: &Address) -> Result<String>;
}
