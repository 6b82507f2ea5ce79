// crates/geocoder-core/src/provider/chain.rs
use super::SharedProvider;
use crate::error::Result;
use crate::model::AddressCollection;
use crate::query::{GeocodeQuery, Query, ReverseQuery};
use crate::traits::Provider;
use tracing::{debug, warn};

pub const CHAIN_PROVIDER_NAME: &str = "chain";

/// Meta-provider that asks its members in order.
///
/// A member that fails is logged and skipped; the first non-empty answer
/// wins. When nobody answers the result is empty, never an error.
pub struct Chain {
    name: String,
    members: Vec<SharedProvider>,
}

impl Chain {
    pub fn new(members: Vec<SharedProvider>) -> Self {
        Self::named(CHAIN_PROVIDER_NAME, members)
    }

    pub fn named(name: impl Into<String>, members: Vec<SharedProvider>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn add(&mut self, member: SharedProvider) -> &mut Self {
        self.members.push(member);
        self
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|p| p.name())
    }

    fn first_answer(&self, query: &Query) -> AddressCollection {
        for member in &self.members {
            match member.lookup(query) {
                Ok(results) if results.is_not_empty() => {
                    debug!(chain = %self.name, provider = member.name(), hits = results.len(), "chain member answered");
                    return results;
                }
                Ok(_) => {
                    debug!(chain = %self.name, provider = member.name(), "chain member returned nothing");
                }
                Err(err) => {
                    warn!(chain = %self.name, provider = member.name(), error = %err, "chain member failed, trying next");
                }
            }
        }
        AddressCollection::empty()
    }
}

impl Provider for Chain {
    fn name(&self) -> &str {
        &self.name
    }

    fn geocode_query(&self, query: &GeocodeQuery) -> Result<AddressCollection> {
        Ok(self.first_answer(&Query::Geocode(query.clone())))
    }

    fn reverse_query(&self, query: &ReverseQuery) -> Result<AddressCollection> {
        Ok(self.first_answer(&Query::Reverse(query.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocoderError;
    use crate::model::Address;
    use std::sync::Arc;

    struct Broken;

    impl Provider for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
            Err(GeocoderError::backend("broken", "quota exceeded"))
        }
    }

    struct Empty;

    impl Provider for Empty {
        fn name(&self) -> &str {
            "empty"
        }

        fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
            Ok(AddressCollection::empty())
        }
    }

    struct Answers(&'static str);

    impl Provider for Answers {
        fn name(&self) -> &str {
            self.0
        }

        fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
            Ok(AddressCollection::new(vec![Address::default().with_provided_by(self.0)]))
        }
    }

    #[test]
    fn falls_through_errors_and_empty_members() {
        let chain = Chain::new(vec![
            Arc::new(Broken),
            Arc::new(Empty),
            Arc::new(Answers("google_maps")),
            Arc::new(Answers("geo_plugin")),
        ]);

        let results = chain.geocode_query(&GeocodeQuery::new("Seatle, WA")).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results.first().and_then(Address::provided_by), Some("google_maps"));
    }

    #[test]
    fn unsupported_reverse_is_skipped_not_raised() {
        let chain = Chain::new(vec![Arc::new(Broken), Arc::new(Answers("geo_plugin"))]);
        let results = chain
            .reverse_query(&ReverseQuery::from_coordinates(38.8791981, -76.9818437))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn lists_members_in_order() {
        let chain = Chain::named("fallback", vec![Arc::new(Empty), Arc::new(Broken)]);
        assert_eq!(chain.name(), "fallback");
        assert_eq!(chain.members().collect::<Vec<_>>(), vec!["empty", "broken"]);
    }
}
