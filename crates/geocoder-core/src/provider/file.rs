// crates/geocoder-core/src/provider/file.rs
use crate::error::{GeocoderError, Result};
use crate::loader::open_stream;
use crate::model::{Address, AddressCollection, Coordinates};
use crate::query::{GeocodeQuery, ReverseQuery};
use crate::text::fold_key;
use crate::traits::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// On-disk layout of an offline provider.
///
/// ```json
/// {
///   "geocode": { "1600 Pennsylvania Ave NW, Washington, DC 20500, USA": [ { "locality": "Washington" } ] },
///   "reverse": { "38.897957,-77.03656": [ { "street_number": "1600" } ] }
/// }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProviderFixture {
    #[serde(default)]
    pub geocode: HashMap<String, Vec<Address>>,
    #[serde(default)]
    pub reverse: HashMap<String, Vec<Address>>,
}

/// Offline record/replay backend.
///
/// Forward lookups match the folded query text exactly, reverse lookups the
/// `"lat,lon"` rendering of the coordinates. Unknown input yields an empty
/// collection.
#[derive(Debug)]
pub struct FileProvider {
    name: String,
    geocode: HashMap<String, Vec<Address>>,
    reverse: HashMap<String, Vec<Address>>,
}

impl FileProvider {
    /// Loads a `.json` or `.json.gz` fixture.
    pub fn open(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_stream(path)?;
        let fixture: ProviderFixture = serde_json::from_reader(reader)?;
        let provider = Self::from_fixture(name, fixture)?;
        debug!(
            provider = %provider.name,
            path = %path.display(),
            geocode = provider.geocode.len(),
            reverse = provider.reverse.len(),
            "loaded offline fixture"
        );
        Ok(provider)
    }

    /// Fails if a reverse key is not a `"lat,lon"` pair of numbers.
    pub fn from_fixture(name: impl Into<String>, fixture: ProviderFixture) -> Result<Self> {
        let name = name.into();
        let tag = |rows: Vec<Address>| -> Vec<Address> {
            rows.into_iter()
                .map(|a| a.with_provided_by(name.clone()))
                .collect()
        };
        let geocode = fixture
            .geocode
            .into_iter()
            .map(|(k, v)| (fold_key(&k), tag(v)))
            .collect();
        let reverse = fixture
            .reverse
            .into_iter()
            .map(|(k, v)| reverse_key(&name, &k).map(|key| (key, tag(v))))
            .collect::<Result<_>>()?;
        Ok(Self {
            name,
            geocode,
            reverse,
        })
    }

    fn limited(rows: Option<&Vec<Address>>, limit: Option<usize>) -> AddressCollection {
        let rows = rows.map(Vec::as_slice).unwrap_or_default();
        let take = limit.unwrap_or(rows.len());
        rows.iter().take(take).cloned().collect()
    }
}

impl Provider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn geocode_query(&self, query: &GeocodeQuery) -> Result<AddressCollection> {
        Ok(Self::limited(
            self.geocode.get(&fold_key(query.text())),
            query.limit(),
        ))
    }

    fn reverse_query(&self, query: &ReverseQuery) -> Result<AddressCollection> {
        Ok(Self::limited(
            self.reverse.get(&query.coordinates().canonical()),
            query.limit(),
        ))
    }
}

/// Re-renders a fixture key the way [`Coordinates::canonical`] does, so
/// `"38.8979570, -77.036560"` and `"38.897957,-77.03656"` are the same key.
fn reverse_key(provider: &str, raw: &str) -> Result<String> {
    let parse = |part: &str| part.trim().parse::<f64>().ok();
    raw.split_once(',')
        .and_then(|(lat, lon)| Some(Coordinates::new(parse(lat)?, parse(lon)?).canonical()))
        .ok_or_else(|| {
            GeocoderError::InvalidArgument(format!(
                "provider \"{provider}\": reverse fixture key \"{raw}\" is not \"lat,lon\""
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "geocode": {
            "Obere Donaustrasse 22, Wien, Österreich": [
                { "street_number": "22", "street_name": "Obere Donaustraße", "locality": "Wien", "postal_code": "1020" }
            ]
        },
        "reverse": {
            "38.897957,-77.03656": [
                { "street_number": "1600", "street_name": "Pennsylvania Avenue Northwest" },
                { "street_name": "Ellipse Road Northwest" }
            ]
        }
    }"#;

    fn provider() -> FileProvider {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        FileProvider::open("offline", file.path()).unwrap()
    }

    #[test]
    fn forward_lookup_is_accent_and_case_insensitive() {
        let results = provider()
            .geocode_query(&GeocodeQuery::new("obere donaustrasse 22, wien, osterreich"))
            .unwrap();

        let first = results.first().unwrap();
        assert_eq!(first.street_name(), Some("Obere Donaustraße"));
        assert_eq!(first.provided_by(), Some("offline"));
    }

    #[test]
    fn reverse_lookup_honours_query_limit() {
        let p = provider();
        let q = ReverseQuery::from_coordinates(38.897957, -77.03656);
        assert_eq!(p.reverse_query(&q).unwrap().len(), 2);
        assert_eq!(p.reverse_query(&q.with_limit(1)).unwrap().len(), 1);
    }

    #[test]
    fn reverse_keys_are_normalised() {
        let fixture: ProviderFixture = serde_json::from_str(
            r#"{ "reverse": { " 38.8979570, -77.036560 ": [ { "street_number": "1600" } ] } }"#,
        )
        .unwrap();
        let p = FileProvider::from_fixture("offline", fixture).unwrap();

        let results = p
            .reverse_query(&ReverseQuery::from_coordinates(38.897957, -77.03656))
            .unwrap();
        assert_eq!(results.first().and_then(Address::street_number), Some("1600"));
    }

    #[test]
    fn unparsable_reverse_keys_are_rejected() {
        for key in ["38.897957", "north,west", "1,2,3"] {
            let mut fixture = ProviderFixture::default();
            fixture.reverse.insert(key.to_owned(), Vec::new());
            let err = FileProvider::from_fixture("offline", fixture).unwrap_err();
            assert!(matches!(err, GeocoderError::InvalidArgument(ref msg) if msg.contains(key)));
        }
    }

    #[test]
    fn unknown_input_is_empty() {
        let results = provider().geocode_query(&GeocodeQuery::new("_")).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn malformed_fixture_is_a_json_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = FileProvider::open("offline", file.path()).unwrap_err();
        assert!(matches!(err, GeocoderError::Json(_)));
    }
}
