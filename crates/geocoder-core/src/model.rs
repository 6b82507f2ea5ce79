// crates/geocoder-core/src/model.rs
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Canonical `"lat,lon"` rendering used for cache keys and fixtures.
    pub fn canonical(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A bounding box (south, west, north, east).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }
}

/// One administrative level (state, county, ...). Level 1 is the broadest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminLevel {
    pub level: u8,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl AdminLevel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Country {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// A normalized address as returned by a provider.
///
/// Every field is optional: providers routinely return partial data and a
/// missing component is not an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub sub_locality: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Ordered from the broadest level down.
    #[serde(default)]
    pub admin_levels: Vec<AdminLevel>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Name of the provider that produced this record.
    #[serde(default)]
    pub provided_by: Option<String>,
}

impl Address {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn street_number(&self) -> Option<&str> {
        self.street_number.as_deref()
    }

    pub fn street_name(&self) -> Option<&str> {
        self.street_name.as_deref()
    }

    pub fn sub_locality(&self) -> Option<&str> {
        self.sub_locality.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn admin_levels(&self) -> &[AdminLevel] {
        &self.admin_levels
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    pub fn provided_by(&self) -> Option<&str> {
        self.provided_by.as_deref()
    }

    /// Returns a copy tagged with the given provider name.
    pub fn with_provided_by(mut self, provider: impl Into<String>) -> Self {
        self.provided_by = Some(provider.into());
        self
    }
}

/// Ordered result set of a lookup. Order is the provider's return order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressCollection {
    addresses: Vec<Address>,
}

impl AddressCollection {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self { addresses }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<&Address> {
        self.addresses.first()
    }

    pub fn get(&self, index: usize) -> Option<&Address> {
        self.addresses.get(index)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.addresses.iter()
    }

    /// All addresses as a slice.
    pub fn all(&self) -> &[Address] {
        &self.addresses
    }

    /// New collection with the addresses matching `predicate`, order kept.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&Address) -> bool,
    {
        Self::new(
            self.addresses
                .iter()
                .filter(|a| predicate(a))
                .cloned()
                .collect(),
        )
    }

    /// Keeps at most `max` addresses.
    pub fn truncate(&mut self, max: usize) {
        self.addresses.truncate(max);
    }

    pub fn into_vec(self) -> Vec<Address> {
        self.addresses
    }
}

impl From<Vec<Address>> for AddressCollection {
    fn from(addresses: Vec<Address>) -> Self {
        Self::new(addresses)
    }
}

impl FromIterator<Address> for AddressCollection {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for AddressCollection {
    type Item = Address;
    type IntoIter = std::vec::IntoIter<Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.into_iter()
    }
}

impl<'a> IntoIterator for &'a AddressCollection {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn street(name: &str) -> Address {
        Address {
            street_name: Some(name.to_owned()),
            ..Address::default()
        }
    }

    #[test]
    fn filter_keeps_provider_order() {
        let results = AddressCollection::new(vec![
            street("Pennsylvania Avenue Northwest"),
            street("Pennsylvania Avenue Southeast"),
            street("H Street Northwest"),
        ]);

        let north = results.filter(|a| a.street_name().is_some_and(|s| s.contains("Northwest")));

        assert_eq!(north.len(), 2);
        assert_eq!(north.first().and_then(Address::street_name), Some("Pennsylvania Avenue Northwest"));
    }

    #[test]
    fn collection_serializes_as_a_plain_array() {
        let results = AddressCollection::new(vec![street("Obere Donaustraße")]);
        let json = serde_json::to_value(&results).unwrap();
        assert!(json.is_array());
        let back: AddressCollection = serde_json::from_value(json).unwrap();
        assert_eq!(back, results);
    }
}
