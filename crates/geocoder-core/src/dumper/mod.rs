// crates/geocoder-core/src/dumper/mod.rs
use crate::error::{GeocoderError, Result};
use crate::model::AddressCollection;
use crate::traits::Dumper;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

mod geojson;

pub use geojson::GeoJson;

/// Format name → serializer. Names are matched case-insensitively.
#[derive(Clone)]
pub struct DumperRegistry {
    dumpers: BTreeMap<String, Arc<dyn Dumper>>,
}

impl DumperRegistry {
    /// Registry without any format.
    pub fn empty() -> Self {
        Self {
            dumpers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, dumper: Arc<dyn Dumper>) -> &mut Self {
        self.dumpers
            .insert(dumper.name().to_ascii_lowercase(), dumper);
        self
    }

    pub fn resolve(&self, format: &str) -> Result<Arc<dyn Dumper>> {
        self.dumpers
            .get(&format.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| GeocoderError::InvalidDumper(format.to_owned()))
    }

    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.dumpers.keys().map(String::as_str)
    }

    /// Serializes every address with the dumper registered for `format`.
    pub fn dump(&self, format: &str, results: &AddressCollection) -> Result<Vec<String>> {
        let dumper = self.resolve(format)?;
        results.iter().map(|a| dumper.dump(a)).collect()
    }
}

impl Default for DumperRegistry {
    /// Registry with the built-in `geojson` format.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(GeoJson));
        registry
    }
}

impl fmt::Debug for DumperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.formats()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;

    #[test]
    fn unknown_format_is_rejected_without_partial_output() {
        let registry = DumperRegistry::default();
        let results = AddressCollection::new(vec![Address::default()]);

        let err = registry.dump("not-a-real-format", &results).unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidDumper(f) if f == "not-a-real-format"));
    }

    #[test]
    fn formats_are_case_insensitive() {
        let registry = DumperRegistry::default();
        assert!(registry.resolve("GeoJSON").is_ok());
        assert_eq!(registry.formats().collect::<Vec<_>>(), vec!["geojson"]);
    }

    #[test]
    fn one_string_per_address() {
        let registry = DumperRegistry::default();
        let results = AddressCollection::new(vec![Address::default(), Address::default()]);
        assert_eq!(registry.dump("geojson", &results).unwrap().len(), 2);
    }
}
