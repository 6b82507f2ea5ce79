// crates/geocoder-core/src/dumper/geojson.rs
use crate::error::Result;
use crate::model::Address;
use crate::traits::Dumper;
use serde_json::{json, Map, Value};

/// Renders an address as a GeoJSON `Feature` with a `Point` geometry.
///
/// Empty properties are left out. Addresses without coordinates get a
/// `null` geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJson;

impl GeoJson {
    fn properties(address: &Address) -> Map<String, Value> {
        let mut props = Map::new();
        let mut put = |key: &str, value: Option<&str>| {
            if let Some(v) = value {
                props.insert(key.to_owned(), Value::String(v.to_owned()));
            }
        };

        put("streetName", address.street_name());
        put("streetNumber", address.street_number());
        put("postalCode", address.postal_code());
        put("locality", address.locality());
        put("subLocality", address.sub_locality());
        put("country", address.country().and_then(|c| c.name()));
        put("countryCode", address.country().and_then(|c| c.code()));
        put("timezone", address.timezone());
        put("providedBy", address.provided_by());

        if !address.admin_levels().is_empty() {
            let levels: Map<String, Value> = address
                .admin_levels()
                .iter()
                .map(|l| {
                    (
                        l.level.to_string(),
                        json!({ "name": l.name, "code": l.code, "level": l.level }),
                    )
                })
                .collect();
            props.insert("adminLevels".to_owned(), Value::Object(levels));
        }
        props
    }
}

impl Dumper for GeoJson {
    fn name(&self) -> &str {
        "geojson"
    }

    fn dump(&self, address: &Address) -> Result<String> {
        let geometry = match address.coordinates() {
            Some(c) => json!({ "type": "Point", "coordinates": [c.longitude, c.latitude] }),
            None => Value::Null,
        };

        let mut feature = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": Value::Object(Self::properties(address)),
        });

        if let Some(b) = address.bounds {
            feature["bounds"] = json!({
                "south": b.south,
                "west": b.west,
                "north": b.north,
                "east": b.east,
            });
        }

        Ok(serde_json::to_string(&feature)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdminLevel, Coordinates, Country};

    #[test]
    fn feature_carries_point_and_camel_case_properties() {
        let address = Address {
            coordinates: Some(Coordinates::new(38.897957, -77.03656)),
            street_number: Some("1600".into()),
            street_name: Some("Pennsylvania Avenue Northwest".into()),
            admin_levels: vec![AdminLevel {
                level: 1,
                name: "District of Columbia".into(),
                code: Some("DC".into()),
            }],
            country: Some(Country {
                name: Some("United States".into()),
                code: Some("US".into()),
            }),
            ..Address::default()
        };

        let out: Value = serde_json::from_str(&GeoJson.dump(&address).unwrap()).unwrap();

        assert_eq!(out["type"], "Feature");
        assert_eq!(out["geometry"]["coordinates"][0], -77.03656);
        assert_eq!(out["properties"]["streetNumber"], "1600");
        assert_eq!(out["properties"]["countryCode"], "US");
        assert_eq!(out["properties"]["adminLevels"]["1"]["name"], "District of Columbia");
        assert!(out["properties"].get("postalCode").is_none());
        assert!(out.get("bounds").is_none());
    }

    #[test]
    fn missing_coordinates_give_null_geometry() {
        let out: Value = serde_json::from_str(&GeoJson.dump(&Address::default()).unwrap()).unwrap();
        assert!(out["geometry"].is_null());
        assert_eq!(out["properties"], json!({}));
    }
}
