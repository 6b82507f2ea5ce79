//! Basic usage example for geocoder-rs
//!
//! This example demonstrates how to:
//! - Build the aggregator from a TOML configuration
//! - Geocode and reverse geocode through the default provider
//! - Override the provider and limit per request
//! - Dump results as GeoJSON

use geocoder_rs::prelude::*;
use std::sync::Arc;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/crates/geocoder-core/tests/fixtures");

fn main() -> Result<()> {
    println!("=== Geocoder Basic Usage Example ===\n");

    let toml = format!(
        r#"
cache_duration = 3600
default_provider = "google_maps"

[http]
adapter = "none"

[[providers]]
name = "google_maps"
kind = "file"
args = ["en-US", "{FIXTURES}/google_maps.json"]

[[providers]]
name = "geo_plugin"
kind = "file"
args = ["{FIXTURES}/geo_plugin.json"]
"#
    );
    let config = GeocoderConfig::from_toml_str(&toml)?;
    let geocoder = ProviderAggregator::from_config(
        &config,
        &ProviderFactories::default(),
        Arc::new(MemoryStore::new()),
    )?;

    // Example 1: Introspection
    println!("--- Example 1: Providers ---");
    for name in geocoder.get_providers().names() {
        println!("- {name}");
    }
    println!("Default: {}\n", geocoder.get_provider()?.name());

    // Example 2: Forward lookup
    println!("--- Example 2: Geocode an address ---");
    let results = geocoder
        .geocode("1600 Pennsylvania Ave NW, Washington, DC 20500, USA")
        .get()?;
    if let Some(first) = results.first() {
        println!(
            "{} {}, {} {}",
            first.street_number().unwrap_or_default(),
            first.street_name().unwrap_or_default(),
            first.locality().unwrap_or_default(),
            first.postal_code().unwrap_or_default(),
        );
    }
    println!();

    // Example 3: Reverse lookup, first result only
    println!("--- Example 3: Reverse geocode with a limit ---");
    let results = geocoder.limit(1)?.reverse(38.897957, -77.03656).get()?;
    println!("{} result(s)", results.len());
    for address in &results {
        println!("- {:?}", address.street_name());
    }
    println!();

    // Example 4: Per-request provider override
    println!("--- Example 4: Ask geo_plugin directly ---");
    let results = geocoder.using("geo_plugin")?.geocode("72.229.28.185").get()?;
    for address in &results {
        println!(
            "- {:?} via {:?}",
            address.country().and_then(Country::code),
            address.provided_by()
        );
    }
    println!();

    // Example 5: GeoJSON
    println!("--- Example 5: Dump as GeoJSON ---");
    for feature in geocoder.geocode("Seatle, WA").dump("geojson")? {
        println!("{feature}");
    }

    println!("\n✓ Done");
    Ok(())
}
