//! Offline chain example for geocoder-rs
//!
//! Builds a chain over two file-backed providers and shows how the chain
//! falls through to the next member when the first has no answer, and how
//! the cache short-circuits repeated lookups.

use geocoder_rs::prelude::*;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("crates/geocoder-core/tests/fixtures");

    let google: SharedProvider = Arc::new(FileProvider::open(
        "google_maps",
        fixtures.join("google_maps.json"),
    )?);
    let geo_plugin: SharedProvider = Arc::new(FileProvider::open(
        "geo_plugin",
        fixtures.join("geo_plugin.json"),
    )?);

    let mut registry = ProviderRegistry::new();
    registry.register_provider(Arc::new(Chain::new(vec![google.clone(), geo_plugin.clone()])));
    registry.register_provider(google);
    registry.register_provider(geo_plugin);

    let store = Arc::new(MemoryStore::new());
    let geocoder = ProviderAggregator::new(registry, QueryCache::new(store.clone(), CacheTtl::Forever));

    for text in ["Seatle, WA", "72.229.28.185", "nowhere at all"] {
        let results = geocoder.geocode(text).get()?;
        let source = results.first().and_then(Address::provided_by).unwrap_or("-");
        println!("{text:<20} {} result(s), answered by {source}", results.len());
    }

    println!("\nCache entries: {}", store.len());
    println!("Key for \"Seatle, WA\": {}", cache_key("Seatle, WA"));
    Ok(())
}
