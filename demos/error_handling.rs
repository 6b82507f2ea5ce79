//! Error handling example for geocoder-rs
//!
//! This example demonstrates the failure modes callers should expect

use geocoder_rs::prelude::*;
use std::sync::Arc;

/// Backend that is always over quota.
struct OverQuota;

impl Provider for OverQuota {
    fn name(&self) -> &str {
        "over_quota"
    }

    fn geocode_query(&self, _query: &GeocodeQuery) -> Result<AddressCollection> {
        Err(GeocoderError::backend("over_quota", "daily quota exceeded"))
    }
}

fn main() -> Result<()> {
    println!("=== Geocoder Error Handling Example ===\n");

    let mut registry = ProviderRegistry::new();
    registry.register_provider(Arc::new(FileProvider::from_fixture(
        "offline",
        ProviderFixture::default(),
    )?));
    registry.register_provider(Arc::new(OverQuota));
    let geocoder = ProviderAggregator::new(
        registry,
        QueryCache::new(Arc::new(MemoryStore::new()), CacheTtl::Forever),
    );

    // Example 1: Unknown provider names fail when the request is built
    println!("--- Example 1: Unknown provider ---");
    match geocoder.using("not-a-real-provider") {
        Ok(_) => println!("unexpected: provider found"),
        Err(e) => println!("✓ {e}"),
    }

    // Example 2: Limits must be positive
    println!("\n--- Example 2: Zero limit ---");
    match geocoder.limit(0) {
        Ok(_) => println!("unexpected: limit accepted"),
        Err(e) => println!("✓ {e}"),
    }

    // Example 3: Unknown dumpers are rejected before any lookup
    println!("\n--- Example 3: Unknown dump format ---");
    match geocoder.geocode("Seatle, WA").dump("kml") {
        Ok(_) => println!("unexpected: dumper found"),
        Err(e) => println!("✓ {e}"),
    }

    // Example 4: Backend failures reach the caller unchanged
    println!("\n--- Example 4: Backend error ---");
    match geocoder.using("over_quota")?.geocode("Seatle, WA").get() {
        Ok(_) => println!("unexpected: lookup succeeded"),
        Err(GeocoderError::Backend { provider, source }) => {
            println!("✓ {provider} failed: {source}")
        }
        Err(e) => return Err(e),
    }

    // Example 5: Operations a backend does not support
    println!("\n--- Example 5: Unsupported reverse lookup ---");
    match geocoder.using("over_quota")?.reverse(48.2, 16.37).get() {
        Err(e @ GeocoderError::FunctionNotFound { .. }) => println!("✓ {e}"),
        other => println!("unexpected: {other:?}"),
    }

    // Example 6: Invalid input
    println!("\n--- Example 6: Out-of-range coordinates ---");
    match geocoder.reverse(123.0, 0.0).get() {
        Ok(_) => println!("unexpected: coordinates accepted"),
        Err(e) => println!("✓ {e}"),
    }

    // Example 7: No results is not an error
    println!("\n--- Example 7: Empty result set ---");
    let results = geocoder.geocode("_").get()?;
    println!("✓ {} results, nothing cached", results.len());

    println!("\n=== All error cases handled ===");
    Ok(())
}
