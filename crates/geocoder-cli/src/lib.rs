//! geocoder-cli
//! ============
//!
//! Command-line interface for the `geocoder-core` provider aggregator.
//!
//! The crate ships a binary (`geocoder`); this library target only carries
//! the overview for rendered docs.
//!
//! Basic usage
//! -----------
//!
//! ```text
//! geocoder --config geocoder.toml providers
//! geocoder geocode "1600 Pennsylvania Ave NW, Washington, DC 20500, USA"
//! geocoder reverse 38.897957 -77.03656 --provider google_maps --limit 1
//! geocoder geocode "Seatle, WA" --dump geojson
//! geocoder cache-key "108-0075 東京都港区港南２丁目１６－３"
//! ```
//!
//! The configuration path can also come from `GEOCODER_CONFIG`. Log output
//! is controlled with `RUST_LOG` (e.g. `RUST_LOG=geocoder_core=debug`).
#![cfg_attr(docsrs, feature(doc_cfg))]
