//! Workspace umbrella for the demos: re-exports `geocoder-core`.

pub use geocoder_core::*;
