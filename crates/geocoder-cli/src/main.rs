//! geocoder - command-line front end for geocoder-core
//!
//! Loads a TOML configuration, builds the provider aggregator with an
//! in-memory cache and runs one lookup or introspection command.
//!
//! Usage examples
//! --------------
//!
//! - List providers
//!   $ geocoder --config geocoder.toml providers
//!
//! - Forward lookup through the default provider
//!   $ geocoder geocode "Seatle, WA"
//!
//! - Reverse lookup against a named provider, first result only
//!   $ geocoder reverse 38.897957 -77.03656 -p google_maps -l 1
//!
//! - GeoJSON output
//!   $ geocoder geocode "Seatle, WA" --dump geojson
mod args;

use crate::args::{CliArgs, Commands, LookupOpts};
use anyhow::Context;
use clap::Parser;
use geocoder_core::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geocoder_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match args.command {
        Commands::CacheKey { text } => println!("{}", cache_key(&text)),

        Commands::Providers => {
            let geocoder = build(args.config.as_deref())?;
            let providers = geocoder.get_providers();
            let default = providers.default_name();
            if providers.is_empty() {
                println!("No providers configured");
            }
            for (name, provider) in providers.list() {
                let mark = if Some(name) == default { '*' } else { ' ' };
                println!("{mark} {name} ({})", provider.name());
            }
        }

        Commands::Geocode { text, opts } => {
            let geocoder = build(args.config.as_deref())?;
            let staged = request(&geocoder, &opts)?.geocode(text);
            print_results(&staged, &opts)?;
        }

        Commands::Reverse {
            latitude,
            longitude,
            opts,
        } => {
            let geocoder = build(args.config.as_deref())?;
            let staged = request(&geocoder, &opts)?.reverse(latitude, longitude);
            print_results(&staged, &opts)?;
        }
    }

    Ok(())
}

/// Loads the configuration (or defaults) and builds the aggregator.
fn build(config: Option<&str>) -> anyhow::Result<ProviderAggregator> {
    let config = match config {
        Some(path) => GeocoderConfig::from_path(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => GeocoderConfig::default(),
    };
    ProviderAggregator::from_config(
        &config,
        &ProviderFactories::default(),
        Arc::new(MemoryStore::new()),
    )
    .context("building providers")
}

fn request(geocoder: &ProviderAggregator, opts: &LookupOpts) -> anyhow::Result<Request> {
    let mut request = geocoder.request();
    if let Some(name) = &opts.provider {
        request = request.using(name)?;
    }
    if let Some(limit) = opts.limit {
        request = request.limit(limit)?;
    }
    Ok(request)
}

fn print_results(staged: &StagedQuery, opts: &LookupOpts) -> anyhow::Result<()> {
    if let Some(format) = &opts.dump {
        for line in staged.dump(format)? {
            println!("{line}");
        }
        return Ok(());
    }

    let results = staged.get()?;
    if results.is_empty() {
        println!("No results for: {}", staged.query());
        return Ok(());
    }
    for address in &results {
        println!("{}", summary(address));
    }
    Ok(())
}

/// One-line rendering: street, locality, postal code, country, then source.
fn summary(address: &Address) -> String {
    let street = match (address.street_number(), address.street_name()) {
        (Some(number), Some(name)) => Some(format!("{number} {name}")),
        (None, Some(name)) => Some(name.to_owned()),
        _ => None,
    };
    let parts: Vec<String> = [
        street,
        address.locality().map(str::to_owned),
        address.postal_code().map(str::to_owned),
        address
            .country()
            .and_then(|c| c.name().or(c.code()))
            .map(str::to_owned),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut line = if parts.is_empty() {
        "(unnamed)".to_owned()
    } else {
        parts.join(", ")
    };
    if let Some(c) = address.coordinates() {
        line.push_str(&format!(" [{}]", c.canonical()));
    }
    if let Some(p) = address.provided_by() {
        line.push_str(&format!(" <{p}>"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn cache_key_parses_without_a_config() {
        let args = CliArgs::try_parse_from(["geocoder", "cache-key", "Seatle, WA"]).unwrap();
        assert!(matches!(args.command, Commands::CacheKey { ref text } if text == "Seatle, WA"));
    }

    #[test]
    fn reverse_accepts_negative_coordinates() {
        let args =
            CliArgs::try_parse_from(["geocoder", "reverse", "38.897957", "-77.03656", "-l", "1"])
                .unwrap();
        match args.command {
            Commands::Reverse {
                latitude,
                longitude,
                opts,
            } => {
                assert_eq!((latitude, longitude), (38.897957, -77.03656));
                assert_eq!(opts.limit, Some(1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_config_is_reported() {
        let err = build(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("loading configuration"));
        assert!(build(None).unwrap().get_providers().is_empty());
    }
}
