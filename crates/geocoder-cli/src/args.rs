use clap::{Args, Parser, Subcommand};

/// CLI arguments for geocoder-cli
#[derive(Debug, Parser)]
#[command(
    name = "geocoder",
    version,
    about = "Forward and reverse geocoding through configured providers"
)]
pub struct CliArgs {
    /// Path to the TOML configuration (providers, cache duration, limit)
    #[arg(short = 'c', long = "config", env = "GEOCODER_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the lookup commands.
#[derive(Debug, Args)]
pub struct LookupOpts {
    /// Provider to use instead of the configured default
    #[arg(short = 'p', long = "provider")]
    pub provider: Option<String>,

    /// Return at most this many results
    #[arg(short = 'l', long = "limit")]
    pub limit: Option<usize>,

    /// Print results through a dumper (e.g. geojson)
    #[arg(short = 'd', long = "dump")]
    pub dump: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List configured providers, default first marked with '*'
    Providers,

    /// Geocode a free-text address or IP
    Geocode {
        text: String,

        #[command(flatten)]
        opts: LookupOpts,
    },

    /// Reverse geocode a coordinate pair
    Reverse {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,

        #[arg(allow_hyphen_values = true)]
        longitude: f64,

        #[command(flatten)]
        opts: LookupOpts,
    },

    /// Print the cache key a piece of query text maps to
    CacheKey { text: String },
}
