use crate::algorithms::RateLimitPolicy;
use crate::rate_limiter::RateLimitOptions;
use crate::translation::DEFAULT_ENDPOINTS;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Every option can also be set through the environment (or a `.env` file).
#[derive(Debug, Clone, Parser)]
#[command(name = "quoter", version, about = "Serves random quotes as JSON or SVG")]
pub struct Config {
    /// Server bind address
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Directory holding quotes.json and categories*.json
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Rate limiting algorithm
    #[arg(long, env = "RATE_LIMIT_POLICY", value_enum, default_value_t = RateLimitPolicy::FixedAllotment)]
    pub rate_limit_policy: RateLimitPolicy,

    /// Rate limit window in seconds (sliding window policy)
    #[arg(long, env = "RATE_LIMIT_INTERVAL", default_value = "60")]
    pub rate_limit_interval_secs: u64,

    /// Requests per client for /api/quote
    #[arg(long, env = "QUOTE_RATE_LIMIT", default_value = "100")]
    pub quote_rate_limit: u32,

    /// Requests per client for /api/quote.svg
    #[arg(long, env = "SVG_RATE_LIMIT", default_value = "50")]
    pub svg_rate_limit: u32,

    /// Requests per client for /api/categories
    #[arg(long, env = "CATEGORIES_RATE_LIMIT", default_value = "100")]
    pub categories_rate_limit: u32,

    /// Rate limiter cleanup interval in seconds
    #[arg(long, env = "CLEANUP_INTERVAL", default_value = "60")]
    pub cleanup_interval_secs: u64,

    /// Translation endpoints, tried in order
    #[arg(
        long = "translation-endpoint",
        env = "TRANSLATION_ENDPOINTS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ENDPOINTS.map(String::from)
    )]
    pub translation_endpoints: Vec<String>,

    /// Timeout for one translation request, in seconds
    #[arg(long, env = "TRANSLATION_TIMEOUT", default_value = "10")]
    pub translation_timeout_secs: u64,
}

impl Config {
    /// Load configuration from command line arguments and environment variables
    pub fn load() -> Self {
        Config::parse()
    }

    pub fn rate_limit(&self, unique_token_per_interval: u32) -> RateLimitOptions {
        RateLimitOptions {
            interval: Duration::from_secs(self.rate_limit_interval_secs),
            unique_token_per_interval,
            policy: self.rate_limit_policy,
        }
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_secs(self.translation_timeout_secs)
    }
}
