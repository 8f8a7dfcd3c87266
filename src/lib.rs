pub mod algorithms;
pub mod category_store;
pub mod config;
pub mod config_validator;
pub mod error;
pub mod handlers;
pub mod language;
pub mod middleware;
pub mod quote_store;
pub mod rate_limiter;
pub mod server;
pub mod store;
pub mod svg;
pub mod translation;
pub mod validation;

pub use config::Config;
pub use error::{QuoteError, QuoteResult};
pub use server::create_app;
