use crate::algorithms::RateLimitPolicy;
use crate::category_store::CategoryStore;
use crate::config::Config;
use crate::config_validator::ConfigValidator;
use crate::error::QuoteResult;
use crate::handlers::{
    get_categories, get_quote, get_quote_svg, health_check, method_not_allowed, AppState,
    SharedState,
};
use crate::middleware::logging_middleware;
use crate::quote_store::QuoteStore;
use crate::rate_limiter::{RateLimiter, Sweeper};
use crate::translation::TranslationClient;
use axum::routing::get;
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

impl AppState {
    pub fn from_config(config: &Config) -> QuoteResult<Self> {
        let translator = TranslationClient::new(
            config.translation_endpoints.clone(),
            config.translation_timeout(),
        )?;
        let categories = CategoryStore::new(&config.data_dir);

        Ok(Self {
            quotes: QuoteStore::new(categories, Arc::new(translator)),
            quote_limiter: RateLimiter::create("quote", config.rate_limit(config.quote_rate_limit)),
            svg_limiter: RateLimiter::create("quote_svg", config.rate_limit(config.svg_rate_limit)),
            categories_limiter: RateLimiter::create(
                "categories",
                config.rate_limit(config.categories_rate_limit),
            ),
        })
    }
}

/// Build the router around an existing state.
pub fn create_app(state: SharedState) -> Router {
    Router::new()
        .route("/api/quote", get(get_quote).fallback(method_not_allowed))
        .route("/api/quote.svg", get(get_quote_svg).fallback(method_not_allowed))
        .route("/api/categories", get(get_categories).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(logging_middleware)),
        )
}

pub struct Server {
    config: Config,
    state: SharedState,
}

impl Server {
    pub fn new(config: Config) -> QuoteResult<Self> {
        ConfigValidator::validate(&config)?;
        let state = Arc::new(AppState::from_config(&config)?);
        Ok(Self { config, state })
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let sweeper = match self.config.rate_limit_policy {
            RateLimitPolicy::SlidingWindow => Some(Sweeper::spawn(
                self.state.limiters(),
                self.config.cleanup_interval(),
            )),
            RateLimitPolicy::FixedAllotment => None,
        };

        let app = create_app(self.state.clone());
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!("Quote server listening on {}", self.config.bind_addr);
        tracing::info!(data_dir = %self.config.data_dir.display(), "Serving quotes");
        tracing::info!(policy = ?self.config.rate_limit_policy, "Rate limiting enabled");

        // Run server with graceful shutdown
        let served = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
        }

        served?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}
