use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::category_store::Category;
use crate::error::{ErrorBody, QuoteError, QuoteResult};
use crate::middleware::ClientAddress;
use crate::quote_store::{Quote, QuoteStore};
use crate::rate_limiter::RateLimiter;
use crate::svg::{render_quote, Theme};
use crate::validation::{CategoriesQuery, QuoteQuery, RequestValidator};

/// Shared application state
pub type SharedState = Arc<AppState>;

/// Stores plus one limiter per endpoint.
pub struct AppState {
    pub quotes: QuoteStore,
    pub quote_limiter: RateLimiter,
    pub svg_limiter: RateLimiter,
    pub categories_limiter: RateLimiter,
}

impl AppState {
    pub fn limiters(&self) -> Vec<RateLimiter> {
        vec![
            self.quote_limiter.clone(),
            self.svg_limiter.clone(),
            self.categories_limiter.clone(),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tracked_clients: Vec<TrackedClients>,
}

#[derive(Debug, Serialize)]
pub struct TrackedClients {
    pub limiter: &'static str,
    pub clients: usize,
}

/// Random quote as JSON
pub async fn get_quote(
    State(state): State<SharedState>,
    client: ClientAddress,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> QuoteResult<Json<Quote>> {
    state.quote_limiter.check(client.as_deref())?;

    let query = RequestValidator::query(query)?;
    let filter = RequestValidator::quote_filter(&query)?;

    let quote = state.quotes.get_random_quote(&filter).await?;
    Ok(Json(quote))
}

/// Random quote rendered as an SVG image
pub async fn get_quote_svg(
    State(state): State<SharedState>,
    client: ClientAddress,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Response {
    match render_svg(&state, &client, query).await {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => e.into_text_response(),
    }
}

async fn render_svg(
    state: &AppState,
    client: &ClientAddress,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> QuoteResult<String> {
    state.svg_limiter.check(client.as_deref())?;

    let query = RequestValidator::query(query)?;
    let filter = RequestValidator::quote_filter(&query)?;
    let theme = Theme::parse(query.theme.as_deref());

    let quote = state.quotes.get_random_quote(&filter).await?;
    Ok(render_quote(&quote, theme))
}

/// Full category list for a language
pub async fn get_categories(
    State(state): State<SharedState>,
    client: ClientAddress,
    query: Result<Query<CategoriesQuery>, QueryRejection>,
) -> QuoteResult<Json<Vec<Category>>> {
    state.categories_limiter.check(client.as_deref())?;

    let query = RequestValidator::query(query)?;

    let categories = state
        .quotes
        .categories()
        .list(query.lang.as_deref())
        .await?;
    Ok(Json(categories))
}

/// Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Result<Json<HealthResponse>, QuoteError> {
    let tracked_clients = state
        .limiters()
        .iter()
        .map(|limiter| -> QuoteResult<TrackedClients> {
            Ok(TrackedClients {
                limiter: limiter.name(),
                clients: limiter.tracked_addresses()?,
            })
        })
        .collect::<QuoteResult<Vec<_>>>()?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tracked_clients,
    }))
}

/// Fallback for any method other than GET on the API routes
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method Not Allowed")),
    )
}
