use crate::error::QuoteError;
use crate::quote_store::QuoteFilter;
use axum::extract::{rejection::QueryRejection, Query};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Query string of `/api/quote` and `/api/quote.svg`.
///
/// `lang` and `theme` carry no length limit: unknown languages are reported
/// by the language check and unknown themes fall back to light.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuoteQuery {
    #[validate(length(max = 200, message = "author must be at most 200 characters"))]
    pub author: Option<String>,
    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,
    pub lang: Option<String>,
    pub theme: Option<String>,
}

/// Query string of `/api/categories`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    pub lang: Option<String>,
}

/// Request validation utilities
pub struct RequestValidator;

impl RequestValidator {
    /// Unwrap an extracted query string. A query string that does not
    /// deserialize (repeated keys, for one) is a 400, never an empty filter.
    pub fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, QuoteError> {
        query
            .map(|Query(q)| q)
            .map_err(|rejection| QuoteError::Validation(rejection.body_text()))
    }

    pub fn validate<T: Validate>(query: &T) -> Result<(), QuoteError> {
        query
            .validate()
            .map_err(|e| QuoteError::Validation(describe(&e)))
    }

    /// Validate and turn a quote query into store filters. Empty values count
    /// as absent; everything else is passed through verbatim.
    pub fn quote_filter(query: &QuoteQuery) -> Result<QuoteFilter, QuoteError> {
        Self::validate(query)?;

        Ok(QuoteFilter {
            author: clean(&query.author),
            category: clean(&query.category),
            lang: clean(&query.lang),
        })
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

fn clean(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}
