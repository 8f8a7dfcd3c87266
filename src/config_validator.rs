use crate::config::Config;
use crate::error::QuoteError;

/// Validates configuration objects for consistency and correctness
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> Result<(), QuoteError> {
        Self::validate_rate_limit("quote", config.quote_rate_limit)?;
        Self::validate_rate_limit("svg", config.svg_rate_limit)?;
        Self::validate_rate_limit("categories", config.categories_rate_limit)?;
        Self::validate_interval("rate limit interval", config.rate_limit_interval_secs)?;
        Self::validate_interval("cleanup interval", config.cleanup_interval_secs)?;
        Self::validate_interval("translation timeout", config.translation_timeout_secs)?;
        Self::validate_endpoints(&config.translation_endpoints)?;

        if !config.data_dir.is_dir() {
            tracing::warn!(
                data_dir = %config.data_dir.display(),
                "Data directory does not exist, endpoints will serve empty data"
            );
        }

        Ok(())
    }

    /// Validates a per-endpoint quota
    pub fn validate_rate_limit(endpoint: &str, quota: u32) -> Result<(), QuoteError> {
        if quota == 0 {
            return Err(QuoteError::Validation(format!(
                "Rate limit for {} must be greater than 0",
                endpoint
            )));
        }
        Ok(())
    }

    pub fn validate_interval(name: &str, secs: u64) -> Result<(), QuoteError> {
        if secs == 0 {
            return Err(QuoteError::Validation(format!("{} must be greater than 0", name)));
        }
        Ok(())
    }

    /// Validates the translation endpoint list
    pub fn validate_endpoints(endpoints: &[String]) -> Result<(), QuoteError> {
        if endpoints.is_empty() {
            return Err(QuoteError::Validation(
                "At least one translation endpoint is required".to_string(),
            ));
        }

        for endpoint in endpoints {
            let url = reqwest::Url::parse(endpoint).map_err(|e| {
                QuoteError::Validation(format!("Invalid translation endpoint '{}': {}", endpoint, e))
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(QuoteError::Validation(format!(
                    "Translation endpoint '{}' must use http or https",
                    endpoint
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::parse_from(["quoter"])).is_ok());
    }

    #[test]
    fn test_invalid_rate_limit() {
        assert!(ConfigValidator::validate_rate_limit("quote", 0).is_err());
        assert!(ConfigValidator::validate_rate_limit("quote", 1).is_ok());

        let config = Config::parse_from(["quoter", "--categories-rate-limit", "0"]);
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_invalid_interval() {
        assert!(ConfigValidator::validate_interval("cleanup interval", 0).is_err());
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(ConfigValidator::validate_endpoints(&[]).is_err());
        assert!(ConfigValidator::validate_endpoints(&["not a url".to_string()]).is_err());
        assert!(ConfigValidator::validate_endpoints(&["ftp://host/translate".to_string()]).is_err());
        assert!(ConfigValidator::validate_endpoints(&["https://host/translate".to_string()]).is_ok());
    }
}
