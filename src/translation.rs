//! Best-effort text translation.
//!
//! [`TranslationClient`] walks a fixed list of endpoints in order and returns
//! the first successful answer. There is no retry within an endpoint.

use crate::error::{QuoteError, QuoteResult};
use crate::language::Language;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Public translation workers used when none are configured.
pub const DEFAULT_ENDPOINTS: [&str; 4] = [
    "https://emergency-tas-backup1.uncoverclimatix.workers.dev/translate",
    "https://655.mtis.workers.dev/translate",
    "https://collonoid.tasport1.workers.dev/translate",
    "https://t72.mouth-ploy-evoke.workers.dev/translate",
];

#[derive(Debug, Clone)]
pub struct TranslateRequest<'a> {
    pub source_lang: Language,
    pub target_lang: Language,
    pub text: &'a str,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: TranslateRequest<'_>) -> QuoteResult<String>;
}

/// Response bodies seen from translation workers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranslationBody {
    Text(String),
    Flat(Translated),
    Nested { response: Translated },
}

#[derive(Debug, Deserialize)]
struct Translated {
    #[serde(alias = "translatedText")]
    translated_text: String,
}

impl TranslationBody {
    fn into_text(self) -> String {
        match self {
            TranslationBody::Text(text) => text,
            TranslationBody::Flat(t) | TranslationBody::Nested { response: t } => t.translated_text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslationClient {
    client: reqwest::Client,
    endpoints: Vec<String>,
}

impl TranslationClient {
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> QuoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }

    async fn try_endpoint(&self, endpoint: &str, request: &TranslateRequest<'_>) -> Result<String, String> {
        let response = self
            .client
            .get(endpoint)
            .query(&[
                ("text", request.text),
                ("source_lang", request.source_lang.code()),
                ("target_lang", request.target_lang.code()),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status {}", status));
        }

        response
            .json::<TranslationBody>()
            .await
            .map(TranslationBody::into_text)
            .map_err(|e| format!("unreadable body: {}", e))
    }
}

#[async_trait]
impl Translator for TranslationClient {
    async fn translate(&self, request: TranslateRequest<'_>) -> QuoteResult<String> {
        for endpoint in &self.endpoints {
            match self.try_endpoint(endpoint, &request).await {
                Ok(text) => {
                    tracing::debug!(endpoint = %endpoint, lang = %request.target_lang, "Translation succeeded");
                    return Ok(text);
                }
                Err(reason) => {
                    tracing::error!(endpoint = %endpoint, reason = %reason, "Translation endpoint failed");
                }
            }
        }

        Err(QuoteError::TranslationUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(text: &str) -> TranslateRequest<'_> {
        TranslateRequest {
            source_lang: Language::En,
            target_lang: Language::Fr,
            text,
        }
    }

    fn client(endpoints: Vec<String>) -> TranslationClient {
        TranslationClient::new(endpoints, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_first_endpoint_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate"))
            .and(query_param("text", "Hello"))
            .and(query_param("source_lang", "en"))
            .and(query_param("target_lang", "fr"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "translatedText": "Bonjour" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client(vec![format!("{}/translate", server.uri())]);
        assert_eq!(client.translate(request("Hello")).await.unwrap(), "Bonjour");
    }

    #[tokio::test]
    async fn test_falls_over_to_later_endpoint_and_stops() {
        let failing = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&failing)
            .await;

        let working = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "response": { "translated_text": "Bonjour" } })),
            )
            .expect(1)
            .mount(&working)
            .await;

        let never = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json("unused"))
            .expect(0)
            .mount(&never)
            .await;

        let client = client(vec![
            format!("{}/translate", failing.uri()),
            format!("{}/translate", working.uri()),
            format!("{}/translate", never.uri()),
        ]);
        assert_eq!(client.translate(request("Hello")).await.unwrap(), "Bonjour");
    }

    #[tokio::test]
    async fn test_all_endpoints_failing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let garbage = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&garbage)
            .await;

        let client = client(vec![
            format!("{}/translate", server.uri()),
            format!("{}/translate", garbage.uri()),
            // Nothing listens here, so this is a transport error.
            "http://127.0.0.1:9/translate".to_string(),
        ]);
        let result = client.translate(request("Hello")).await;
        assert!(matches!(result, Err(QuoteError::TranslationUnavailable)));
    }

    #[tokio::test]
    async fn test_no_endpoints() {
        let result = client(Vec::new()).translate(request("Hello")).await;
        assert!(matches!(result, Err(QuoteError::TranslationUnavailable)));
    }

    #[test]
    fn test_body_shapes() {
        let bodies = [
            r#""Bonjour""#,
            r#"{"translated_text": "Bonjour"}"#,
            r#"{"translatedText": "Bonjour"}"#,
            r#"{"response": {"translated_text": "Bonjour"}}"#,
        ];
        for body in bodies {
            let parsed: TranslationBody = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.into_text(), "Bonjour");
        }
    }
}
