use crate::category_store::CategoryStore;
use crate::error::{QuoteError, QuoteResult};
use crate::language::Language;
use crate::store::load_json_or_default;
use crate::translation::{TranslateRequest, Translator};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

/// Quotes grouped by category id.
pub type QuotesCollection = HashMap<String, Vec<Quote>>;

/// Filters for [`QuoteStore::get_random_quote`]. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub author: Option<String>,
    pub category: Option<String>,
    pub lang: Option<String>,
}

#[derive(Clone)]
pub struct QuoteStore {
    quotes_path: PathBuf,
    categories: CategoryStore,
    translator: Arc<dyn Translator>,
}

impl QuoteStore {
    pub fn new(categories: CategoryStore, translator: Arc<dyn Translator>) -> Self {
        Self {
            quotes_path: categories.data_dir().join("quotes.json"),
            categories,
            translator,
        }
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub async fn load_quotes(&self) -> QuotesCollection {
        load_json_or_default(&self.quotes_path).await
    }

    pub async fn get_random_quote(&self, filter: &QuoteFilter) -> QuoteResult<Quote> {
        let lang = Language::parse(filter.lang.as_deref())?;

        let quotes = self.load_quotes().await;
        let category = self
            .categories
            .get_category(non_empty(&filter.category), lang)
            .await;

        let candidates = category
            .and_then(|c| quotes.get(&c.id))
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut quote = pick_quote(candidates, non_empty(&filter.author))?;

        if !lang.is_default() {
            quote.quote = self.translate_or_keep(&quote.quote, lang).await;
        }

        Ok(quote)
    }

    async fn translate_or_keep(&self, text: &str, lang: Language) -> String {
        let request = TranslateRequest {
            source_lang: Language::DEFAULT,
            target_lang: lang,
            text,
        };

        match self.translator.translate(request).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, lang = %lang, "Serving untranslated quote");
                text.to_string()
            }
        }
    }
}

/// Exact, case-sensitive author filter followed by a uniform random pick.
pub fn pick_quote(quotes: &[Quote], author: Option<&str>) -> QuoteResult<Quote> {
    let filtered: Vec<&Quote> = match author {
        Some(author) => {
            let matching: Vec<&Quote> = quotes.iter().filter(|q| q.author == author).collect();
            if matching.is_empty() {
                return Err(QuoteError::NoQuotesForAuthor(author.to_string()));
            }
            matching
        }
        None => quotes.iter().collect(),
    };

    filtered
        .choose(&mut rand::thread_rng())
        .map(|q| (*q).clone())
        .ok_or(QuoteError::NoQuotesFound)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
