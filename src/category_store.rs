use crate::error::QuoteResult;
use crate::language::Language;
use crate::store::{load_json, load_json_or_default};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// On-disk shapes: `"Love"`, `{"name": "Love"}` or `{"id": "love", "name": "Amour"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Name(String),
    Entry { id: Option<String>, name: String },
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawCategory::deserialize(deserializer)? {
            RawCategory::Name(name) => Category::new(name.clone(), name),
            RawCategory::Entry { id, name } => Category::new(id.unwrap_or_else(|| name.clone()), name),
        })
    }
}

/// Reads `categories.json` and its `categories.<lang>.json` translations.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    data_dir: PathBuf,
}

impl CategoryStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, lang: Language) -> PathBuf {
        if lang.is_default() {
            self.data_dir.join("categories.json")
        } else {
            self.data_dir.join(format!("categories.{}.json", lang.code()))
        }
    }

    /// Validate `lang` and list its categories.
    pub async fn list(&self, lang: Option<&str>) -> QuoteResult<Vec<Category>> {
        let lang = Language::parse(lang)?;
        Ok(self.get_all_categories(lang).await)
    }

    /// All categories for `lang`. Never fails: unusable files give an empty list.
    pub async fn get_all_categories(&self, lang: Language) -> Vec<Category> {
        if !lang.is_default() {
            let localized = self.path_for(lang);
            match load_json(&localized).await {
                Ok(Some(categories)) => return categories,
                Ok(None) => {
                    tracing::debug!(lang = %lang, "No localized categories, using default list");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Localized categories unusable");
                    return Vec::new();
                }
            }
        }

        load_json_or_default(&self.path_for(Language::DEFAULT)).await
    }

    /// The category matching `expected_id`, or a random one. `None` when the list is empty.
    pub async fn get_category(&self, expected_id: Option<&str>, lang: Language) -> Option<Category> {
        let categories = self.get_all_categories(lang).await;
        select_category(&categories, expected_id)
    }
}

/// Case-insensitive id match, falling back to a uniform random pick.
pub fn select_category(categories: &[Category], expected_id: Option<&str>) -> Option<Category> {
    let wanted = expected_id.filter(|id| !id.is_empty());

    wanted
        .and_then(|wanted| {
            let wanted = wanted.to_lowercase();
            categories.iter().find(|c| c.id.to_lowercase() == wanted)
        })
        .or_else(|| categories.choose(&mut rand::thread_rng()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use crate::store::test_support::DataDir;

    fn sample() -> Vec<Category> {
        vec![
            Category::new("Category 1", "Category 1"),
            Category::new("Category 2", "Category 2"),
            Category::new("Category 3", "Category 3"),
        ]
    }

    #[test]
    fn test_exact_and_case_insensitive_match() {
        let categories = sample();
        assert_eq!(
            select_category(&categories, Some("Category 2")),
            Some(Category::new("Category 2", "Category 2"))
        );
        assert_eq!(
            select_category(&categories, Some("category 1")),
            Some(Category::new("Category 1", "Category 1"))
        );
    }

    #[test]
    fn test_unknown_or_empty_id_picks_from_store() {
        let categories = sample();
        for expected in [Some("NonExistent"), Some(""), None] {
            for _ in 0..20 {
                let picked = select_category(&categories, expected).unwrap();
                assert!(categories.contains(&picked));
            }
        }
    }

    #[test]
    fn test_empty_store_resolves_nothing() {
        assert_eq!(select_category(&[], Some("Any Category")), None);
        assert_eq!(select_category(&[], None), None);
    }

    #[test]
    fn test_accepts_all_file_shapes() {
        let parsed: Vec<Category> = serde_json::from_str(
            r#"["Love", {"name": "Life"}, {"id": "wisdom", "name": "Sagesse"}]"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                Category::new("Love", "Love"),
                Category::new("Life", "Life"),
                Category::new("wisdom", "Sagesse"),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_or_malformed_file_is_empty() {
        let dir = DataDir::new();
        let store = CategoryStore::new(dir.path());
        assert!(store.get_all_categories(Language::En).await.is_empty());

        dir.write("categories.json", "{not json");
        assert!(store.get_all_categories(Language::En).await.is_empty());
        assert_eq!(store.get_category(Some("x"), Language::En).await, None);
    }

    #[tokio::test]
    async fn test_localized_list_with_default_fallback() {
        let dir = DataDir::new();
        dir.write("categories.json", r#"[{"id": "love", "name": "Love"}]"#)
            .write("categories.fr.json", r#"[{"id": "love", "name": "Amour"}]"#);
        let store = CategoryStore::new(dir.path());

        assert_eq!(
            store.get_all_categories(Language::Fr).await,
            vec![Category::new("love", "Amour")]
        );
        assert_eq!(
            store.get_all_categories(Language::De).await,
            vec![Category::new("love", "Love")]
        );
    }

    #[tokio::test]
    async fn test_list_rejects_unsupported_language() {
        let dir = DataDir::new();
        dir.write("categories.json", r#"["Love"]"#);
        let store = CategoryStore::new(dir.path());

        assert!(matches!(
            store.list(Some("xx")).await,
            Err(QuoteError::UnsupportedLanguage(code)) if code == "xx"
        ));
        assert_eq!(store.list(None).await.unwrap().len(), 1);
    }
}
