//! Supported language codes.
//!
//! This is the only place the set is defined; category loading and the
//! translation step both go through [`Language::parse`].

use crate::error::{QuoteError, QuoteResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
}

impl Language {
    pub const DEFAULT: Language = Language::En;

    const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
    ];

    /// Parse an optional code. Absent or blank means the default language.
    pub fn parse(code: Option<&str>) -> QuoteResult<Self> {
        let code = match code.map(str::trim) {
            None | Some("") => return Ok(Self::DEFAULT),
            Some(code) => code,
        };

        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| QuoteError::UnsupportedLanguage(code.to_string()))
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    pub fn supported() -> impl Iterator<Item = Language> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Fails with [`QuoteError::UnsupportedLanguage`] unless `code` is supported.
pub fn validate_language(code: &str) -> QuoteResult<Language> {
    Language::parse(Some(code))
}
