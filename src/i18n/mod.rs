//! UI strings in Spanish, English and Portuguese
//!
//! Dictionaries are nested JSON objects compiled into the binary and looked up
//! by dot-path (`"buttons.download"`). A key missing from the active language
//! falls back to English, and a key missing everywhere is returned as-is so
//! gaps are visible in the UI.
//!
//! # Example
//! ```ignore
//! let t = Translator::new(Language::Pt);
//! assert_eq!(t.t("buttons.clear"), "Limpar");
//! ```

mod defaults;

pub use defaults::default_document;

use log::warn;
use serde_json::Value;

const EN_JSON: &str = include_str!("../../assets/locales/en.json");
const ES_JSON: &str = include_str!("../../assets/locales/es.json");
const PT_JSON: &str = include_str!("../../assets/locales/pt.json");

// ─────────────────────────────────────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────────────────────────────────────

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
}

impl Language {
    /// Languages in menu order.
    pub fn all() -> &'static [Language] {
        &[Language::Es, Language::En, Language::Pt]
    }

    /// Two-letter code, also the stored representation.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// Short toolbar label.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Es => "ES",
            Language::En => "EN",
            Language::Pt => "PT",
        }
    }

    /// Native name for the language menu.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Es => "Español",
            Language::En => "English",
            Language::Pt => "Português",
        }
    }

    /// Parse a language code. Unknown codes give `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            "pt" => Some(Language::Pt),
            _ => None,
        }
    }

    fn dictionary_source(&self) -> &'static str {
        match self {
            Language::Es => ES_JSON,
            Language::En => EN_JSON,
            Language::Pt => PT_JSON,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Translator
// ─────────────────────────────────────────────────────────────────────────────

/// Key lookup for one language.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    dictionary: Value,
    fallback: Value,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            dictionary: parse_dictionary(language),
            fallback: parse_dictionary(Language::En),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate a dot-path key.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        lookup(&self.dictionary, key)
            .or_else(|| lookup(&self.fallback, key))
            .unwrap_or(key)
    }
}

fn parse_dictionary(language: Language) -> Value {
    match serde_json::from_str(language.dictionary_source()) {
        Ok(value) => value,
        Err(e) => {
            warn!("Locale '{}' is not valid JSON: {}", language.code(), e);
            Value::Null
        }
    }
}

/// Walk `path` through nested objects; only string leaves count.
fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))?
        .as_str()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
