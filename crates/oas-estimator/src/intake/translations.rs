use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::domain::Language;

/// Flat key to text table for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    language: Language,
    entries: HashMap<String, String>,
}

impl TranslationCatalog {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    pub fn from_entries<I, K, V>(language: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            language,
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Reads `<dir>/<lang>.json`, a JSON object of string values.
    pub fn load(dir: &Path, language: Language) -> Result<Self, TranslationError> {
        let path = dir.join(format!("{}.json", language.code()));
        let raw = fs::read_to_string(&path).map_err(|source| TranslationError::Io {
            path: path.clone(),
            source,
        })?;
        let entries: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| TranslationError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), entries = entries.len(), "loaded translations");
        Ok(Self { language, entries })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Missing keys resolve to the key itself so gaps stay visible.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }
}

/// Both language tables, shared read-only across requests.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    en: TranslationCatalog,
    fr: TranslationCatalog,
}

impl Translations {
    pub fn new(en: TranslationCatalog, fr: TranslationCatalog) -> Self {
        Self { en, fr }
    }

    pub fn load(dir: &Path) -> Result<Self, TranslationError> {
        Ok(Self {
            en: TranslationCatalog::load(dir, Language::En)?,
            fr: TranslationCatalog::load(dir, Language::Fr)?,
        })
    }

    pub fn catalog(&self, language: Language) -> &TranslationCatalog {
        match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("failed to read translations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid translation table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
