//! Translation store: per-language lookup tables and key lookup.

use crate::i18n::strings::{CHINESE_STRINGS, ENGLISH_STRINGS};
use crate::i18n::Language;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::OnceLock;

/// Flat mapping of translation key to template text for one language.
///
/// Tables are built once and never mutated; a language switch swaps the
/// whole table reference.
#[derive(Debug)]
pub struct TranslationTable {
    language: Language,
    entries: HashMap<&'static str, &'static str>,
}

impl TranslationTable {
    fn from_pairs(language: Language, pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            language,
            entries: pairs.iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static CHINESE_TABLE: OnceLock<TranslationTable> = OnceLock::new();
static ENGLISH_TABLE: OnceLock<TranslationTable> = OnceLock::new();

/// Access point for the preloaded translation tables.
pub struct TranslationStore;

impl TranslationStore {
    /// Get the table for a language.
    pub fn load(language: Language) -> &'static TranslationTable {
        if language == Language::ENGLISH {
            ENGLISH_TABLE
                .get_or_init(|| TranslationTable::from_pairs(Language::ENGLISH, ENGLISH_STRINGS))
        } else {
            CHINESE_TABLE
                .get_or_init(|| TranslationTable::from_pairs(Language::CHINESE, CHINESE_STRINGS))
        }
    }

    /// Get the table for a raw code. Unknown codes fall back to Chinese.
    pub fn load_code(code: &str) -> &'static TranslationTable {
        Self::load(Language::resolve(code))
    }
}

/// Look up `key` in `table` and fill in `{name}` placeholders.
///
/// A key missing from the table yields the key itself, so untranslated
/// text stays visible. Every occurrence of a placeholder is replaced.
pub fn lookup<V: Display>(table: &TranslationTable, key: &str, params: &[(&str, V)]) -> String {
    let mut text = match table.get(key) {
        Some(template) => template.to_string(),
        None => return key.to_string(),
    };

    for (name, value) in params {
        let placeholder = format!("{{{}}}", name);
        if text.contains(&placeholder) {
            text = text.replace(&placeholder, &value.to_string());
        }
    }

    text
}

/// Look up a key that takes no parameters.
pub fn lookup_plain(table: &TranslationTable, key: &str) -> String {
    lookup::<&str>(table, key, &[])
}
