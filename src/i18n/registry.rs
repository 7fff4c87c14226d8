//! Language registry: Single source of truth for all supported UI languages.
//!
//! The registry is immutable and initialized once on first access via
//! `OnceLock`. Per-instance state (the current language) lives in the
//! `LanguageController`, not here.

use std::sync::OnceLock;

/// Configuration for a supported UI language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Short language code used in preferences and selector values (e.g., "zh", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Chinese", "English")
    pub name: &'static str,

    /// Native name shown in the language switcher (e.g., "中文", "English")
    pub native_name: &'static str,

    /// Whether this is the fallback language (only one should be true)
    pub is_default: bool,

    /// Whether this language can be selected
    pub enabled: bool,
}

/// Global language registry.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in switcher order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the fallback language configuration.
    ///
    /// # Panics
    /// Panics if zero or several languages are marked as default (this
    /// indicates a configuration error in `default_languages`).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Chinese is the dashboard's default; English is the only alternative.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_chinese() {
        let config = LanguageRegistry::get()
            .get_by_code("zh")
            .expect("zh should be registered");
        assert_eq!(config.name, "Chinese");
        assert_eq!(config.native_name, "中文");
        assert!(config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get()
            .get_by_code("en")
            .expect("en should be registered");
        assert_eq!(config.native_name, "English");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
        assert!(LanguageRegistry::get().get_by_code("").is_none());
    }

    #[test]
    fn test_list_enabled_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(codes, vec!["zh", "en"]);
    }

    #[test]
    fn test_default_language_is_chinese() {
        assert_eq!(LanguageRegistry::get().default_language().code, "zh");
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("zh"));
        assert!(registry.is_enabled("en"));
        assert!(!registry.is_enabled("es"));
    }
}
