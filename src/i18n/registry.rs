//! Locale registry: the fixed set of locales the app ships bundles for.
//!
//! Each registered locale corresponds to a subdirectory of the static root
//! (`es/`, `en/`) holding that locale's compiled bundle and `index.html`.

use std::sync::OnceLock;

/// Metadata for a supported locale.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 code, also the URL prefix and bundle directory name
    pub code: &'static str,

    /// Whether this locale is the built-in default (exactly one should be true)
    pub is_default: bool,
}

/// Global locale registry.
///
/// Initialized once on first access and immutable thereafter. This only
/// describes *which* locales exist; the locale a component runs with is
/// passed to it explicitly.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a locale by its code. Matching is exact and case-sensitive,
    /// the same way URL prefixes and bundle directories are matched.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// The built-in default locale.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default locale
    /// (a static configuration error).
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
}

/// Spanish is the default bundle; English is the only other one.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "es",
            is_default: true,
        },
        LanguageConfig {
            code: "en",
            is_default: false,
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
    fn test_get_by_code_spanish() {
        let config = LanguageRegistry::get()
            .get_by_code("es")
            .expect("Spanish should be registered");

        assert_eq!(config.code, "es");
        assert!(config.is_default);
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get()
            .get_by_code("en")
            .expect("English should be registered");

        assert_eq!(config.code, "en");
        assert!(!config.is_default);
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        assert!(LanguageRegistry::get().get_by_code("EN").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_exactly_two_locales() {
        assert_eq!(LanguageRegistry::get().languages.len(), 2);
    }

    #[test]
    fn test_default_language_is_spanish() {
        let default = LanguageRegistry::get().default_language();
        assert_eq!(default.code, "es");
    }
}
