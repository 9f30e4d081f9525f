//! Language type: a locale validated against the registry.

use crate::i18n::strings::{ENGLISH_STRINGS, SPANISH_STRINGS};
use crate::i18n::{LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};
use std::fmt;

/// A validated locale.
///
/// Only registered locales can be constructed, so a `Language` is
/// never "undefined".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "es", "en")
    code: &'static str,
}

impl Language {
    pub const SPANISH: Language = Language { code: "es" };

    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a locale code.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered
    /// * `Err` if the code is unknown
    ///
    /// # Example
    /// ```ignore
    /// let spanish = Language::from_code("es")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Like [`Language::from_code`], but for untrusted input such as URL
    /// segments or stored preferences where "not a locale" is not an error.
    pub fn from_segment(segment: &str) -> Option<Language> {
        Self::from_code(segment).ok()
    }

    /// The registry's built-in default locale (Spanish).
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// Pick the locale for a path: the first segment when it names a
    /// supported locale, otherwise `fallback`.
    ///
    /// Both the static server and the language switcher detect the locale
    /// through this function; they differ only in the fallback they pass.
    pub fn detect(segments: &[&str], fallback: Language) -> Language {
        segments
            .first()
            .and_then(|first| Self::from_segment(first))
            .unwrap_or(fallback)
    }

    /// Get the ISO 639-1 code, which is also the URL prefix and bundle directory.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Localized user-facing strings for this locale.
    pub fn strings(&self) -> &'static LanguageStrings {
        match self.code {
            "en" => &ENGLISH_STRINGS,
            _ => &SPANISH_STRINGS,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Split a request path into its non-empty `/`-separated segments.
///
/// Any query string or fragment is ignored.
pub fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
