//! Internationalization (i18n) for the two deployed locales.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported locales
//! - `language`: Validated `Language` type and path-based locale detection
//! - `strings`: Localized user-facing strings for the form
//! - `preference`: Persisted locale preference and the language switcher
//!
//! # Example
//!
//! ```rust,ignore
//! use localized_form::i18n::{path_segments, Language};
//!
//! let segments = path_segments("/en/about");
//! let locale = Language::detect(&segments, Language::default_language());
//! assert_eq!(locale, Language::ENGLISH);
//! ```

mod language;
mod preference;
mod registry;
mod strings;

pub use language::{path_segments, Language};
pub use preference::{
    localized_path, FileStore, LocaleSwitcher, MemoryStore, PreferenceError, PreferenceStore,
    LANGUAGE_KEY,
};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{fill, LanguageStrings};
