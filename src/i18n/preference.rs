//! Persisted locale preference and the language-switch path rewrite.
//!
//! The preference is a single key-value entry (key [`LANGUAGE_KEY`]). The
//! store is injected so the switcher never reads ambient global state.

use crate::i18n::language::path_segments;
use crate::i18n::strings::fill;
use crate::i18n::Language;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Storage key under which the selected locale is persisted.
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file {path} is not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A string key-value store with the semantics of browser local storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Process-local store, mostly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                PreferenceError::Parse {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    /// Entries only change once the file has been written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&next).map_err(PreferenceError::Serialize)?;
        fs::write(&self.path, json).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.entries = next;
        Ok(())
    }
}

/// Tracks the active locale for a client session.
pub struct LocaleSwitcher<S: PreferenceStore> {
    current: Language,
    store: S,
}

impl<S: PreferenceStore> LocaleSwitcher<S> {
    /// Determine the initial locale for `current_path` and persist it.
    ///
    /// Priority: URL prefix, then a stored preference naming a supported
    /// locale, then `default`.
    pub fn init(current_path: &str, mut store: S, default: Language) -> Result<Self, PreferenceError> {
        let stored = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_segment(&code));
        let fallback = stored.unwrap_or(default);

        let current = Language::detect(&path_segments(current_path), fallback);
        store.set(LANGUAGE_KEY, current.code())?;

        info!("Initial language: {}", current);
        Ok(Self { current, store })
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Caption of the locale selector, in the active locale.
    pub fn label(&self) -> &'static str {
        self.current.strings().language_label
    }

    /// "Current: en" style label for the switcher, in the active locale.
    pub fn current_label(&self) -> String {
        fill(
            self.current.strings().language_current,
            &[("current", self.current.code().to_string())],
        )
    }

    /// Switch to `language`, persist it, and return the path to load.
    ///
    /// Locale bundles are separate builds, so the caller must perform a full
    /// page load of the returned path.
    pub fn change(&mut self, language: Language, current_path: &str) -> Result<String, PreferenceError> {
        debug!("Changing language from {} to {}", self.current, language);

        self.store.set(LANGUAGE_KEY, language.code())?;
        self.current = language;

        Ok(localized_path(language, current_path))
    }
}

/// Rewrite `path` under `language`, dropping any existing locale prefix.
///
/// The result always ends in `/` after the locale, so the root maps to
/// `/<code>/`.
pub fn localized_path(language: Language, path: &str) -> String {
    let mut segments = path_segments(path);
    if segments
        .first()
        .is_some_and(|first| Language::from_segment(first).is_some())
    {
        segments.remove(0);
    }

    format!("/{}/{}", language.code(), segments.join("/"))
}
