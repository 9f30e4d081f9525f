//! Locale-aware static content resolution with SPA fallback.
//!
//! The static root holds one bundle directory per locale (`es/`, `en/`)
//! next to shared assets. A request resolves, in order, to:
//!
//! 1. a shared asset under the root (non-locale paths),
//! 2. a file inside the locale bundle named by the first segment, with the
//!    prefix stripped,
//! 3. the `index.html` of the request's locale, so client-side routes like
//!    `/en/form-reactivo` load the app.
//!
//! For either of the first two steps a directory resolves to its own
//! `index.html` when it has one. Resolution only stats the filesystem and
//! keeps nothing between calls, so redeployed files are picked up at once.

use crate::config::Config;
use crate::i18n::{path_segments, Language};
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const INDEX_FILE: &str = "index.html";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No file matched and the locale has no `index.html` to fall back to.
    #[error("No index.html for locale '{locale}' at {}", .path.display())]
    NotFound { locale: Language, path: PathBuf },
}

/// Which resolution step produced the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKind {
    /// Shared asset directly under the static root
    Exact,
    /// File inside a locale bundle, addressed with the locale prefix
    Localized(Language),
    /// SPA fallback to the locale's `index.html`
    Fallback(Language),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Absolute or root-relative path of the file to send
    pub path: PathBuf,
    pub kind: ResolvedKind,
}

/// Maps request paths to files under a read-only static root.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    root: PathBuf,
    default_locale: Language,
}

impl ContentResolver {
    pub fn new(root: impl Into<PathBuf>, default_locale: Language) -> Self {
        Self {
            root: root.into(),
            default_locale,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.static_root.clone(), config.default_locale)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_locale(&self) -> Language {
        self.default_locale
    }

    /// Decide which file answers `request_path`.
    ///
    /// `request_path` is the (possibly percent-encoded) URI path; any query
    /// string is ignored. This performs blocking filesystem checks.
    pub fn resolve(&self, request_path: &str) -> Result<Resolution, ResolveError> {
        let segments = path_segments(request_path);
        let locale = Language::detect(&segments, self.default_locale);

        // Unsafe segments never touch the filesystem but still get the app shell
        if let Some(decoded) = decode_segments(&segments) {
            let prefix = segments.first().and_then(|first| Language::from_segment(first));

            let found = match prefix {
                Some(language) => find_file(&self.root.join(language.code()), &decoded[1..])
                    .map(|path| (path, ResolvedKind::Localized(language))),
                None => find_file(&self.root, &decoded).map(|path| (path, ResolvedKind::Exact)),
            };

            if let Some((path, kind)) = found {
                debug!("Resolved {} to {} ({:?})", request_path, path.display(), kind);
                return Ok(Resolution { path, kind });
            }
        } else {
            debug!("Rejected unsafe path {}", request_path);
        }

        let index = self.root.join(locale.code()).join(INDEX_FILE);
        if index.is_file() {
            debug!("Falling back to {} for {}", index.display(), request_path);
            Ok(Resolution {
                path: index,
                kind: ResolvedKind::Fallback(locale),
            })
        } else {
            Err(ResolveError::NotFound {
                locale,
                path: index,
            })
        }
    }
}

/// Percent-decode each segment, or `None` if any segment could climb out of
/// the root or smuggle a separator.
fn decode_segments(segments: &[&str]) -> Option<Vec<String>> {
    segments
        .iter()
        .map(|segment| {
            let decoded = percent_decode_str(segment).decode_utf8().ok()?;
            let mut components = Path::new(&*decoded).components();
            let single_normal = matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            );

            (single_normal && !decoded.contains(['/', '\\', '\0'])).then(|| decoded.into_owned())
        })
        .collect()
}

/// The file at `base/segments...`, or that directory's `index.html`.
fn find_file(base: &Path, segments: &[String]) -> Option<PathBuf> {
    let path = segments.iter().fold(base.to_path_buf(), |path, segment| path.join(segment));

    if path.is_file() {
        return Some(path);
    }

    if path.is_dir() {
        let index = path.join(INDEX_FILE);
        if index.is_file() {
            return Some(index);
        }
    }

    None
}
