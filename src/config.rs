use crate::i18n::Language;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Static content
    pub static_root: PathBuf,

    // Locale used when a request carries no supported prefix
    pub default_locale: Language,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // An empty PORT counts as unset
            port: match std::env::var("PORT").ok().filter(|port| !port.is_empty()) {
                Some(port) => port
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?,
                None => 4200,
            },

            // Static content (output directory of the front-end build)
            static_root: std::env::var("STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist/front_angular/browser")),

            // Locale
            default_locale: match std::env::var("DEFAULT_LOCALE") {
                Ok(code) => Language::from_code(&code).context("Invalid DEFAULT_LOCALE")?,
                Err(_) => Language::default_language(),
            },
        })
    }

    /// Address string for the listener, e.g. "0.0.0.0:4200".
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
