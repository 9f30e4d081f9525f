pub mod config;
pub mod form;
pub mod i18n;
pub mod resolver;
pub mod server;
