//! Handles settings for the application. Configuration is written in
//! `bottega.toml`.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level passed to the tracing env filter ("info", "debug", ...).
    pub level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Ai {
    pub url: String,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    /// Shared HS256 secret; must match the auth service's signing key.
    pub jwt_secret: String,
    pub ai: Option<Ai>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("bottega"))
            .build()?;

        settings.try_deserialize()
    }
}
