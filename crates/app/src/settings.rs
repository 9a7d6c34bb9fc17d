//! Layered settings: `config/gruzzolo.toml` overridden by `GRUZZOLO__*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    pub assist: Option<Assist>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

/// Credentials and endpoints for the external helper services.
#[derive(Debug, Deserialize)]
pub struct Assist {
    pub api_key: String,
    pub base_url: Option<String>,
    pub rates_url: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/gruzzolo").required(false))
            .add_source(Environment::with_prefix("GRUZZOLO").separator("__"))
            .build()?
            .try_deserialize()
    }
}
