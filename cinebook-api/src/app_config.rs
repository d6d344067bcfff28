use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads, bounding how many requests run in parallel.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Synthetic catalog population on startup. Stands in for the missing
/// administrator tooling in development and load testing setups.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    pub enabled: bool,
    #[serde(default = "default_catalog_size")]
    pub movies: usize,
    #[serde(default = "default_catalog_size")]
    pub theaters: usize,
}

fn default_workers() -> usize {
    8
}

fn default_catalog_size() -> usize {
    10_000
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CINEBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
