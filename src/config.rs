/*!
 * Tournament config file
 */

use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db_config: DbConfig,
    pub tracing_config: Option<TracingConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DbConfig {
    /// Database URL
    pub database_url: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TracingConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub filter: Option<String>,

    /// Jaeger agent endpoint, e.g. `127.0.0.1:6831`
    pub jaeger: Option<String>,
}

fn default_pool_size() -> usize {
    8
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self { database_url: database_url.into(), pool_size: default_pool_size() }
    }
}

pub fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
}
