//! Server Configuration
//!
//! Read from the environment after `.env` has been loaded.

use std::path::PathBuf;

use agent_runtime::OllamaConfig;
use reksadana_advisor::search::SearchConfig;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// Directory holding the catalog CSV files
    pub data_dir: PathBuf,

    /// Model used for tool extraction and reply synthesis
    pub model: String,

    pub ollama: OllamaConfig,

    /// Market search backend; `None` disables `market_search`
    pub search: Option<SearchConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            model: env_or("ADVISOR_MODEL", "llama3.2"),
            ollama: OllamaConfig::from_env(),
            search: SearchConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
