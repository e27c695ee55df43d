use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Ordered list of "what is my IP" services to try. Order matters:
    /// earlier entries are preferred, later ones are fallbacks.
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 10 }

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Sources as configured, or the built-in list if none were given.
    pub fn sources(&self) -> Vec<String> {
        match &self.sources {
            Some(list) => list.clone(),
            None => DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Services queried when the config supplies none. https variants come
/// first, then plain-http fallbacks for networks that break TLS.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://whatismyip.akamai.com",
    "https://checkip.amazonaws.com",
    "https://icanhazip.com",
    "https://api.ipify.org",
    "https://ident.me",
    "http://checkip.amazonaws.com",
    "http://icanhazip.com",
    "http://api.ipify.org",
    "http://ipecho.net/plain",
    "http://ident.me",
    "http://ipinfo.io/ip",
];

/// Load config from a TOML file path.
pub fn load_from(path: &str) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {path}"))?;
    let cfg: Config = toml::from_str(&text).context("Failed to parse TOML config")?;
    Ok(cfg)
}
