use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};
use whatip::{load_from, resolve, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber (prints to stderr so the address
    // on stdout stays clean for piping).
    // Priority: RUST_LOG env -> fallback to "warn"
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    // Optional config: explicit path as first arg, else config.toml
    // next to the binary's cwd, else built-in defaults.
    let cfg = match std::env::args().nth(1) {
        Some(path) => load_from(&path).with_context(|| format!("Failed to load {path}"))?,
        None if Path::new("config.toml").exists() => {
            load_from("config.toml").context("Failed to load config.toml")?
        }
        None => Config::default(),
    };

    let sources = cfg.sources();
    debug!(count = sources.len(), "trying IP sources in order");

    let http = Client::builder()
        .user_agent(concat!("whatip/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()?;

    let ip = resolve(&http, &sources).await?;
    info!("resolved public IP: {ip}");
    println!("{ip}");

    Ok(())
}
