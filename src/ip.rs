use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::transport::{BoxError, Transport};

/// A single source failed; the variant says at which stage.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("{url} returned an invalid IPv4 address: {body:?}")]
    InvalidAddress { url: String, body: String },
}

/// Every source was tried and none produced a valid address.
///
/// Carries the per-source failures in trial order, so the caller can
/// tell "every service down" from "every service returned garbage".
#[derive(Debug)]
pub struct ResolveError {
    pub failures: Vec<FetchError>,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return write!(f, "no IP sources to try");
        }
        write!(f, "all {} IP sources failed:", self.failures.len())?;
        for (i, err) in self.failures.iter().enumerate() {
            write!(f, "\n  {}. {err}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolveError {}

/// True if `text` is a dotted-decimal IPv4 literal: exactly four
/// groups of 1-3 ASCII digits, each <= 255, nothing else around them.
/// Leading zeros are accepted ("012.1.1.1" is fine).
pub fn is_valid_ipv4(text: &str) -> bool {
    let mut groups = 0;
    for group in text.split('.') {
        groups += 1;
        if groups > 4
            || group.is_empty()
            || group.len() > 3
            || !group.bytes().all(|b| b.is_ascii_digit())
        {
            return false;
        }
        // 1-3 digits, so the parse cannot fail or exceed 999
        match group.parse::<u16>() {
            Ok(value) if value <= 255 => {}
            _ => return false,
        }
    }
    groups == 4
}

/// Ask one source for our public IP. Exactly one attempt, no retry.
pub async fn fetch_one<T: Transport + ?Sized>(http: &T, url: &str) -> Result<String, FetchError> {
    let resp = http.get(url).await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    let status = resp.status();
    if status != 200 {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;

    // Most services append a trailing newline.
    let ip = body.trim();
    if !is_valid_ipv4(ip) {
        return Err(FetchError::InvalidAddress {
            url: url.to_string(),
            body: ip.to_string(),
        });
    }

    Ok(ip.to_string())
}

/// Query the public IPv4 address by trying `sources` strictly in
/// order. Returns the first valid answer; a failed source is recorded
/// and the next one is tried.
pub async fn resolve<T: Transport + ?Sized>(
    http: &T,
    sources: &[String],
) -> Result<String, ResolveError> {
    let mut failures = Vec::with_capacity(sources.len());

    for url in sources {
        match fetch_one(http, url).await {
            Ok(ip) => {
                debug!(%url, %ip, "source answered");
                return Ok(ip);
            }
            Err(err) => {
                debug!(%url, %err, "source failed, trying next");
                failures.push(err);
            }
        }
    }

    Err(ResolveError { failures })
}
