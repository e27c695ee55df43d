//! Minimal GET capability the resolver depends on.
//!
//! Keeping the resolver behind a trait instead of a concrete
//! `reqwest::Client` lets tests run the full fallback logic against
//! canned responses, without a network.

use async_trait::async_trait;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Something that can issue an HTTP GET and hand back a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Box<dyn TransportResponse>, BoxError>;
}

/// A response whose status is known and whose body can be read once.
///
/// Reading the body is a separate, consuming step so a mid-stream read
/// failure stays distinguishable from a connect failure.
#[async_trait]
pub trait TransportResponse: Send {
    fn status(&self) -> u16;
    async fn text(self: Box<Self>) -> Result<String, BoxError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn get(&self, url: &str) -> Result<Box<dyn TransportResponse>, BoxError> {
        let resp = reqwest::Client::get(self, url).send().await?;
        Ok(Box::new(resp))
    }
}

#[async_trait]
impl TransportResponse for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    // Consumes the response, so the connection is released on every
    // exit path once this returns (or the box is dropped).
    async fn text(self: Box<Self>) -> Result<String, BoxError> {
        Ok((*self).text().await?)
    }
}
