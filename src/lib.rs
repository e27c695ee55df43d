//! Library entry that exposes internal modules.
//! Keep public API minimal and explicit.

pub mod config;
pub mod ip;
pub mod transport;

// Re-export most used items for ergonomic main.rs imports.
pub use config::{load_from, Config, DEFAULT_SOURCES};
pub use ip::{fetch_one, is_valid_ipv4, resolve, FetchError, ResolveError};
pub use transport::{Transport, TransportResponse};
