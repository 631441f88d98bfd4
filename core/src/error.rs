//! Error types for the PetFriends client.
//!
//! # Design
//! A non-2xx status is not an error here: it comes back as an `ApiResponse`
//! and the caller asserts on it. `ApiError` only covers failures on this side
//! of the wire: the request never completed, a photo could not be read, or a
//! body did not match the type the caller asked for.

use std::path::PathBuf;

/// Errors returned by `PetFriends` operations and `ApiResponse::json`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP round-trip itself failed (DNS, connect, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// A photo file given for upload could not be read.
    #[error("cannot read photo {}: {source}", path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Errors raised while loading `Settings`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}
