//! Unified error handling for the client SDK.
//!
//! Each boundary owns its error enum (`ApiError`, `StorageError`,
//! `CartError`, `ConfigError`); `ClientError` is the umbrella returned by
//! the top-level [`crate::app::Storefront`] operations.

use thiserror::Error;

use crate::api::ApiError;
use crate::cart::CartError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Top-level error type for storefront operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// REST backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Local snapshot persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
