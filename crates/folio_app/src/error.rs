//! Error types for folio_app

use folio_animation::EngineClosed;
use folio_core::StoreError;
use thiserror::Error;

/// Errors that can occur while orchestrating the page
#[derive(Error, Debug)]
pub enum AppError {
    /// The animation engine went away mid-sequence
    #[error("animation engine closed: {0}")]
    Engine(#[from] EngineClosed),

    /// Persisting a preference failed
    #[error("preference storage failed: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be read or parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The loading sequence already ran
    #[error("loading sequence already completed")]
    AlreadyLoaded,
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, AppError>;
