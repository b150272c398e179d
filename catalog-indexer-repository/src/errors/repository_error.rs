//! Collaborator error types.
//!
//! This module defines the errors raised by storage lookups and external
//! service calls made while enriching a product.

use thiserror::Error;

/// Errors that can occur when calling a collaborator.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// Entity or relation lookup failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// An external service call (pricing, features, inventory, ...) failed.
    #[error("Collaborator error: {0}")]
    CollaboratorError(String),

    /// A required descriptor or setting could not be resolved.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl RepositoryError {
    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    /// Create a collaborator error.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::CollaboratorError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether this error stems from misconfiguration rather than bad data.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }
}
