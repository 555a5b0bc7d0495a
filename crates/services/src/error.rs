//! Shared error types for the services crate.

use thiserror::Error;

use recall_core::CardValidationError;

/// Errors emitted by card API clients.
///
/// Local validation failures never appear here: create and update only accept
/// already-validated `CardContent`, so a blank draft is rejected before any
/// request is issued.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CardApiError {
    #[error("card service returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Card(#[from] CardValidationError),
}
