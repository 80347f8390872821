//! Error taxonomy for user-triggered actions.
//!
//! Everything here is surfaced as an inline message at the point of the
//! action that caused it; nothing is fatal. Local-state corruption is not an
//! error at all: the session store treats unreadable blobs as absent.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackofficeError {
    /// The tenant key does not resolve to a registered company.
    #[error("company not found")]
    CompanyNotFound,

    /// The login/secret pair was not verified by the store procedure.
    /// No lockout or backoff is applied here; verification sits behind
    /// `AuthStore` so a rate limiter can be layered in without touching
    /// callers.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A form value that cannot be submitted as-is (incomplete CNPJ,
    /// mismatched password confirmation, empty required field).
    #[error("{0}")]
    InvalidInput(String),

    /// Network or store failure during a read/write. Logged and surfaced
    /// generically; the user repeats the action, there is no retry policy.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BackofficeError>;
