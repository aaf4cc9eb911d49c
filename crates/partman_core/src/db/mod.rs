//! Remote document store bootstrap.
//!
//! # Responsibility
//! - Validate credentials and open a session against the hosted store.
//! - Bind the session to the fixed database/collection pair.
//!
//! # Invariants
//! - No network activity happens before credentials pass validation.
//! - A `Session` is only returned after the liveness ping succeeds.

use crate::auth::credentials::CredentialError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod config;
mod session;

pub use config::ConnectorConfig;
pub use session::{connect, Session};

pub type DbResult<T> = Result<T, ConnectionError>;

/// Failure of the underlying store, independent of which operation hit it.
#[derive(Debug)]
pub enum StoreError {
    Driver(mongodb::error::Error),
    /// Failure reported by a non-driver backend.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Driver(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Driver(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(value: mongodb::error::Error) -> Self {
        Self::Driver(value)
    }
}

/// Login-step failures. `Display` output is shown to the user verbatim.
#[derive(Debug)]
pub enum ConnectionError {
    Validation(CredentialError),
    /// The rendered connection target could not be parsed or resolved.
    InvalidTarget(StoreError),
    /// The client session could not be created.
    Session(StoreError),
    /// The store did not answer the liveness ping.
    Ping(StoreError),
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidTarget(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Ping(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidTarget(err) | Self::Session(err) | Self::Ping(err) => Some(err),
        }
    }
}

impl From<CredentialError> for ConnectionError {
    fn from(value: CredentialError) -> Self {
        Self::Validation(value)
    }
}

impl ConnectionError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "credentials_invalid",
            Self::InvalidTarget(_) => "target_invalid",
            Self::Session(_) => "session_failed",
            Self::Ping(_) => "ping_failed",
        }
    }
}
