// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use hecc_ring::RingError;
use thiserror::Error;

/// Hard failures raised by the crypto context and its collaborators.
///
/// A decryption that merely fails to decode is not an error; see
/// [`crate::DecryptResult`].
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A key or ciphertext was produced by another context
    #[error("{operation}: {subject} was not generated with this crypto context")]
    Provenance {
        operation: &'static str,
        subject: &'static str,
    },

    /// Missing argument, inconsistent key relationship or invalid party bounds
    #[error("Config error: {0}")]
    Config(String),

    /// Cache miss
    #[error("{0} not found for the given key tag; generate keys first")]
    NotFound(String),

    /// Encoding types disagree across a batch, or parameters have the wrong shape
    #[error("Type error: {0}")]
    Type(String),

    /// Party count not invertible under some limb modulus
    #[error("Math error: {0}")]
    Math(String),

    #[error(transparent)]
    Ring(#[from] RingError),

    /// Error raised inside a scheme backend
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Shared rng lock poisoned")]
    RngPoisoned,
}

/// Failure class of a [`CryptoError`], for matching without messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum ErrorKind {
    Provenance,
    Config,
    NotFound,
    Type,
    Math,
    Ring,
    Backend,
    Internal,
}

impl ErrorKind {
    /// Foreign-context inputs and invalid arguments are both caller errors.
    pub fn is_config_class(&self) -> bool {
        matches!(self, ErrorKind::Provenance | ErrorKind::Config)
    }
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::Provenance { .. } => ErrorKind::Provenance,
            CryptoError::Config(_) => ErrorKind::Config,
            CryptoError::NotFound(_) => ErrorKind::NotFound,
            CryptoError::Type(_) => ErrorKind::Type,
            CryptoError::Math(_) => ErrorKind::Math,
            CryptoError::Ring(_) => ErrorKind::Ring,
            CryptoError::Backend(_) => ErrorKind::Backend,
            CryptoError::RngPoisoned => ErrorKind::Internal,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CryptoError::Config(message.into())
    }

    pub fn math(message: impl Into<String>) -> Self {
        CryptoError::Math(message.into())
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        CryptoError::Type(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
