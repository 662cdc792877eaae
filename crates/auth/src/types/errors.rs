//! Error types for authentication and session storage.

use thiserror::Error;

/// Failures surfaced by the auth service. None of them are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("stored session is malformed")]
    MalformedSession,
}

impl AuthError {
    /// Message shown to the person at the keyboard.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Email ou mot de passe incorrect",
            AuthError::DuplicateEmail => "Un compte avec cet email existe déjà",
            AuthError::MalformedSession => "Session invalide",
        }
    }
}

/// Errors raised by key-value stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed stored value: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid store key {0:?}: use only letters, digits, '_' and '-'")]
    InvalidKey(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
