//! Handler failure modes and their transport mapping.

use std::error::Error;
use std::fmt;

use crate::cache::CacheError;
use crate::domain::ValidationError;

/// Everything that can go wrong between receiving a command and answering it.
///
/// Variants are ordered the way dispatch encounters them: unknown command,
/// guard, identity, then the handler's own failures.
#[derive(Debug)]
pub enum HandlerError {
    /// The command name matches no registered handler.
    UnknownCommand(String),
    /// The payload did not deserialize into the handler's input type.
    DecodeFailed(String),
    /// The guard turned the payload away before the handler ran.
    GuardRejected(String),
    /// The session carries no usable identity.
    Unauthorized(String),
    /// The caller is known but their role does not cover this command.
    Forbidden(String),
    /// The record the command names does not exist.
    NotFound(String),
    /// The input decoded fine but fails domain validation.
    Invalid(ValidationError),
    /// The handler refused the command on its own rules.
    Rejected(String),
    /// The cache store failed underneath the handler.
    Store(CacheError),
}

impl HandlerError {
    /// HTTP status the transport answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) | HandlerError::NotFound(_) => 404,
            HandlerError::DecodeFailed(_) | HandlerError::GuardRejected(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Forbidden(_) => 403,
            HandlerError::Invalid(_) | HandlerError::Rejected(_) => 422,
            HandlerError::Store(_) => 500,
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::GuardRejected(name) => write!(f, "guard rejected command: {}", name),
            HandlerError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            HandlerError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            HandlerError::NotFound(id) => write!(f, "not found: {}", id),
            HandlerError::Invalid(e) => write!(f, "invalid input: {}", e),
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Invalid(e) => Some(e),
            HandlerError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError::Invalid(err)
    }
}

impl From<CacheError> for HandlerError {
    fn from(err: CacheError) -> Self {
        HandlerError::Store(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}
