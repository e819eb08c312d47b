// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types shared by the repository and its host.
//!
//! Two kinds cross the library boundary: validation errors, which the caller
//! fixes by supplying corrected input, and server errors, which are fatal to
//! the current operation.

use serde::Serialize;
use serde_json::Value;

/// Which side of the boundary an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Validation,
    Server,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Server => "ServerError",
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
pub enum RiderError {
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
        context: Option<Value>,
    },

    #[error("{message}")]
    Server {
        code: &'static str,
        message: String,
        context: Option<Value>,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Serializable view of an error for logs and host responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl RiderError {
    pub const INTERNAL_CODE: &'static str = "server_error";

    /// Build a validation error with no context.
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        RiderError::Validation {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Build a server error with no context.
    pub fn server(code: &'static str, message: impl Into<String>) -> Self {
        RiderError::Server {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to a validation or server error.
    ///
    /// Internal errors carry their own chain and are returned unchanged.
    pub fn with_context(self, value: Value) -> Self {
        match self {
            RiderError::Validation { code, message, .. } => RiderError::Validation {
                code,
                message,
                context: Some(value),
            },
            RiderError::Server { code, message, .. } => RiderError::Server {
                code,
                message,
                context: Some(value),
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RiderError::Validation { .. } => ErrorKind::Validation,
            RiderError::Server { .. } | RiderError::Internal(_) => ErrorKind::Server,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RiderError::Validation { code, .. } | RiderError::Server { code, .. } => code,
            RiderError::Internal(_) => Self::INTERNAL_CODE,
        }
    }

    pub fn context(&self) -> Option<&Value> {
        match self {
            RiderError::Validation { context, .. } | RiderError::Server { context, .. } => {
                context.as_ref()
            }
            RiderError::Internal(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_server(&self) -> bool {
        self.kind() == ErrorKind::Server
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            name: self.kind().as_str(),
            code: self.code().to_string(),
            message: self.to_string(),
            context: self.context().cloned(),
        }
    }
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, RiderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_accessors() {
        let err = RiderError::validation("invalid_key", "bad key 'abc'")
            .with_context(json!({ "key": "abc" }));

        assert!(err.is_validation());
        assert!(!err.is_server());
        assert_eq!(err.code(), "invalid_key");
        assert_eq!(err.to_string(), "bad key 'abc'");
        assert_eq!(err.context(), Some(&json!({ "key": "abc" })));
    }

    #[test]
    fn test_internal_error_is_server_kind() {
        let err = RiderError::from(anyhow::anyhow!("boom"));

        assert!(err.is_server());
        assert_eq!(err.code(), RiderError::INTERNAL_CODE);
        assert!(err.context().is_none());
    }

    #[test]
    fn test_error_body_serializes() {
        let err = RiderError::server("io_error", "disk on fire");
        let body = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(body["name"], "ServerError");
        assert_eq!(body["code"], "io_error");
        assert_eq!(body["message"], "disk on fire");
        assert!(body.get("context").is_none());
    }
}
