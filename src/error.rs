// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for the Convoke function-calling engine.
//!
//! This module provides strongly-typed errors for each layer of the crate,
//! using `thiserror` for ergonomic error definitions and `anyhow` for error
//! propagation at flexible seams.

use thiserror::Error;

/// Errors that can occur while dispatching a function invocation.
///
/// All of these are caught at the function-message boundary and converted
/// into a visible `{"error": ...}` conversation message; they never abort
/// the completion loop.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Function not found: {0}")]
    NotFound(String),

    #[error("Invalid argument payload: {0}")]
    ArgumentParse(String),

    #[error("Missing required parameters {missing:?}: required {required:?}, supplied {supplied:?}")]
    MissingRequired {
        missing: Vec<String>,
        required: Vec<String>,
        supplied: Vec<String>,
    },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Function execution failed: {0}")]
    ExecutionFailed(String),
}

/// Errors that can occur in a completion-service implementation.
///
/// Transport-level failures (network, auth, rate limit) are outside the
/// core's scope and propagate to the host application unmodified.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Response parsing error: {0}")]
    ParseError(String),
}

impl ServiceError {
    /// Create an API error with status code.
    pub fn api(message: impl Into<String>, status_code: u16) -> Self {
        Self::ApiError {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::NetworkError(_))
    }
}

/// Errors that can occur while driving the completion loop.
#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Function call depth exceeded: {0} rounds without a final reply")]
    FunctionDepthExceeded(usize),
}

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_display_enumerates_names() {
        let err = DispatchError::MissingRequired {
            missing: vec!["b".to_string()],
            required: vec!["a".to_string(), "b".to_string()],
            supplied: vec!["a".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("\"b\""));
        assert!(text.contains("required"));
        assert!(text.contains("supplied"));
    }

    #[test]
    fn test_service_error_retryable() {
        assert!(ServiceError::RateLimited("wait 1s".to_string()).is_retryable());
        assert!(ServiceError::NetworkError("timeout".to_string()).is_retryable());
        assert!(!ServiceError::AuthError("invalid key".to_string()).is_retryable());
    }

    #[test]
    fn test_controller_error_from_service() {
        let service_err = ServiceError::api("Bad request", 400);
        let controller_err: ControllerError = service_err.into();
        assert!(matches!(controller_err, ControllerError::Service(_)));
    }

    #[test]
    fn test_depth_exceeded_display() {
        let err = ControllerError::FunctionDepthExceeded(8);
        assert!(err.to_string().contains('8'));
    }
}
