// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Controller configuration and per-call options.

use crate::truncate::DEFAULT_REQUEST_MAX_TOKENS;

/// Default bound on consecutive function-call rounds within one completion.
pub const DEFAULT_MAX_FUNCTION_DEPTH: usize = 8;

/// Configuration for a [`CompletionController`](super::CompletionController).
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Default model for completion requests.
    pub model: String,
    /// Maximum consecutive function-invocation rounds before the loop
    /// returns [`ControllerError::FunctionDepthExceeded`](crate::error::ControllerError).
    pub max_function_depth: usize,
}

impl ControllerConfig {
    /// Configuration with the given default model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_function_depth: DEFAULT_MAX_FUNCTION_DEPTH,
        }
    }

    /// Override the function-call depth bound.
    pub fn with_max_function_depth(mut self, depth: usize) -> Self {
        self.max_function_depth = depth;
        self
    }
}

/// Options recognized for one completion request.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Model override for this request; falls back to the configured default.
    pub model: Option<String>,
    /// Whether to auto-resolve function-invocation replies before returning.
    pub call_functions: bool,
}

impl CompletionOptions {
    /// Defaults: configured model, no auto function calling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a per-request model override.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Enable auto-resolution of function-invocation replies.
    pub fn call_functions(mut self) -> Self {
        self.call_functions = true;
        self
    }
}

/// Options recognized when building a function-result message.
#[derive(Debug, Clone)]
pub struct FunctionMessageOptions {
    /// Truncation budget for the result before it re-enters the
    /// conversation, in tokens.
    pub request_max_tokens: usize,
}

impl Default for FunctionMessageOptions {
    fn default() -> Self {
        Self {
            request_max_tokens: DEFAULT_REQUEST_MAX_TOKENS,
        }
    }
}

impl FunctionMessageOptions {
    /// Set the truncation budget.
    pub fn with_request_max_tokens(mut self, tokens: usize) -> Self {
        self.request_max_tokens = tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_config_defaults() {
        let config = ControllerConfig::new("gpt-4o");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_function_depth, DEFAULT_MAX_FUNCTION_DEPTH);
    }

    #[test]
    fn test_completion_options_defaults() {
        let options = CompletionOptions::new();
        assert!(options.model.is_none());
        assert!(!options.call_functions);
    }

    #[test]
    fn test_function_message_options_default_budget() {
        let options = FunctionMessageOptions::default();
        assert_eq!(options.request_max_tokens, DEFAULT_REQUEST_MAX_TOKENS);
    }
}
