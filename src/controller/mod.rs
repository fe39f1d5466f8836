// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Completion loop controller.
//!
//! The controller orchestrates round-trips to the completion service: it
//! submits the transcript plus the visible function schemas, appends the
//! assistant reply, and, when auto function calling is on, dispatches the
//! requested function, appends the result message, and submits again until
//! the model produces a final reply or the depth bound is hit.
//!
//! # Example
//!
//! ```rust,ignore
//! use convoke::controller::{CompletionController, CompletionOptions, ControllerConfig};
//! use convoke::functions::{FunctionRegistry, RegisterOptions};
//! use convoke::plugins::ClockPlugin;
//! use convoke::types::Message;
//!
//! let mut registry = FunctionRegistry::new();
//! registry.register(&ClockPlugin, RegisterOptions::new().with_enabled(["date_time"]));
//!
//! let mut controller = CompletionController::new(
//!     service,
//!     registry,
//!     ControllerConfig::new("gpt-4o"),
//! );
//!
//! let response = controller
//!     .completion_with_message(
//!         Message::user("What time is it?"),
//!         &CompletionOptions::new().call_functions(),
//!     )
//!     .await?;
//! ```

mod types;

pub use types::{
    CompletionOptions, ControllerConfig, FunctionMessageOptions, DEFAULT_MAX_FUNCTION_DEPTH,
};

#[cfg(feature = "telemetry")]
use tracing::debug;

use crate::conversation::Conversation;
use crate::error::ControllerError;
use crate::functions::FunctionRegistry;
use crate::truncate::truncate_to_token_budget;
use crate::types::{BoxedCompletionService, CompletionResponse, Message};

/// Orchestrates the conversation between the host, the model, and the
/// registered functions.
pub struct CompletionController {
    service: BoxedCompletionService,
    registry: FunctionRegistry,
    conversation: Conversation,
    config: ControllerConfig,
}

impl CompletionController {
    /// Create a controller over a completion service and a populated
    /// registry.
    pub fn new(
        service: BoxedCompletionService,
        registry: FunctionRegistry,
        config: ControllerConfig,
    ) -> Self {
        Self {
            service,
            registry,
            conversation: Conversation::new(),
            config,
        }
    }

    /// The function registry.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Mutable access to the registry (enable/disable/register).
    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    /// The current conversation transcript.
    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// The usage snapshot from the most recent completion response.
    pub fn usage(&self) -> &crate::types::TokenUsage {
        self.conversation.usage()
    }

    /// Append a message to the conversation without requesting a completion.
    pub fn push_message(&mut self, message: Message) {
        self.conversation.push(message);
    }

    /// Empty the transcript and reset usage to zero.
    pub fn clear_messages(&mut self) {
        self.conversation.clear();
    }

    /// Request the next completion for the current transcript.
    ///
    /// Submits the transcript and the visible function schemas. When
    /// `options.call_functions` is set and the reply carries an invocation
    /// request, the requested function is dispatched, its result message
    /// appended, and the transcript resubmitted, up to the configured
    /// depth bound. The returned response is the first reply without an
    /// invocation request (or the last one when auto-calling is off).
    pub async fn next_completion(
        &mut self,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, ControllerError> {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());

        let mut depth = 0usize;
        loop {
            let schemas = self.registry.visible_schemas();

            #[cfg(feature = "telemetry")]
            debug!(
                model = %model,
                messages = self.conversation.len(),
                functions = schemas.len(),
                "Requesting completion"
            );

            let response = self
                .service
                .complete(self.conversation.messages(), &schemas, &model)
                .await?;

            self.conversation.push(response.message.clone());
            if let Some(ref usage) = response.usage {
                self.conversation.record_usage(usage.clone());
            }

            let call = if options.call_functions {
                response.message.function_call.clone()
            } else {
                None
            };
            let Some(call) = call else {
                return Ok(response);
            };

            depth += 1;
            if depth > self.config.max_function_depth {
                return Err(ControllerError::FunctionDepthExceeded(depth));
            }

            #[cfg(feature = "telemetry")]
            debug!(function = %call.name, depth, "Resolving function invocation");

            let function_message = self
                .function_message(&call.name, &call.arguments, &FunctionMessageOptions::default())
                .await;
            self.conversation.push(function_message);
        }
    }

    /// Append `message` to the conversation, then request the next
    /// completion.
    pub async fn completion_with_message(
        &mut self,
        message: Message,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, ControllerError> {
        self.conversation.push(message);
        self.next_completion(options).await
    }

    /// Build the function-result message for one invocation request.
    ///
    /// On success the stringified result is truncated to the request-token
    /// budget. Any dispatch failure becomes a visible `{"error": ...}`
    /// message instead of propagating: a failed function call is a
    /// conversational fact, not a process-level error.
    pub async fn function_message(
        &self,
        name: &str,
        raw_args: &str,
        options: &FunctionMessageOptions,
    ) -> Message {
        match self.registry.dispatch(name, raw_args).await {
            Ok(result) => {
                let content = truncate_to_token_budget(&result, options.request_max_tokens);
                Message::function(name, content)
            }
            Err(err) => {
                #[cfg(feature = "telemetry")]
                debug!(function = %name, error = %err, "Function dispatch failed");
                let payload = serde_json::json!({ "error": err.to_string() });
                Message::function(name, payload.to_string())
            }
        }
    }

    /// Extract the invocation request from `message` and build its
    /// function-result message. Returns `None` when the message carries no
    /// request.
    pub async fn function_message_from(
        &self,
        message: &Message,
        options: &FunctionMessageOptions,
    ) -> Option<Message> {
        let call = message.function_call.as_ref()?;
        Some(
            self.function_message(&call.name, &call.arguments, options)
                .await,
        )
    }
}
