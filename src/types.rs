// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core types for the Convoke function-calling engine.
//!
//! This module defines the fundamental data structures used throughout the
//! crate: conversation messages, function schemas, token usage, and the
//! [`CompletionService`] seam to the completion provider.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// A function-result message, answering an invocation request.
    Function,
}

/// A function-invocation request emitted by the model.
///
/// `arguments` is the raw JSON string exactly as the model produced it;
/// parsing and validation happen at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl FunctionCall {
    /// Create a new invocation request.
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A message in a conversation.
///
/// Matches the wire shape exchanged with the completion service:
/// `{role, content?, name?, function_call?}`. `name` is set on
/// `Function`-role messages to the function they answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Message {
    /// Create a system message with text content.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create a user message with text content.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create an assistant message with text content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create an assistant message carrying a function-invocation request.
    pub fn assistant_function_call(call: FunctionCall) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            name: None,
            function_call: Some(call),
        }
    }

    /// Create a function-result message answering `name`.
    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: Some(content.into()),
            name: Some(name.into()),
            function_call: None,
        }
    }

    /// Get the text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Check whether this message carries a function-invocation request.
    pub fn has_function_call(&self) -> bool {
        self.function_call.is_some()
    }
}

// ============================================================================
// Token Usage & Completion Response
// ============================================================================

/// Token usage counters from a completion response.
///
/// Valid only immediately after a response populates it; appending a new
/// message to the conversation resets the stored snapshot to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Create a usage snapshot; the total is derived.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Check whether all counters are zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Response from the completion service.
///
/// The reply is either final text or a function-invocation request, carried
/// in the assistant message, plus the provider's usage counters when the
/// response reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The assistant message the model produced.
    pub message: Message,
    /// Token usage counters, if the response carried them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a final-text response without usage counters.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            message: Message::assistant(content),
            usage: None,
        }
    }

    /// Create a function-invocation response without usage counters.
    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            message: Message::assistant_function_call(call),
            usage: None,
        }
    }

    /// Attach usage counters.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Check whether the reply signals a function-invocation request.
    pub fn has_function_call(&self) -> bool {
        self.message.has_function_call()
    }

    /// Get the invocation request, if any.
    pub fn function_call_ref(&self) -> Option<&FunctionCall> {
        self.message.function_call.as_ref()
    }
}

// ============================================================================
// Function Schemas
// ============================================================================

/// Declared type of a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Object,
}

/// JSON-Schema property for one parameter in a visible function schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
}

/// The `parameters` object of a visible function schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersSchema {
    #[serde(rename = "type")]
    pub schema_type: String, // Always "object"
    pub properties: HashMap<String, PropertySchema>,
}

impl ParametersSchema {
    /// Create an empty object schema.
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: HashMap::new(),
        }
    }
}

impl Default for ParametersSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema for one visible function, as sent to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub parameters: ParametersSchema,
    pub required: Vec<String>,
}

impl FunctionSchema {
    /// Create a schema with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ParametersSchema::new(),
            required: Vec::new(),
        }
    }

    /// Add a parameter property.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.properties.insert(
            name.into(),
            PropertySchema {
                param_type,
                description: description.into(),
            },
        );
        self
    }

    /// Mark parameter names as required.
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }
}

// ============================================================================
// Completion Service Trait
// ============================================================================

use crate::error::ServiceError;
use async_trait::async_trait;

/// Seam to the completion provider.
///
/// The wire client is an external collaborator: implementations submit the
/// conversation plus the visible function schemas and return a response that
/// may contain an invocation request or final text, plus usage counters.
/// Transport errors propagate to the host unmodified.
///
/// # Example
///
/// ```rust,ignore
/// use convoke::types::{CompletionResponse, CompletionService, FunctionSchema, Message};
///
/// struct MyService;
///
/// #[async_trait]
/// impl CompletionService for MyService {
///     async fn complete(
///         &self,
///         messages: &[Message],
///         functions: &[FunctionSchema],
///         model: &str,
///     ) -> Result<CompletionResponse, ServiceError> {
///         // Submit to the provider...
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submit the transcript and visible function schemas to the model.
    ///
    /// # Arguments
    /// * `messages` - Full conversation transcript, in order
    /// * `functions` - Schemas of functions visible to the model
    /// * `model` - Model identifier for this round-trip
    async fn complete(
        &self,
        messages: &[Message],
        functions: &[FunctionSchema],
        model: &str,
    ) -> Result<CompletionResponse, ServiceError>;
}

/// A boxed completion service for dynamic dispatch.
pub type BoxedCompletionService = Box<dyn CompletionService>;
