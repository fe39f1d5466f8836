// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Convoke - expose typed callable functions to conversational AI models.
//!
//! An application registers named, typed functions; the completion service
//! decides when to invoke them; Convoke dispatches the invocation locally
//! and feeds the result back into the conversation, optionally looping
//! until the model produces a final answer.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`types`] - Core type definitions (Message, FunctionSchema, the
//!   [`CompletionService`](types::CompletionService) seam)
//! - [`error`] - Error types and result aliases
//! - [`functions`] - Function descriptors, registry, and dispatch
//! - [`truncate`] - Token-budget truncation for function results
//! - [`conversation`] - Transcript and usage bookkeeping
//! - [`controller`] - The completion loop controller
//! - [`plugins`] - Demonstration plugins (clock, URL fetch)
//! - [`telemetry`] - Tracing initialization for hosts
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
//! let mut controller = CompletionController::new(service, registry, ControllerConfig::new("gpt-4o"));
//! let response = controller
//!     .completion_with_message(
//!         Message::user("What time is it?"),
//!         &CompletionOptions::new().call_functions(),
//!     )
//!     .await?;
//! ```

pub mod controller;
pub mod conversation;
pub mod error;
pub mod functions;
pub mod plugins;
pub mod telemetry;
pub mod truncate;
pub mod types;

// Re-export commonly used types at crate root
pub use controller::{
    CompletionController, CompletionOptions, ControllerConfig, FunctionMessageOptions,
};
pub use conversation::Conversation;
pub use error::{ControllerError, DispatchError, Result, ServiceError};
pub use functions::{
    FunctionDescriptor, FunctionEntry, FunctionPlugin, FunctionRegistry, FunctionSpec, Invocable,
    ParameterSpec, RegisterOptions,
};
pub use types::{
    BoxedCompletionService, CompletionResponse, CompletionService, FunctionCall, FunctionSchema,
    Message, ParamType, Role, TokenUsage,
};

/// Convoke version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
