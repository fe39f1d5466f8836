// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Function registration and dispatch.
//!
//! This module defines the core abstractions of the function engine:
//! - [`FunctionPlugin`] and [`Invocable`] traits that plugins implement
//! - [`FunctionSpec`]/[`ParameterSpec`] declarative function descriptions
//! - [`FunctionRegistry`] for managing visibility and dispatching calls
//!
//! # Example
//!
//! ```rust,ignore
//! use convoke::functions::{
//!     FunctionEntry, FunctionPlugin, FunctionRegistry, FunctionSpec,
//!     Invocable, ParameterSpec, RegisterOptions,
//! };
//! use convoke::types::ParamType;
//! use std::sync::Arc;
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl Invocable for Greeter {
//!     async fn invoke(&self, args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String> {
//!         Ok("hello".to_string())
//!     }
//! }
//!
//! struct GreetPlugin;
//!
//! impl FunctionPlugin for GreetPlugin {
//!     fn functions(&self) -> Vec<FunctionEntry> {
//!         vec![FunctionEntry::new(
//!             FunctionSpec::new("greet", "Say hello")
//!                 .with_parameter(ParameterSpec::required("name", ParamType::String, "Who to greet")),
//!             Arc::new(Greeter),
//!         )]
//!     }
//! }
//!
//! let mut registry = FunctionRegistry::new();
//! registry.register(&GreetPlugin, RegisterOptions::new().with_enabled(["greet"]));
//! ```

mod descriptor;
mod dispatch;
mod registry;

pub use descriptor::{
    FunctionDescriptor, FunctionEntry, FunctionPlugin, FunctionSpec, Invocable, ParameterSpec,
};
pub use registry::{FunctionRegistry, RegisterOptions};
