// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Invocation dispatch: raw argument payload -> validated positional call.
//!
//! Dispatch looks the function up regardless of its enabled state: a
//! disabled function is invisible to the model but still directly
//! dispatchable. The payload is a flat JSON object of named arguments;
//! names are mapped to the callee's declared positions before invocation.

use serde_json::Value;

#[cfg(feature = "telemetry")]
use tracing::{debug, info_span, Instrument};

use super::registry::FunctionRegistry;
use crate::error::DispatchError;

impl FunctionRegistry {
    /// Dispatch a function invocation and return the callee's result.
    ///
    /// Validation order: lookup, payload parse, required-parameter check,
    /// named->positional mapping, invocation. Callee failures surface as
    /// [`DispatchError::ExecutionFailed`] with the underlying message.
    pub async fn dispatch(&self, name: &str, raw_args: &str) -> Result<String, DispatchError> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| DispatchError::NotFound(name.to_string()))?;

        let args = parse_arguments(raw_args)?;

        let mut missing: Vec<String> = descriptor
            .required_names
            .iter()
            .filter(|required| !args.contains_key(*required))
            .cloned()
            .collect();
        if !missing.is_empty() {
            missing.sort();
            let mut required: Vec<String> = descriptor.required_names.iter().cloned().collect();
            required.sort();
            let mut supplied: Vec<String> = args.keys().cloned().collect();
            supplied.sort();
            return Err(DispatchError::MissingRequired {
                missing,
                required,
                supplied,
            });
        }

        let mut positional: Vec<Option<Value>> = vec![None; descriptor.parameters.len()];
        for (key, value) in args {
            let position = descriptor
                .parameter_position
                .get(&key)
                .copied()
                .ok_or_else(|| DispatchError::UnknownParameter(key.clone()))?;
            positional[position] = Some(value);
        }

        #[cfg(feature = "telemetry")]
        debug!(function = %name, "Dispatching function");

        #[cfg(feature = "telemetry")]
        let result = descriptor
            .handler
            .invoke(positional)
            .instrument(info_span!("function_invoke", function = %name))
            .await;

        #[cfg(not(feature = "telemetry"))]
        let result = descriptor.handler.invoke(positional).await;

        result.map_err(|err| DispatchError::ExecutionFailed(err.to_string()))
    }
}

/// Parse a raw argument payload into a flat name->value map.
///
/// Blank payloads are treated as `{}`; the model regularly emits an empty
/// argument string for zero-parameter functions. Anything else must be a
/// JSON object.
fn parse_arguments(raw_args: &str) -> Result<serde_json::Map<String, Value>, DispatchError> {
    if raw_args.trim().is_empty() {
        return Ok(serde_json::Map::new());
    }

    let value: Value = serde_json::from_str(raw_args)
        .map_err(|err| DispatchError::ArgumentParse(err.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(DispatchError::ArgumentParse(format!(
            "expected a JSON object of named arguments, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::descriptor::{
        FunctionEntry, FunctionPlugin, FunctionSpec, Invocable, ParameterSpec,
    };
    use crate::functions::registry::RegisterOptions;
    use crate::types::ParamType;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Echoes its positional arguments so tests can assert the mapping.
    struct PositionalEcho;

    #[async_trait]
    impl Invocable for PositionalEcho {
        async fn invoke(&self, args: Vec<Option<Value>>) -> anyhow::Result<String> {
            let rendered: Vec<String> = args
                .iter()
                .map(|a| match a {
                    Some(v) => v.to_string(),
                    None => "_".to_string(),
                })
                .collect();
            Ok(rendered.join(","))
        }
    }

    struct Failing;

    #[async_trait]
    impl Invocable for Failing {
        async fn invoke(&self, _args: Vec<Option<Value>>) -> anyhow::Result<String> {
            anyhow::bail!("backend unavailable")
        }
    }

    struct TestPlugin;

    impl FunctionPlugin for TestPlugin {
        fn functions(&self) -> Vec<FunctionEntry> {
            vec![
                FunctionEntry::new(
                    FunctionSpec::new("f", "Test function")
                        .with_parameter(ParameterSpec::required("a", ParamType::String, "first"))
                        .with_parameter(ParameterSpec::required("b", ParamType::String, "second"))
                        .with_parameter(ParameterSpec::optional("c", ParamType::String, "third")),
                    Arc::new(PositionalEcho),
                ),
                FunctionEntry::new(
                    FunctionSpec::new("broken", "Always fails"),
                    Arc::new(Failing),
                ),
            ]
        }
    }

    fn registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        registry.register(&TestPlugin, RegisterOptions::new());
        registry
    }

    #[tokio::test]
    async fn test_dispatch_not_found() {
        let result = registry().dispatch("nope", "{}").await;
        assert!(matches!(result, Err(DispatchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_dispatch_malformed_payload() {
        let result = registry().dispatch("f", "{not json").await;
        assert!(matches!(result, Err(DispatchError::ArgumentParse(_))));
    }

    #[tokio::test]
    async fn test_dispatch_non_object_payload() {
        let result = registry().dispatch("f", "[1,2]").await;
        assert!(matches!(result, Err(DispatchError::ArgumentParse(_))));
    }

    #[tokio::test]
    async fn test_dispatch_missing_required_lists_names() {
        let result = registry().dispatch("f", r#"{"a":"x"}"#).await;
        match result {
            Err(DispatchError::MissingRequired {
                missing,
                required,
                supplied,
            }) => {
                assert_eq!(missing, vec!["b".to_string()]);
                assert_eq!(required, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(supplied, vec!["a".to_string()]);
            }
            other => panic!("expected MissingRequired, got {:?}", other.map_err(|e| e.to_string())),
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_parameter() {
        let result = registry().dispatch("f", r#"{"a":"x","b":"y","d":"z"}"#).await;
        match result {
            Err(DispatchError::UnknownParameter(name)) => assert_eq!(name, "d"),
            other => panic!("expected UnknownParameter, got {:?}", other.map_err(|e| e.to_string())),
        }
    }

    #[tokio::test]
    async fn test_dispatch_positional_order_follows_declaration() {
        // Supplied out of order; positions come from the declaration.
        let result = registry()
            .dispatch("f", r#"{"b":"y","a":"x"}"#)
            .await
            .unwrap();
        assert_eq!(result, r#""x","y",_"#);
    }

    #[tokio::test]
    async fn test_dispatch_optional_parameter_filled() {
        let result = registry()
            .dispatch("f", r#"{"a":"x","b":"y","c":"z"}"#)
            .await
            .unwrap();
        assert_eq!(result, r#""x","y","z""#);
    }

    #[tokio::test]
    async fn test_dispatch_blank_payload_is_empty_map() {
        let result = registry().dispatch("broken", "").await;
        // Reaches the callee: blank parses as {} and `broken` has no params.
        assert!(matches!(result, Err(DispatchError::ExecutionFailed(_))));
    }

    #[tokio::test]
    async fn test_dispatch_execution_failure_preserves_message() {
        let result = registry().dispatch("broken", "{}").await;
        match result {
            Err(DispatchError::ExecutionFailed(msg)) => {
                assert!(msg.contains("backend unavailable"));
            }
            other => panic!("expected ExecutionFailed, got {:?}", other.map_err(|e| e.to_string())),
        }
    }

    #[tokio::test]
    async fn test_disabled_function_still_dispatchable() {
        let mut reg = registry();
        reg.disable("f");
        let result = reg.dispatch("f", r#"{"a":"x","b":"y"}"#).await;
        assert!(result.is_ok());
    }
}
