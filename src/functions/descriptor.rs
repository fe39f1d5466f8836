// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Function descriptors and the plugin registration seam.
//!
//! A plugin declares its callable functions explicitly as a list of
//! [`FunctionEntry`] values: a structured [`FunctionSpec`] next to the
//! [`Invocable`] that executes it. Descriptor extraction turns each entry
//! into a [`FunctionDescriptor`], the registry's unit of bookkeeping,
//! deriving the required-name set and the name->position mapping from the
//! declared parameter order.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::types::{FunctionSchema, ParamType};

/// Declaration of one callee parameter, in declaration order.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
}

impl ParameterSpec {
    /// Declare a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: true,
        }
    }

    /// Declare an optional parameter.
    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: false,
        }
    }
}

/// Declarative description of one callable function.
///
/// Parameter order in `parameters` is the callee's positional argument
/// order.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl FunctionSpec {
    /// Create a spec with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter declaration (position = call order).
    pub fn with_parameter(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }
}

/// Trait for the bound callable behind a function.
///
/// `args` is positional, sized to the declared parameter count; an entry is
/// `None` when the invocation payload omitted that (optional) parameter.
/// The result is the string fed back into the conversation; failures carry
/// a callee-defined message.
///
/// # Example
///
/// ```rust,ignore
/// use convoke::functions::Invocable;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Invocable for Echo {
///     async fn invoke(&self, args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String> {
///         Ok(format!("{:?}", args))
///     }
/// }
/// ```
#[async_trait]
pub trait Invocable: Send + Sync {
    /// Execute the function with positional arguments.
    async fn invoke(&self, args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String>;
}

/// One registerable function: its declarative spec plus its callable.
#[derive(Clone)]
pub struct FunctionEntry {
    pub spec: FunctionSpec,
    pub handler: Arc<dyn Invocable>,
}

impl FunctionEntry {
    /// Pair a spec with its handler.
    pub fn new(spec: FunctionSpec, handler: Arc<dyn Invocable>) -> Self {
        Self { spec, handler }
    }
}

/// Trait that all function plugins implement.
///
/// A plugin enumerates its callable functions explicitly; there is no
/// runtime introspection. The registry runs descriptor extraction over this
/// list at registration time.
pub trait FunctionPlugin {
    /// Enumerate the functions this plugin exposes.
    fn functions(&self) -> Vec<FunctionEntry>;
}

/// Registry-internal record for one registered function.
#[derive(Clone)]
pub struct FunctionDescriptor {
    /// Registry key, possibly namespaced as `"<ns>.<name>"`.
    pub name: String,
    pub description: String,
    /// Parameter declarations in callee order.
    pub parameters: Vec<ParameterSpec>,
    /// Names that must be present in any invocation payload.
    pub required_names: HashSet<String>,
    /// Parameter name -> zero-based position in the callee's argument list.
    pub parameter_position: HashMap<String, usize>,
    /// The bound callable.
    pub handler: Arc<dyn Invocable>,
}

impl std::fmt::Debug for FunctionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("required_names", &self.required_names)
            .finish()
    }
}

impl FunctionDescriptor {
    /// Extract a descriptor from one plugin entry.
    ///
    /// `parameter_position` and `parameters` are derived together: position
    /// `i` in `parameters` maps to exactly one `parameter_position` entry
    /// with value `i`, and `required_names` is a subset of the mapped names.
    pub fn from_entry(entry: &FunctionEntry, namespace: Option<&str>) -> Self {
        let name = namespaced(namespace, &entry.spec.name);

        let mut required_names = HashSet::new();
        let mut parameter_position = HashMap::new();
        for (position, param) in entry.spec.parameters.iter().enumerate() {
            parameter_position.insert(param.name.clone(), position);
            if param.required {
                required_names.insert(param.name.clone());
            }
        }

        Self {
            name,
            description: entry.spec.description.clone(),
            parameters: entry.spec.parameters.clone(),
            required_names,
            parameter_position,
            handler: Arc::clone(&entry.handler),
        }
    }

    /// Build the JSON-Schema-shaped object sent to the completion service.
    pub fn schema(&self) -> FunctionSchema {
        let mut schema = FunctionSchema::new(&self.name, &self.description);
        for param in &self.parameters {
            schema = schema.with_property(&param.name, param.param_type, &param.description);
        }
        schema.required = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.clone())
            .collect();
        schema
    }
}

/// Apply an optional namespace prefix to a bare function name.
pub(crate) fn namespaced(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}.{}", ns, name),
        None => name.to_string(),
    }
}
