// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Function registry: name -> descriptor mapping plus the enabled set.
//!
//! The registry owns every registered [`FunctionDescriptor`] and a separate
//! membership list of enabled names. A function that is registered but not
//! enabled is invisible to the model (excluded from the schema list) while
//! remaining directly dispatchable.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "telemetry")]
use tracing::debug;

use super::descriptor::{namespaced, FunctionDescriptor, FunctionPlugin};
use crate::types::FunctionSchema;

/// Options recognized at plugin registration time.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Prefix applied to every function name from this plugin as
    /// `"<namespace>.<name>"`.
    pub namespace: Option<String>,
    /// Bare function names to make visible to the model; combined with
    /// `namespace` to form registry keys.
    pub enable: Vec<String>,
}

impl RegisterOptions {
    /// No namespace, nothing enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace prefix.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add bare function names to enable.
    pub fn with_enabled(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enable.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Registry of callable functions, maps names to descriptors.
#[derive(Default)]
pub struct FunctionRegistry {
    descriptors: HashMap<String, FunctionDescriptor>,
    enabled: HashSet<String>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every function a plugin exposes.
    ///
    /// Re-registering a name already present overwrites its descriptor
    /// (last write wins); this is the update path for plugin reloads, not
    /// an error. Registry mutators never fail.
    pub fn register(&mut self, plugin: &dyn FunctionPlugin, options: RegisterOptions) {
        for entry in plugin.functions() {
            let descriptor = FunctionDescriptor::from_entry(&entry, options.namespace.as_deref());
            #[cfg(feature = "telemetry")]
            debug!(function = %descriptor.name, "Registering function");
            self.descriptors.insert(descriptor.name.clone(), descriptor);
        }

        for name in &options.enable {
            self.enabled.insert(namespaced(options.namespace.as_deref(), name));
        }
    }

    /// Get a descriptor by (possibly namespaced) name.
    pub fn get(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.descriptors.get(name)
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Check if a function is visible to the model.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Get all registered function names.
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }

    /// Make a function visible to the model. Idempotent.
    pub fn enable(&mut self, name: impl Into<String>) {
        self.enabled.insert(name.into());
    }

    /// Hide a function from the model. Idempotent; the descriptor stays
    /// registered and dispatchable.
    pub fn disable(&mut self, name: &str) {
        self.enabled.remove(name);
    }

    /// Enable several functions at once.
    pub fn enable_many(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        for name in names {
            self.enable(name);
        }
    }

    /// Disable several functions at once.
    pub fn disable_many<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.disable(name);
        }
    }

    /// Build the schema list sent to the completion service.
    ///
    /// Includes exactly the enabled names that have a registered
    /// descriptor. Order is unspecified but stable within a call.
    pub fn visible_schemas(&self) -> Vec<FunctionSchema> {
        self.enabled
            .iter()
            .filter_map(|name| self.descriptors.get(name))
            .map(FunctionDescriptor::schema)
            .collect()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("registered", &self.descriptors.len())
            .field("enabled", &self.enabled.len())
            .finish()
    }
}
