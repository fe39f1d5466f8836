// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Clock plugin: expose the current date and time to the model.

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

use crate::functions::{FunctionEntry, FunctionPlugin, FunctionSpec, Invocable};

/// Demonstration plugin exposing `date_time` (no parameters).
pub struct ClockPlugin;

impl FunctionPlugin for ClockPlugin {
    fn functions(&self) -> Vec<FunctionEntry> {
        vec![FunctionEntry::new(
            FunctionSpec::new(
                "date_time",
                "Get the current local date and time",
            ),
            Arc::new(DateTimeFunction),
        )]
    }
}

struct DateTimeFunction;

#[async_trait]
impl Invocable for DateTimeFunction {
    async fn invoke(&self, _args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String> {
        Ok(Local::now().format("%a %b %e %H:%M:%S %Y %z").to_string())
    }
}
