// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Web plugin: fetch the contents of a URL for the model.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::functions::{FunctionEntry, FunctionPlugin, FunctionSpec, Invocable, ParameterSpec};
use crate::types::ParamType;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Demonstration plugin exposing `fetch_url(url)`.
pub struct WebPlugin {
    client: Client,
}

impl WebPlugin {
    /// Create the plugin with a default-timeout HTTP client.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }

    /// Create the plugin with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for WebPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionPlugin for WebPlugin {
    fn functions(&self) -> Vec<FunctionEntry> {
        vec![FunctionEntry::new(
            FunctionSpec::new("fetch_url", "Fetch the contents of a URL").with_parameter(
                ParameterSpec::required("url", ParamType::String, "The URL to fetch"),
            ),
            Arc::new(FetchUrlFunction {
                client: self.client.clone(),
            }),
        )]
    }
}

struct FetchUrlFunction {
    client: Client,
}

#[async_trait]
impl Invocable for FetchUrlFunction {
    async fn invoke(&self, args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String> {
        let url = args
            .first()
            .and_then(|a| a.as_ref())
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("url must be a string"))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("request failed with status {}", status);
        }

        Ok(response.text().await?)
    }
}
