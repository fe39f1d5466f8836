// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end completion-loop scenarios against a scripted stub service.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use convoke::{
    CompletionController, CompletionOptions, CompletionResponse, CompletionService,
    ControllerConfig, FunctionCall, FunctionEntry, FunctionMessageOptions, FunctionPlugin,
    FunctionRegistry, FunctionSchema, FunctionSpec, Invocable, Message, RegisterOptions, Role,
    ServiceError, TokenUsage,
};

/// Replays a scripted response sequence and records what it was sent.
struct ScriptedService {
    script: Vec<CompletionResponse>,
    cursor: AtomicUsize,
    seen: Mutex<Vec<(usize, Vec<String>, String)>>,
}

impl ScriptedService {
    fn new(script: Vec<CompletionResponse>) -> Self {
        Self {
            script,
            cursor: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    async fn complete(
        &self,
        messages: &[Message],
        functions: &[FunctionSchema],
        model: &str,
    ) -> Result<CompletionResponse, ServiceError> {
        self.seen.lock().unwrap().push((
            messages.len(),
            functions.iter().map(|f| f.name.clone()).collect(),
            model.to_string(),
        ));
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.script
            .get(index)
            .cloned()
            .ok_or_else(|| ServiceError::api("script exhausted", 500))
    }
}

struct FixedClock;

#[async_trait]
impl Invocable for FixedClock {
    async fn invoke(&self, _args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String> {
        Ok("Thu Aug  6 12:00:00 2026".to_string())
    }
}

struct ClockStub;

impl FunctionPlugin for ClockStub {
    fn functions(&self) -> Vec<FunctionEntry> {
        vec![FunctionEntry::new(
            FunctionSpec::new("date_time", "Get the current date and time"),
            Arc::new(FixedClock),
        )]
    }
}

fn clock_registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.register(&ClockStub, RegisterOptions::new().with_enabled(["date_time"]));
    registry
}

#[tokio::test]
async fn date_time_scenario_resolves_to_final_text() {
    let service = ScriptedService::new(vec![
        CompletionResponse::function_call(FunctionCall::new("date_time", "{}"))
            .with_usage(TokenUsage::new(30, 8)),
        CompletionResponse::text("The time is now known.").with_usage(TokenUsage::new(52, 9)),
    ]);

    let mut controller = CompletionController::new(
        Box::new(service),
        clock_registry(),
        ControllerConfig::new("test-model"),
    );
    controller.push_message(Message::system("You can call functions."));
    controller.push_message(Message::user("What time is it?"));

    let response = controller
        .next_completion(&CompletionOptions::new().call_functions())
        .await
        .unwrap();

    assert!(response
        .message
        .text()
        .unwrap()
        .contains("The time is now known."));

    // Transcript: system, user, invocation-bearing assistant reply, the
    // function result, the final assistant reply, in that order.
    let messages = controller.messages();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(
        messages[2].function_call.as_ref().unwrap().name,
        "date_time"
    );
    assert_eq!(messages[3].role, Role::Function);
    assert_eq!(messages[3].name.as_deref(), Some("date_time"));
    assert_eq!(
        messages[3].content.as_deref(),
        Some("Thu Aug  6 12:00:00 2026")
    );
    assert_eq!(messages[4].role, Role::Assistant);
    assert_eq!(messages[4].text(), Some("The time is now known."));

    // Usage reflects the latest response only.
    assert_eq!(controller.usage().prompt_tokens, 52);
    assert_eq!(controller.usage().completion_tokens, 9);
}

#[tokio::test]
async fn visible_schemas_and_model_reach_the_service() {
    let service = Arc::new(ScriptedService::new(vec![CompletionResponse::text("ok")]));

    let mut registry = clock_registry();
    registry.register(
        &ClockStub,
        RegisterOptions::new().with_namespace("aux"),
    );

    struct SharedService(Arc<ScriptedService>);

    #[async_trait]
    impl CompletionService for SharedService {
        async fn complete(
            &self,
            messages: &[Message],
            functions: &[FunctionSchema],
            model: &str,
        ) -> Result<CompletionResponse, ServiceError> {
            self.0.complete(messages, functions, model).await
        }
    }

    let mut controller = CompletionController::new(
        Box::new(SharedService(Arc::clone(&service))),
        registry,
        ControllerConfig::new("default-model"),
    );

    controller
        .completion_with_message(
            Message::user("hello"),
            &CompletionOptions::new().with_model("override-model"),
        )
        .await
        .unwrap();

    let seen = service.seen.lock().unwrap();
    let (message_count, function_names, model) = &seen[0];
    assert_eq!(*message_count, 1);
    // Registered-but-unenabled "aux.date_time" stays invisible.
    assert_eq!(function_names.as_slice(), ["date_time"]);
    assert_eq!(model, "override-model");
}

#[tokio::test]
async fn namespaced_registration_dispatches_under_prefixed_key() {
    let mut registry = FunctionRegistry::new();
    registry.register(
        &ClockStub,
        RegisterOptions::new()
            .with_namespace("ns")
            .with_enabled(["date_time"]),
    );

    assert!(registry.contains("ns.date_time"));
    assert!(!registry.contains("date_time"));

    let result = registry.dispatch("ns.date_time", "{}").await.unwrap();
    assert_eq!(result, "Thu Aug  6 12:00:00 2026");

    let schemas = registry.visible_schemas();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas[0].name, "ns.date_time");
}

#[tokio::test]
async fn oversized_function_result_is_truncated() {
    struct Verbose;

    #[async_trait]
    impl Invocable for Verbose {
        async fn invoke(&self, _args: Vec<Option<serde_json::Value>>) -> anyhow::Result<String> {
            Ok("paragraph of output ".repeat(2_000))
        }
    }

    struct VerbosePlugin;

    impl FunctionPlugin for VerbosePlugin {
        fn functions(&self) -> Vec<FunctionEntry> {
            vec![FunctionEntry::new(
                FunctionSpec::new("verbose", "Produces a lot of text"),
                Arc::new(Verbose),
            )]
        }
    }

    let mut registry = FunctionRegistry::new();
    registry.register(&VerbosePlugin, RegisterOptions::new().with_enabled(["verbose"]));

    let controller = CompletionController::new(
        Box::new(ScriptedService::new(vec![])),
        registry,
        ControllerConfig::new("test-model"),
    );

    let options = FunctionMessageOptions::default().with_request_max_tokens(64);
    let message = controller.function_message("verbose", "{}", &options).await;

    let content = message.content.unwrap();
    assert!(convoke::truncate::token_count(&content) <= 64);
    assert!(content.starts_with("paragraph of output"));
}
