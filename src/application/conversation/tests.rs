use super::*;
use crate::application::tooling::{CLOCK_TOOL_NAME, ToolExecutor, ToolRegistry, WEATHER_TOOL_NAME};
use crate::config::{GenerationConfig, WeatherConfig};
use crate::constants::EMPTY_RESPONSE_FALLBACK;
use crate::domain::{ConversationHistory, Message, ToolCallRequest, ToolOutcome};
use crate::infrastructure::model::{ModelClient, ModelError, ModelRequest, ModelTurn};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct Recorded {
    history: ConversationHistory,
    tool_names: Vec<String>,
    system_instruction: Option<String>,
    generation: GenerationConfig,
}

struct ScriptedModel {
    responses: Mutex<Vec<Result<ModelTurn, ModelError>>>,
    recordings: Mutex<Vec<Recorded>>,
}

impl ScriptedModel {
    fn new(responses: Vec<Result<ModelTurn, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            recordings: Mutex::new(Vec::new()),
        })
    }

    fn turns(turns: Vec<ModelTurn>) -> Arc<Self> {
        Self::new(turns.into_iter().map(Ok).collect())
    }

    async fn requests(&self) -> Vec<Recorded> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: ModelRequest<'_>) -> Result<ModelTurn, ModelError> {
        self.recordings.lock().await.push(Recorded {
            history: request.history.clone(),
            tool_names: request.tools.iter().map(|t| t.name.clone()).collect(),
            system_instruction: request.system_instruction.map(str::to_string),
            generation: request.generation,
        });
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "script exhausted"));
        }
        responses.remove(0)
    }
}

fn call(name: &str, args: Value) -> ToolCallRequest {
    ToolCallRequest::new(name, args.as_object().cloned().unwrap_or_default())
}

fn settings(max_tool_steps: usize) -> LoopSettings {
    LoopSettings {
        system_instruction: Some("Você é Dio.".into()),
        generation: GenerationConfig {
            max_output_tokens: 500,
            temperature: 0.9,
        },
        max_tool_steps,
    }
}

fn executor() -> ToolExecutor {
    let registry = ToolRegistry::with_default_tools(WeatherConfig {
        endpoint: "http://127.0.0.1:9/weather".into(),
        api_key: None,
        units: "metric".into(),
        lang: "pt_br".into(),
        timeout: Duration::from_secs(1),
    })
    .expect("registry builds");
    ToolExecutor::new(Arc::new(registry))
}

fn conversation(model: Arc<ScriptedModel>, max_tool_steps: usize) -> ConversationLoop<ScriptedModel> {
    ConversationLoop::new(model, executor(), settings(max_tool_steps))
}

#[tokio::test]
async fn plain_answer_appends_user_and_model_messages() {
    let model = ScriptedModel::turns(vec![ModelTurn::Text("Inútil!".into())]);
    let outcome = conversation(model.clone(), 5)
        .run("Olá", ConversationHistory::new())
        .await
        .expect("turn succeeds");

    assert_eq!(outcome.response, "Inútil!");
    assert_eq!(outcome.tool_calls, 0);
    assert_eq!(
        outcome.history.messages(),
        &[
            Message::UserText("Olá".into()),
            Message::ModelText("Inútil!".into())
        ]
    );

    let requests = model.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].history.messages(), &[Message::UserText("Olá".into())]);
    assert_eq!(requests[0].tool_names, vec![CLOCK_TOOL_NAME, WEATHER_TOOL_NAME]);
    assert_eq!(requests[0].system_instruction.as_deref(), Some("Você é Dio."));
    assert_eq!(requests[0].generation.max_output_tokens, 500);
}

#[tokio::test]
async fn time_question_runs_clock_and_appends_four_entries() {
    let model = ScriptedModel::turns(vec![
        ModelTurn::ToolCalls(vec![call(CLOCK_TOOL_NAME, json!({}))]),
        ModelTurn::Text("São exatamente as horas da sua ruína.".into()),
    ]);
    let outcome = conversation(model.clone(), 5)
        .run("What time is it?", ConversationHistory::new())
        .await
        .expect("turn succeeds");

    let messages = outcome.history.messages();
    assert_eq!(messages.len(), 4);
    assert!(matches!(&messages[0], Message::UserText(text) if text == "What time is it?"));
    assert!(matches!(&messages[1], Message::ModelToolCall(c) if c.name == CLOCK_TOOL_NAME));
    match &messages[2] {
        Message::ToolResult(result) => match &result.outcome {
            ToolOutcome::Success(payload) => assert!(payload.contains_key("currentTime")),
            other => panic!("clock failed: {other:?}"),
        },
        other => panic!("expected tool result, got {other:?}"),
    }
    assert!(matches!(&messages[3], Message::ModelText(_)));
    assert_eq!(outcome.tool_calls, 1);

    let requests = model.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].history.len(), 3);
    assert!(matches!(requests[1].history.last(), Some(Message::ToolResult(_))));
}

#[tokio::test]
async fn unknown_tool_is_answered_and_loop_recovers() {
    let model = ScriptedModel::turns(vec![
        ModelTurn::ToolCalls(vec![call("getHoroscope", json!({"sign": "leo"}))]),
        ModelTurn::Text("Essa função não existe, verme.".into()),
    ]);
    let outcome = conversation(model, 5)
        .run("Meu horóscopo?", ConversationHistory::new())
        .await
        .expect("unknown tool never fails the turn");

    match &outcome.history.messages()[2] {
        Message::ToolResult(result) => {
            assert_eq!(result.name, "getHoroscope");
            assert!(result.is_error());
        }
        other => panic!("expected tool result, got {other:?}"),
    }
    assert_eq!(outcome.response, "Essa função não existe, verme.");
}

#[tokio::test]
async fn weather_without_credential_is_fed_back_as_error() {
    let model = ScriptedModel::turns(vec![
        ModelTurn::ToolCalls(vec![call(WEATHER_TOOL_NAME, json!({"location": "Tokyo"}))]),
        ModelTurn::Text("Sem chave, sem clima.".into()),
    ]);
    let outcome = conversation(model, 5)
        .run("Clima em Tokyo?", ConversationHistory::new())
        .await
        .expect("turn succeeds");

    let Message::ToolResult(result) = &outcome.history.messages()[2] else {
        panic!("expected tool result");
    };
    let payload = result.response_payload();
    assert!(
        payload
            .get("error")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains("Chave"))
    );
}

#[tokio::test]
async fn only_first_of_simultaneous_calls_is_executed() {
    let model = ScriptedModel::turns(vec![
        ModelTurn::ToolCalls(vec![
            call(CLOCK_TOOL_NAME, json!({})),
            call(WEATHER_TOOL_NAME, json!({"location": "Cairo"})),
        ]),
        ModelTurn::Text("done".into()),
    ]);
    let outcome = conversation(model, 5)
        .run("hora e clima", ConversationHistory::new())
        .await
        .expect("turn succeeds");

    let calls: Vec<&str> = outcome
        .history
        .messages()
        .iter()
        .filter_map(|message| match message {
            Message::ModelToolCall(call) => Some(call.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(calls, vec![CLOCK_TOOL_NAME]);
    assert_eq!(outcome.history.len(), 4);
}

#[tokio::test]
async fn empty_response_uses_fallback_text() {
    let model = ScriptedModel::turns(vec![ModelTurn::Empty]);
    let outcome = conversation(model, 5)
        .run("...", ConversationHistory::new())
        .await
        .expect("empty answer is not an error");

    assert_eq!(outcome.response, EMPTY_RESPONSE_FALLBACK);
    assert_eq!(
        outcome.history.last(),
        Some(&Message::ModelText(EMPTY_RESPONSE_FALLBACK.into()))
    );
}

#[tokio::test]
async fn blank_text_uses_fallback_text() {
    let model = ScriptedModel::turns(vec![ModelTurn::Text(" \n\t ".into())]);
    let outcome = conversation(model, 5)
        .run("Olá", ConversationHistory::new())
        .await
        .expect("blank answer is not an error");

    assert_eq!(outcome.response, EMPTY_RESPONSE_FALLBACK);
    assert_eq!(
        outcome.history.last(),
        Some(&Message::ModelText(EMPTY_RESPONSE_FALLBACK.into()))
    );
    assert_eq!(outcome.history.len(), 2);
}

#[tokio::test]
async fn empty_call_list_is_treated_as_empty_response() {
    let model = ScriptedModel::turns(vec![ModelTurn::ToolCalls(Vec::new())]);
    let outcome = conversation(model, 5)
        .run("...", ConversationHistory::new())
        .await
        .expect("turn succeeds");

    assert_eq!(outcome.response, EMPTY_RESPONSE_FALLBACK);
    assert_eq!(outcome.history.len(), 2);
}

#[tokio::test]
async fn endless_tool_requests_hit_the_step_limit() {
    let looping = (0..10)
        .map(|_| ModelTurn::ToolCalls(vec![call(CLOCK_TOOL_NAME, json!({}))]))
        .collect();
    let model = ScriptedModel::turns(looping);
    let error = conversation(model.clone(), 2)
        .run("loop forever", ConversationHistory::new())
        .await
        .expect_err("limit reached");

    assert!(matches!(error, ChatError::ToolLimitExceeded { limit: 2 }));
    assert_eq!(error.kind(), ErrorKind::UpstreamProtocol);
    assert_eq!(model.requests().await.len(), 3);
}

#[tokio::test]
async fn upstream_failure_ends_the_turn() {
    let model = ScriptedModel::new(vec![Err(ModelError::status("gemini", 429, "quota"))]);
    let error = conversation(model, 5)
        .run("Olá", ConversationHistory::new())
        .await
        .expect_err("quota error");

    assert_eq!(error.kind(), ErrorKind::QuotaExceeded);
    assert_eq!(error.status_code(), 429);
}

#[tokio::test]
async fn failure_after_tool_call_still_propagates() {
    let model = ScriptedModel::new(vec![
        Ok(ModelTurn::ToolCalls(vec![call(CLOCK_TOOL_NAME, json!({}))])),
        Err(ModelError::safety_blocked("gemini", "SAFETY")),
    ]);
    let error = conversation(model, 5)
        .run("Olá", ConversationHistory::new())
        .await
        .expect_err("blocked");

    assert_eq!(error.kind(), ErrorKind::SafetyBlocked);
}

#[tokio::test]
async fn prior_history_is_preserved_and_extended() {
    let mut prior = ConversationHistory::new();
    prior.push_user_text("Primeira pergunta");
    prior.push_tool_exchange(
        call(CLOCK_TOOL_NAME, json!({})),
        crate::domain::ToolCallResult::success(CLOCK_TOOL_NAME, Map::new()),
    );
    prior.push_model_text("Primeira resposta");
    let snapshot = prior.clone();

    let model = ScriptedModel::turns(vec![ModelTurn::Text("Segunda resposta".into())]);
    let outcome = conversation(model.clone(), 5)
        .run("Segunda pergunta", prior)
        .await
        .expect("turn succeeds");

    assert_eq!(outcome.history.len(), snapshot.len() + 2);
    assert_eq!(
        &outcome.history.messages()[..snapshot.len()],
        snapshot.messages()
    );
    let requests = model.requests().await;
    assert_eq!(requests[0].history.len(), snapshot.len() + 1);
}
