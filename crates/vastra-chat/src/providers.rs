//! External LLM provider streaming implementations.
//!
//! Each provider streams tokens via SSE. OpenAI and Groq share one wire
//! format; Anthropic uses its own event types over the same framing.

use std::pin::Pin;

use futures::Stream;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tokio_stream::StreamExt;
use tracing::{debug, error};

use crate::types::{ChatMessage, LLMProvider, ProviderTarget};

/// Boxed stream type for returning different stream implementations.
pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// A single streamed token or error.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamChunk {
    Token(String),
    Done { tokens_used: usize },
    Error(String),
}

/// Stream tokens from the provider named in `target`.
pub fn stream_llm(
    client: &Client,
    target: &ProviderTarget,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: usize,
) -> BoxedStream {
    debug!(
        provider = %target.provider,
        model = %target.model,
        "Streaming completion"
    );

    match target.provider {
        LLMProvider::OpenAI | LLMProvider::Groq => {
            let body = json!({
                "model": target.model,
                "messages": messages,
                "temperature": temperature,
                "max_tokens": max_tokens,
                "stream": true,
            });
            let request = client
                .post(format!("{}/chat/completions", target.base_url()))
                .bearer_auth(&target.api_key)
                .json(&body);
            Box::pin(parse_events(request, openai_event))
        }
        LLMProvider::Anthropic => {
            // Anthropic takes the system prompt as a top-level field
            let system: Option<String> = messages
                .iter()
                .find(|m| m.role == "system")
                .map(|m| m.content.clone());
            let turns: Vec<&ChatMessage> =
                messages.iter().filter(|m| m.role != "system").collect();

            let mut body = json!({
                "model": target.model,
                "messages": turns,
                "temperature": temperature,
                "max_tokens": max_tokens,
                "stream": true,
            });
            if let Some(sys) = system {
                body["system"] = json!(sys);
            }

            let request = client
                .post(format!("{}/messages", target.base_url()))
                .header("x-api-key", &target.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&body);
            Box::pin(parse_events(request, anthropic_event))
        }
    }
}

/// What one SSE `data:` payload means for the token stream.
enum EventAction {
    Token(String),
    Finish,
    Fail(String),
    Skip,
}

fn openai_event(data: &str) -> EventAction {
    if data.trim() == "[DONE]" {
        return EventAction::Finish;
    }
    match serde_json::from_str::<Value>(data) {
        Ok(parsed) => match parsed["choices"][0]["delta"]["content"].as_str() {
            Some(content) if !content.is_empty() => EventAction::Token(content.to_string()),
            _ => EventAction::Skip,
        },
        Err(_) => EventAction::Skip,
    }
}

fn anthropic_event(data: &str) -> EventAction {
    let Ok(parsed) = serde_json::from_str::<Value>(data) else {
        return EventAction::Skip;
    };
    match parsed["type"].as_str() {
        Some("content_block_delta") => match parsed["delta"]["text"].as_str() {
            Some(text) if !text.is_empty() => EventAction::Token(text.to_string()),
            _ => EventAction::Skip,
        },
        Some("message_stop") => EventAction::Finish,
        Some("error") => {
            let msg = parsed["error"]["message"]
                .as_str()
                .unwrap_or("Unknown error");
            error!("Anthropic error: {}", msg);
            EventAction::Fail(msg.to_string())
        }
        _ => EventAction::Skip,
    }
}

/// Send `request` and turn its SSE body into [`StreamChunk`]s using `interpret`.
fn parse_events(
    request: RequestBuilder,
    interpret: fn(&str) -> EventAction,
) -> impl Stream<Item = StreamChunk> + Send + 'static {
    async_stream::stream! {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                yield StreamChunk::Error(format!("Request failed: {}", e));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            yield StreamChunk::Error(format!("API error {}: {}", status, body));
            return;
        }

        let mut body = response.bytes_stream();
        let mut buffer = String::new();
        let mut token_count = 0usize;

        while let Some(chunk) = body.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield StreamChunk::Error(format!("Stream read error: {}", e));
                    return;
                }
            };
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // Only complete lines; a partial line waits for the next chunk
            while let Some(line_end) = buffer.find('\n') {
                let line: String = buffer.drain(..=line_end).collect();
                let Some(data) = line.trim().strip_prefix("data:") else {
                    continue;
                };
                match interpret(data.trim_start()) {
                    EventAction::Token(text) => {
                        token_count += 1;
                        yield StreamChunk::Token(text);
                    }
                    EventAction::Finish => {
                        yield StreamChunk::Done { tokens_used: token_count };
                        return;
                    }
                    EventAction::Fail(msg) => {
                        yield StreamChunk::Error(msg);
                        return;
                    }
                    EventAction::Skip => {}
                }
            }
        }

        yield StreamChunk::Done { tokens_used: token_count };
    }
}

/// Test an API key by making a minimal request.
pub async fn test_api_key(provider: &str, api_key: &str) -> Result<(), String> {
    let client = Client::new();

    let request = match provider {
        "openai" => client
            .get(format!("{}/models", LLMProvider::OpenAI.default_base_url()))
            .bearer_auth(api_key),
        "groq" => client
            .get(format!("{}/models", LLMProvider::Groq.default_base_url()))
            .bearer_auth(api_key),
        "anthropic" => client
            .post(format!("{}/messages", LLMProvider::Anthropic.default_base_url()))
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": "claude-3-5-haiku-20241022",
                "max_tokens": 1,
                "messages": [{"role": "user", "content": "Hi"}],
            })),
        _ => return Err(format!("Unknown provider: {}", provider)),
    };

    let resp = request.send().await.map_err(|e| e.to_string())?;
    // Anthropic answers 400 for a valid key when the probe itself is rejected
    if resp.status().is_success() || (provider == "anthropic" && resp.status().as_u16() == 400) {
        Ok(())
    } else {
        Err(format!("API returned status {}", resp.status()))
    }
}
