//! A resolved LLM handle used by the feature pipelines.

use reqwest::Client;
use tokio_stream::StreamExt;
use tracing::warn;

use vastra_core::{Error, Result};

use crate::config::LLMConfig;
use crate::providers::{self, BoxedStream, StreamChunk};
use crate::types::{ChatMessage, LLMProvider, ProviderTarget};

/// Provider, model and key bundled with an HTTP client.
#[derive(Debug, Clone)]
pub struct Llm {
    client: Client,
    target: ProviderTarget,
}

impl Llm {
    pub fn new(client: Client, target: ProviderTarget) -> Self {
        Self { client, target }
    }

    /// `None` when no provider has a key.
    pub fn from_config(config: &LLMConfig, client: Client) -> Option<Self> {
        config.resolve_target().map(|target| Self::new(client, target))
    }

    pub fn provider(&self) -> LLMProvider {
        self.target.provider
    }

    pub fn model(&self) -> &str {
        &self.target.model
    }

    /// Display name reported to the frontend, e.g. `Llama 3.3 70B (Groq)`.
    pub fn model_label(&self) -> String {
        let name = match self.target.model.as_str() {
            "llama-3.3-70b-versatile" => "Llama 3.3 70B",
            "llama-3.1-8b-instant" => "Llama 3.1 8B",
            other => other,
        };
        format!("{} ({})", name, self.target.provider.label())
    }

    pub fn stream(&self, messages: Vec<ChatMessage>, temperature: f64, max_tokens: usize) -> BoxedStream {
        providers::stream_llm(&self.client, &self.target, messages, temperature, max_tokens)
    }

    /// Run a chat completion and return the full text.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String> {
        let mut stream = self.stream(messages, temperature, max_tokens);
        let mut text = String::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                StreamChunk::Token(t) => text.push_str(&t),
                StreamChunk::Done { .. } => break,
                StreamChunk::Error(e) => return Err(Error::Upstream(e)),
            }
        }

        Ok(text.trim().to_string())
    }

    /// Single user-message completion.
    pub async fn prompt(&self, prompt: &str, temperature: f64, max_tokens: usize) -> Result<String> {
        self.complete(vec![ChatMessage::user(prompt)], temperature, max_tokens)
            .await
    }

    /// [`prompt`](Self::prompt), or `fallback` when the call fails or comes back empty.
    pub async fn prompt_or(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: usize,
        fallback: impl Into<String>,
    ) -> String {
        match self.prompt(prompt, temperature, max_tokens).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => fallback.into(),
            Err(e) => {
                warn!("LLM call failed, using fallback text: {}", e);
                fallback.into()
            }
        }
    }
}

/// [`Llm::prompt_or`] that also covers having no provider configured.
pub async fn ask_or(
    llm: Option<&Llm>,
    prompt: &str,
    temperature: f64,
    max_tokens: usize,
    fallback: impl Into<String>,
) -> String {
    match llm {
        Some(llm) => llm.prompt_or(prompt, temperature, max_tokens, fallback).await,
        None => fallback.into(),
    }
}
