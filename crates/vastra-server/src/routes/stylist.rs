//! Personal stylist chat, collected or streamed over SSE.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use axum::routing::post;
use axum::{Json, Router};
use futures::Stream;
use serde_json::{json, Value};
use tokio_stream::StreamExt;

use crate::advisor::{stylist_messages, StylistRequest};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use vastra_chat::providers::StreamChunk;
use vastra_chat::StreamEvent;

type SseStream = Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/stream", post(stream_chat))
}

// ---------------------------------------------------------------
// Non-streaming chat
// ---------------------------------------------------------------

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<StylistRequest>) -> AppResult<Json<Value>> {
    let llm = state.llm().ok_or_else(AppError::no_llm)?;
    let response = llm.complete(stylist_messages(&req), 0.7, 800).await?;

    Ok(Json(json!({
        "success": true,
        "message": req.message,
        "response": response,
        "model": llm.model_label(),
    })))
}

// ---------------------------------------------------------------
// Streaming chat (SSE)
// ---------------------------------------------------------------

fn sse_event(event: &StreamEvent) -> Event {
    Event::default()
        .json_data(event)
        .unwrap_or_else(|_| Event::default().data("{}"))
}

async fn stream_chat(State(state): State<Arc<AppState>>, Json(req): Json<StylistRequest>) -> Sse<SseStream> {
    let start = Instant::now();

    let Some(llm) = state.llm() else {
        let error_stream: SseStream = Box::pin(async_stream::stream! {
            let event = StreamEvent::Error {
                error: "No LLM provider configured".into(),
            };
            yield Ok::<_, Infallible>(sse_event(&event));
        });
        return Sse::new(error_stream);
    };

    let model = llm.model().to_string();
    let llm_stream = llm.stream(stylist_messages(&req), 0.7, 800);

    let sse_stream: SseStream = Box::pin(async_stream::stream! {
        tokio::pin!(llm_stream);
        while let Some(chunk) = llm_stream.next().await {
            match chunk {
                StreamChunk::Token(text) => {
                    yield Ok(sse_event(&StreamEvent::Token { content: text }));
                }
                StreamChunk::Done { tokens_used } => {
                    let event = StreamEvent::Done {
                        model: model.clone(),
                        tokens_used,
                        duration: start.elapsed().as_millis() as u64,
                    };
                    yield Ok(sse_event(&event));
                    yield Ok(Event::default().data("[DONE]"));
                    return;
                }
                StreamChunk::Error(e) => {
                    yield Ok(sse_event(&StreamEvent::Error { error: e }));
                    return;
                }
            }
        }
    });

    Sse::new(sse_stream)
}
