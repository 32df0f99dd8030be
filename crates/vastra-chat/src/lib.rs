//! LLM access for the VastraVaani tools (Groq, OpenAI, Anthropic).
//!
//! Every call streams tokens over SSE from the provider. Callers that want a
//! single string use [`Llm::complete`], which collects the stream.

pub mod config;
pub mod json;
pub mod llm;
pub mod providers;
pub mod types;

pub use config::LLMConfig;
pub use json::extract_json_object;
pub use llm::{ask_or, Llm};
pub use types::*;
