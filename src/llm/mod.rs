//! Chat completion client for OpenAI-compatible APIs.

mod client;
mod error;

pub use client::{Completer, Completion, CompletionClient, TokenUsage};
pub use error::ApiError;
