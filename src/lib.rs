//! Chatonce - a minimal single-shot chat completion client for
//! OpenAI-compatible APIs.

pub mod config;
pub mod llm;
pub mod render;
pub mod workflow;
