//! Advisor - Student Success Advisor replies from an OpenAI-compatible chat completion API.

pub mod config;
pub mod gateway;
pub mod llm;

pub use config::{Config, ConfigError};
pub use gateway::{CompletionGateway, CompletionSettings, render_error, render_reply};
