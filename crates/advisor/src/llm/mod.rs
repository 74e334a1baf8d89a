//! LLM provider client for chat completions.

mod error;
mod openai;
mod provider;
mod types;

pub use error::{ErrorKind, LLMError};
pub use openai::OpenAICompatibleProvider;
pub use provider::LLMProvider;
pub use types::{ChatRequest, ChatResponse, Choice, Message, ReplyMessage, Role, Usage};
