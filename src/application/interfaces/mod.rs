mod chat_repository;
mod llm_client;

pub use chat_repository::*;
pub use llm_client::*;
