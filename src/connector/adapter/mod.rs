mod duckdb_chat_repository;
mod duckdb_store;
mod gemini_client;
mod in_memory_chat_repository;
mod mock_llm_client;

pub use duckdb_chat_repository::*;
pub use duckdb_store::*;
pub use gemini_client::*;
pub use in_memory_chat_repository::*;
pub use mock_llm_client::*;
