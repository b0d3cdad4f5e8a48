pub mod chat_controller;
pub mod health_controller;

pub use chat_controller::{ChatController, ChatRequest, ChatResponse};
pub use health_controller::{HealthController, HealthResponse};
