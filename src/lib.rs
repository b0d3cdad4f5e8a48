pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{ChatProcessingError, ChatRepository, ChatUseCase, LlmClient};

pub use connector::{
    build_router, serve, ApiError, ChatController, ChatRequest, ChatResponse, Container,
    ContainerConfig, DuckdbChatRepository, DuckdbStore, FieldError, GeminiClient,
    InMemoryChatRepository, MockLlmClient, PROCESSING_ERROR_DETAIL,
};

pub use domain::{ChatInteraction, DomainError};
