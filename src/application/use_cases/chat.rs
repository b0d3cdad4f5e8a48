use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};

use crate::application::{ChatRepository, LlmClient};
use crate::domain::{ChatInteraction, DomainError};

/// The single failure kind callers of [`ChatUseCase`] see.
///
/// Variants only differ in the log line they produce; none of them carries the
/// underlying provider or store message except `Unexpected`.
#[derive(Debug, Error)]
pub enum ChatProcessingError {
    #[error("Failed to generate response due to LLM error.")]
    Generation,

    #[error("Failed to complete chat due to database error.")]
    Persistence,

    #[error("An unexpected error occurred during chat processing: {0}")]
    Unexpected(String),
}

/// Generates a response for a prompt, stores the interaction, and returns it.
pub struct ChatUseCase {
    llm_client: Arc<dyn LlmClient>,
    chat_repository: Arc<dyn ChatRepository>,
}

impl ChatUseCase {
    pub fn new(llm_client: Arc<dyn LlmClient>, chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            llm_client,
            chat_repository,
        }
    }

    pub async fn chat(
        &self,
        prompt: &str,
        user_id: &str,
    ) -> Result<ChatInteraction, ChatProcessingError> {
        info!("Processing new chat interaction for user {}", user_id);

        let answer = match self.llm_client.generate_text(prompt).await {
            Ok(answer) => answer,
            Err(DomainError::Generation(cause)) => {
                error!("LLM generation failed for user {}: {}", user_id, cause);
                return Err(ChatProcessingError::Generation);
            }
            Err(e) => return Err(Self::unexpected(user_id, e)),
        };

        let mut interaction = ChatInteraction::new(
            user_id,
            prompt,
            answer,
            self.llm_client.model_name(),
            Utc::now(),
        );

        let id = match self
            .chat_repository
            .create_chat_interaction(&interaction)
            .await
        {
            Ok(id) => id,
            Err(DomainError::Save(cause)) => {
                error!(
                    "Failed to save chat interaction for user {}: {}",
                    user_id, cause
                );
                return Err(ChatProcessingError::Persistence);
            }
            Err(e) => return Err(Self::unexpected(user_id, e)),
        };

        if id.trim().is_empty() {
            return Err(Self::unexpected(
                user_id,
                DomainError::internal("store returned an empty identifier"),
            ));
        }

        interaction.assign_id(id);
        Ok(interaction)
    }

    fn unexpected(user_id: &str, e: DomainError) -> ChatProcessingError {
        error!(
            "An unexpected error occurred during chat processing for user {}: {}",
            user_id, e
        );
        ChatProcessingError::Unexpected(e.to_string())
    }
}
