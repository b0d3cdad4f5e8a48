use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::application::ChatRepository;
use crate::domain::{ChatInteraction, DomainError};

/// Process-local store, lost on exit.
pub struct InMemoryChatRepository {
    interactions: Arc<Mutex<HashMap<String, ChatInteraction>>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self {
            interactions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.interactions.lock().await.len()
    }

    pub async fn get(&self, id: &str) -> Option<ChatInteraction> {
        self.interactions.lock().await.get(id).cloned()
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_chat_interaction(
        &self,
        interaction: &ChatInteraction,
    ) -> Result<String, DomainError> {
        let id = interaction
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut store = self.interactions.lock().await;
        if store.contains_key(&id) {
            return Err(DomainError::save(format!(
                "Failed to save chat interaction: duplicate id {}",
                id
            )));
        }

        let mut stored = interaction.clone();
        stored.assign_id(id.clone());
        store.insert(id.clone(), stored);

        debug!("Saved chat interaction {} to memory", id);
        Ok(id)
    }
}
