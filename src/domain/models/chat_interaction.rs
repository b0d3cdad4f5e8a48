use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// One prompt/response exchange with the generation backend.
///
/// Built by the chat use case only after generation succeeded. The `id` stays
/// empty until the persistence adapter has stored the record; it is the only
/// field that changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInteraction {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    user_id: String,
    prompt: String,
    response: String,
    model: String,
    timestamp: DateTime<Utc>,
}

impl ChatInteraction {
    pub fn new(
        user_id: impl Into<String>,
        prompt: impl Into<String>,
        response: impl Into<String>,
        model: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            prompt: prompt.into(),
            response: response.into(),
            model: model.into(),
            timestamp,
        }
    }

    pub fn assign_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// ISO-8601 rendering used on the wire and in the store.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
