use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

use crate::domain::ChatInteraction;

use super::super::error::{ApiError, FieldError};
use super::super::Container;

/// Validated body of `POST /v1/chat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub user_id: String,
    pub prompt: String,
}

impl ChatRequest {
    pub fn new(user_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            prompt: prompt.into(),
        }
    }

    /// Applies the body rules to already-typed fields (used by the CLI).
    pub fn try_new(
        user_id: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let request = Self::new(user_id, prompt);
        match user_id_error(&request.user_id) {
            Some(error) => Err(ApiError::Validation(vec![error])),
            None => Ok(request),
        }
    }

    /// Checks the raw body and reports every offending field at once.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::Validation(vec![FieldError::missing(&["body"], None)]));
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::Validation(vec![FieldError::json_invalid(e)]))?;

        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(ApiError::Validation(vec![FieldError::object_type(other)])),
        };

        let mut errors = Vec::new();
        let user_id = string_field(&fields, "userId", &mut errors);
        let prompt = string_field(&fields, "prompt", &mut errors);

        if let Some(error) = user_id.as_deref().and_then(user_id_error) {
            errors.push(error);
        }

        match (user_id, prompt) {
            (Some(user_id), Some(prompt)) if errors.is_empty() => Ok(Self { user_id, prompt }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// `userId` must hold at least one character; whitespace counts.
fn user_id_error(user_id: &str) -> Option<FieldError> {
    user_id.is_empty().then(|| {
        FieldError::string_too_short(&["body", "userId"], Value::String(String::new()))
    })
}

fn string_field(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::string_type(&["body", name], other.clone()));
            None
        }
        None => {
            errors.push(FieldError::missing(
                &["body", name],
                Some(Value::Object(fields.clone())),
            ));
            None
        }
    }
}

impl<S> FromRequest<S> for ChatRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;
        Self::from_json(&body)
    }
}

/// Body of a successful `POST /v1/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: String,
    pub user_id: String,
    pub prompt: String,
    pub response: String,
    pub model: String,
    pub timestamp: String,
}

impl ChatResponse {
    /// Only persisted interactions can be rendered.
    pub fn from_interaction(interaction: &ChatInteraction) -> Option<Self> {
        Some(Self {
            id: interaction.id()?.to_string(),
            user_id: interaction.user_id().to_string(),
            prompt: interaction.prompt().to_string(),
            response: interaction.response().to_string(),
            model: interaction.model().to_string(),
            timestamp: interaction.timestamp_rfc3339(),
        })
    }
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ApiError> {
        let use_case = self.container.chat_use_case();

        let interaction = use_case
            .chat(&request.prompt, &request.user_id)
            .await
            .map_err(|e| {
                error!(
                    "API Error: Chat processing failed for user {}. Details: {}",
                    request.user_id, e
                );
                ApiError::from(e)
            })?;

        ChatResponse::from_interaction(&interaction).ok_or_else(|| {
            error!(
                "API Error: interaction for user {} has no identifier",
                request.user_id
            );
            ApiError::Processing
        })
    }
}

/// `POST /v1/chat`
pub async fn chat(
    State(container): State<Arc<Container>>,
    request: ChatRequest,
) -> Result<Json<ChatResponse>, ApiError> {
    ChatController::new(&container).chat(request).await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_errors(body: &str) -> Vec<FieldError> {
        match ChatRequest::from_json(body.as_bytes()) {
            Err(ApiError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_body_and_ignores_extra_fields() {
        let request =
            ChatRequest::from_json(br#"{"userId": "u1", "prompt": "hi", "extra": true}"#).unwrap();
        assert_eq!(request, ChatRequest::new("u1", "hi"));
    }

    #[test]
    fn accepts_empty_prompt() {
        let request = ChatRequest::from_json(br#"{"userId": "u1", "prompt": ""}"#).unwrap();
        assert_eq!(request.prompt, "");
    }

    #[test]
    fn reports_missing_prompt() {
        let errors = validation_errors(r#"{"userId": "user789"}"#);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, "missing");
        assert_eq!(errors[0].msg, "Field required");
        assert!(errors[0].names_field("prompt"));
    }

    #[test]
    fn reports_every_bad_field() {
        let errors = validation_errors(r#"{"userId": 123, "prompt": ["a"]}"#);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == "string_type"));
        assert!(errors[0].names_field("userId"));
        assert!(errors[1].names_field("prompt"));
    }

    #[test]
    fn rejects_empty_user_id() {
        let errors = validation_errors(r#"{"userId": "", "prompt": "hi"}"#);
        assert_eq!(errors[0].kind, "string_too_short");
        assert!(errors[0].names_field("userId"));
    }

    #[test]
    fn typed_fields_follow_the_body_rules() {
        assert!(matches!(
            ChatRequest::try_new("", "hi"),
            Err(ApiError::Validation(errors)) if errors[0].kind == "string_too_short"
        ));
        assert_eq!(
            ChatRequest::try_new(" ", "hi").unwrap(),
            ChatRequest::from_json(br#"{"userId": " ", "prompt": "hi"}"#).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_and_non_object_bodies() {
        assert_eq!(validation_errors("{not json")[0].kind, "json_invalid");
        assert_eq!(validation_errors("[1, 2]")[0].kind, "model_attributes_type");
        assert_eq!(validation_errors("")[0].kind, "missing");
    }
}
