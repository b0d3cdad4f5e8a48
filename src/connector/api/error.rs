use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::application::ChatProcessingError;

/// Body of every 500 returned by the chat endpoint. Never carries the cause.
pub const PROCESSING_ERROR_DETAIL: &str =
    "An unexpected error happening while processing the chat request.";

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Option<Value>,
}

impl FieldError {
    pub fn new(kind: &str, loc: &[&str], msg: impl Into<String>, input: Option<Value>) -> Self {
        Self {
            kind: kind.to_string(),
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            input,
        }
    }

    pub fn missing(loc: &[&str], input: Option<Value>) -> Self {
        Self::new("missing", loc, "Field required", input)
    }

    pub fn string_type(loc: &[&str], input: Value) -> Self {
        Self::new("string_type", loc, "Input should be a valid string", Some(input))
    }

    pub fn string_too_short(loc: &[&str], input: Value) -> Self {
        Self::new(
            "string_too_short",
            loc,
            "String should have at least 1 character",
            Some(input),
        )
    }

    pub fn json_invalid(cause: impl std::fmt::Display) -> Self {
        Self::new(
            "json_invalid",
            &["body"],
            "JSON decode error",
            Some(Value::String(cause.to_string())),
        )
    }

    pub fn object_type(input: Value) -> Self {
        Self::new(
            "model_attributes_type",
            &["body"],
            "Input should be a valid dictionary or object to extract fields from",
            Some(input),
        )
    }

    /// Whether this error points at `field` inside the request body.
    pub fn names_field(&self, field: &str) -> bool {
        self.loc.len() == 2 && self.loc[0] == "body" && self.loc[1] == field
    }
}

#[derive(Serialize)]
struct ErrorBody<T: Serialize> {
    detail: T,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Processing,
    /// The body could not be read at all; carries the transport status.
    Rejected { status: StatusCode, message: String },
}

impl From<ChatProcessingError> for ApiError {
    fn from(_: ChatProcessingError) -> Self {
        Self::Processing
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody { detail: errors }),
            )
                .into_response(),
            ApiError::Processing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    detail: PROCESSING_ERROR_DETAIL,
                }),
            )
                .into_response(),
            ApiError::Rejected { status, message } => {
                (status, Json(ErrorBody { detail: message })).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_serializes_like_a_validation_entry() {
        let err = FieldError::string_type(&["body", "userId"], Value::from(123));
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "type": "string_type",
                "loc": ["body", "userId"],
                "msg": "Input should be a valid string",
                "input": 123
            })
        );
        assert!(err.names_field("userId"));
        assert!(!err.names_field("prompt"));
    }

    #[test]
    fn missing_entry_always_carries_input() {
        let value = serde_json::to_value(FieldError::missing(&["body"], None)).unwrap();
        assert_eq!(value["input"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("input"));
    }

    #[test]
    fn rejected_body_keeps_its_status() {
        let response = ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn processing_error_maps_to_500() {
        let response = ApiError::from(ChatProcessingError::Persistence).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_error_maps_to_422() {
        let response =
            ApiError::Validation(vec![FieldError::missing(&["body", "prompt"], None)]).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
