use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{json, Value};
use thiserror::Error;

use crate::pipeline::SubmissionError;

/// Failures of the HTTP surface, rendered as `{ "error", "details"? }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Invalid form data.")]
    MalformedPayload(String),

    #[error("Attachment too large: {field} exceeds {limit} bytes.")]
    PayloadTooLarge { field: String, limit: usize },
}

impl ApiError {
    fn details(&self) -> Option<Value> {
        match self {
            ApiError::Submission(err) => match err.issues() {
                Some(issues) => serde_json::to_value(issues).ok(),
                None => err.diagnostic().map(Value::String),
            },
            ApiError::MalformedPayload(reason) => Some(Value::String(reason.clone())),
            ApiError::PayloadTooLarge { .. } => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Submission(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Job request failed: {} ({:?})", self, self);
        }

        let mut body = json!({ "error": self.to_string() });
        if let Some(details) = self.details() {
            body["details"] = details;
        }

        HttpResponse::build(status).json(body)
    }
}
