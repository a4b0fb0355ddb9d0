use crate::error::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiEnvelope {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub data: serde_json::Value,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

pub fn success(
    request_id: Option<String>,
    data: impl Serialize,
    message: &str,
    code: StatusCode,
) -> Response {
    let envelope = ApiEnvelope {
        success: true,
        code: code.as_u16(),
        message: message.to_string(),
        data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
        request_id,
    };
    (code, Json(envelope)).into_response()
}

pub fn failure(request_id: Option<String>, err: &ServiceError) -> Response {
    if let ServiceError::Internal(inner) = err {
        tracing::error!(error = %inner, "request failed unexpectedly");
    }
    let code = err.status();
    let envelope = ApiEnvelope {
        success: false,
        code: code.as_u16(),
        message: err.to_string(),
        data: serde_json::Value::Null,
        request_id,
    };
    (code, Json(envelope)).into_response()
}

pub fn plain_failure(message: &str, code: StatusCode) -> Response {
    let envelope = ApiEnvelope {
        success: false,
        code: code.as_u16(),
        message: message.to_string(),
        data: serde_json::Value::Null,
        request_id: None,
    };
    (code, Json(envelope)).into_response()
}
