use crate::http::response::plain_failure;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

#[derive(Clone)]
pub struct ApiKeyState {
    pub allowed_keys: Vec<String>,
}

pub async fn require_api_key(
    State(state): State<ApiKeyState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|h| h.to_str().ok());

    match provided {
        None => plain_failure("API key missing", StatusCode::UNAUTHORIZED),
        Some(key) if !state.allowed_keys.iter().any(|k| k == key) => {
            plain_failure("Invalid API key", StatusCode::FORBIDDEN)
        }
        Some(_) => next.run(request).await,
    }
}
