use crate::http::response::plain_failure;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

#[derive(Clone)]
pub struct OriginState {
    pub allowed_origins: Vec<String>,
}

pub async fn enforce(
    State(state): State<OriginState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get("origin")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if !state.allowed_origins.iter().any(|o| o == origin) {
        return plain_failure("Domain not authorized", StatusCode::FORBIDDEN);
    }

    next.run(request).await
}
