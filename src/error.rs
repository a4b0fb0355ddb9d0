use axum::http::StatusCode;

/// Failure taxonomy for the profile/charge use cases. Validation, config and
/// not-found errors are raised before any remote call; the gateway-classified
/// variants carry the status the caller sees after a charge attempt.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("missing gateway credentials for provider '{0}'")]
    Configuration(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("transaction declined")]
    Declined,
    #[error("transaction error at the gateway")]
    GatewayProcessing,
    #[error("transaction held for review")]
    HeldForReview,
    #[error("{0}")]
    GatewayRejected(String),
    #[error("gateway call timed out")]
    GatewayTimeout,
    #[error("unrecognized gateway response")]
    UnknownGatewayOutcome,
    #[error("malformed gateway response")]
    MalformedGatewayResponse,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Declined => StatusCode::PAYMENT_REQUIRED,
            ServiceError::GatewayProcessing => StatusCode::BAD_GATEWAY,
            ServiceError::HeldForReview => StatusCode::ACCEPTED,
            ServiceError::GatewayRejected(_) => StatusCode::BAD_GATEWAY,
            ServiceError::GatewayTimeout
            | ServiceError::UnknownGatewayOutcome
            | ServiceError::MalformedGatewayResponse
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
