use crate::domain::requests::{
    AddPaymentMethodRequest, ChargeRequest, DeleteProfileRequest, UpdatePaymentMethodRequest,
};
use crate::http::middleware::request_log::RequestId;
use crate::http::response;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub email: String,
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    match state.profile_service.list_payment_methods(&query.email).await {
        Ok(methods) if methods.is_empty() => response::success(
            Some(request_id),
            methods,
            &format!("No payment methods found for {}", query.email),
            StatusCode::OK,
        ),
        Ok(methods) => response::success(
            Some(request_id),
            methods,
            "Payments fetched successfully",
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &err),
    }
}

pub async fn add_payment_method(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Json(request): Json<AddPaymentMethodRequest>,
) -> impl IntoResponse {
    match state.profile_service.add_payment_method(request).await {
        Ok(profile) => response::success(
            Some(request_id),
            profile,
            "Payment profile successfully created",
            StatusCode::CREATED,
        ),
        Err(err) => response::failure(Some(request_id), &err),
    }
}

pub async fn charge(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Json(request): Json<ChargeRequest>,
) -> impl IntoResponse {
    match state.profile_service.charge(request).await {
        Ok(record) => response::success(
            Some(request_id),
            record,
            "Charge successful",
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &err),
    }
}

pub async fn update_payment_method(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Json(request): Json<UpdatePaymentMethodRequest>,
) -> impl IntoResponse {
    match state.profile_service.update_payment_method(request).await {
        Ok(profile) => response::success(
            Some(request_id),
            profile,
            "Payment method updated successfully",
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &err),
    }
}

pub async fn delete_payment_method(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Json(request): Json<DeleteProfileRequest>,
) -> impl IntoResponse {
    let email = request.email.clone();
    match state.profile_service.delete_customer_profile(request).await {
        Ok(()) => response::success(
            Some(request_id),
            serde_json::Value::Null,
            &format!("Payment method {email} deleted successfully"),
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &err),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
