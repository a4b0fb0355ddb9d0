use crate::error::ServiceError;
use crate::http::middleware::request_log::RequestId;
use crate::http::response;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorQuery {
    pub vendor_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub vendor_name: String,
    pub plan_name: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    pub id: i64,
    pub vendor_name: Option<String>,
    pub plan_name: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePlanQuery {
    pub vendor_name: String,
    pub plan_name: String,
}

pub async fn list_plans(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
) -> impl IntoResponse {
    match state.vendor_plans_repo.list_all().await {
        Ok(plans) => response::success(
            Some(request_id),
            plans,
            "Vendor plans fetched successfully",
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &ServiceError::Internal(err)),
    }
}

pub async fn get_plan(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Path(plan_name): Path<String>,
) -> impl IntoResponse {
    match state
        .vendor_plans_repo
        .find_by_plan_name(&plan_name.to_lowercase())
        .await
    {
        Ok(Some(plan)) => response::success(
            Some(request_id),
            plan,
            "Vendor plan fetched successfully",
            StatusCode::OK,
        ),
        Ok(None) => response::failure(
            Some(request_id),
            &ServiceError::NotFound("Vendor plan not found".to_string()),
        ),
        Err(err) => response::failure(Some(request_id), &ServiceError::Internal(err)),
    }
}

pub async fn get_by_vendor(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Query(query): Query<VendorQuery>,
) -> impl IntoResponse {
    match state
        .vendor_plans_repo
        .list_by_vendor(&query.vendor_name.to_lowercase())
        .await
    {
        Ok(plans) if plans.is_empty() => response::failure(
            Some(request_id),
            &ServiceError::NotFound("No plan exists for this vendor".to_string()),
        ),
        Ok(plans) => response::success(
            Some(request_id),
            plans,
            "Vendor plans fetched successfully",
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &ServiceError::Internal(err)),
    }
}

pub async fn create_plan(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Json(request): Json<CreatePlanRequest>,
) -> impl IntoResponse {
    match state
        .vendor_plans_repo
        .insert(
            &request.vendor_name.to_lowercase(),
            &request.plan_name.to_lowercase(),
            request.price,
        )
        .await
    {
        Ok(plan) => response::success(
            Some(request_id),
            plan,
            "Vendor plan created successfully",
            StatusCode::CREATED,
        ),
        Err(err) => response::failure(Some(request_id), &ServiceError::Internal(err)),
    }
}

pub async fn update_plan(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Json(request): Json<UpdatePlanRequest>,
) -> impl IntoResponse {
    match state
        .vendor_plans_repo
        .update(
            request.id,
            request.vendor_name.as_deref(),
            request.plan_name.as_deref(),
            request.price,
        )
        .await
    {
        Ok(Some(plan)) => response::success(
            Some(request_id),
            plan,
            "Vendor plan updated successfully",
            StatusCode::OK,
        ),
        Ok(None) => response::failure(
            Some(request_id),
            &ServiceError::NotFound("Vendor plan not found".to_string()),
        ),
        Err(err) => response::failure(Some(request_id), &ServiceError::Internal(err)),
    }
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Query(query): Query<DeletePlanQuery>,
) -> impl IntoResponse {
    let vendor_name = query.vendor_name.to_lowercase();
    let plan_name = query.plan_name.to_lowercase();

    match state.vendor_plans_repo.exists(&vendor_name, &plan_name).await {
        Ok(false) => {
            return response::failure(
                Some(request_id),
                &ServiceError::NotFound("No plan exists for this vendor".to_string()),
            )
        }
        Err(err) => return response::failure(Some(request_id), &ServiceError::Internal(err)),
        Ok(true) => {}
    }

    match state.vendor_plans_repo.delete(&vendor_name, &plan_name).await {
        Ok(_) => response::success(
            Some(request_id),
            serde_json::Value::Null,
            "Vendor plan deleted successfully",
            StatusCode::OK,
        ),
        Err(err) => response::failure(Some(request_id), &ServiceError::Internal(err)),
    }
}
