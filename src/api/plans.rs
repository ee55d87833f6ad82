//! Service type, plan, and plan-item endpoints.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedPlans;
use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::constants::aggregation::SERVICE_PLANS_PER_PAGE;
use crate::planning_center::{Plan, PlanItem, ServiceType, Song, SortOrder};
use crate::types::{PlanId, ServiceTypeId};

/// Response for `GET /service-types`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypesResponse {
    /// Active service types, ascending by sequence.
    pub service_types: Vec<ServiceType>,
    /// Upstream total count, archived types included.
    pub total_count: u64,
}

/// GET /service-types
///
/// Lists active (non-archived) service types in their configured order.
pub async fn service_types(State(state): State<AppState>) -> ApiResult<Json<ServiceTypesResponse>> {
    let (all, total_count) = state.client.get_service_types().await
        .map_err(|e| ApiError::from_engine(&e, "Failed to fetch service types"))?;

    let mut active: Vec<ServiceType> = all.into_iter().filter(|st| !st.archived).collect();
    active.sort_by_key(|st| st.sequence);

    Ok(Json(ServiceTypesResponse { service_types: active, total_count }))
}

/// GET /all-plans
///
/// Fan-out aggregation across every active service type, grouped by
/// calendar day.
pub async fn all_plans(State(state): State<AppState>) -> ApiResult<Json<AggregatedPlans>> {
    let aggregated = state.aggregator.all_plans().await
        .map_err(|e| ApiError::from_engine(&e, "Failed to fetch plans"))?;
    Ok(Json(aggregated))
}

/// Query parameters for `GET /plans`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansQuery {
    /// Owning service type. Required.
    pub service_type_id: Option<String>,
}

/// Response for `GET /plans`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansResponse {
    /// Plans for the service type, newest first.
    pub plans: Vec<Plan>,
    /// Upstream total plan count for the service type.
    pub total_count: u64,
}

/// GET /plans?serviceTypeId=
///
/// Plans for one service type, newest first.
pub async fn plans(
    State(state): State<AppState>,
    Query(query): Query<PlansQuery>,
) -> ApiResult<Json<PlansResponse>> {
    let service_type_id = query.service_type_id
        .ok_or(ApiError::BadRequest("Service type ID is required"))?;
    let service_type_id = ServiceTypeId::new(service_type_id);

    let (plans, total_count) = state.client
        .get_plans(&service_type_id, SortOrder::Descending, SERVICE_PLANS_PER_PAGE)
        .await
        .map_err(|e| ApiError::from_engine(&e, "Failed to fetch plans"))?;

    Ok(Json(PlansResponse { plans, total_count }))
}

/// Query parameters for `GET /plan-items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItemsQuery {
    /// Owning service type. Required.
    pub service_type_id: Option<String>,
    /// Plan to list items for. Required.
    pub plan_id: Option<String>,
}

/// Response for `GET /plan-items`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItemsResponse {
    /// Plan items, ascending by sequence.
    pub items: Vec<PlanItem>,
    /// Included songs, in API response order.
    pub included: Vec<Song>,
    /// Upstream total item count.
    pub total_count: u64,
}

/// GET /plan-items?serviceTypeId=&planId=
///
/// Items of one plan with their included song resources.
pub async fn plan_items(
    State(state): State<AppState>,
    Query(query): Query<PlanItemsQuery>,
) -> ApiResult<Json<PlanItemsResponse>> {
    let (Some(service_type_id), Some(plan_id)) = (query.service_type_id, query.plan_id) else {
        return Err(ApiError::BadRequest("Service type ID and plan ID are required"));
    };

    let page = state.client
        .get_plan_items(&ServiceTypeId::new(service_type_id), &PlanId::new(plan_id))
        .await
        .map_err(|e| ApiError::from_engine(&e, "Failed to fetch plan items"))?;

    Ok(Json(PlanItemsResponse {
        items: page.items,
        included: page.included,
        total_count: page.total_count,
    }))
}
