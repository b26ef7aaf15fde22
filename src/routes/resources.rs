use axum::{
    extract::{Path, Query, State},
    Json,
};
use metrics::increment_counter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{detached, parse_name};
use crate::{
    entities::{EndpointRecord, RecordStatus},
    error::AppError,
    normalize::display_rows,
    resource::Resource,
    store::ApiState,
    AppState,
};

#[derive(Debug, Serialize, Clone)]
pub struct ResourceView {
    pub resource: Resource,
    pub path: &'static str,
    pub status: RecordStatus,
    pub record: EndpointRecord<Value>,
}

impl ResourceView {
    pub fn new(resource: Resource, state: &ApiState) -> Self {
        let record = state.record(resource).clone();
        Self {
            resource,
            path: resource.path(),
            status: record.status(),
            record,
        }
    }
}

#[derive(Debug, Deserialize, Validate, Clone, Copy)]
pub struct RefreshQuery {
    /// Only used by the product-name resources.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

#[allow(clippy::unused_async)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<ResourceView>> {
    let snapshot = state.store.snapshot();
    Json(
        Resource::ALL
            .into_iter()
            .map(|resource| ResourceView::new(resource, &snapshot))
            .collect(),
    )
}

#[allow(clippy::unused_async)]
pub async fn show(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ResourceView>, AppError> {
    let resource: Resource = parse_name(&name)?;
    Ok(Json(ResourceView::new(resource, &state.store.snapshot())))
}

/// Current data of the resource shaped for display: normalized rows for
/// tabular resources, the raw payload otherwise.
#[allow(clippy::unused_async)]
pub async fn rows(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resource: Resource = parse_name(&name)?;
    let snapshot = state.store.snapshot();
    let data = snapshot.record(resource).data.as_ref();

    let rows = display_rows(resource, data)?;
    Ok(Json(rows.or_else(|| data.cloned()).unwrap_or(Value::Null)))
}

/// Fetches the resource again and returns the settled record.
pub async fn refresh(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<ResourceView>, AppError> {
    let resource: Resource = parse_name(&name)?;
    query
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    increment_counter!("reviewdash_refresh_request", "resource" => resource.name());

    let store = state.store.clone();
    match (resource.ranking(), query.limit) {
        (Some(ranking), Some(limit)) => {
            detached(async move { store.fetch_product_names(ranking, limit).await }).await?;
        }
        _ => detached(async move { store.fetch(resource).await }).await?,
    }

    Ok(Json(ResourceView::new(resource, &state.store.snapshot())))
}
