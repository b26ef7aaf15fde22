use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::{detached, parse_name};
use crate::{
    entities::{EndpointRecord, Product, ProductDetail},
    error::AppError,
    resource::ProductRanking,
    AppState,
};

/// A ranking joined with its names, with the combined state of both sources.
#[derive(Debug, Serialize, Clone)]
pub struct RankingView {
    pub ranking: ProductRanking,
    pub loading: bool,
    pub error: Option<String>,
    pub products: Option<Vec<Product>>,
}

#[allow(clippy::unused_async)]
pub async fn ranking(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RankingView>, AppError> {
    let ranking: ProductRanking = parse_name(&name)?;

    let snapshot = state.store.snapshot();
    let names = snapshot.record(ranking.names_resource());
    let stats = snapshot.record(ranking.stats_resource());

    Ok(Json(RankingView {
        ranking,
        loading: names.loading || stats.loading,
        error: names.error.clone().or_else(|| stats.error.clone()),
        products: snapshot.products(ranking),
    }))
}

#[allow(clippy::unused_async)]
pub async fn detail(
    State(state): State<AppState>,
    Path(asin): Path<String>,
) -> Result<Json<EndpointRecord<ProductDetail>>, AppError> {
    state
        .store
        .snapshot()
        .product_detail(&asin)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product `{asin}`")))
}

pub async fn refresh_detail(
    State(state): State<AppState>,
    Path(asin): Path<String>,
) -> Result<Json<EndpointRecord<ProductDetail>>, AppError> {
    let store = state.store.clone();
    let key = asin.clone();
    detached(async move { store.fetch_product_detail(&key).await }).await?;

    detail(State(state), Path(asin)).await
}
