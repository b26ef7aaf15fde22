use axum::{
    extract::{Path, State},
    Json,
};
use metrics::increment_counter;
use tracing::info;

use super::{detached, parse_name, resources::ResourceView};
use crate::{error::AppError, resource::Page, AppState};

pub async fn refresh(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ResourceView>>, AppError> {
    let page: Page = parse_name(&name)?;
    increment_counter!("reviewdash_page_request", "page" => page.name());
    info!("Loading page {}", page.name());

    let store = state.store.clone();
    detached(async move { store.load_page(page).await }).await?;

    let snapshot = state.store.snapshot();
    Ok(Json(
        page.resources()
            .iter()
            .map(|&resource| ResourceView::new(resource, &snapshot))
            .collect(),
    ))
}
