use axum::{
    routing::{get, post},
    Router,
};
use std::{future::Future, str::FromStr};

use crate::{error::AppError, resource::UnknownName, AppState};

pub mod pages;
pub mod products;
pub mod resources;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resources", get(resources::list))
        .route("/resources/:name", get(resources::show))
        .route("/resources/:name/rows", get(resources::rows))
        .route("/resources/:name/refresh", post(resources::refresh))
        .route("/pages/:page/refresh", post(pages::refresh))
        .route("/products/:ranking", get(products::ranking))
        .route("/product-details/:asin", get(products::detail))
        .route("/product-details/:asin/refresh", post(products::refresh_detail))
}

/// Runs a store action on its own task so that a client hanging up does not
/// abandon the record half way through its transition.
async fn detached<F>(action: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(action).await?;
    Ok(())
}

fn parse_name<T>(name: &str) -> Result<T, AppError>
where
    T: FromStr<Err = UnknownName>,
{
    name.parse().map_err(|err: UnknownName| AppError::NotFound(err.to_string()))
}
