use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use reviewdash::{routes, ApiClient, ApiStore, AppState, Config, Page, PartitionStorage};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    std::env::set_var(
        "RUST_LOG",
        std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("info")),
    );

    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!("Using upstream API at {}", config.api_base_url);

    let store = ApiStore::new(ApiClient::new(&config.api_base_url))
        .with_product_names_limit(config.product_names_limit)
        .with_storage(PartitionStorage::new(&config.storage_dir))
        .await;

    // Landing on the dashboard opens the general page.
    let warmup = store.clone();
    tokio::spawn(async move { warmup.load_page(Page::General).await });

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = routes::router()
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .with_state(AppState { store });

    info!("listening on {}", config.bind_addr);
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
