#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::missing_const_for_fn)]
#![deny(clippy::nursery)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use color_eyre::eyre::eyre;
use reviewdash::{ApiClient, ApiStore, Config, Page, RecordStatus, Resource};
use std::time::Instant;
use tracing::{info, warn};

// Loads every dashboard page once against the configured API and reports
// which resources came back. Exits with an error if any of them failed.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();
    std::env::set_var(
        "RUST_LOG",
        std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("info")),
    );

    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let store = ApiStore::new(ApiClient::new(&config.api_base_url))
        .with_product_names_limit(config.product_names_limit);

    let start = Instant::now();
    for page in Page::ALL {
        store.load_page(page).await;
    }
    let elapsed = start.elapsed();

    let snapshot = store.snapshot();
    let mut failed = 0;
    for resource in Resource::ALL {
        let record = snapshot.record(resource);
        match record.status() {
            RecordStatus::Failed => {
                failed += 1;
                warn!(
                    "{} ({}): {}",
                    resource,
                    resource.path(),
                    record.error.as_deref().unwrap_or_default()
                );
            }
            status => info!("{} ({}): {:?}", resource, resource.path(), status),
        }
    }

    info!("Done in {elapsed:?}");

    if failed > 0 {
        return Err(eyre!("{failed} of {} resources failed", Resource::ALL.len()));
    }
    Ok(())
}
