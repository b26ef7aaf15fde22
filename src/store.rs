use futures::future::join_all;
use metrics::{histogram, increment_counter};
use serde_json::Value;
use std::{future::Future, sync::Arc, time::Instant};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    client::ApiClient,
    config::DEFAULT_PRODUCT_NAMES_LIMIT,
    entities::{EndpointRecord, Product, ProductDetail},
    error::FetchError,
    persist::{PartitionStorage, ProductDetails},
    products::combine,
    resource::{Page, ProductRanking, Resource},
};

/// Field of the product-name envelope that holds the rows.
const PRODUCTS_FIELD: &str = "products";
/// Upstream collection that serves one product per path segment.
const PRODUCTS_PATH: &str = "products";
const PRODUCT_DETAILS_METRIC: &str = "product-details";

/// One version of the dashboard's remote state.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiState {
    records: [EndpointRecord<Value>; Resource::COUNT],
    product_details: ProductDetails,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            records: std::array::from_fn(|_| EndpointRecord::default()),
            product_details: ProductDetails::new(),
        }
    }
}

impl ApiState {
    pub const fn record(&self, resource: Resource) -> &EndpointRecord<Value> {
        &self.records[resource.index()]
    }

    pub const fn product_details(&self) -> &ProductDetails {
        &self.product_details
    }

    pub fn product_detail(&self, asin: &str) -> Option<&EndpointRecord<ProductDetail>> {
        self.product_details.get(asin)
    }

    /// Statistics rows of `ranking` joined with their display names.
    pub fn products(&self, ranking: ProductRanking) -> Option<Vec<Product>> {
        combine(
            self.record(ranking.stats_resource()).data.as_ref(),
            self.record(ranking.names_resource()).data.as_ref(),
        )
    }
}

/// Shared handle to the request-state store.
///
/// Each fetch moves one resource through `loading -> succeeded | failed`.
/// There is no deduplication: concurrent fetches of the same resource all
/// run, and whichever resolves last decides the final record.
#[derive(Debug, Clone)]
pub struct ApiStore {
    client: ApiClient,
    state: Arc<watch::Sender<ApiState>>,
    storage: Option<Arc<PartitionStorage>>,
    product_names_limit: u32,
}

impl ApiStore {
    pub fn new(client: ApiClient) -> Self {
        let (state, _) = watch::channel(ApiState::default());
        Self {
            client,
            state: Arc::new(state),
            storage: None,
            product_names_limit: DEFAULT_PRODUCT_NAMES_LIMIT,
        }
    }

    #[must_use]
    pub fn with_product_names_limit(mut self, limit: u32) -> Self {
        self.product_names_limit = limit;
        self
    }

    /// Restores the product-details partition from `storage` and keeps writing
    /// it there on every change. A partition that cannot be read is logged and
    /// the store starts empty.
    pub async fn with_storage(mut self, storage: PartitionStorage) -> Self {
        match storage.load().await {
            Ok(details) => {
                debug!(
                    path = %storage.path().display(),
                    entries = details.len(),
                    "restored product details"
                );
                self.state
                    .send_modify(|state| state.product_details = details);
            }
            Err(err) => warn!(
                path = %storage.path().display(),
                error = %err,
                "ignoring unreadable product details"
            ),
        }
        self.storage = Some(Arc::new(storage));
        self
    }

    pub fn snapshot(&self) -> ApiState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every new version of the state.
    pub fn subscribe(&self) -> watch::Receiver<ApiState> {
        self.state.subscribe()
    }

    /// Fetches `resource` and waits until its record settles. Data from an
    /// earlier success stays visible while loading and after a failure.
    pub async fn fetch(&self, resource: Resource) {
        if let Some(ranking) = resource.ranking() {
            return self
                .fetch_product_names(ranking, self.product_names_limit)
                .await;
        }

        self.transition(resource, EndpointRecord::loading);
        match self.observed(resource.name(), self.client.fetch(resource.path())).await {
            Ok(data) => self.transition(resource, |_| EndpointRecord::succeeded(data)),
            Err(err) => self.transition(resource, |stale| {
                EndpointRecord::failed(stale, err.to_string())
            }),
        }
    }

    /// Fetches the name list of `ranking`. Unlike other resources the record
    /// is cleared on dispatch and on failure, and the rows are taken out of
    /// the `products` envelope.
    pub async fn fetch_product_names(&self, ranking: ProductRanking, limit: u32) {
        let resource = ranking.names_resource();

        self.transition(resource, |_| EndpointRecord::loading(None));
        let path = ranking.path_with_limit(limit);
        let request = self.client.fetch(&path);
        match self.observed(resource.name(), request).await {
            Ok(envelope) => {
                let rows = unwrap_products(envelope);
                self.transition(resource, |_| EndpointRecord::succeeded(rows));
            }
            Err(err) => self.transition(resource, |_| EndpointRecord::failed(None, err.to_string())),
        }
    }

    /// Starts `fetch` in the background and returns right away.
    pub fn dispatch(&self, resource: Resource) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move { store.fetch(resource).await })
    }

    /// Fetches every resource shown on `page`, concurrently.
    pub async fn load_page(&self, page: Page) {
        debug!(page = page.name(), "loading page");
        join_all(page.resources().iter().map(|&resource| self.fetch(resource))).await;
    }

    pub async fn refresh_all(&self) {
        join_all(Resource::ALL.map(|resource| self.fetch(resource))).await;
    }

    pub async fn fetch_product_detail(&self, asin: &str) {
        self.transition_detail(asin, EndpointRecord::loading).await;

        let segments = [PRODUCTS_PATH, asin];
        let request = self
            .client
            .fetch_segments::<ProductDetail>(&segments);
        match self.observed(PRODUCT_DETAILS_METRIC, request).await {
            Ok(detail) => {
                self.transition_detail(asin, |_| EndpointRecord::succeeded(detail))
                    .await;
            }
            Err(err) => {
                self.transition_detail(asin, |stale| EndpointRecord::failed(stale, err.to_string()))
                    .await;
            }
        }
    }

    /// Replaces the record of `resource` in one step. `next` receives the data
    /// currently held so it can carry it over.
    fn transition<F>(&self, resource: Resource, next: F)
    where
        F: FnOnce(Option<Value>) -> EndpointRecord<Value>,
    {
        self.state.send_modify(|state| {
            let slot = &mut state.records[resource.index()];
            *slot = next(slot.data.take());
        });
    }

    async fn transition_detail<F>(&self, asin: &str, next: F)
    where
        F: FnOnce(Option<ProductDetail>) -> EndpointRecord<ProductDetail>,
    {
        self.state.send_modify(|state| {
            let slot = state.product_details.entry(asin.to_owned()).or_default();
            *slot = next(slot.data.take());
        });
        self.persist().await;
    }

    async fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let saved = storage
            .save_latest(|| self.state.borrow().product_details.clone())
            .await;
        if let Err(err) = saved {
            warn!(path = %storage.path().display(), error = %err, "failed to save product details");
        }
    }

    async fn observed<T>(
        &self,
        name: &'static str,
        request: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        debug!(resource = name, "fetching");
        increment_counter!("reviewdash_fetch_request", "resource" => name);

        let start = Instant::now();
        let result = request.await;
        histogram!("reviewdash_fetch_time", start.elapsed(), "resource" => name);

        match &result {
            Ok(_) => debug!(resource = name, "fetch succeeded"),
            Err(err) => {
                increment_counter!("reviewdash_fetch_failure", "resource" => name);
                warn!(resource = name, error = %err, "fetch failed");
            }
        }
        result
    }
}

/// Rows of a product-name envelope. A missing or falsy field (`null`,
/// `false`, `0`, `""`) is empty; any other value is kept as sent.
fn unwrap_products(envelope: Value) -> Value {
    match envelope {
        Value::Object(mut fields) => fields
            .remove(PRODUCTS_FIELD)
            .filter(is_truthy)
            .unwrap_or_else(|| Value::Array(Vec::new())),
        _ => Value::Array(Vec::new()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
