#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::missing_const_for_fn)]
#![deny(clippy::nursery)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]

pub use client::ApiClient;
pub use config::Config;
pub use entities::{EndpointRecord, Product, ProductDetail, RecordStatus};
pub use persist::PartitionStorage;
pub use resource::{Page, ProductRanking, Resource};
pub use store::{ApiState, ApiStore};

pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod normalize;
pub mod persist;
pub mod products;
pub mod resource;
pub mod routes;
pub mod store;
pub mod util;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ApiStore,
}
