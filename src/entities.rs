use serde::{Deserialize, Serialize};

/// Cached state of one remote resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRecord<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for EndpointRecord<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> EndpointRecord<T> {
    /// Record for a request that was just dispatched. `data` is whatever the
    /// caller wants visible while the request is in flight.
    pub const fn loading(data: Option<T>) -> Self {
        Self {
            data,
            loading: true,
            error: None,
        }
    }

    pub const fn succeeded(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub const fn failed(data: Option<T>, error: String) -> Self {
        Self {
            data,
            loading: false,
            error: Some(error),
        }
    }

    pub const fn status(&self) -> RecordStatus {
        if self.loading {
            RecordStatus::Loading
        } else if self.error.is_some() {
            RecordStatus::Failed
        } else if self.data.is_some() {
            RecordStatus::Succeeded
        } else {
            RecordStatus::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub title: String,
    pub asin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// A statistics row joined with its display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub asin: String,
    pub product_name: Option<String>,
    pub review_count: Option<u64>,
    pub avg_rating: Option<f64>,
    pub rating: Option<f64>,
}
