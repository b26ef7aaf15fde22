use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;

use crate::{
    entities::{EndpointRecord, ProductDetail},
    error::PersistError,
};

/// Name of the only partition of the store that survives a restart.
pub const STORAGE_KEY: &str = "api-product-details-storage";
pub const STORAGE_VERSION: u32 = 0;

pub type ProductDetails = BTreeMap<String, EndpointRecord<ProductDetail>>;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PartitionState,
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartitionState {
    #[serde(default)]
    product_details: ProductDetails,
}

/// JSON file holding the product-details partition.
#[derive(Debug)]
pub struct PartitionStorage {
    path: PathBuf,
    // Serializes writers so the file always ends up with the newest map.
    write_lock: Mutex<()>,
}

impl PartitionStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved map. A missing file is an empty map.
    ///
    /// Records saved mid-request come back with `loading` cleared, since the
    /// request that would have resolved them died with the previous process.
    pub async fn load(&self) -> Result<ProductDetails, PersistError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ProductDetails::new()),
            Err(err) => return Err(err.into()),
        };

        let envelope: Envelope = serde_json::from_slice(&raw)?;
        let mut details = envelope.state.product_details;
        for record in details.values_mut() {
            record.loading = false;
        }
        Ok(details)
    }

    /// Writes the map returned by `latest`, evaluated only once this writer holds
    /// the file, so a slow writer never overwrites a newer map with an older one.
    pub async fn save_latest<F>(&self, latest: F) -> Result<(), PersistError>
    where
        F: FnOnce() -> ProductDetails,
    {
        let _guard = self.write_lock.lock().await;

        let envelope = Envelope {
            state: PartitionState {
                product_details: latest(),
            },
            version: STORAGE_VERSION,
            saved_at: Some(Utc::now()),
        };
        let raw = serde_json::to_vec_pretty(&envelope)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}
