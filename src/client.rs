use reqwest::{IntoUrl, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchError;

/// Thin GET-and-decode client for the upstream statistics API.
///
/// No retries, no timeouts and no caching happen here. A request that never
/// resolves keeps the caller waiting until the transport gives up.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    /// GET `base_url + path`. `path` is sent as written, query included.
    pub async fn fetch(&self, path: &str) -> Result<Value, FetchError> {
        self.get(format!("{}{path}", self.base_url)).await
    }

    /// GET `base_url/segment/...` with each segment percent-encoded, so a `/`,
    /// `?` or `#` inside an identifier stays part of that segment.
    pub async fn fetch_segments<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, FetchError> {
        let value = self.get(self.segment_url(segments)?).await?;
        Ok(serde_json::from_value(value)?)
    }

    fn segment_url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| FetchError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: impl IntoUrl) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_encoded_one_by_one() {
        let client = ApiClient::new("http://api.local:8000/");
        let url = client.segment_url(&["products", "X2/../X1"]).unwrap();
        assert_eq!(url.as_str(), "http://api.local:8000/products/X2%2F..%2FX1");

        let url = client.segment_url(&["products", "X1?limit=5#top"]).unwrap();
        assert_eq!(url.path(), "/products/X1%3Flimit=5%23top");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn segments_extend_a_base_path() {
        let client = ApiClient::new("http://api.local/v1");
        let url = client.segment_url(&["products", "X1"]).unwrap();
        assert_eq!(url.as_str(), "http://api.local/v1/products/X1");
    }

    #[test]
    fn unparsable_base_is_reported() {
        let client = ApiClient::new("not a url");
        assert!(matches!(
            client.segment_url(&["products"]),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
