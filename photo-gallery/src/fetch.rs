use crate::providers::BlobFetcher;
use crate::service::PhotoGalleryError;
use async_trait::async_trait;

/// Fetches web paths over HTTP
#[derive(Debug, Clone, Default)]
pub struct HttpBlobFetcher {
    client: reqwest::Client,
}

impl HttpBlobFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlobFetcher for HttpBlobFetcher {
    async fn fetch_blob(&self, url: &str) -> Result<Vec<u8>, PhotoGalleryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PhotoGalleryError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(PhotoGalleryError::Fetch(format!(
                "Fetching {} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PhotoGalleryError::Fetch(format!("Reading {} failed: {}", url, e)))?;
        log::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let fetcher = HttpBlobFetcher::default();
        assert!(matches!(
            fetcher.fetch_blob("not a url").await,
            Err(PhotoGalleryError::Fetch(_))
        ));
    }
}
