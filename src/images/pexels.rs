//! Pexels photo search.

use super::ImageSource;
use crate::config::{ImageSettings, Settings};
use crate::error::{ReelError, Result};
use crate::layout::image_path_in;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Pexels API response structures
mod api {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub photos: Option<Vec<Photo>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Photo {
        pub id: u64,
        /// Rendition name (original, large, landscape, ...) to URL.
        pub src: HashMap<String, String>,
    }
}

/// Image source backed by the Pexels search API.
pub struct PexelsImageSource {
    client: reqwest::Client,
    search_url: Url,
    api_key: String,
    per_page: usize,
    variant: String,
}

impl PexelsImageSource {
    /// Create a Pexels source from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.pexels_api_key().ok_or_else(|| {
            ReelError::Config("PEXELS_KEY not set. Set it with: export PEXELS_KEY='...'".to_string())
        })?;
        Self::new(&settings.images, &api_key)
    }

    /// Create a Pexels source with an explicit API key.
    pub fn new(settings: &ImageSettings, api_key: &str) -> Result<Self> {
        let base = settings.api_base.trim_end_matches('/');
        let search_url = Url::parse(&format!("{}/search", base))
            .map_err(|e| ReelError::Config(format!("Invalid images.api_base '{}': {}", base, e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds.max(1)))
            .build()
            .map_err(|e| ReelError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            search_url,
            api_key: api_key.to_string(),
            per_page: settings.per_page,
            variant: settings.variant.clone(),
        })
    }

    /// Run the search and return download URLs of the configured rendition.
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let per_page = self.per_page.to_string();
        let response: api::SearchResponse = self
            .client
            .get(self.search_url.clone())
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .photos
            .unwrap_or_default()
            .into_iter()
            .take(self.per_page)
            .map(|photo| {
                photo.src.get(&self.variant).cloned().ok_or_else(|| {
                    ReelError::ImageSearch(format!(
                        "Photo {} has no '{}' rendition",
                        photo.id, self.variant
                    ))
                })
            })
            .collect()
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        tokio::fs::write(dest, &bytes).await?;
        debug!("Downloaded {} bytes to {}", bytes.len(), dest.display());
        Ok(())
    }
}

#[async_trait]
impl ImageSource for PexelsImageSource {
    #[instrument(skip(self, dir), fields(query = %query))]
    async fn fetch_images(&self, query: &str, slug: &str, dir: &Path) -> Result<Vec<PathBuf>> {
        let urls = self.search(query).await?;
        info!("Pexels returned {} photos", urls.len());

        let mut written = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let dest = image_path_in(dir, slug, index);
            self.download(url, &dest).await?;
            written.push(dest);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> PexelsImageSource {
        let settings = ImageSettings {
            api_base: format!("{}/v1", server.uri()),
            ..ImageSettings::default()
        };
        PexelsImageSource::new(&settings, "pexels-test-key").unwrap()
    }

    fn photo(server: &MockServer, id: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "width": 4000,
            "height": 3000,
            "photographer": "Someone",
            "src": {
                "original": format!("{}/photos/{}/original.jpg", server.uri(), id),
                "landscape": format!("{}/photos/{}/landscape.jpg", server.uri(), id)
            }
        })
    }

    async fn mount_search(server: &MockServer, photos: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("query", "Le café"))
            .and(query_param("per_page", "3"))
            .and(header("authorization", "pexels-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "per_page": 3,
                "total_results": photos.len(),
                "photos": photos
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_download(server: &MockServer, id: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/photos/{}/landscape.jpg", id)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(format!("jpeg-{}", id).into_bytes()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_three_results_write_three_files() {
        let server = MockServer::start().await;
        mount_search(&server, vec![photo(&server, 10), photo(&server, 11), photo(&server, 12)]).await;
        for id in [10, 11, 12] {
            mount_download(&server, id).await;
        }

        let dir = tempfile::tempdir().unwrap();
        let written = source_for(&server)
            .fetch_images("Le café", "le-cafe", dir.path())
            .await
            .unwrap();

        let expected: Vec<PathBuf> = (0..3)
            .map(|i| dir.path().join(format!("le-cafe_{}.jpg", i)))
            .collect();
        assert_eq!(written, expected);

        assert_eq!(std::fs::read(&expected[0]).unwrap(), b"jpeg-10");
        assert_eq!(std::fs::read(&expected[2]).unwrap(), b"jpeg-12");

        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["le-cafe_0.jpg", "le-cafe_1.jpg", "le-cafe_2.jpg"]);
    }

    #[tokio::test]
    async fn test_fewer_results_write_fewer_files() {
        let server = MockServer::start().await;
        mount_search(&server, vec![photo(&server, 7)]).await;
        mount_download(&server, 7).await;

        let dir = tempfile::tempdir().unwrap();
        let written = source_for(&server)
            .fetch_images("Le café", "le-cafe", dir.path())
            .await
            .unwrap();

        assert_eq!(written, vec![dir.path().join("le-cafe_0.jpg")]);
        assert!(!dir.path().join("le-cafe_1.jpg").exists());
    }

    #[tokio::test]
    async fn test_missing_photos_field_means_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "per_page": 3,
                "total_results": 0
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let written = source_for(&server)
            .fetch_images("Le café", "le-cafe", dir.path())
            .await
            .unwrap();
        assert!(written.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let err = source_for(&server)
            .fetch_images("Le café", "le-cafe", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::Http(_)));
    }

    #[tokio::test]
    async fn test_download_error_fails_topic() {
        let server = MockServer::start().await;
        mount_search(&server, vec![photo(&server, 1), photo(&server, 2)]).await;
        mount_download(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/photos/2/landscape.jpg"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let err = source_for(&server)
            .fetch_images("Le café", "le-cafe", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::Http(_)));
        // The first image was already written before the failure
        assert!(dir.path().join("le-cafe_0.jpg").exists());
    }
}
