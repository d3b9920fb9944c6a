//! Pixabay provider implementation.
//!
//! [Pixabay API Documentation](https://pixabay.com/api/docs/)
//!
//! Pixabay has no random endpoint either. One batch of [`BATCH_SIZE`] hits is
//! fetched and a hit is picked uniformly on the client.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use crate::config::Config;
use crate::error::{ImageError, Result};
use crate::http::{HttpClient, ResponseExt};
use crate::providers::sampling::{self, BATCH_SIZE};
use crate::providers::traits::Provider;
use crate::types::{ImageOptions, ImageResult, Orientation};

const DEFAULT_BASE_URL: &str = "https://pixabay.com";

/// Pixabay provider backed by `GET /api/`.
pub struct PixabayProvider {
    api_key: String,
    base_url: String,
    client: HttpClient,
}

impl PixabayProvider {
    /// Create a provider with the default transport settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, &Config::default())
    }

    #[must_use]
    pub fn with_config(api_key: impl Into<String>, config: &Config) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: HttpClient::new_or_default(config),
        }
    }

    /// Point the provider at another API root (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::new(api_key)
        }
    }

    /// Pixabay's own orientation vocabulary.
    fn orientation_param(orientation: Orientation) -> &'static str {
        match orientation {
            Orientation::Landscape => "horizontal",
            Orientation::Portrait => "vertical",
        }
    }
}

impl fmt::Debug for PixabayProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixabayProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Provider for PixabayProvider {
    fn name(&self) -> &'static str {
        "pixabay"
    }

    async fn fetch_random_image(&self, options: &ImageOptions) -> Result<ImageResult> {
        options.validate()?;

        let url = format!("{}/api/", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("q", options.search_terms().unwrap_or_default().to_string()),
            ("per_page", BATCH_SIZE.to_string()),
        ];
        if let Some(orientation) = options.orientation {
            params.push(("orientation", Self::orientation_param(orientation).to_string()));
        }

        tracing::debug!(provider = self.name(), endpoint = %url, batch = BATCH_SIZE, "requesting batch");

        let response = self.client.get_with_query(&url, &params, &[]).await?;
        let batch: PixabayBatch = response.json_or_error(self.name()).await?;

        tracing::debug!(provider = self.name(), hits = batch.hits.len(), "picking from batch");

        let hit = sampling::pick_one(batch.hits, &mut rand::rng())
            .ok_or(ImageError::EmptyResult { provider: self.name() })?;

        Ok(hit.into_result())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// API RESPONSE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct PixabayBatch {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PixabayHit {
    #[serde(rename = "largeImageURL", default)]
    large_image_url: Option<String>,
    #[serde(default)]
    image_width: u32,
    #[serde(default)]
    image_height: u32,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    webformat_width: u32,
    webformat_height: u32,
    user: String,
    #[serde(rename = "user_id")]
    user_id: u64,
    #[serde(rename = "pageURL")]
    page_url: String,
}

impl PixabayHit {
    /// Prefer the large asset; otherwise use the webformat URL and its own dimensions.
    fn into_result(self) -> ImageResult {
        let (url, width, height) = match self.large_image_url.filter(|url| !url.is_empty()) {
            Some(large) => (large, self.image_width, self.image_height),
            None => (self.webformat_url, self.webformat_width, self.webformat_height),
        };

        ImageResult {
            url,
            width,
            height,
            author_url: Some(format!("https://pixabay.com/users/{}-{}/", self.user, self.user_id)),
            author: self.user,
            original_url: self.page_url,
        }
    }
}
