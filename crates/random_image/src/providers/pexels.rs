//! Pexels provider implementation.
//!
//! [Pexels API Documentation](https://www.pexels.com/api/documentation/)
//!
//! Pexels only offers paginated listings (`/curated`, `/search`), so a random
//! page between 1 and [`MAX_RANDOM_PAGE`] is requested with one photo per page.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use crate::config::Config;
use crate::error::{ImageError, Result};
use crate::http::{HttpClient, ResponseExt};
use crate::providers::append_query;
use crate::providers::sampling::{self, MAX_RANDOM_PAGE};
use crate::providers::traits::Provider;
use crate::types::{ImageOptions, ImageResult};

const DEFAULT_BASE_URL: &str = "https://api.pexels.com";

/// Pexels provider backed by the curated and search listings.
pub struct PexelsProvider {
    api_key: String,
    base_url: String,
    client: HttpClient,
}

impl PexelsProvider {
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

    /// Fetch the single photo listed on `page`.
    ///
    /// Uses `/v1/search` when the options carry a query, `/v1/curated` otherwise.
    /// An empty page is reported as [`ImageError::EmptyResult`] and not retried.
    pub async fn fetch_page(&self, options: &ImageOptions, page: u32) -> Result<ImageResult> {
        options.validate()?;

        let mut params: Vec<(&str, String)> =
            vec![("per_page", "1".into()), ("page", page.to_string())];

        let url = match options.search_terms() {
            Some(query) => {
                params.push(("query", query.to_string()));
                if let Some(orientation) = options.orientation {
                    params.push(("orientation", orientation.to_string()));
                }
                format!("{}/v1/search", self.base_url)
            }
            None => format!("{}/v1/curated", self.base_url),
        };

        tracing::debug!(provider = self.name(), endpoint = %url, page, "requesting listing page");

        let headers = [("Authorization", self.api_key.as_str())];
        let response = self.client.get_with_query(&url, &params, &headers).await?;
        let listing: PexelsListing = response.json_or_error(self.name()).await?;

        let photo = sampling::take_first(listing.photos)
            .ok_or(ImageError::EmptyResult { provider: self.name() })?;

        Self::into_result(photo, options)
    }

    /// Append the fixed compression directives plus any requested dimensions.
    ///
    /// Quality is not forwarded; Pexels image URLs have no quality knob.
    pub(crate) fn sized_url(original: &str, options: &ImageOptions) -> Result<String> {
        let mut params: Vec<(&str, String)> =
            vec![("auto", "compress".into()), ("cs", "tinysrgb".into())];
        if let Some(width) = options.width {
            params.push(("w", width.to_string()));
        }
        if let Some(height) = options.height {
            params.push(("h", height.to_string()));
        }
        append_query(original, &params)
    }

    fn into_result(photo: PexelsPhoto, options: &ImageOptions) -> Result<ImageResult> {
        Ok(ImageResult {
            url: Self::sized_url(&photo.src.original, options)?,
            width: options.width.unwrap_or(photo.width),
            height: options.height.unwrap_or(photo.height),
            author: photo.photographer,
            author_url: photo.photographer_url.filter(|url| !url.is_empty()),
            original_url: photo.url,
        })
    }
}

impl fmt::Debug for PexelsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PexelsProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Provider for PexelsProvider {
    fn name(&self) -> &'static str {
        "pexels"
    }

    async fn fetch_random_image(&self, options: &ImageOptions) -> Result<ImageResult> {
        let page = sampling::random_page(&mut rand::rng(), MAX_RANDOM_PAGE);
        self.fetch_page(options, page).await
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// API RESPONSE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct PexelsListing {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    width: u32,
    height: u32,
    url: String,
    photographer: String,
    #[serde(default)]
    photographer_url: Option<String>,
    src: PexelsPhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoSrc {
    original: String,
}
