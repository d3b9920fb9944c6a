//! Unsplash provider implementation.
//!
//! [Unsplash API Documentation](https://unsplash.com/documentation#get-a-random-photo)
//!
//! Unsplash selects the photo server-side, so this adapter makes exactly one
//! request and only rewrites the asset URL for sizing (imgix parameters).

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

use crate::config::Config;
use crate::error::{ImageError, Result};
use crate::http::{HttpClient, ResponseExt};
use crate::providers::append_query;
use crate::providers::traits::Provider;
use crate::types::{ImageOptions, ImageResult};

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

/// Unsplash provider backed by `GET /photos/random`.
pub struct UnsplashProvider {
    access_key: String,
    base_url: String,
    client: HttpClient,
}

impl UnsplashProvider {
    /// Create a provider with the default transport settings.
    #[must_use]
    pub fn new(access_key: impl Into<String>) -> Self {
        Self::with_config(access_key, &Config::default())
    }

    #[must_use]
    pub fn with_config(access_key: impl Into<String>, config: &Config) -> Self {
        Self {
            access_key: access_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: HttpClient::new_or_default(config),
        }
    }

    /// Point the provider at another API root (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(access_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::new(access_key)
        }
    }

    /// Append imgix sizing directives to the photo's raw asset URL.
    ///
    /// Crop-fit is requested whenever either dimension is.
    pub(crate) fn sized_url(raw: &str, options: &ImageOptions) -> Result<String> {
        let mut params: Vec<(&str, String)> = Vec::new();

        if options.width.is_some() || options.height.is_some() {
            params.push(("fit", "crop".into()));
            params.push(("crop", "entropy".into()));
        }
        if let Some(width) = options.width {
            params.push(("w", width.to_string()));
        }
        if let Some(height) = options.height {
            params.push(("h", height.to_string()));
        }
        if let Some(quality) = options.quality {
            params.push(("q", quality.to_string()));
        }

        append_query(raw, &params)
    }

    fn into_result(photo: UnsplashPhoto, options: &ImageOptions) -> Result<ImageResult> {
        Ok(ImageResult {
            url: Self::sized_url(&photo.urls.raw, options)?,
            width: options.width.unwrap_or(photo.width),
            height: options.height.unwrap_or(photo.height),
            author: photo.user.name,
            author_url: photo.user.links.map(|links| links.html),
            original_url: photo.links.html,
        })
    }
}

impl fmt::Debug for UnsplashProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsplashProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Provider for UnsplashProvider {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn fetch_random_image(&self, options: &ImageOptions) -> Result<ImageResult> {
        options.validate()?;

        let url = format!("{}/photos/random", self.base_url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(query) = options.search_terms() {
            params.push(("query", query.to_string()));
        }
        if let Some(orientation) = options.orientation {
            params.push(("orientation", orientation.to_string()));
        }

        let auth = format!("Client-ID {}", self.access_key);
        let headers = [("Authorization", auth.as_str()), ("Accept-Version", "v1")];

        tracing::debug!(provider = self.name(), endpoint = %url, "requesting random photo");

        let response = self.client.get_with_query(&url, &params, &headers).await?;
        let photo = match response.json_or_error::<UnsplashResponse>(self.name()).await? {
            UnsplashResponse::One(photo) => *photo,
            UnsplashResponse::Many(photos) => photos
                .into_iter()
                .next()
                .ok_or(ImageError::EmptyResult { provider: self.name() })?,
        };

        Self::into_result(photo, options)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// API RESPONSE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// `/photos/random` returns an array when `count` is sent, a bare object otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UnsplashResponse {
    One(Box<UnsplashPhoto>),
    Many(Vec<UnsplashPhoto>),
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    width: u32,
    height: u32,
    urls: UnsplashUrls,
    links: UnsplashLinks,
    user: UnsplashUser,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    raw: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashLinks {
    html: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    name: String,
    #[serde(default)]
    links: Option<UnsplashUserLinks>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUserLinks {
    html: String,
}
