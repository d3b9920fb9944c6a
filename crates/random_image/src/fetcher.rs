//! The provider-agnostic entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::download::Downloader;
use crate::error::Result;
use crate::providers::Provider;
use crate::types::{DownloadOptions, ImageOptions, ImageResult, ImageSource};

/// Wraps one provider adapter and adds downloading.
///
/// ```ignore
/// let fetcher = RandomImage::new(UnsplashProvider::new(key));
/// let image = fetcher.get_random(&ImageOptions::new().width(800)).await?;
/// let path = fetcher.download(&image, "downloads", &DownloadOptions::default()).await?;
/// ```
#[derive(Clone)]
pub struct RandomImage {
    provider: Arc<dyn Provider>,
    downloader: Downloader,
}

impl RandomImage {
    #[must_use]
    pub fn new(provider: impl Provider + 'static) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    /// Same as [`RandomImage::new`], downloading with `config`'s transport settings.
    #[must_use]
    pub fn with_config(provider: impl Provider + 'static, config: &Config) -> Self {
        Self {
            provider: Arc::new(provider),
            downloader: Downloader::new(config),
        }
    }

    #[must_use]
    pub fn from_arc(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            downloader: Downloader::new(&Config::default()),
        }
    }

    /// Name of the wrapped provider.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fetch one random image. Options go to the provider unchanged.
    pub async fn get_random(&self, options: &ImageOptions) -> Result<ImageResult> {
        let image = self.provider.fetch_random_image(options).await?;
        tracing::debug!(
            provider = self.provider.name(),
            url = %image.url,
            width = image.width,
            height = image.height,
            "selected image"
        );
        Ok(image)
    }

    /// Save `source` under `dir` and return the absolute path written.
    pub async fn download<'a>(
        &self,
        source: impl Into<ImageSource<'a>>,
        dir: impl AsRef<Path>,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        let source = source.into();
        self.downloader.download(source.url(), dir, options).await
    }
}

impl std::fmt::Debug for RandomImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomImage")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}
