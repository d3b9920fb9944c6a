//! Provider trait definition.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{ImageOptions, ImageResult};

/// A backend that can hand out one random image.
///
/// Adapters hold only their key and an HTTP client, so one instance can
/// serve concurrent calls.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Lowercase identifier, e.g. `"unsplash"`.
    fn name(&self) -> &'static str;

    /// Pick one image matching `options` and normalise it.
    ///
    /// # Errors
    ///
    /// Returns a provider error (see [`crate::ImageError::is_provider_error`]) when the
    /// backend is unreachable, rejects the key, or yields no candidates.
    async fn fetch_random_image(&self, options: &ImageOptions) -> Result<ImageResult>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_random_image(&self, options: &ImageOptions) -> Result<ImageResult> {
        (**self).fetch_random_image(options).await
    }
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_random_image(&self, options: &ImageOptions) -> Result<ImageResult> {
        (**self).fetch_random_image(options).await
    }
}
