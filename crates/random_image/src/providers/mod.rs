//! Provider abstraction layer.
//!
//! Three adapters implement [`Provider`]:
//! - **Unsplash** picks server-side via its native random endpoint.
//! - **Pexels** has no random endpoint; a random page of size one is requested.
//! - **Pixabay** has no random endpoint; one hit is picked from a fetched batch.

mod pexels;
mod pixabay;
pub mod sampling;
pub mod traits;
mod unsplash;

pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;
pub use traits::Provider;
pub use unsplash::UnsplashProvider;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use url::Url;

use crate::config::Config;
use crate::error::{ImageError, Result};

/// The supported backends, for callers that select one by name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    Unsplash,
    Pexels,
    Pixabay,
}

impl ProviderKind {
    /// Construct the adapter for this backend with its single secret.
    #[must_use]
    pub fn build(self, key: impl Into<String>, config: &Config) -> Arc<dyn Provider> {
        match self {
            Self::Unsplash => Arc::new(UnsplashProvider::with_config(key, config)),
            Self::Pexels => Arc::new(PexelsProvider::with_config(key, config)),
            Self::Pixabay => Arc::new(PixabayProvider::with_config(key, config)),
        }
    }
}

/// One optional secret per backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderKeys {
    pub unsplash: Option<String>,
    pub pexels: Option<String>,
    pub pixabay: Option<String>,
}

impl ProviderKeys {
    /// The key for `kind`, ignoring blank values.
    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        let key = match kind {
            ProviderKind::Unsplash => &self.unsplash,
            ProviderKind::Pexels => &self.pexels,
            ProviderKind::Pixabay => &self.pixabay,
        };
        key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Backends that have a key, in declaration order.
    #[must_use]
    pub fn available(&self) -> Vec<ProviderKind> {
        ProviderKind::iter().filter(|kind| self.get(*kind).is_some()).collect()
    }

    /// Uniformly pick one backend that has a key.
    pub fn choose_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ProviderKind> {
        self.available().choose(rng).copied()
    }
}

/// Append `params` to `base`, leaving it untouched when there is nothing to add.
pub(crate) fn append_query(base: &str, params: &[(&str, String)]) -> Result<String> {
    if params.is_empty() {
        return Ok(base.to_string());
    }

    let mut url = Url::parse(base).map_err(|err| ImageError::invalid_url(base, err.to_string()))?;
    url.query_pairs_mut()
        .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
    Ok(url.into())
}
