//! Fetch one random stock photo from Unsplash, Pexels or Pixabay and
//! optionally save it to disk.
//!
//! Each backend is wrapped by a [`Provider`] adapter that hides its
//! randomisation strategy and payload shape behind [`ImageResult`]. The
//! [`RandomImage`] facade delegates fetching to one adapter and streams the
//! chosen image into a directory.

pub mod config;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod filename;
pub mod http;
pub mod providers;
pub mod types;

pub use config::Config;
pub use download::Downloader;
pub use error::{ImageError, Result};
pub use fetcher::RandomImage;
pub use providers::{
    PexelsProvider, PixabayProvider, Provider, ProviderKeys, ProviderKind, UnsplashProvider,
};
pub use types::{DownloadOptions, ImageOptions, ImageResult, ImageSource, Orientation};
