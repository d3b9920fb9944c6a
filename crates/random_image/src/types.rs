//! Value types exchanged between callers, adapters and the download routine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ImageError, Result};

/// Requested image orientation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// What the caller wants. Every field is optional; `None` lets the provider decide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub query: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// 0-100.
    pub quality: Option<u8>,
    pub orientation: Option<Orientation>,
}

impl ImageOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// The query, ignoring empty or whitespace-only strings.
    pub(crate) fn search_terms(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Reject values outside the documented ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidOptions`] for a zero width or height, or a quality above 100.
    pub fn validate(&self) -> Result<()> {
        if self.width == Some(0) {
            return Err(ImageError::InvalidOptions("width must be greater than 0".into()));
        }
        if self.height == Some(0) {
            return Err(ImageError::InvalidOptions("height must be greater than 0".into()));
        }
        if let Some(quality) = self.quality.filter(|q| *q > 100) {
            return Err(ImageError::InvalidOptions(format!(
                "quality must be between 0 and 100, got {quality}"
            )));
        }
        Ok(())
    }
}

/// A provider-agnostic description of the chosen image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    /// Download-ready URL, already carrying any sizing parameters.
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub author: String,
    pub author_url: Option<String>,
    /// Page on the source service, for attribution.
    pub original_url: String,
}

/// How the download routine names and places the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadOptions {
    /// Explicit filename, used verbatim.
    pub filename: Option<String>,
    pub overwrite: bool,
    /// Derive the name from the URL path when no filename is given.
    pub keep_original_name: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            filename: None,
            overwrite: false,
            keep_original_name: true,
        }
    }
}

impl DownloadOptions {
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn keep_original_name(mut self, keep: bool) -> Self {
        self.keep_original_name = keep;
        self
    }
}

/// Either a bare URL or a full [`ImageResult`], so callers can pass whichever they hold.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Url(&'a str),
    Image(&'a ImageResult),
}

impl<'a> ImageSource<'a> {
    #[must_use]
    pub fn url(&self) -> &'a str {
        match *self {
            Self::Url(url) => url,
            Self::Image(image) => &image.url,
        }
    }
}

impl<'a> From<&'a str> for ImageSource<'a> {
    fn from(url: &'a str) -> Self {
        Self::Url(url)
    }
}

impl<'a> From<&'a String> for ImageSource<'a> {
    fn from(url: &'a String) -> Self {
        Self::Url(url.as_str())
    }
}

impl<'a> From<&'a ImageResult> for ImageSource<'a> {
    fn from(image: &'a ImageResult) -> Self {
        Self::Image(image)
    }
}
