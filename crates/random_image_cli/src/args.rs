//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use random_image::{DownloadOptions, ImageOptions, Orientation, ProviderKind};
use std::path::PathBuf;

/// Directory used when `--download` is given without a value.
pub const DEFAULT_DOWNLOAD_DIR: &str = "./downloads";

#[derive(Debug, Parser)]
#[command(name = "random-image", version, about = "Fetch random images from stock photo providers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a random image, optionally saving it
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Width in pixels
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Quality (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: Option<u8>,

    /// landscape or portrait
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Provider to use
    #[arg(short, long, value_enum, default_value_t = ProviderChoice::Random)]
    pub provider: ProviderChoice,

    /// Save the image into DIR
    #[arg(
        short,
        long,
        value_name = "DIR",
        num_args = 0..=1,
        default_missing_value = DEFAULT_DOWNLOAD_DIR
    )]
    pub download: Option<PathBuf>,

    /// Filename for the saved image
    #[arg(long)]
    pub filename: Option<String>,

    /// Replace an existing file
    #[arg(long)]
    pub overwrite: bool,

    /// Name the file with a generated id instead of the URL's name
    #[arg(long)]
    pub no_keep_original_name: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderChoice {
    Random,
    Unsplash,
    Pexels,
    Pixabay,
}

impl ProviderChoice {
    /// `None` for [`ProviderChoice::Random`].
    pub fn kind(self) -> Option<ProviderKind> {
        match self {
            Self::Random => None,
            Self::Unsplash => Some(ProviderKind::Unsplash),
            Self::Pexels => Some(ProviderKind::Pexels),
            Self::Pixabay => Some(ProviderKind::Pixabay),
        }
    }
}

impl FetchArgs {
    pub fn image_options(&self) -> ImageOptions {
        ImageOptions {
            query: self.query.clone(),
            width: self.width,
            height: self.height,
            quality: self.quality,
            orientation: self.orientation,
        }
    }

    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            filename: self.filename.clone(),
            overwrite: self.overwrite,
            keep_original_name: !self.no_keep_original_name,
        }
    }
}
