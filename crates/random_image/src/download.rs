//! Streams a remote image into a local directory.

use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ImageError, Result};
use crate::filename;
use crate::http::HttpClient;
use crate::types::DownloadOptions;

/// Writes images to disk through a per-call hidden temp file.
#[derive(Debug, Clone, Default)]
pub struct Downloader {
    client: HttpClient,
}

impl Downloader {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: HttpClient::new_or_default(config),
        }
    }

    /// Download `url` into `dir` and return the absolute path written.
    ///
    /// The directory is created if missing. The body is streamed chunk by
    /// chunk, never buffered whole. Nothing is left behind on failure.
    ///
    /// # Errors
    ///
    /// - [`ImageError::InvalidUrl`] if `url` does not parse.
    /// - [`ImageError::FileExists`] if the destination exists and `overwrite` is off.
    /// - [`ImageError::Transport`] for connection failures and non-success statuses.
    /// - [`ImageError::Write`] for any disk failure.
    pub async fn download(
        &self,
        url: &str,
        dir: impl AsRef<Path>,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        let dir = absolute(dir.as_ref())?;

        fs::create_dir_all(&dir)
            .await
            .map_err(|err| ImageError::write(&dir, err))?;

        let name = filename::resolve(url, options)?;
        let destination = dir.join(&name);

        if !options.overwrite {
            let exists = fs::try_exists(&destination)
                .await
                .map_err(|err| ImageError::write(&destination, err))?;
            if exists {
                return Err(ImageError::FileExists { path: destination });
            }
        }

        tracing::debug!(url, path = %destination.display(), "downloading image");

        let partial = PartialFile::new(temp_path(&destination));
        let bytes = self.stream_to(url, partial.path()).await?;

        fs::rename(partial.path(), &destination)
            .await
            .map_err(|err| ImageError::write(&destination, err))?;
        partial.disarm();

        tracing::info!(path = %destination.display(), bytes, "image saved");
        Ok(destination)
    }

    async fn stream_to(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self.client.get_ok(url).await?;

        let mut file = File::create(path)
            .await
            .map_err(|err| ImageError::write(path, err))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|err| ImageError::write(path, err))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|err| ImageError::write(path, err))?;
        Ok(written)
    }
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    std::path::absolute(dir).map_err(|err| ImageError::write(dir, err))
}

/// `<dir>/.<name>.<uuid>.part`, distinct for every call.
fn temp_path(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{name}.{}.part", Uuid::now_v7()))
}

/// Removes the temp file on drop unless disarmed.
///
/// Also covers the download future being dropped mid-stream.
struct PartialFile {
    path: PathBuf,
    armed: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove partial download");
            }
        }
    }
}
