//! Thin wrapper around `reqwest` used by every adapter and the downloader.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::error::{ImageError, Result};

/// Longest backend error body kept in [`ImageError::Api`].
const MAX_ERROR_BODY: usize = 300;

/// Shared HTTP client. Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Transport`] if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(config.max_redirects));

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// Like [`HttpClient::new`], falling back to reqwest defaults if the build fails.
    #[must_use]
    pub fn new_or_default(config: &Config) -> Self {
        Self::new(config).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default HTTP client");
            Self::default()
        })
    }

    /// GET `url` with URL-encoded `query` and extra `headers`.
    ///
    /// The query may carry credentials, so transport errors are stripped of
    /// the request URL.
    pub async fn get_with_query<Q>(
        &self,
        url: &str,
        query: &Q,
        headers: &[(&str, &str)],
    ) -> Result<Response>
    where
        Q: Serialize + ?Sized,
    {
        let mut request = self.inner.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request.send().await.map_err(without_url)
    }

    /// GET `url`, failing on any non-success status. The body is left unread for streaming.
    pub async fn get_ok(&self, url: &str) -> Result<Response> {
        Ok(self.inner.get(url).send().await?.error_for_status()?)
    }
}

/// Decoding helpers for backend responses.
#[async_trait]
pub trait ResponseExt {
    /// Decode a JSON body, or turn a non-success status into [`ImageError::Api`].
    async fn json_or_error<T: DeserializeOwned>(self, provider: &'static str) -> Result<T>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn json_or_error<T: DeserializeOwned>(self, provider: &'static str) -> Result<T> {
        let status = self.status();

        if !status.is_success() {
            let body = self.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                truncate(body.trim(), MAX_ERROR_BODY)
            };
            return Err(ImageError::Api {
                provider,
                status: status.as_u16(),
                message,
            });
        }

        let bytes = self.bytes().await.map_err(without_url)?;
        serde_json::from_slice(&bytes).map_err(|source| ImageError::Decode { provider, source })
    }
}

fn without_url(err: reqwest::Error) -> ImageError {
    ImageError::Transport(err.without_url())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
