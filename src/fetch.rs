//! The external "fetch URL → bytes" capability.
//!
//! The core never performs network I/O itself; callers hand in a [`Fetch`]
//! implementation (any closure works) and the playlist loaders invoke it at
//! most once per load request. Retry and backoff are the caller's business.

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status code {0}")]
    Status(u16),
}

/// Retrieves the raw bytes of a remote playlist document.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<Bytes, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        self(url)
    }
}

/// A blocking HTTP fetcher backed by reqwest.
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.bytes()?)
    }
}
