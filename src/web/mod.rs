//! HTTP fetching shared by the page scraper and the site downloader

pub mod download;
pub mod scrape;

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

pub use download::*;
pub use scrape::*;

/// Per-request timeout for asset downloads.
pub const ASSET_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid selector {0}")]
    Selector(String),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to process HTML: {0}")]
    Html(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    /// Overall timeout for page requests; `None` keeps the client default
    pub timeout: Option<Duration>,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_proxy: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("utilkit/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            use_proxy: true,
        }
    }
}

pub fn build_client(options: &FetchOptions) -> Result<Client, FetchError> {
    let mut builder = Client::builder().user_agent(options.user_agent.clone());
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    if !options.use_proxy {
        builder = builder.no_proxy();
    }
    builder.build().map_err(FetchError::Client)
}

fn send(
    request: reqwest::blocking::RequestBuilder,
    url: &str,
) -> Result<reqwest::blocking::Response, FetchError> {
    let response = request.send().map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(response)
}

/// GET a page body as text; any non-2xx status is an error.
pub fn fetch_text(client: &Client, url: &str) -> Result<String, FetchError> {
    send(client.get(url), url)?
        .text()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
}

/// GET raw bytes with [`ASSET_TIMEOUT`].
pub fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let bytes = send(client.get(url).timeout(ASSET_TIMEOUT), url)?
        .bytes()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FetchOptions::default();
        assert!(options.user_agent.starts_with("utilkit/"));
        assert!(options.timeout.is_none());
        assert!(options.use_proxy);
    }

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            url: "https://example.com/missing".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/missing returned HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_invalid_url_display() {
        let err = FetchError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid URL 'nope': relative URL without a base"
        );
    }

    #[test]
    fn test_build_client() {
        let options = FetchOptions {
            timeout: Some(Duration::from_secs(5)),
            use_proxy: false,
            ..Default::default()
        };
        assert!(build_client(&options).is_ok());
    }
}
