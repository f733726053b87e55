//! Fragments from a deployed site over HTTP

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use super::FragmentSource;
use crate::router::{FetchError, FetchResult};

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Fetches fragments relative to a page URL, the way the browser resolves
/// `fetch("views/home.html")` from `https://host/OK-DEVS/`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    page: Url,
}

impl HttpSource {
    /// Create a source for the page at `page_url`
    pub fn new(page_url: &str) -> FetchResult<Self> {
        Self::with_timeout(page_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(page_url: &str, timeout: Duration) -> FetchResult<Self> {
        let page = Url::parse(page_url)
            .map_err(|e| FetchError::InvalidLocation(format!("{}: {}", page_url, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(page_url, e))?;
        Ok(Self { client, page })
    }

    pub fn page(&self) -> &Url {
        &self.page
    }

    /// Absolute URL of a fragment
    pub fn resolve(&self, url: &str) -> FetchResult<Url> {
        self.page
            .join(url)
            .map_err(|e| FetchError::InvalidLocation(format!("{}: {}", url, e)))
    }
}

#[async_trait(?Send)]
impl FragmentSource for HttpSource {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let target = self.resolve(url)?;
        tracing::debug!("Fetching fragment {}", target);

        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| FetchError::transport(target.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(target.as_str(), status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(target.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_relative_to_page() {
        let source = HttpSource::new("https://okdevs.github.io/OK-DEVS/").unwrap();
        assert_eq!(
            source.resolve("views/home.html").unwrap().as_str(),
            "https://okdevs.github.io/OK-DEVS/views/home.html"
        );
        assert_eq!(
            source.resolve("/OK-DEVS/views/404.html").unwrap().as_str(),
            "https://okdevs.github.io/OK-DEVS/views/404.html"
        );
    }

    #[test]
    fn test_rejects_invalid_page_url() {
        assert!(matches!(
            HttpSource::new("not a url"),
            Err(FetchError::InvalidLocation(_))
        ));
    }
}
