// src/fetch/mod.rs

use scraper::Html;
use thiserror::Error;
use url::Url;

pub mod cache;
pub mod http;

pub use cache::ResponseCache;
pub use http::HttpFetcher;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("response cache I/O: {0}")]
    Cache(#[from] std::io::Error),
}

/// Page source for the scraping routines.
pub trait Fetch {
    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError>;

    /// Body decoded as UTF-8; invalid sequences are replaced.
    fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Fetch `url` and parse it as an HTML document.
pub fn get_document(fetcher: &dyn Fetch, url: &Url) -> Result<Html, FetchError> {
    let text = fetcher.fetch_text(url)?;
    Ok(Html::parse_document(&text))
}
