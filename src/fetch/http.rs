// src/fetch/http.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use super::{Fetch, FetchError, ResponseCache};

/// Blocking HTTP fetcher with an optional on-disk response cache.
pub struct HttpFetcher {
    client: Client,
    cache: Option<ResponseCache>,
}

impl HttpFetcher {
    pub fn new(cache: Option<ResponseCache>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, cache })
    }
}

impl Fetch for HttpFetcher {
    fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url)? {
                debug!(%url, "cache hit");
                return Ok(body);
            }
        }

        debug!(%url, "fetching");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let resp = self.client.get(url.clone()).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = resp.bytes().map_err(transport)?.to_vec();

        if let Some(cache) = &self.cache {
            cache.put(url, &body)?;
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_fetch_is_served_from_cache() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/3/")
            .with_status(200)
            .with_body("<h1>Docs</h1>")
            .expect(1)
            .create();

        let tmp = tempdir().unwrap();
        let cache = ResponseCache::open(tmp.path()).unwrap();
        let fetcher = HttpFetcher::new(Some(cache)).unwrap();
        let url = Url::parse(&format!("{}/3/", server.url())).unwrap();

        assert_eq!(fetcher.fetch_text(&url).unwrap(), "<h1>Docs</h1>");
        assert_eq!(fetcher.fetch_text(&url).unwrap(), "<h1>Docs</h1>");
        mock.assert();
    }

    #[test]
    fn error_status_is_a_fetch_failure_and_not_cached() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/missing").with_status(404).expect(2).create();

        let tmp = tempdir().unwrap();
        let fetcher = HttpFetcher::new(Some(ResponseCache::open(tmp.path()).unwrap())).unwrap();
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();

        for _ in 0..2 {
            match fetcher.fetch_bytes(&url) {
                Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
                other => panic!("unexpected {other:?}"),
            }
        }
        mock.assert();
    }

    #[test]
    fn unreachable_host_is_a_transport_failure() {
        let fetcher = HttpFetcher::new(None).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert!(matches!(
            fetcher.fetch_bytes(&url),
            Err(FetchError::Transport { .. })
        ));
    }
}
