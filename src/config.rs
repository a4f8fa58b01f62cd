// src/config.rs

use anyhow::{Context, Result};
use std::{env, path::PathBuf};
use url::Url;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const MAIN_PEP_URL: &str = "https://peps.python.org/";

pub const HOME_ENV: &str = "PYDOCS_SCRAPER_HOME";
pub const DOC_URL_ENV: &str = "PYDOCS_SCRAPER_DOC_URL";
pub const PEP_URL_ENV: &str = "PYDOCS_SCRAPER_PEP_URL";

pub const CSV_FILE_NAME: &str = "{mode}_{datetime}.csv";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const LOG_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub const LOG_FILE_NAME: &str = "parser.log";
pub const LOG_MAX_BYTES: u64 = 1_000_000;
pub const LOG_BACKUP_COUNT: usize = 5;

pub const LINK_TITLE_AUTHOR_HEAD: [&str; 3] = ["Link", "Title", "Editor/Author"];
pub const LINK_VERSION_STATUS_HEAD: [&str; 3] = ["Documentation Link", "Version", "Status"];
pub const STATUS_COUNT_HEAD: [&str; 2] = ["Status", "Count"];
pub const TOTAL_LABEL: &str = "Total";

pub const WHATS_NEW_LINK_PATTERN: &str = r"^\d\.\d{0,2}\.html";
pub const VERSION_STATUS_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";
pub const ALL_VERSIONS_MARKER: &str = "All versions";
pub const PDF_FILE_PATTERN: &str = r".+pdf-a4\.zip$";
pub const PEP_LINK_PATTERN: &str = r"pep-\d{4}/$";

/// Entry points and on-disk layout for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub doc_url: Url,
    pub whats_new_url: Url,
    pub downloads_url: Url,
    pub pep_url: Url,
    pub base_dir: PathBuf,
}

impl Settings {
    /// Build settings rooted at `base_dir` with the public documentation URLs.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_urls(base_dir, MAIN_DOC_URL, MAIN_PEP_URL)
    }

    pub fn with_urls(base_dir: impl Into<PathBuf>, doc_url: &str, pep_url: &str) -> Result<Self> {
        let doc_url =
            Url::parse(doc_url).with_context(|| format!("parsing documentation URL {}", doc_url))?;
        let pep_url =
            Url::parse(pep_url).with_context(|| format!("parsing PEP index URL {}", pep_url))?;
        Ok(Self {
            whats_new_url: doc_url.join("whatsnew/")?,
            downloads_url: doc_url.join("download.html")?,
            doc_url,
            pep_url,
            base_dir: base_dir.into(),
        })
    }

    /// Read overrides from the environment, falling back to the current directory
    /// and the public URLs.
    pub fn from_env() -> Result<Self> {
        let base_dir = match env::var_os(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().context("resolving current directory")?,
        };
        let doc_url = env::var(DOC_URL_ENV).unwrap_or_else(|_| MAIN_DOC_URL.to_string());
        let pep_url = env::var(PEP_URL_ENV).unwrap_or_else(|_| MAIN_PEP_URL.to_string());
        Self::with_urls(base_dir, &doc_url, &pep_url)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join("results")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join("downloads")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join("http_cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_urls_follow_doc_root() {
        let settings = Settings::new("/tmp/base").unwrap();
        assert_eq!(
            settings.whats_new_url.as_str(),
            "https://docs.python.org/3/whatsnew/"
        );
        assert_eq!(
            settings.downloads_url.as_str(),
            "https://docs.python.org/3/download.html"
        );
        assert_eq!(settings.pep_url.as_str(), "https://peps.python.org/");
        assert_eq!(settings.log_dir(), PathBuf::from("/tmp/base/logs"));
        assert_eq!(settings.cache_dir(), PathBuf::from("/tmp/base/http_cache"));
    }

    #[test]
    fn rejects_bad_url() {
        assert!(Settings::with_urls("/tmp", "not a url", MAIN_PEP_URL).is_err());
    }
}
