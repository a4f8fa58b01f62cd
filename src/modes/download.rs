// src/modes/download.rs

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use url::Url;

use crate::config::PDF_FILE_PATTERN;
use crate::fetch::{get_document, Fetch};
use crate::html::{locate, AttrFilter};

/// Download the A4 PDF documentation archive linked from the downloads page
/// into `dest_dir`, overwriting any previous copy. Returns the saved path.
pub fn download(fetcher: &dyn Fetch, downloads_url: &Url, dest_dir: &Path) -> Result<PathBuf> {
    let page = get_document(fetcher, downloads_url)
        .with_context(|| format!("loading downloads page {}", downloads_url))?;

    let pdf = Regex::new(PDF_FILE_PATTERN)?;
    let table = locate(&page, "table", &AttrFilter::new().class("docutils"))?;
    let anchor = locate(table, "a", &AttrFilter::new().pattern("href", &pdf))?;
    let href = anchor.value().attr("href").unwrap_or_default();
    let archive_url = downloads_url
        .join(href)
        .with_context(|| format!("resolving {} against {}", href, downloads_url))?;

    let filename = archive_url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("no file name in {}", archive_url))?;

    fs::create_dir_all(dest_dir).with_context(|| format!("creating {}", dest_dir.display()))?;
    let archive_path = dest_dir.join(filename);

    let bytes = fetcher
        .fetch_bytes(&archive_url)
        .with_context(|| format!("downloading {}", archive_url))?;
    fs::write(&archive_path, &bytes)
        .with_context(|| format!("writing {}", archive_path.display()))?;

    info!("Archive downloaded and saved: {}", archive_path.display());
    Ok(archive_path)
}
