// src/modes/whats_new.rs

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, info};
use url::Url;

use super::bad_link;
use crate::config::{LINK_TITLE_AUTHOR_HEAD, WHATS_NEW_LINK_PATTERN};
use crate::fetch::{get_document, Fetch};
use crate::html::{locate, locate_all, locate_tag, text_of, AttrFilter};
use crate::table::Table;

/// Link, title and author line of every release page listed on the "What's New" index.
pub fn whats_new(fetcher: &dyn Fetch, index_url: &Url) -> Result<Table> {
    let index = get_document(fetcher, index_url)
        .with_context(|| format!("loading release index {}", index_url))?;

    let section = locate(&index, "section", &AttrFilter::new().id("what-s-new-in-python"))?;
    let wrapper = locate(section, "div", &AttrFilter::new().class("toctree-wrapper"))?;
    let items = locate_all(wrapper, "li", &AttrFilter::new().class("toctree-l1"));
    let version_page = Regex::new(WHATS_NEW_LINK_PATTERN)?;

    let mut table = Table::new(&LINK_TITLE_AUTHOR_HEAD);
    let mut bad_links = Vec::new();

    for item in items {
        let Ok(anchor) = locate_tag(item, "a") else {
            debug!("index entry without a link");
            continue;
        };
        let href = anchor.value().attr("href").unwrap_or_default();
        if !version_page.is_match(href) {
            debug!(href, "not a release page");
            continue;
        }
        let link = index_url
            .join(href)
            .with_context(|| format!("resolving {} against {}", href, index_url))?;

        let page = match get_document(fetcher, &link) {
            Ok(page) => page,
            Err(e) => {
                debug!(%link, error = %e, "skipping release page");
                bad_links.push(bad_link(&link));
                continue;
            }
        };

        let title = text_of(locate_tag(&page, "h1").with_context(|| format!("title of {}", link))?);
        let authors = text_of(locate_tag(&page, "dl").with_context(|| format!("authors of {}", link))?)
            .replace('\n', " ");
        table.push([link.to_string(), title, authors])?;
    }

    if !bad_links.is_empty() {
        info!("{:?}", bad_links);
    }
    Ok(table)
}
