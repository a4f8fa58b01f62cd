// src/modes/latest_versions.rs

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use url::Url;

use crate::config::{ALL_VERSIONS_MARKER, LINK_VERSION_STATUS_HEAD, VERSION_STATUS_PATTERN};
use crate::fetch::{get_document, Fetch};
use crate::html::{locate, locate_all, text_of, AttrFilter};
use crate::table::Table;

/// Split `Python 3.11 (stable)` into version and status. Text that does not
/// follow that shape is returned whole as the version with an empty status.
pub fn parse_version_status(pattern: &Regex, text: &str) -> (String, String) {
    match pattern.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// Documentation link, version and status for each entry of the sidebar's
/// "All versions" list.
pub fn latest_versions(fetcher: &dyn Fetch, doc_url: &Url) -> Result<Table> {
    let page = get_document(fetcher, doc_url)
        .with_context(|| format!("loading documentation index {}", doc_url))?;

    let sidebar = locate(&page, "div", &AttrFilter::new().class("sphinxsidebar"))?;
    let versions = locate_all(sidebar, "ul", &AttrFilter::new())
        .into_iter()
        .find(|ul| text_of(*ul).contains(ALL_VERSIONS_MARKER))
        .ok_or_else(|| anyhow!("no list containing {:?} in the sidebar", ALL_VERSIONS_MARKER))?;

    let pattern = Regex::new(VERSION_STATUS_PATTERN)?;
    let mut table = Table::new(&LINK_VERSION_STATUS_HEAD);
    for anchor in locate_all(versions, "a", &AttrFilter::new()) {
        let link = anchor.value().attr("href").unwrap_or_default().to_string();
        let (version, status) = parse_version_status(&pattern, &text_of(anchor));
        table.push([link, version, status])?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::FakeFetcher;

    const DOCS: &str = "https://docs.python.org/3/";

    fn sidebar(lists: &str) -> String {
        format!(
            r#"<html><body><div class="body">Python 3.13 (stable)</div>
               <div class="sphinxsidebar" role="navigation">{lists}</div></body></html>"#
        )
    }

    #[test]
    fn rows_from_all_versions_list() {
        let html = sidebar(
            r#"<ul><li><a href="/en/">English</a></li></ul>
               <ul>
                 <li><a href="/3.11/">Python 3.11 (stable)</a></li>
                 <li><a href="/3.12/">3.12</a></li>
                 <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
               </ul>"#,
        );
        let fetcher = FakeFetcher::new().page(DOCS, html);
        let table = latest_versions(&fetcher, &Url::parse(DOCS).unwrap()).unwrap();

        assert_eq!(table.header(), ["Documentation Link", "Version", "Status"]);
        assert_eq!(table.rows()[0], ["/3.11/", "3.11", "stable"]);
        assert_eq!(table.rows()[1], ["/3.12/", "3.12", ""]);
        assert_eq!(
            table.rows()[2],
            ["https://www.python.org/doc/versions/", "All versions", ""]
        );
    }

    #[test]
    fn missing_versions_list_is_fatal() {
        let fetcher = FakeFetcher::new().page(DOCS, sidebar("<ul><li>Navigation</li></ul>"));
        let err = latest_versions(&fetcher, &Url::parse(DOCS).unwrap()).unwrap_err();
        assert!(err.to_string().contains("All versions"));
    }

    #[test]
    fn parses_in_development_status() {
        let re = Regex::new(VERSION_STATUS_PATTERN).unwrap();
        assert_eq!(
            parse_version_status(&re, "Python 3.14 (in development)"),
            ("3.14".to_string(), "in development".to_string())
        );
    }
}
