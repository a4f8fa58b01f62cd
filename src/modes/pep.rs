// src/modes/pep.rs

use anyhow::{Context, Result};
use regex::Regex;
use scraper::ElementRef;
use tracing::debug;
use url::Url;

use super::bad_link;
use super::status::{status_code, Reconciliation};
use crate::config::PEP_LINK_PATTERN;
use crate::fetch::{get_document, Fetch};
use crate::html::{locate, locate_after_text, locate_all, locate_tag, text_of, AttrFilter};
use crate::table::Table;

/// Count PEPs per status, cross-checking each index row against its own page.
pub fn pep(fetcher: &dyn Fetch, index_url: &Url) -> Result<Table> {
    let index = get_document(fetcher, index_url)
        .with_context(|| format!("loading PEP index {}", index_url))?;

    let content = locate(&index, "section", &AttrFilter::new().id("pep-content"))?;
    let pep_link = Regex::new(PEP_LINK_PATTERN)?;
    let table_filter = AttrFilter::new().class("pep-zero-table docutils align-default");

    let mut run = Reconciliation::new();
    for table in locate_all(content, "table", &table_filter) {
        for body in locate_all(table, "tbody", &AttrFilter::new()) {
            for row in locate_all(body, "tr", &AttrFilter::new()) {
                process_row(fetcher, index_url, row, &pep_link, &mut run)?;
            }
        }
    }
    run.finish()
}

fn process_row(
    fetcher: &dyn Fetch,
    index_url: &Url,
    row: ElementRef<'_>,
    pep_link: &Regex,
    run: &mut Reconciliation,
) -> Result<()> {
    let anchor = locate(row, "a", &AttrFilter::new().pattern("href", pep_link))
        .context("index row without a PEP link")?;
    let href = anchor.value().attr("href").unwrap_or_default();
    let link = index_url
        .join(href)
        .with_context(|| format!("resolving {} against {}", href, index_url))?;

    let list_code = match locate_tag(row, "abbr") {
        Ok(abbr) => status_code(&text_of(abbr)),
        Err(_) => {
            run.ambiguous.push(link.to_string());
            String::new()
        }
    };

    let page = match get_document(fetcher, &link) {
        Ok(page) => page,
        Err(e) => {
            debug!(%link, error = %e, "skipping PEP page");
            run.bad_links.push(bad_link(&link));
            return Ok(());
        }
    };

    let meta = locate(&page, "dl", &AttrFilter::new().class("rfc2822 field-list simple"))
        .with_context(|| format!("metadata list on {}", link))?;
    let page_status = text_of(
        locate_after_text(meta, "Status", "abbr").with_context(|| format!("status on {}", link))?,
    );
    let outcome = run.reconcile(&list_code, page_status.trim(), link.as_str());
    debug!(%link, %list_code, %page_status, ?outcome, "reconciled");
    Ok(())
}
