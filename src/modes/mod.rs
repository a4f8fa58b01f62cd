// src/modes/mod.rs

use anyhow::Result;
use clap::ValueEnum;
use std::fmt;
use url::Url;

use crate::config::Settings;
use crate::fetch::Fetch;
use crate::table::Table;

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod status;
pub mod whats_new;

/// The independently selectable scraping routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }

    /// Run the routine; `None` means it had nothing to report.
    pub fn run(self, fetcher: &dyn Fetch, settings: &Settings) -> Result<Option<Table>> {
        match self {
            Mode::WhatsNew => whats_new::whats_new(fetcher, &settings.whats_new_url).map(Some),
            Mode::LatestVersions => {
                latest_versions::latest_versions(fetcher, &settings.doc_url).map(Some)
            }
            Mode::Download => {
                download::download(fetcher, &settings.downloads_url, &settings.downloads_dir())?;
                Ok(None)
            }
            Mode::Pep => pep::pep(fetcher, &settings.pep_url).map(Some),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn bad_link(link: &Url) -> String {
    format!("Failed to follow link: {}", link)
}
