//! Scraper for the Python documentation and PEP index: release notes,
//! documentation versions, PEP status counts and the PDF archive.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod html;
pub mod logging;
pub mod modes;
pub mod output;
pub mod table;

pub use modes::Mode;
pub use table::Table;
