// src/modes/status.rs

use anyhow::Result;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};
use tracing::info;

use crate::config::{STATUS_COUNT_HEAD, TOTAL_LABEL};
use crate::table::Table;

/// Acceptable detail-page statuses for each one-letter list status code.
static EXPECTED_STATUS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("A", &["Active", "Accepted"][..]),
        ("D", &["Deferred"][..]),
        ("F", &["Final"][..]),
        ("P", &["Provisional"][..]),
        ("R", &["Rejected"][..]),
        ("S", &["Superseded"][..]),
        ("W", &["Withdrawn"][..]),
        ("", &["Draft", "Active"][..]),
    ])
});

/// Statuses accepted for `code`; unknown codes accept nothing.
pub fn expected_statuses(code: &str) -> &'static [&'static str] {
    EXPECTED_STATUS.get(code).copied().unwrap_or(&[])
}

/// Status code from a two-character type/status abbreviation such as `"SF"`.
/// Anything that is not exactly two characters carries no status.
pub fn status_code(abbr: &str) -> String {
    let chars: Vec<char> = abbr.chars().collect();
    match chars.as_slice() {
        [_, status] => status.to_string(),
        _ => String::new(),
    }
}

/// Occurrences per status, kept in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, u64)>,
}

impl StatusTally {
    pub fn increment(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn get(&self, status: &str) -> u64 {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map_or(0, |(_, n)| *n)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(Status, Count)` rows followed by the total row.
    pub fn into_table(self) -> Result<Table> {
        let total = self.total();
        let mut table = Table::new(&STATUS_COUNT_HEAD);
        for (status, n) in self.counts {
            table.push([status, n.to_string()])?;
        }
        table.push([TOTAL_LABEL.to_string(), total.to_string()])?;
        Ok(table)
    }
}

/// A proposal whose list status disagrees with its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub list_code: String,
    pub page_status: String,
    pub link: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "List status: {}; status on page {}: {}",
            self.list_code, self.link, self.page_status
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Tallied,
    Mismatched,
}

/// Accumulators for one reconciliation run.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub tally: StatusTally,
    pub mismatches: Vec<Mismatch>,
    pub ambiguous: Vec<String>,
    pub bad_links: Vec<String>,
}

impl Reconciliation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally `page_status` if the list code allows it, otherwise record a mismatch.
    pub fn reconcile(&mut self, list_code: &str, page_status: &str, link: &str) -> Reconciled {
        if expected_statuses(list_code).contains(&page_status) {
            self.tally.increment(page_status);
            Reconciled::Tallied
        } else {
            self.mismatches.push(Mismatch {
                list_code: list_code.to_string(),
                page_status: page_status.to_string(),
                link: link.to_string(),
            });
            Reconciled::Mismatched
        }
    }

    /// One log entry per non-empty diagnostic list, then the status table.
    pub fn finish(self) -> Result<Table> {
        if !self.mismatches.is_empty() {
            let lines: Vec<String> = self.mismatches.iter().map(ToString::to_string).collect();
            info!("Mismatched statuses: {:?}", lines);
        }
        if !self.ambiguous.is_empty() {
            info!("PEPs without type and status: {:?}", self.ambiguous);
        }
        if !self.bad_links.is_empty() {
            info!("{:?}", self.bad_links);
        }
        self.tally.into_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_under_a_is_tallied() {
        let mut run = Reconciliation::new();
        assert_eq!(run.reconcile("A", "Accepted", "l1"), Reconciled::Tallied);
        assert_eq!(run.tally.get("Accepted"), 1);
        assert!(run.mismatches.is_empty());
    }

    #[test]
    fn final_under_a_is_a_mismatch() {
        let mut run = Reconciliation::new();
        assert_eq!(run.reconcile("A", "Final", "l1"), Reconciled::Mismatched);
        assert!(run.tally.is_empty());
        assert_eq!(
            run.mismatches,
            vec![Mismatch {
                list_code: "A".into(),
                page_status: "Final".into(),
                link: "l1".into(),
            }]
        );
        assert_eq!(
            run.mismatches[0].to_string(),
            "List status: A; status on page l1: Final"
        );
    }

    #[test]
    fn empty_code_accepts_draft_and_active() {
        let mut run = Reconciliation::new();
        run.reconcile("", "Draft", "a");
        run.reconcile("", "Active", "b");
        run.reconcile("", "Final", "c");
        assert_eq!(run.tally.total(), 2);
        assert_eq!(run.mismatches.len(), 1);
    }

    #[test]
    fn unknown_code_never_tallies() {
        assert!(expected_statuses("X").is_empty());
        let mut run = Reconciliation::new();
        assert_eq!(run.reconcile("X", "Final", "a"), Reconciled::Mismatched);
    }

    #[test]
    fn status_code_requires_two_chars() {
        assert_eq!(status_code("SF"), "F");
        assert_eq!(status_code("IA"), "A");
        assert_eq!(status_code(" IA "), "");
        assert_eq!(status_code("S"), "");
        assert_eq!(status_code("SFX"), "");
        assert_eq!(status_code(""), "");
    }

    #[test]
    fn table_keeps_discovery_order_and_total() {
        let mut tally = StatusTally::default();
        for s in ["Final", "Active", "Final", "Rejected"] {
            tally.increment(s);
        }
        let table = tally.into_table().unwrap();
        assert_eq!(table.header(), ["Status", "Count"]);
        let rows = table.rows();
        assert_eq!(rows[0], ["Final", "2"]);
        assert_eq!(rows[1], ["Active", "1"]);
        assert_eq!(rows[2], ["Rejected", "1"]);
        assert_eq!(rows[3], ["Total", "4"]);
        let sum: u64 = rows[..3].iter().map(|r| r[1].parse::<u64>().unwrap()).sum();
        assert_eq!(rows[3][1].parse::<u64>().unwrap(), sum);
    }

    #[test]
    fn empty_tally_still_has_total_row() {
        let table = StatusTally::default().into_table().unwrap();
        assert_eq!(table.rows(), [vec!["Total".to_string(), "0".to_string()]]);
    }
}
