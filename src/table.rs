// src/table.rs

use anyhow::{ensure, Result};

/// Rows produced by one routine: a header followed by same-width data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        Self {
            header: header.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row; its width must equal the header's.
    pub fn push<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        ensure!(
            row.len() == self.header.len(),
            "row has {} cells, header has {}",
            row.len(),
            self.header.len()
        );
        self.rows.push(row);
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header first, then every data row.
    pub fn all_rows(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rows_of_wrong_width() {
        let mut table = Table::new(&["Status", "Count"]);
        table.push(["Final", "3"]).unwrap();
        assert!(table.push(["Final"]).is_err());
        assert!(table.push(["a", "b", "c"]).is_err());
        assert_eq!(table.len(), 1);
        assert!(table.all_rows().all(|r| r.len() == table.header().len()));
    }

    #[test]
    fn all_rows_starts_with_header() {
        let mut table = Table::new(&["a"]);
        table.push(["1".to_string()]).unwrap();
        let rows: Vec<_> = table.all_rows().collect();
        assert_eq!(rows[0], ["a".to_string()]);
        assert_eq!(rows[1], ["1".to_string()]);
    }
}
