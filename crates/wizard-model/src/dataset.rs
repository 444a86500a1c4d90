//! Uploaded tabular data.
//!
//! A [`TabularDataset`] is never edited in place by the wizard. Every change
//! (row edits, empty-row filtering, row deletion) produces a new value that
//! replaces the previous one as a whole.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Rows of an uploaded file plus its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularDataset {
    /// Name of the uploaded file. Informational only.
    pub file_name: String,
    rows: Vec<Vec<String>>,
}

/// A row located after the header row.
#[derive(Debug, Clone, Copy)]
pub struct DataRow<'a> {
    /// Absolute index into the full row sequence.
    pub index: usize,
    /// Position relative to the first data row.
    pub offset: usize,
    pub cells: &'a [String],
}

impl DataRow<'_> {
    /// Returns the cell at `column`, or `None` when the row is too short.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn is_blank(&self) -> bool {
        is_blank_row(self.cells)
    }
}

/// A single cell write used by [`TabularDataset::with_cell_updates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub row: usize,
    pub column: usize,
    pub value: String,
}

impl TabularDataset {
    pub fn new(file_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            file_name: file_name.into(),
            rows,
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell count of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns the cell at (`row`, `column`). Trailing cells missing from a
    /// short row are `None`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Number of rows strictly after `header_row`.
    pub fn data_row_count(&self, header_row: usize) -> usize {
        self.rows.len().saturating_sub(header_row + 1)
    }

    /// Iterates the rows strictly after `header_row`, in file order.
    ///
    /// Each item carries its absolute index (`offset + header_row + 1`), which
    /// is the index validation issues and edits refer to.
    pub fn data_rows(&self, header_row: usize) -> impl Iterator<Item = DataRow<'_>> {
        let start = header_row + 1;
        self.rows
            .iter()
            .enumerate()
            .skip(start)
            .map(move |(index, cells)| DataRow {
                index,
                offset: index - start,
                cells,
            })
    }

    /// Returns a dataset with the same name and the given rows.
    #[must_use]
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            file_name: self.file_name.clone(),
            rows,
        }
    }

    /// Returns a dataset without the rows at the given absolute indices.
    /// Remaining rows keep their relative order.
    #[must_use]
    pub fn without_rows(&self, indices: &BTreeSet<usize>) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, row)| row.clone())
            .collect();
        self.with_rows(rows)
    }

    /// Returns a dataset with the given cells overwritten.
    ///
    /// Updates addressing a missing row are ignored; a row shorter than the
    /// addressed column is padded with empty cells first.
    #[must_use]
    pub fn with_cell_updates(&self, updates: impl IntoIterator<Item = CellUpdate>) -> Self {
        let mut rows = self.rows.clone();
        for update in updates {
            let Some(row) = rows.get_mut(update.row) else {
                continue;
            };
            if row.len() <= update.column {
                row.resize(update.column + 1, String::new());
            }
            row[update.column] = update.value;
        }
        self.with_rows(rows)
    }
}

/// True if every cell is empty or whitespace.
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| (*c).to_string()).collect())
            .collect()
    }

    #[test]
    fn short_rows_have_absent_cells() {
        let dataset = TabularDataset::new("a.csv", rows(&[&["A", "B", "C"], &["1"]]));
        assert_eq!(dataset.width(), 3);
        assert_eq!(dataset.cell(1, 0), Some("1"));
        assert_eq!(dataset.cell(1, 2), None);
        assert_eq!(dataset.cell(5, 0), None);
    }

    #[test]
    fn data_rows_carry_absolute_indices() {
        let dataset = TabularDataset::new(
            "a.csv",
            rows(&[&["title"], &["NAME", "AGE"], &["John", "30"], &["Jane", "28"]]),
        );
        let indices: Vec<(usize, usize)> = dataset
            .data_rows(1)
            .map(|row| (row.index, row.offset))
            .collect();
        assert_eq!(indices, vec![(2, 0), (3, 1)]);
        assert_eq!(dataset.data_row_count(1), 2);
        assert_eq!(dataset.data_row_count(10), 0);
    }

    #[test]
    fn cell_updates_pad_short_rows() {
        let dataset = TabularDataset::new("a.csv", rows(&[&["A", "B", "C"], &["1"]]));
        let updated = dataset.with_cell_updates([
            CellUpdate {
                row: 1,
                column: 2,
                value: "x".to_string(),
            },
            CellUpdate {
                row: 9,
                column: 0,
                value: "ignored".to_string(),
            },
        ]);
        assert_eq!(updated.row(1), Some(&rows(&[&["1", "", "x"]])[0][..]));
        assert_eq!(dataset.cell(1, 2), None);
    }

    #[test]
    fn blank_rows_are_whitespace_only() {
        assert!(is_blank_row(&rows(&[&["", "  ", "\t"]])[0]));
        assert!(!is_blank_row(&rows(&[&["", " a "]])[0]));
        assert!(is_blank_row(&[]));
    }
}
