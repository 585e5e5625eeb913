//! Table types and tabular renderings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A table structure with row/column export capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Table caption
    pub caption: Option<String>,

    /// Set by the engine when structure recognition could not reconstruct
    /// the cell grid; such tables refuse row export.
    pub degraded: bool,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            caption: None,
            degraded: false,
        }
    }

    /// Create a table from rows of strings, treating the first row as header.
    pub fn from_rows<S: Into<String>>(rows: Vec<Vec<S>>) -> Self {
        let header_rows = u8::from(!rows.is_empty());
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
            header_rows,
            caption: None,
            degraded: false,
        }
    }

    /// Create a degraded table whose export fails.
    pub fn degraded() -> Self {
        Self {
            degraded: true,
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Export the table to row/column form.
    ///
    /// This is the capability seam of the `Table` element: a degraded
    /// table returns `Err`, which callers treat as a recoverable,
    /// per-table failure.
    pub fn export_rows(&self) -> Result<Vec<Vec<String>>> {
        if self.degraded {
            return Err(Error::TableExport(
                "table structure was not recognized".to_string(),
            ));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row.cells.clone())
            .collect())
    }

    /// Render the table as an aligned plain-text grid.
    ///
    /// Columns are left-aligned and padded to the widest cell; row and
    /// column order are preserved exactly.
    pub fn to_text_grid(&self) -> String {
        let rows: Vec<&Vec<String>> = self.rows.iter().map(|r| &r.cells).collect();
        rows_to_text_grid(&rows)
    }

    /// Render the table as a Markdown pipe table.
    pub fn to_markdown(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        let cols = self.column_count();
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            out.push('|');
            for c in 0..cols {
                let cell = row.cells.get(c).map(String::as_str).unwrap_or("");
                out.push(' ');
                out.push_str(&sanitize_md_cell(cell));
                out.push_str(" |");
            }
            out.push('\n');
            if i == 0 {
                out.push('|');
                for _ in 0..cols {
                    out.push_str(" --- |");
                }
                out.push('\n');
            }
        }
        out.trim_end().to_string()
    }

    /// Render the table as an HTML `<table>` fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table>\n");
        for (i, row) in self.rows.iter().enumerate() {
            let tag = if (i as u8) < self.header_rows { "th" } else { "td" };
            out.push_str("  <tr>");
            for cell in &row.cells {
                out.push_str(&format!("<{tag}>{}</{tag}>", escape_html(cell)));
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</table>");
        out
    }

    /// Render the table as RFC-4180 CSV.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: Vec<String> = row.cells.iter().map(|c| csv_field(c)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row of plain-text cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<String>,
}

impl TableRow {
    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Render rows of cells as an aligned text grid.
pub(crate) fn rows_to_text_grid(rows: &[&Vec<String>]) -> String {
    let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in rows {
        for (c, cell) in row.iter().enumerate() {
            widths[c] = widths[c].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = String::new();
        for c in 0..cols {
            let cell = row.get(c).map(String::as_str).unwrap_or("");
            if c > 0 {
                line.push(' ');
            }
            line.push_str(cell);
            // Pad all but the last column
            if c + 1 < cols {
                for _ in cell.chars().count()..widths[c] {
                    line.push(' ');
                }
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn sanitize_md_cell(cell: &str) -> String {
    cell.trim().replace('|', "\\|").replace('\n', " ")
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_rows() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);
        let rows = table.export_rows().unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_degraded_table_refuses_export() {
        let table = Table::degraded();
        assert!(matches!(
            table.export_rows(),
            Err(Error::TableExport(_))
        ));
    }

    #[test]
    fn test_text_grid_alignment() {
        let table = Table::from_rows(vec![vec!["name", "x"], vec!["al", "42"]]);
        assert_eq!(table.to_text_grid(), "name x\nal   42");
    }

    #[test]
    fn test_text_grid_minimal() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);
        assert_eq!(table.to_text_grid(), "a b\n1 2");
    }

    #[test]
    fn test_markdown_table() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1", "2"]]);
        let md = table.to_markdown();
        assert_eq!(md, "| a | b |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn test_csv_quoting() {
        let table = Table::from_rows(vec![vec!["plain", "with,comma", "with\"quote"]]);
        assert_eq!(
            table.to_csv(),
            "plain,\"with,comma\",\"with\"\"quote\"\n"
        );
    }

    #[test]
    fn test_html_header_rows() {
        let table = Table::from_rows(vec![vec!["h"], vec!["v"]]);
        let html = table.to_html();
        assert!(html.contains("<th>h</th>"));
        assert!(html.contains("<td>v</td>"));
    }

    #[test]
    fn test_column_count_ragged() {
        let table = Table::from_rows(vec![vec!["a"], vec!["1", "2", "3"]]);
        assert_eq!(table.column_count(), 3);
    }
}
