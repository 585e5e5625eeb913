//! Spreadsheet bypass: named sheets to tabular data.
//!
//! Spreadsheet inputs never go through the document model. The workbook
//! is treated as a black box producing a named collection of sheets,
//! each of which becomes its own tabular artifact group.

use crate::error::{Error, Result};
use crate::model::{Table, TableRow};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// Read every sheet of a workbook into `(name, table)` pairs, in
/// workbook order. A sheet that fails to load is skipped with a logged
/// warning; an unreadable workbook is a per-job failure.
pub fn read_sheets(bytes: &[u8]) -> Result<Vec<(String, Table)>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::Sheet(format!("workbook open failed: {e}")))?;

    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(e) => {
                log::warn!("skipping sheet '{name}': {e}");
                continue;
            }
        };
        sheets.push((name, range_to_table(&range)));
    }

    if sheets.is_empty() {
        return Err(Error::Sheet("workbook contains no readable sheets".into()));
    }
    Ok(sheets)
}

fn range_to_table(range: &calamine::Range<Data>) -> Table {
    let mut table = Table::new();
    for row in range.rows() {
        table.add_row(TableRow::from_strings(row.iter().map(cell_to_string)));
    }
    table.header_rows = u8::from(!table.is_empty());
    table
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.to_string(),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_workbook_is_sheet_error() {
        let result = read_sheets(b"not a workbook");
        assert!(matches!(result, Err(Error::Sheet(_))));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("x".into())), "x");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
    }
}
