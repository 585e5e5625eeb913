//! Table extraction: model-derived and sheet-derived tabular artifacts.

use crate::archive::{Artifact, ArtifactKind};
use crate::error::{Error, Result};
use crate::model::{sanitize_stem, DocumentModel, Element, Table};
use std::fs;
use std::path::Path;

/// Outcome of model-derived table extraction for one job.
#[derive(Debug, Default)]
pub struct ExtractedTables {
    /// CSV artifacts written, in table order
    pub artifacts: Vec<Artifact>,

    /// Per-table export failures, surfaced in the job report
    pub warnings: Vec<String>,
}

/// Export each `Table` element of a model to its own CSV.
///
/// Tables are numbered 1..N in encounter order. A table whose export
/// fails is skipped with a warning but its ordinal is still consumed,
/// so `<stem>_table_i.csv` always matches `[Table i]` in the annotated
/// text. One table's failure never aborts the others.
pub fn export_model_tables(model: &DocumentModel, dir: &Path) -> Result<ExtractedTables> {
    let mut out = ExtractedTables::default();
    let mut index = 0usize;

    for element in &model.elements {
        let Element::Table(table) = element else {
            continue;
        };
        index += 1;
        match table.export_rows() {
            Ok(_) => {
                let file_name = format!("{}_table_{index}.csv", model.stem);
                write_artifact(dir, &file_name, table.to_csv().as_bytes())?;
                out.artifacts
                    .push(Artifact::new(file_name, ArtifactKind::TabularCsv));
            }
            Err(e) => {
                log::warn!("table {index} in '{}' skipped: {e}", model.stem);
                out.warnings.push(format!("table {index}: {e}"));
            }
        }
    }
    Ok(out)
}

/// Export each named sheet of a spreadsheet as its own artifact group
/// keyed `<stem>_<sheet-name>`: CSV always, plus Markdown, HTML, and
/// plain-text renderings.
pub fn export_sheets(
    stem: &str,
    sheets: &[(String, Table)],
    dir: &Path,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for (name, table) in sheets {
        let prefix = format!("{stem}_{}", sanitize_stem(name));

        let renderings: [(&str, String, ArtifactKind); 4] = [
            ("csv", table.to_csv(), ArtifactKind::TabularCsv),
            ("md", table.to_markdown(), ArtifactKind::StructuredMarkup),
            ("html", table.to_html(), ArtifactKind::HtmlMarkup),
            ("txt", table.to_text_grid(), ArtifactKind::AnnotatedText),
        ];
        for (ext, content, kind) in renderings {
            let file_name = format!("{prefix}.{ext}");
            write_artifact(dir, &file_name, content.as_bytes())?;
            artifacts.push(Artifact::new(file_name, kind));
        }
    }
    Ok(artifacts)
}

/// Persist one artifact file; failure is fatal for the job.
pub(crate) fn write_artifact(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<()> {
    let path = dir.join(file_name);
    fs::write(&path, bytes).map_err(|e| Error::AssetWrite {
        path,
        cause: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    fn table(rows: Vec<Vec<&str>>) -> Table {
        Table::from_rows(rows)
    }

    #[test]
    fn test_numbering_increments_on_skip() {
        let mut model = DocumentModel::new("doc");
        model.push_element(Element::Table(table(vec![vec!["a"]])));
        model.push_element(Element::Table(Table::degraded()));
        model.push_element(Element::Table(table(vec![vec!["c"]])));

        let dir = tempfile::tempdir().unwrap();
        let out = export_model_tables(&model, dir.path()).unwrap();

        let names: Vec<&str> = out.artifacts.iter().map(|a| a.file_name.as_str()).collect();
        // Ordinal 2 is consumed by the failing table, never reused.
        assert_eq!(names, vec!["doc_table_1.csv", "doc_table_3.csv"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].starts_with("table 2:"));
    }

    #[test]
    fn test_csv_content_on_disk() {
        let mut model = DocumentModel::new("doc");
        model.push_element(Element::Table(table(vec![vec!["a", "b"], vec!["1", "2"]])));

        let dir = tempfile::tempdir().unwrap();
        export_model_tables(&model, dir.path()).unwrap();

        let csv = fs::read_to_string(dir.path().join("doc_table_1.csv")).unwrap();
        assert_eq!(csv, "a,b\n1,2\n");
    }

    #[test]
    fn test_sheet_artifact_groups() {
        let sheets = vec![
            ("Revenue".to_string(), table(vec![vec!["q", "v"]])),
            ("Costs 2024".to_string(), table(vec![vec!["x"]])),
        ];
        let dir = tempfile::tempdir().unwrap();
        let artifacts = export_sheets("book", &sheets, dir.path()).unwrap();

        assert_eq!(artifacts.len(), 8);
        assert!(dir.path().join("book_Revenue.csv").exists());
        assert!(dir.path().join("book_Costs_2024.md").exists());
        assert!(artifacts
            .iter()
            .any(|a| a.file_name == "book_Revenue.html" && a.kind == ArtifactKind::HtmlMarkup));
    }

    #[test]
    fn test_empty_table_still_numbered() {
        let mut model = DocumentModel::new("doc");
        let empty = Table {
            rows: vec![TableRow::from_strings(Vec::<String>::new())],
            ..Table::new()
        };
        model.push_element(Element::Table(empty));
        let dir = tempfile::tempdir().unwrap();
        let out = export_model_tables(&model, dir.path()).unwrap();
        assert_eq!(out.artifacts.len(), 1);
        assert_eq!(out.artifacts[0].file_name, "doc_table_1.csv");
    }
}
