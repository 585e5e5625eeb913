//! Archive assembly: one deflate ZIP for the whole batch.
//!
//! Every artifact of every completed job lands at
//! `<document-stem>/<kind-bucket>/<artifact-file-name>`. The bucket is a
//! fixed function of the artifact's [`ArtifactKind`], decided at creation
//! time; guessing from the file suffix is only a fallback for files whose
//! kind was never tracked. This layout is the crate's main compatibility
//! surface.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Category of an output artifact; determines archive placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Structured markup (Markdown)
    StructuredMarkup,
    /// HTML-like markup
    HtmlMarkup,
    /// Machine-readable record (JSON)
    MachineRecord,
    /// Annotated flat text
    AnnotatedText,
    /// Tabular CSV export
    TabularCsv,
    /// Raster image asset
    RasterImage,
    /// Anything else; placed flat under the document stem
    Auxiliary,
}

impl ArtifactKind {
    /// The fixed bucket directory for this kind. `None` means flat
    /// placement under the document stem.
    pub fn bucket(&self) -> Option<&'static str> {
        match self {
            ArtifactKind::StructuredMarkup => Some("md"),
            ArtifactKind::HtmlMarkup => Some("html"),
            ArtifactKind::MachineRecord => Some("json"),
            ArtifactKind::AnnotatedText => Some("txt"),
            ArtifactKind::TabularCsv => Some("assets/tables"),
            ArtifactKind::RasterImage => Some("assets/images"),
            ArtifactKind::Auxiliary => None,
        }
    }

    /// Lossy fallback: derive a kind from a file extension, using the
    /// same suffix table as the bucket mapping. Only for artifacts whose
    /// kind was not tracked at creation time.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "md" => ArtifactKind::StructuredMarkup,
            "html" | "htm" => ArtifactKind::HtmlMarkup,
            "json" => ArtifactKind::MachineRecord,
            "txt" => ArtifactKind::AnnotatedText,
            "csv" => ArtifactKind::TabularCsv,
            "png" | "jpg" | "jpeg" => ArtifactKind::RasterImage,
            _ => ArtifactKind::Auxiliary,
        }
    }
}

/// One output file belonging to a job, tagged with its kind.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// File name within the job's working directory
    pub file_name: String,

    /// Artifact kind, fixed at creation time
    pub kind: ArtifactKind,
}

impl Artifact {
    /// Create an artifact record.
    pub fn new(file_name: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
        }
    }
}

/// Archive member path for an artifact of a document.
pub fn archive_path(stem: &str, kind: ArtifactKind, file_name: &str) -> String {
    match kind.bucket() {
        Some(bucket) => format!("{stem}/{bucket}/{file_name}"),
        None => format!("{stem}/{file_name}"),
    }
}

/// Writes the batch archive.
///
/// Jobs are added one at a time after the batch's join point; member
/// paths within a job are sorted so the same artifact set always yields
/// the same member list.
pub struct ArchiveBuilder<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> ArchiveBuilder<W> {
    /// Create a builder writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Add every artifact of one completed job.
    ///
    /// Tracked artifacts are placed by their declared kind; files found
    /// in the working directory that no artifact claims are placed by
    /// the suffix fallback so nothing a job produced is silently lost.
    pub fn add_job(&mut self, stem: &str, dir: &Path, artifacts: &[Artifact]) -> Result<()> {
        // BTreeMap keyed by archive path: deterministic member order.
        let mut members: BTreeMap<String, std::path::PathBuf> = BTreeMap::new();

        for artifact in artifacts {
            let src = dir.join(&artifact.file_name);
            members.insert(
                archive_path(stem, artifact.kind, &artifact.file_name),
                src,
            );
        }

        for entry in fs::read_dir(dir).map_err(|e| Error::Archive(e.to_string()))? {
            let entry = entry.map_err(|e| Error::Archive(e.to_string()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if artifacts.iter().any(|a| a.file_name == file_name) {
                continue;
            }
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            let kind = ArtifactKind::from_extension(ext);
            members.insert(archive_path(stem, kind, file_name), path);
        }

        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (member, src) in members {
            let bytes = fs::read(&src)
                .map_err(|e| Error::Archive(format!("reading {}: {e}", src.display())))?;
            self.zip.start_file(member, options)?;
            self.zip.write_all(&bytes)?;
        }
        Ok(())
    }

    /// Finish the archive and return the inner writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_mapping() {
        assert_eq!(ArtifactKind::StructuredMarkup.bucket(), Some("md"));
        assert_eq!(ArtifactKind::TabularCsv.bucket(), Some("assets/tables"));
        assert_eq!(ArtifactKind::RasterImage.bucket(), Some("assets/images"));
        assert_eq!(ArtifactKind::Auxiliary.bucket(), None);
    }

    #[test]
    fn test_suffix_fallback_matches_bucket_table() {
        assert_eq!(
            ArtifactKind::from_extension("md"),
            ArtifactKind::StructuredMarkup
        );
        assert_eq!(
            ArtifactKind::from_extension("JPEG"),
            ArtifactKind::RasterImage
        );
        assert_eq!(ArtifactKind::from_extension("bin"), ArtifactKind::Auxiliary);
    }

    #[test]
    fn test_archive_path() {
        assert_eq!(
            archive_path("doc", ArtifactKind::TabularCsv, "doc_table_1.csv"),
            "doc/assets/tables/doc_table_1.csv"
        );
        assert_eq!(
            archive_path("doc", ArtifactKind::Auxiliary, "notes.log"),
            "doc/notes.log"
        );
    }

    #[test]
    fn test_add_job_with_untracked_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("doc.md"), "# hi").unwrap();
        fs::write(dir.path().join("stray.csv"), "a,b\n").unwrap();

        let artifacts = vec![Artifact::new("doc.md", ArtifactKind::StructuredMarkup)];
        let cursor = std::io::Cursor::new(Vec::new());
        let mut builder = ArchiveBuilder::new(cursor);
        builder.add_job("doc", dir.path(), &artifacts).unwrap();
        let cursor = builder.finish().unwrap();

        let mut zip = zip::ZipArchive::new(cursor).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"doc/md/doc.md".to_string()));
        // Untracked file routed by the suffix fallback.
        assert!(names.contains(&"doc/assets/tables/stray.csv".to_string()));
    }
}
