//! Error types for the docbundle library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docbundle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during batch document export.
///
/// The taxonomy distinguishes failures by blast radius: `Parse`,
/// `LimitExceeded`, and `AssetWrite` fail a single job; `TableExport` and
/// `Render` are recoverable within a job and surface as warnings;
/// `Archive` fails the whole batch.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The parsing engine could not produce a document model. Fatal per job.
    #[error("Failed to parse '{name}': {cause}")]
    Parse {
        /// Original input file name
        name: String,
        /// Underlying cause reported by the engine
        cause: String,
    },

    /// The declared input format is not supported.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// A hard size or page limit was exceeded. Fatal per job.
    #[error("Limit exceeded for '{name}': {detail}")]
    LimitExceeded {
        /// Input file name
        name: String,
        /// Which limit was hit and by how much
        detail: String,
    },

    /// A table could not be exported to rows. Recoverable per table.
    #[error("Table export error: {0}")]
    TableExport(String),

    /// One rendering of a document failed. Recoverable per rendering kind.
    #[error("Rendering error ({format}): {cause}")]
    Render {
        /// Output format that failed (e.g. "markdown", "record")
        format: String,
        /// Underlying cause
        cause: String,
    },

    /// An artifact could not be persisted to the working directory.
    /// Fatal per job.
    #[error("Failed to write artifact {path}: {cause}")]
    AssetWrite {
        /// Target path of the artifact
        path: PathBuf,
        /// Underlying cause
        cause: String,
    },

    /// A spreadsheet could not be read as a set of sheets. Fatal per job.
    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    /// The output archive could not be produced. Fatal for the whole batch.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Sheet(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Archive(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render {
            format: "record".to_string(),
            cause: err.to_string(),
        }
    }
}

impl Error {
    /// Whether this error fails an entire job (as opposed to a single
    /// table or rendering within it).
    pub fn is_job_fatal(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Parse { .. }
                | Error::UnsupportedFormat(_)
                | Error::LimitExceeded { .. }
                | Error::AssetWrite { .. }
                | Error::Sheet(_)
        )
    }
}
