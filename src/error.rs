//! Error types for the docfuse library.

use std::io;
use thiserror::Error;

/// Result type alias for docfuse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document assembly.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a readable ZIP container.
    #[error("Cannot open archive: {0}")]
    ArchiveOpen(String),

    /// An archive entry exists but could not be read or decoded as text.
    #[error("Cannot read archive entry: {0}")]
    ArchiveRead(String),

    /// A required archive entry is missing.
    #[error("Missing archive entry: {0}")]
    EntryMissing(String),

    /// The document XML lacks the structural markers needed for merging.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error writing the output archive.
    #[error("Archive write error: {0}")]
    ArchiveWrite(String),

    /// Invalid configuration data (rename table, settings).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ArchiveOpen(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
