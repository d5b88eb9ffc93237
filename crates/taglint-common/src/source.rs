//! Document loading for the taglint checker.
//!
//! The checker itself operates on in-memory strings; this module covers the
//! one piece of I/O the tool performs, reading the document to check.

use std::fs;
use std::path::Path;

/// Error type for document loading.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to read the document from disk.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// The path we attempted to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Read a document from a file path.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if the file is missing or unreadable.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String, SourceError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.display().to_string(),
        source,
    })
}
