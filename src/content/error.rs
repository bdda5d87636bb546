//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not become a post
#[derive(Error, Debug)]
pub enum ContentError {
    /// Fewer lines than the title/image/summary/separator layout needs
    #[error("malformed document: expected at least 4 lines, found {found}")]
    MalformedDocument { found: usize },

    /// A labelled line lacks its label (strict mode only)
    #[error("line {line} does not start with {expected:?}")]
    MissingPrefix { line: usize, expected: &'static str },

    /// The document could not be read from storage
    #[error("document unavailable: {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
