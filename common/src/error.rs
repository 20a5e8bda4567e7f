use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::DocId;

/// Errors raised while reading or writing index files and page directories.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a crawler-produced directory (no {} marker)", .dir.display(), crate::pagedir::COMPLETION_MARKER)]
    MissingCompletionMarker { dir: PathBuf },

    #[error("malformed index file at line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    #[error("malformed page record {doc_id}: {reason}")]
    MalformedPage { doc_id: DocId, reason: String },

    #[error("page record {doc_id} is missing from {}", .dir.display())]
    MissingPage {
        doc_id: DocId,
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn malformed_index(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedIndex { line, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_index_mentions_line() {
        let err = Error::malformed_index(7, "odd number of tokens");
        assert_eq!(err.to_string(), "malformed index file at line 7: odd number of tokens");
    }

    #[test]
    fn missing_marker_names_the_marker() {
        let err = Error::MissingCompletionMarker { dir: PathBuf::from("pages") };
        assert!(err.to_string().contains(".crawler"));
    }
}
