//! Error taxonomy for copy operations.
//!
//! Every failure is tagged with a kind so callers can distinguish a
//! precondition violation from a refused overwrite or a plain I/O failure.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of copy error, for matching at the boundary and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A structural precondition on the source or destination was violated
    /// (missing source, type mismatch, non-positive chunk size).
    InvalidInput,
    /// The destination exists with different content and the policy or the
    /// user refused to replace it.
    OverwriteRefused,
    /// Derived statistics were queried outside a closed measurement window.
    Usage,
    /// An underlying I/O operation failed.
    Io,
}

/// A copy error with its kind and the path it concerns, if any.
#[derive(Debug)]
pub struct CopyError {
    message: String,
    path: Option<PathBuf>,
    kind: ErrorKind,
    source: Option<io::Error>,
}

impl CopyError {
    /// A violated precondition on the given path.
    pub fn invalid_input(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self {
            message: message.into(),
            path: path.map(Path::to_path_buf),
            kind: ErrorKind::InvalidInput,
            source: None,
        }
    }

    /// The destination exists, differs, and may not be replaced.
    pub fn overwrite_refused(destination: &Path) -> Self {
        Self {
            message: "destination file already exists".to_owned(),
            path: Some(destination.to_path_buf()),
            kind: ErrorKind::OverwriteRefused,
            source: None,
        }
    }

    /// The statistics API was used out of order.
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            kind: ErrorKind::Usage,
            source: None,
        }
    }

    /// An I/O failure, attributed to `path` when one is known.
    pub fn io(source: io::Error, path: Option<&Path>) -> Self {
        Self {
            message: source.to_string(),
            path: path.map(Path::to_path_buf),
            kind: ErrorKind::Io,
            source: Some(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The path this error concerns, if one is known.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// Result type for copy operations.
pub type CopyResult<T> = std::result::Result<T, CopyError>;
