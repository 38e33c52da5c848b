use std::io;
use std::path::PathBuf;

/// Failure of the filesystem-statistics query.
///
/// The OS error is kept unchanged so callers can inspect the errno.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("statvfs {}: {source}", path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::Query { path, .. } => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Error::Query { source, .. } => source.kind(),
        }
    }

    /// The raw errno reported by the OS, when there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Error::Query { source, .. } => source.raw_os_error(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
