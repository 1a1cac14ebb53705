use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// The on-disk layout breaks the library convention (missing root,
    /// folder directory without metadata, unparseable metadata).
    #[error("malformed library at {}: {reason}", .path.display())]
    MalformedLibrary { path: PathBuf, reason: String },

    #[error("unreadable document at {}: {source}", .path.display())]
    UnreadableDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recursion re-entered a directory already on the build stack, or
    /// nesting blew past the depth bound. Either way the tree cannot be
    /// finite and the build stops.
    #[error("refusing to recurse into {}: directory cycle or runaway nesting", .path.display())]
    CycleDetected { path: PathBuf },

    #[error("folder not found: {}", .location.display())]
    NotFound { location: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
