use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Library(#[from] folio_library::LibraryError),

    /// The external content index could not answer. Deliberately distinct
    /// from an empty match set.
    #[error("content search unavailable: {reason}")]
    ContentSearchUnavailable { reason: String },
}
