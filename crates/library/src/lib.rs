//! # Folio Library
//!
//! Builds an in-memory forest from an on-disk document library and answers
//! structural questions about it.
//!
//! ## Pipeline
//!
//! ```text
//! Library root
//!     │
//!     ├──> Root discovery (Folios-folio required, Inbox-folio optional)
//!     │      └─> LibraryPaths
//!     │
//!     ├──> Tree builder (suffix convention, cycle guard)
//!     │      └─> Library arena (folders + documents)
//!     │
//!     └──> Walks (pre-order, lookups, ancestor chains, counts)
//! ```
//!
//! The forest is rebuilt from disk on every invocation and never mutated
//! afterwards. Corruption aborts the build with a typed error instead of
//! producing a partial tree.
//!
//! ## Example
//!
//! ```no_run
//! use folio_library::Library;
//!
//! fn main() -> folio_library::Result<()> {
//!     let library = Library::open_at("/home/me/Folio/Library")?;
//!     let walk = library.walk(library.primary_root());
//!     println!("{} folders, {} documents", walk.folders.len(), walk.documents.len());
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod node;
mod walk;

pub use builder::{
    LibraryPaths, DOCUMENT_SUFFIX, FOLDER_SUFFIX, INBOX_ROOT_DIR, INFO_FILE, PRIMARY_ROOT_DIR,
    TEXT_FILE, UNTITLED,
};
pub use error::{LibraryError, Result};
pub use node::{Document, DocumentId, Folder, FolderId, Library, NodeKind, NodeRef};
pub use walk::Walk;
