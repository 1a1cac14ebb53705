//! # Folio Search
//!
//! Query answering over a built library forest: candidate selection,
//! optional content filtering through an external index, subsequence fuzzy
//! ranking, and per-node navigation affordances.
//!
//! ## Pipeline
//!
//! ```text
//! Library forest
//!     │
//!     ├──> Scope resolver (whole forest / one folder's children)
//!     │      └─> Candidates
//!     │
//!     ├──> Content filter (mdfind, optional)
//!     │      └─> Candidates ∩ index hits
//!     │
//!     ├──> Fuzzy ranker (title or breadcrumb keys, optional)
//!     │      └─> Ordered nodes
//!     │
//!     └──> Navigation (display path, drill up / drill into)
//! ```
//!
//! Everything here is a pure function of the forest except the content
//! index, which is the one external call and is bounded by a timeout.

mod content;
mod error;
mod fuzzy;
mod navigate;
mod scope;

pub use content::{filter_by_content, ContentIndex, SpotlightIndex, MDFIND_ENV};
pub use error::{Result, SearchError};
pub use fuzzy::{rank, KeyMode};
pub use navigate::{
    breadcrumb, describe, strip_root_label, ChildTarget, Navigation, ParentTarget, QueryContext,
};
pub use scope::{resolve_scope, Candidates};
