//! Wire types for the folio-finder launcher contract.
//!
//! A host launcher invokes the finder with a [`QueryRequest`] (either as
//! discrete flags or as verbatim JSON round-tripped from an earlier item
//! action) and receives a [`ResponseEnvelope`] on stdout: a ranked list of
//! [`Item`]s on success, an [`ErrorEnvelope`] otherwise. These types carry no
//! behavior beyond request validation; everything here is plain serde data.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Which node kinds a query should return.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Folder,
    Document,
    All,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Folder => "folder",
            Kind::Document => "document",
            Kind::All => "all",
        }
    }

    pub const fn wants_folders(self) -> bool {
        matches!(self, Kind::Folder | Kind::All)
    }

    pub const fn wants_documents(self) -> bool {
        matches!(self, Kind::Document | Kind::All)
    }
}

/// A single query run against the library.
///
/// `search_content` and `search_full_path` are mutually exclusive request
/// modes: the first hands `query` to the external content index, the second
/// widens fuzzy matching from titles to full display paths.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub kind: Kind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub search_content: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub search_full_path: bool,
}

impl QueryRequest {
    /// List everything of `kind` with no filtering.
    pub fn list_all(kind: Kind) -> Self {
        Self {
            kind,
            query: None,
            scope_path: None,
            search_content: false,
            search_full_path: false,
        }
    }

    /// Checks the request before any library access: flag conflicts first,
    /// then scope existence on disk. A scope that exists on disk but has
    /// dropped out of the tree since the host cached it is not a validation
    /// failure; it resolves to an empty result set later.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.search_content && self.search_full_path {
            return Err(RequestError::ConflictingModes);
        }
        if let Some(scope) = &self.scope_path {
            if !scope.exists() {
                return Err(RequestError::ScopeMissing(scope.clone()));
            }
        }
        Ok(())
    }

    /// The query string, if it carries any non-blank text.
    pub fn trimmed_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// The content-index query, when content mode is active.
    pub fn content_query(&self) -> Option<&str> {
        if self.search_content {
            self.trimmed_query()
        } else {
            None
        }
    }

    /// The fuzzy-ranking query, when content mode is not active.
    pub fn fuzzy_query(&self) -> Option<&str> {
        if self.search_content {
            None
        } else {
            self.trimmed_query()
        }
    }
}

/// Validation failures surfaced as `invalid_request` before any disk scan.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("search_content and search_full_path are mutually exclusive")]
    ConflictingModes,

    #[error("scope path does not exist: {0}")]
    ScopeMissing(PathBuf),
}

/// Node kind tag on a result item (never `all`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Folder,
    Document,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    File,
}

/// Icon reference for the host to resolve (file icon of the target path).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Icon {
    #[serde(rename = "type")]
    pub kind: IconKind,
    pub path: PathBuf,
}

impl Icon {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: IconKind::File,
            path: path.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    DrillDown,
    DrillUp,
}

/// A navigation affordance attached to an item.
///
/// Enabled actions carry a complete follow-up [`QueryRequest`] the host can
/// feed back verbatim; disabled ones carry only an explanatory title.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
    #[serde(rename = "action")]
    pub kind: ActionKind,
    pub title: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<QueryRequest>,
}

impl Action {
    pub fn enabled(kind: ActionKind, title: impl Into<String>, request: QueryRequest) -> Self {
        Self {
            kind,
            title: title.into(),
            enabled: true,
            request: Some(request),
        }
    }

    pub fn disabled(kind: ActionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            enabled: false,
            request: None,
        }
    }
}

/// One result row for the host to render.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Item {
    /// Node location; unique across the forest, stable for the run.
    pub uid: PathBuf,
    pub kind: ItemKind,
    /// Display title with the kind glyph already applied.
    pub title: String,
    /// Indented slash-joined display path (plus document count for folders).
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    /// What the host should open on selection.
    pub open: PathBuf,
    pub icon: Icon,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Error,
}

/// Machine-readable failure: a stable snake_case `code` plus a human message.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Top-level stdout payload for a query run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: Status,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl ResponseEnvelope {
    pub fn ok(items: Vec<Item>) -> Self {
        Self {
            status: Status::Ok,
            items,
            error: None,
        }
    }

    pub fn error(error: ErrorEnvelope) -> Self {
        Self {
            status: Status::Error,
            items: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, Status::Error)
    }
}

/// Parses a request the host round-tripped from an earlier action.
pub fn parse_request(raw: &str) -> Result<QueryRequest, serde_json::Error> {
    serde_json::from_str(raw)
}
