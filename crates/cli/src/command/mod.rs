//! Subcommand bodies and the error-to-wire-code mapping.

pub mod check;
pub mod query;
pub mod view;

use folio_library::LibraryError;
use folio_protocol::ErrorEnvelope;
use folio_search::SearchError;

/// Maps a search-layer failure to its stable wire code.
pub fn classify_error(err: &SearchError) -> ErrorEnvelope {
    match err {
        SearchError::Library(inner) => classify_library_error(inner),
        SearchError::ContentSearchUnavailable { .. } => ErrorEnvelope {
            code: "content_search_unavailable".to_owned(),
            message: err.to_string(),
            hint: Some(
                "an unreachable index is distinct from zero matches; check the mdfind \
                 binary or the FOLIO_FINDER_MDFIND override"
                    .to_owned(),
            ),
        },
    }
}

pub fn classify_library_error(err: &LibraryError) -> ErrorEnvelope {
    let code = match err {
        LibraryError::MalformedLibrary { .. } => "malformed_library",
        LibraryError::UnreadableDocument { .. } => "unreadable_document",
        LibraryError::CycleDetected { .. } => "cycle_detected",
        LibraryError::NotFound { .. } => "not_found",
        LibraryError::Io(_) => "io",
    };
    let hint = match err {
        LibraryError::MalformedLibrary { .. } => {
            Some("every folder directory needs an Info.folio with a displayName".to_owned())
        }
        _ => None,
    };
    ErrorEnvelope {
        code: code.to_owned(),
        message: err.to_string(),
        hint,
    }
}

pub fn invalid_request(message: String, hint: Option<String>) -> ErrorEnvelope {
    ErrorEnvelope {
        code: "invalid_request".to_owned(),
        message,
        hint,
    }
}
