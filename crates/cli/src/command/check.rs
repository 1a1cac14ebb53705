//! Library health summary. Building the whole forest is the check; the
//! counts are what a healthy build looks like.

use folio_library::{Library, LibraryPaths};
use folio_protocol::{ErrorEnvelope, Status};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct RootReport {
    pub label: String,
    pub location: PathBuf,
    /// Folders under the root, the root itself excluded.
    pub folders: usize,
    pub documents: usize,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub status: Status,
    pub library: PathBuf,
    pub roots: Vec<RootReport>,
    pub folder_total: usize,
    pub document_total: usize,
}

pub fn run(library_root: &Path) -> Result<CheckReport, ErrorEnvelope> {
    let paths =
        LibraryPaths::discover(library_root).map_err(|err| super::classify_library_error(&err))?;
    let library = Library::open(&paths).map_err(|err| super::classify_library_error(&err))?;

    let roots = library
        .roots()
        .iter()
        .map(|&root| {
            let walk = library.walk(root);
            let folder = library.folder(root);
            RootReport {
                label: folder.title.clone(),
                location: folder.location.clone(),
                folders: walk.folders.len() - 1,
                documents: walk.documents.len(),
            }
        })
        .collect();

    Ok(CheckReport {
        status: Status::Ok,
        library: library_root.to_path_buf(),
        roots,
        folder_total: library.folder_count() - library.roots().len(),
        document_total: library.document_total(),
    })
}
