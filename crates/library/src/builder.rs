use crate::error::{LibraryError, Result};
use crate::node::{Document, DocumentId, Folder, FolderId, Library};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory suffix marking a folder node.
pub const FOLDER_SUFFIX: &str = "-folio";
/// Directory suffix marking a document package.
pub const DOCUMENT_SUFFIX: &str = ".note";
/// Metadata record inside every folder directory.
pub const INFO_FILE: &str = "Info.folio";
/// Text payload inside every document package.
pub const TEXT_FILE: &str = "Text.txt";
/// Well-known primary root directory under the library root.
pub const PRIMARY_ROOT_DIR: &str = "Folios-folio";
/// Well-known unfiled root directory; absent in fresh libraries.
pub const INBOX_ROOT_DIR: &str = "Inbox-folio";
/// Title given to documents whose text has no non-blank line.
pub const UNTITLED: &str = "(untitled)";

const MAX_DEPTH: usize = 128;

/// Root directories of one library forest.
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    pub primary: PathBuf,
    pub inbox: Option<PathBuf>,
}

impl LibraryPaths {
    /// Locates the well-known roots under `root`. The primary tree is
    /// required; the inbox is picked up only when present.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let primary = root.join(PRIMARY_ROOT_DIR);
        if !primary.is_dir() {
            return Err(LibraryError::MalformedLibrary {
                path: primary,
                reason: format!("primary root directory `{PRIMARY_ROOT_DIR}` is missing"),
            });
        }
        let inbox = root.join(INBOX_ROOT_DIR);
        let inbox = inbox.is_dir().then_some(inbox);
        Ok(Self { primary, inbox })
    }
}

impl Library {
    /// Builds the forest in one pass. Any convention violation aborts the
    /// whole build; a partially built forest is never returned.
    pub fn open(paths: &LibraryPaths) -> Result<Self> {
        let mut builder = TreeBuilder::default();
        let mut roots = vec![builder.build_root(&paths.primary, None)?];
        if let Some(inbox) = &paths.inbox {
            roots.push(builder.build_root(inbox, None)?);
        }
        let library = Library {
            roots,
            folders: builder.folders,
            documents: builder.documents,
        };
        log::info!(
            "built forest: {} roots, {} folders, {} documents",
            library.roots().len(),
            library.folder_count(),
            library.document_total()
        );
        Ok(library)
    }

    /// [`LibraryPaths::discover`] followed by [`Library::open`].
    pub fn open_at(root: impl AsRef<Path>) -> Result<Self> {
        Self::open(&LibraryPaths::discover(root)?)
    }
}

#[derive(Deserialize)]
struct FolderInfo {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Default)]
struct TreeBuilder {
    folders: Vec<Folder>,
    documents: Vec<Document>,
    /// Canonical paths of directories currently being built, root to leaf.
    open_dirs: Vec<PathBuf>,
}

impl TreeBuilder {
    fn build_root(&mut self, dir: &Path, parent: Option<FolderId>) -> Result<FolderId> {
        if !entry_name(dir).ends_with(FOLDER_SUFFIX) {
            return Err(LibraryError::MalformedLibrary {
                path: dir.to_path_buf(),
                reason: format!("folder directory name must end with `{FOLDER_SUFFIX}`"),
            });
        }

        let canonical = dir.canonicalize()?;
        if self.open_dirs.contains(&canonical) || self.open_dirs.len() >= MAX_DEPTH {
            return Err(LibraryError::CycleDetected {
                path: dir.to_path_buf(),
            });
        }

        self.open_dirs.push(canonical);
        let built = self.build_folder(dir, parent);
        self.open_dirs.pop();
        built
    }

    fn build_folder(&mut self, dir: &Path, parent: Option<FolderId>) -> Result<FolderId> {
        let info_path = dir.join(INFO_FILE);
        let title = read_display_name(&info_path)?;

        let id = FolderId(self.folders.len());
        self.folders.push(Folder {
            location: dir.to_path_buf(),
            parent,
            title,
            info_path,
            folders: Vec::new(),
            documents: Vec::new(),
        });

        let (document_dirs, folder_dirs) = partition_entries(dir)?;

        for doc_dir in document_dirs {
            let doc_id = self.build_document(&doc_dir, id)?;
            self.folders[id.0].documents.push(doc_id);
        }
        for sub_dir in folder_dirs {
            let child = self.build_root(&sub_dir, Some(id))?;
            self.folders[id.0].folders.push(child);
        }

        Ok(id)
    }

    fn build_document(&mut self, dir: &Path, parent: FolderId) -> Result<DocumentId> {
        let text_path = dir.join(TEXT_FILE);
        let raw = fs::read(&text_path).map_err(|source| LibraryError::UnreadableDocument {
            path: text_path.clone(),
            source,
        })?;

        let text = String::from_utf8_lossy(&raw);
        let title = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map_or_else(|| UNTITLED.to_owned(), str::to_owned);

        let id = DocumentId(self.documents.len());
        self.documents.push(Document {
            location: dir.to_path_buf(),
            parent,
            title,
        });
        Ok(id)
    }
}

/// Splits a folder directory's entries into document and sub-folder
/// directories, each sorted by file name so traversal order does not depend
/// on filesystem enumeration order. Everything else is skipped.
fn partition_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut documents = Vec::new();
    let mut folders = Vec::new();
    for (name, path) in entries {
        if !path.is_dir() {
            continue;
        }
        if name.ends_with(DOCUMENT_SUFFIX) {
            documents.push(path);
        } else if name.ends_with(FOLDER_SUFFIX) {
            folders.push(path);
        } else {
            log::debug!("ignoring non-conforming entry {}", path.display());
        }
    }
    Ok((documents, folders))
}

fn read_display_name(info_path: &Path) -> Result<String> {
    let raw = fs::read(info_path).map_err(|err| LibraryError::MalformedLibrary {
        path: info_path.to_path_buf(),
        reason: format!("cannot read metadata: {err}"),
    })?;
    let info: FolderInfo =
        serde_json::from_slice(&raw).map_err(|err| LibraryError::MalformedLibrary {
            path: info_path.to_path_buf(),
            reason: format!("cannot parse metadata: {err}"),
        })?;
    Ok(info.display_name)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
