use std::path::Path;
use std::path::PathBuf;

/// Index of a folder in the library arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(pub(crate) usize);

/// Index of a document in the library arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Folder,
    Document,
}

/// Handle to either node type. Everything downstream (scoping, ranking,
/// item assembly) traffics in these instead of borrowing into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Folder(FolderId),
    Document(DocumentId),
}

impl NodeRef {
    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::Folder(_) => NodeKind::Folder,
            NodeRef::Document(_) => NodeKind::Document,
        }
    }
}

/// A container node: a `-folio` directory with its metadata record.
#[derive(Debug)]
pub struct Folder {
    /// Directory path; unique across the forest and stable for the run.
    pub location: PathBuf,
    /// `None` only for forest roots.
    pub parent: Option<FolderId>,
    /// `displayName` from the metadata record, read once at build time.
    pub title: String,
    /// Path of the metadata record; doubles as the openable reference.
    pub info_path: PathBuf,
    /// Direct children, in scan order.
    pub folders: Vec<FolderId>,
    pub documents: Vec<DocumentId>,
}

/// A leaf node: a `.note` directory. Its location is the openable reference.
#[derive(Debug)]
pub struct Document {
    pub location: PathBuf,
    pub parent: FolderId,
    /// First non-blank line of the text file, trimmed.
    pub title: String,
}

/// The whole forest, rebuilt from disk on every invocation and immutable
/// afterwards. Nodes live in index-addressed arenas so parent and child
/// links are plain ids, not references.
#[derive(Debug)]
pub struct Library {
    pub(crate) roots: Vec<FolderId>,
    pub(crate) folders: Vec<Folder>,
    pub(crate) documents: Vec<Document>,
}

impl Library {
    pub fn roots(&self) -> &[FolderId] {
        &self.roots
    }

    /// The required first root. Its title is the synthetic top label that
    /// gets stripped from user-facing paths.
    pub fn primary_root(&self) -> FolderId {
        self.roots[0]
    }

    pub fn primary_label(&self) -> &str {
        &self.folder(self.primary_root()).title
    }

    pub fn folder(&self, id: FolderId) -> &Folder {
        &self.folders[id.0]
    }

    pub fn document(&self, id: DocumentId) -> &Document {
        &self.documents[id.0]
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn document_total(&self) -> usize {
        self.documents.len()
    }

    pub fn title(&self, node: NodeRef) -> &str {
        match node {
            NodeRef::Folder(id) => &self.folder(id).title,
            NodeRef::Document(id) => &self.document(id).title,
        }
    }

    pub fn location(&self, node: NodeRef) -> &Path {
        match node {
            NodeRef::Folder(id) => &self.folder(id).location,
            NodeRef::Document(id) => &self.document(id).location,
        }
    }

    /// What a host opens when the node is actioned: the metadata record for
    /// a folder, the package directory for a document.
    pub fn openable(&self, node: NodeRef) -> &Path {
        match node {
            NodeRef::Folder(id) => &self.folder(id).info_path,
            NodeRef::Document(id) => &self.document(id).location,
        }
    }

    /// Containing folder of `node`; `None` when the node is a forest root.
    pub fn parent_of(&self, node: NodeRef) -> Option<FolderId> {
        match node {
            NodeRef::Folder(id) => self.folder(id).parent,
            NodeRef::Document(id) => Some(self.document(id).parent),
        }
    }
}
