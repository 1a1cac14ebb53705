use folio_library::{Library, NodeRef};
use folio_protocol::{Kind, QueryRequest};
use std::path::PathBuf;

/// Removes exactly one leading occurrence of the synthetic root label.
/// A list that does not start with the label passes through unchanged, so
/// stripping an already stripped list is a no-op.
pub fn strip_root_label<'t, 's>(titles: &'t [&'s str], label: &str) -> &'t [&'s str] {
    match titles.first() {
        Some(&first) if first == label => &titles[1..],
        _ => titles,
    }
}

/// The stripped display breadcrumb of a node: ancestor titles plus its own,
/// joined with `/`. Empty for a primary root.
pub fn breadcrumb(library: &Library, node: NodeRef, root_label: &str) -> String {
    let ancestors = library.ancestors(node);
    let mut titles: Vec<&str> = ancestors
        .iter()
        .map(|&id| library.folder(id).title.as_str())
        .collect();
    titles.push(library.title(node));
    strip_root_label(&titles, root_label).join("/")
}

/// Per-query inputs that shape navigation affordances.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub kind: Kind,
    /// Set when content mode is active; carried into follow-up requests so
    /// drill navigation stays content-filtered.
    pub content_query: Option<String>,
    /// Synthetic top label stripped from every user-facing path.
    pub root_label: String,
}

impl QueryContext {
    /// The follow-up request a host replays when it takes a navigation
    /// action landing on `scope`.
    fn follow_up(&self, scope: PathBuf) -> QueryRequest {
        QueryRequest {
            kind: self.kind,
            query: self.content_query.clone(),
            scope_path: Some(scope),
            search_content: self.content_query.is_some(),
            search_full_path: false,
        }
    }
}

/// Where "up" leads from a node. The immediate parent is the implicit
/// current context, so the target is the grandparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentTarget {
    Folder {
        /// Stripped breadcrumb of the target; empty when it is a root.
        display: String,
        request: QueryRequest,
    },
    AtTopLevel,
}

/// Whether a folder can be drilled into under the active kind filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildTarget {
    Reachable { request: QueryRequest },
    NoSubFolders,
    NoDocuments,
    Empty,
}

/// Everything the presentation layer needs to render one node's row.
#[derive(Debug, Clone)]
pub struct Navigation {
    /// Ancestor titles after root-label stripping.
    pub display_path: Vec<String>,
    /// `display_path` plus the node's own title, slash-joined.
    pub breadcrumb: String,
    pub parent: ParentTarget,
    /// `None` for documents.
    pub child: Option<ChildTarget>,
    /// Recursive subtree count, folders only. Display metadata, never an
    /// input to filtering or ranking.
    pub document_count: Option<usize>,
}

pub fn describe(library: &Library, node: NodeRef, ctx: &QueryContext) -> Navigation {
    let ancestors = library.ancestors(node);
    let ancestor_titles: Vec<&str> = ancestors
        .iter()
        .map(|&id| library.folder(id).title.as_str())
        .collect();
    let display_path: Vec<String> = strip_root_label(&ancestor_titles, &ctx.root_label)
        .iter()
        .map(|title| (*title).to_owned())
        .collect();

    let parent = if ancestors.len() >= 2 {
        let grandparent = ancestors[ancestors.len() - 2];
        ParentTarget::Folder {
            display: breadcrumb(library, NodeRef::Folder(grandparent), &ctx.root_label),
            request: ctx.follow_up(library.folder(grandparent).location.clone()),
        }
    } else {
        ParentTarget::AtTopLevel
    };

    let (child, document_count) = match node {
        NodeRef::Folder(id) => {
            let folder = library.folder(id);
            let reachable = match ctx.kind {
                Kind::Folder => !folder.folders.is_empty(),
                Kind::Document => !folder.documents.is_empty(),
                Kind::All => !folder.folders.is_empty() || !folder.documents.is_empty(),
            };
            let target = if reachable {
                ChildTarget::Reachable {
                    request: ctx.follow_up(folder.location.clone()),
                }
            } else {
                match ctx.kind {
                    Kind::Folder => ChildTarget::NoSubFolders,
                    Kind::Document => ChildTarget::NoDocuments,
                    Kind::All => ChildTarget::Empty,
                }
            };
            (Some(target), Some(library.document_count(id)))
        }
        NodeRef::Document(_) => (None, None),
    };

    Navigation {
        display_path,
        breadcrumb: breadcrumb(library, node, &ctx.root_label),
        parent,
        child,
        document_count,
    }
}
