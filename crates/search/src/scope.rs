use folio_library::{DocumentId, FolderId, Library, NodeRef};
use folio_protocol::Kind;
use std::path::Path;

/// Candidate nodes for one query. Folders come before documents, each group
/// in traversal order; downstream stages (content filter, ranking) must keep
/// this relative order unless ranking reorders it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Candidates {
    pub folders: Vec<FolderId>,
    pub documents: Vec<DocumentId>,
}

impl Candidates {
    pub fn nodes(&self) -> Vec<NodeRef> {
        self.folders
            .iter()
            .copied()
            .map(NodeRef::Folder)
            .chain(self.documents.iter().copied().map(NodeRef::Document))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.folders.len() + self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.documents.is_empty()
    }
}

/// Selects the candidate set for a query.
///
/// Without a scope this is every node under every root, in root order; the
/// synthetic root folders themselves are never candidates. With a scope it
/// is the direct children of the scoped folder, one level only. A scope that
/// no longer resolves (the folder moved after the host cached its path) is a
/// benign race and yields an empty set, not an error.
pub fn resolve_scope(library: &Library, scope: Option<&Path>, kind: Kind) -> Candidates {
    let mut candidates = Candidates::default();

    match scope {
        None => {
            for &root in library.roots() {
                let walk = library.walk(root);
                candidates.folders.extend(walk.folders.into_iter().skip(1));
                candidates.documents.extend(walk.documents);
            }
        }
        Some(path) => match library.find_folder_anywhere(path) {
            Ok(id) => {
                let folder = library.folder(id);
                candidates.folders.extend(folder.folders.iter().copied());
                candidates.documents.extend(folder.documents.iter().copied());
            }
            Err(_) => {
                log::debug!(
                    "scope {} is not in the current tree, returning nothing",
                    path.display()
                );
            }
        },
    }

    if !kind.wants_folders() {
        candidates.folders.clear();
    }
    if !kind.wants_documents() {
        candidates.documents.clear();
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn folder(parent: &Path, stem: &str, label: &str) -> PathBuf {
        let dir = parent.join(format!("{stem}-folio"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("Info.folio"),
            format!(r#"{{"displayName":"{label}"}}"#),
        )
        .unwrap();
        dir
    }

    fn document(parent: &Path, stem: &str, text: &str) -> PathBuf {
        let dir = parent.join(format!("{stem}.note"));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Text.txt"), text).unwrap();
        dir
    }

    /// Main { Alpha { doc1, Gamma {} }, Beta {} }, Inbox { inbox-doc }
    fn seed(root: &Path) -> (PathBuf, PathBuf) {
        let primary = folder(root, "Folios", "Main");
        let alpha = folder(&primary, "Alpha", "Alpha");
        document(&alpha, "doc1", "Hello world\n");
        folder(&alpha, "Gamma", "Gamma");
        folder(&primary, "Beta", "Beta");
        let inbox = folder(root, "Inbox", "Inbox");
        document(&inbox, "loose", "Loose note\n");
        (primary, alpha)
    }

    fn titles(library: &Library, candidates: &Candidates) -> Vec<String> {
        candidates
            .nodes()
            .into_iter()
            .map(|node| library.title(node).to_owned())
            .collect()
    }

    #[test]
    fn unscoped_covers_the_forest_without_roots() {
        let temp = tempdir().unwrap();
        seed(temp.path());
        let library = Library::open_at(temp.path()).unwrap();

        let candidates = resolve_scope(&library, None, Kind::All);
        assert_eq!(
            titles(&library, &candidates),
            vec!["Alpha", "Gamma", "Beta", "Hello world", "Loose note"]
        );
    }

    #[test]
    fn scoped_returns_direct_children_only() {
        let temp = tempdir().unwrap();
        let (_, alpha) = seed(temp.path());
        let library = Library::open_at(temp.path()).unwrap();

        let candidates = resolve_scope(&library, Some(&alpha), Kind::All);
        assert_eq!(
            titles(&library, &candidates),
            vec!["Gamma", "Hello world"]
        );
    }

    #[test]
    fn scoped_to_root_lists_top_level() {
        let temp = tempdir().unwrap();
        let (primary, _) = seed(temp.path());
        let library = Library::open_at(temp.path()).unwrap();

        let candidates = resolve_scope(&library, Some(&primary), Kind::Folder);
        assert_eq!(titles(&library, &candidates), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn kind_filter_applies() {
        let temp = tempdir().unwrap();
        let (_, alpha) = seed(temp.path());
        let library = Library::open_at(temp.path()).unwrap();

        let folders_only = resolve_scope(&library, Some(&alpha), Kind::Folder);
        assert_eq!(titles(&library, &folders_only), vec!["Gamma"]);

        let documents_only = resolve_scope(&library, Some(&alpha), Kind::Document);
        assert_eq!(titles(&library, &documents_only), vec!["Hello world"]);
    }

    #[test]
    fn stale_scope_is_empty_not_an_error() {
        let temp = tempdir().unwrap();
        seed(temp.path());
        let library = Library::open_at(temp.path()).unwrap();

        let elsewhere = temp.path().join("Elsewhere-folio");
        let candidates = resolve_scope(&library, Some(&elsewhere), Kind::All);
        assert!(candidates.is_empty());
    }
}
