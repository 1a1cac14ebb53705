use crate::error::{LibraryError, Result};
use crate::node::{DocumentId, FolderId, Library, NodeRef};
use std::path::Path;

/// Every node under one root in traversal order.
#[derive(Debug, Default)]
pub struct Walk {
    /// Depth-first pre-order; `folders[0]` is the walked root.
    pub folders: Vec<FolderId>,
    /// A folder's direct documents precede the documents of its sub-trees.
    pub documents: Vec<DocumentId>,
}

impl Library {
    /// Visits the subtree under `root` with an explicit stack, so the walk
    /// depth is bounded by the heap and not the call stack. Pure; repeated
    /// walks of the same root yield identical output.
    pub fn walk(&self, root: FolderId) -> Walk {
        let mut walk = Walk::default();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            walk.folders.push(id);
            let folder = self.folder(id);
            walk.documents.extend(folder.documents.iter().copied());
            for &child in folder.folders.iter().rev() {
                stack.push(child);
            }
        }
        walk
    }

    /// First folder in walk order under `root` whose location matches.
    pub fn find_folder(&self, root: FolderId, location: &Path) -> Result<FolderId> {
        self.walk(root)
            .folders
            .into_iter()
            .find(|&id| self.folder(id).location == location)
            .ok_or_else(|| LibraryError::NotFound {
                location: location.to_path_buf(),
            })
    }

    /// Like [`Library::find_folder`], checking every root in forest order.
    pub fn find_folder_anywhere(&self, location: &Path) -> Result<FolderId> {
        for &root in self.roots() {
            if let Ok(id) = self.find_folder(root, location) {
                return Ok(id);
            }
        }
        Err(LibraryError::NotFound {
            location: location.to_path_buf(),
        })
    }

    /// Containing folders of `node`, root first. The node itself is not in
    /// the chain, so a document's last ancestor is its parent folder and a
    /// root folder's chain is empty.
    pub fn ancestors(&self, node: NodeRef) -> Vec<FolderId> {
        let mut chain = Vec::new();
        let mut cursor = self.parent_of(node);
        while let Some(id) = cursor {
            chain.push(id);
            cursor = self.folder(id).parent;
        }
        chain.reverse();
        chain
    }

    /// Documents in the whole subtree under `folder`, the folder's own
    /// included. Display metadata only.
    pub fn document_count(&self, folder: FolderId) -> usize {
        self.walk(folder).documents.len()
    }
}
