use folio_library::{Library, LibraryError, LibraryPaths, NodeRef};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn folder(parent: &Path, stem: &str, label: &str) -> PathBuf {
    let dir = parent.join(format!("{stem}-folio"));
    std::fs::create_dir_all(&dir).expect("create folder dir");
    std::fs::write(
        dir.join("Info.folio"),
        format!(r#"{{"displayName":"{label}"}}"#),
    )
    .expect("write metadata");
    dir
}

fn document(parent: &Path, stem: &str, text: &str) -> PathBuf {
    let dir = parent.join(format!("{stem}.note"));
    std::fs::create_dir_all(&dir).expect("create document dir");
    std::fs::write(dir.join("Text.txt"), text).expect("write text");
    dir
}

/// Main { Alpha { doc1 "Hello world" }, Beta {} }
fn seed_small_library(root: &Path) -> (PathBuf, PathBuf) {
    let primary = folder(root, "Folios", "Main");
    let alpha = folder(&primary, "Alpha", "Alpha");
    document(&alpha, "doc1", "Hello world\n");
    folder(&primary, "Beta", "Beta");
    (primary, alpha)
}

#[test]
fn walk_visits_every_conforming_directory_once() {
    let temp = TempDir::new().expect("tempdir");
    seed_small_library(temp.path());

    let library = Library::open_at(temp.path()).expect("open library");
    let walk = library.walk(library.primary_root());

    let folder_titles: Vec<&str> = walk
        .folders
        .iter()
        .map(|&id| library.folder(id).title.as_str())
        .collect();
    assert_eq!(folder_titles, vec!["Main", "Alpha", "Beta"]);
    assert_eq!(walk.folders[0], library.primary_root());

    let doc_titles: Vec<&str> = walk
        .documents
        .iter()
        .map(|&id| library.document(id).title.as_str())
        .collect();
    assert_eq!(doc_titles, vec!["Hello world"]);

    let mut locations: Vec<&Path> = walk
        .folders
        .iter()
        .map(|&id| library.folder(id).location.as_path())
        .chain(
            walk.documents
                .iter()
                .map(|&id| library.document(id).location.as_path()),
        )
        .collect();
    let before = locations.len();
    locations.sort();
    locations.dedup();
    assert_eq!(locations.len(), before, "locations must be unique");
}

#[test]
fn find_folder_round_trips_locations() {
    let temp = TempDir::new().expect("tempdir");
    let (_, alpha) = seed_small_library(temp.path());

    let library = Library::open_at(temp.path()).expect("open library");
    let found = library
        .find_folder(library.primary_root(), &alpha)
        .expect("find Alpha");
    assert_eq!(library.folder(found).title, "Alpha");

    let err = library
        .find_folder(library.primary_root(), Path::new("/nowhere-folio"))
        .unwrap_err();
    assert!(matches!(err, LibraryError::NotFound { .. }));
}

#[test]
fn ancestors_and_counts_reflect_the_tree() {
    let temp = TempDir::new().expect("tempdir");
    let (_, alpha) = seed_small_library(temp.path());
    document(&alpha, "doc2", "Second\n");

    let library = Library::open_at(temp.path()).expect("open library");
    let root = library.primary_root();
    let alpha_id = library.find_folder(root, &alpha).expect("find Alpha");

    assert_eq!(library.ancestors(NodeRef::Folder(alpha_id)), vec![root]);
    assert_eq!(library.document_count(root), 2);
    assert_eq!(library.document_count(alpha_id), 2);

    let doc = library.walk(alpha_id).documents[0];
    assert_eq!(
        library.ancestors(NodeRef::Document(doc)),
        vec![root, alpha_id]
    );
}

#[test]
fn corrupt_folder_aborts_the_whole_build() {
    let temp = TempDir::new().expect("tempdir");
    let (primary, _) = seed_small_library(temp.path());
    std::fs::create_dir(primary.join("Rotten-folio")).expect("create bare folder");

    let err = Library::open_at(temp.path()).unwrap_err();
    assert!(matches!(err, LibraryError::MalformedLibrary { .. }));
}

#[test]
fn discover_reports_both_roots() {
    let temp = TempDir::new().expect("tempdir");
    seed_small_library(temp.path());

    let paths = LibraryPaths::discover(temp.path()).expect("discover");
    assert!(paths.inbox.is_none());

    let inbox = folder(temp.path(), "Inbox", "Inbox");
    let paths = LibraryPaths::discover(temp.path()).expect("discover with inbox");
    assert_eq!(paths.inbox.as_deref(), Some(inbox.as_path()));

    let library = Library::open(&paths).expect("open forest");
    assert_eq!(library.roots().len(), 2);
    assert_eq!(library.primary_label(), "Main");
}
