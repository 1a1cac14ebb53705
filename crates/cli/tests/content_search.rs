#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn folder(parent: &Path, stem: &str, label: &str) -> PathBuf {
    let dir = parent.join(format!("{stem}-folio"));
    fs::create_dir_all(&dir).expect("folder dir");
    fs::write(
        dir.join("Info.folio"),
        format!("{{\"displayName\": \"{label}\"}}"),
    )
    .expect("info file");
    dir
}

fn document(parent: &Path, stem: &str, first_line: &str) -> PathBuf {
    let dir = parent.join(format!("{stem}.note"));
    fs::create_dir_all(&dir).expect("document dir");
    fs::write(dir.join("Text.txt"), format!("{first_line}\n")).expect("text file");
    dir
}

fn seed_library() -> tempfile::TempDir {
    let temp = tempdir().expect("tempdir");
    let main = folder(temp.path(), "Folios", "Main");
    folder(&main, "Personal", "Personal");
    let work = folder(&main, "Work", "Work");
    document(&work, "Budget", "Quarterly budget");
    folder(&work, "Notes", "Notes");
    temp
}

fn stub_index(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join("mdfind-stub.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("stub script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod stub");
    path
}

fn run_content_query(library: &Path, stub: &Path, args: &[&str]) -> (bool, Value) {
    let output = cargo_bin_cmd!("folio-finder")
        .env("FOLIO_FINDER_LIBRARY", library)
        .env("FOLIO_FINDER_MDFIND", stub)
        .arg("query")
        .args(args)
        .output()
        .expect("query run");

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

#[test]
fn content_mode_keeps_only_index_hits() {
    let temp = seed_library();
    let hit = temp.path().join("Folios-folio/Work-folio/Budget.note/Text.txt");
    let stub = stub_index(temp.path(), &format!("echo \"{}\"", hit.display()));

    let (ok, resp) = run_content_query(temp.path(), &stub, &["budget", "--content"]);

    assert!(ok, "expected ok, got {resp}");
    let items = resp["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "document");
    assert_eq!(items[0]["title"], "   Quarterly budget");
}

#[test]
fn follow_up_requests_carry_the_content_query() {
    let temp = seed_library();
    let hit = temp.path().join("Folios-folio/Work-folio/Budget.note/Text.txt");
    let stub = stub_index(temp.path(), &format!("echo \"{}\"", hit.display()));

    let (_, resp) = run_content_query(temp.path(), &stub, &["budget", "--content"]);
    let up = &resp["items"][0]["actions"][0];

    assert_eq!(up["action"], "drill_up");
    assert_eq!(up["request"]["search_content"], true);
    assert_eq!(up["request"]["query"], "budget");
}

#[test]
fn hits_normalize_to_the_owning_node_per_kind() {
    let temp = seed_library();
    let doc_hit = temp.path().join("Folios-folio/Work-folio/Budget.note/Text.txt");
    let folder_hit = temp.path().join("Folios-folio/Work-folio/Info.folio");
    let stub = stub_index(
        temp.path(),
        &format!("echo \"{}\"\necho \"{}\"", doc_hit.display(), folder_hit.display()),
    );

    let (_, folders_only) =
        run_content_query(temp.path(), &stub, &["x", "--content", "--kind", "folder"]);
    let titles: Vec<&str> = folders_only["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["▸ Work"]);

    let (_, both) = run_content_query(temp.path(), &stub, &["x", "--content"]);
    let titles: Vec<&str> = both["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["▸ Work", "   Quarterly budget"]);
}

#[test]
fn failing_index_is_unavailable_not_empty() {
    let temp = seed_library();
    let stub = stub_index(temp.path(), "exit 1");

    let (ok, resp) = run_content_query(temp.path(), &stub, &["budget", "--content"]);

    assert!(!ok, "expected non-zero exit, got {resp}");
    assert_eq!(resp["status"], "error");
    assert_eq!(resp["error"]["code"], "content_search_unavailable");
}

#[test]
fn missing_index_binary_is_unavailable() {
    let temp = seed_library();

    let (ok, resp) = run_content_query(
        temp.path(),
        Path::new("/nonexistent/mdfind"),
        &["budget", "--content"],
    );

    assert!(!ok, "expected non-zero exit, got {resp}");
    assert_eq!(resp["error"]["code"], "content_search_unavailable");
}

#[test]
fn blank_content_query_skips_the_index_entirely() {
    let temp = seed_library();
    // Would fail the query if it were ever invoked.
    let stub = stub_index(temp.path(), "exit 1");

    let (ok, resp) = run_content_query(temp.path(), &stub, &["--content"]);

    assert!(ok, "expected ok, got {resp}");
    assert_eq!(resp["items"].as_array().expect("items array").len(), 4);
}
