use crate::error::{Result, SearchError};
use crate::scope::Candidates;
use async_trait::async_trait;
use folio_library::{Library, DOCUMENT_SUFFIX, FOLDER_SUFFIX, INFO_FILE};
use folio_protocol::Kind;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;

/// Env var naming an alternative content-search executable.
pub const MDFIND_ENV: &str = "FOLIO_FINDER_MDFIND";

const DEFAULT_BINARY: &str = "mdfind";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// External full-text index consulted in content mode. Implementations
/// return node addresses, not raw file paths; see [`SpotlightIndex`] for
/// the normalization rules.
#[async_trait]
pub trait ContentIndex {
    async fn matching_paths(&self, query: &str, kind: Kind) -> Result<HashSet<PathBuf>>;
}

/// Shells out to the desktop metadata index (`mdfind`), one invocation per
/// query, scoped to the library roots.
pub struct SpotlightIndex {
    binary: PathBuf,
    roots: Vec<PathBuf>,
    timeout: Duration,
}

impl SpotlightIndex {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let binary = std::env::var_os(MDFIND_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY));
        Self {
            binary,
            roots,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn unavailable(&self, reason: String) -> SearchError {
        SearchError::ContentSearchUnavailable { reason }
    }
}

#[async_trait]
impl ContentIndex for SpotlightIndex {
    async fn matching_paths(&self, query: &str, kind: Kind) -> Result<HashSet<PathBuf>> {
        let mut command = tokio::process::Command::new(&self.binary);
        for root in &self.roots {
            command.arg("-onlyin").arg(root);
        }
        command.arg(query);
        command.stdin(std::process::Stdio::null());
        command.kill_on_drop(true);
        log::debug!("content search: {} {:?}", self.binary.display(), query);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                self.unavailable(format!(
                    "{} timed out after {:?}",
                    self.binary.display(),
                    self.timeout
                ))
            })?
            .map_err(|err| {
                self.unavailable(format!("cannot run {}: {err}", self.binary.display()))
            })?;

        if !output.status.success() {
            return Err(self.unavailable(format!(
                "{} exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let paths: HashSet<PathBuf> = stdout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .filter_map(|line| normalize_hit(Path::new(line), kind))
            .collect();
        log::debug!("content search matched {} node addresses", paths.len());
        Ok(paths)
    }
}

/// Maps a raw index hit to the node address it belongs to: any path inside
/// a document package becomes the package directory, any other path inside
/// a folder becomes that folder's metadata record. Hits of kinds the query
/// did not ask for are dropped.
fn normalize_hit(path: &Path, kind: Kind) -> Option<PathBuf> {
    for dir in path.ancestors() {
        let Some(name) = dir.file_name() else {
            continue;
        };
        let name = name.to_string_lossy();
        if name.ends_with(DOCUMENT_SUFFIX) {
            return kind.wants_documents().then(|| dir.to_path_buf());
        }
        if name.ends_with(FOLDER_SUFFIX) {
            return kind.wants_folders().then(|| dir.join(INFO_FILE));
        }
    }
    None
}

/// Keeps only candidates whose node address appears in `paths`. The
/// incoming order survives; the external index's relevance order does not
/// participate.
pub fn filter_by_content(
    library: &Library,
    candidates: Candidates,
    paths: &HashSet<PathBuf>,
) -> Candidates {
    Candidates {
        folders: candidates
            .folders
            .into_iter()
            .filter(|&id| paths.contains(&library.folder(id).info_path))
            .collect(),
        documents: candidates
            .documents
            .into_iter()
            .filter(|&id| paths.contains(&library.document(id).location))
            .collect(),
    }
}
