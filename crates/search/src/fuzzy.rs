use crate::navigate::breadcrumb;
use folio_library::{Library, NodeRef};

/// What part of a node a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// The node title alone.
    Name,
    /// The stripped display breadcrumb, ancestor titles included.
    FullPath,
}

/// Match tiers, best first. A tighter tier always outranks a looser one
/// regardless of key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchQuality {
    Prefix,
    Substring,
    Scattered,
}

/// Orders `nodes` against `query`, best match first.
///
/// A node stays in the result only if the query is a case-insensitive
/// subsequence of its key. Among matches the order is match tier, then
/// shorter key, then the original relative order, so ranking the same
/// candidates twice always yields the same sequence. An empty query keeps
/// the candidates untouched.
pub fn rank(library: &Library, nodes: Vec<NodeRef>, query: &str, mode: KeyMode) -> Vec<NodeRef> {
    if query.is_empty() {
        return nodes;
    }
    let needle = query.to_lowercase();

    let mut matches: Vec<(MatchQuality, usize, NodeRef)> = Vec::new();
    for node in nodes {
        let key = match mode {
            KeyMode::Name => library.title(node).to_owned(),
            KeyMode::FullPath => breadcrumb(library, node, library.primary_label()),
        };
        if let Some(quality) = match_quality(&key.to_lowercase(), &needle) {
            matches.push((quality, key.chars().count(), node));
        }
    }

    // Stable sort keeps the incoming relative order as the last tie-break.
    matches.sort_by_key(|&(quality, key_chars, _)| (quality, key_chars));
    matches.into_iter().map(|(_, _, node)| node).collect()
}

/// `None` when `needle` is not a subsequence of `key`. Both sides must
/// already be lowercased.
fn match_quality(key: &str, needle: &str) -> Option<MatchQuality> {
    if key.starts_with(needle) {
        return Some(MatchQuality::Prefix);
    }
    if key.contains(needle) {
        return Some(MatchQuality::Substring);
    }
    if is_subsequence(needle, key) {
        return Some(MatchQuality::Scattered);
    }
    None
}

/// Every `needle` character appears in `key` in the same relative order,
/// gaps allowed.
fn is_subsequence(needle: &str, key: &str) -> bool {
    let mut key_chars = key.chars();
    'needle: for wanted in needle.chars() {
        for candidate in key_chars.by_ref() {
            if candidate == wanted {
                continue 'needle;
            }
        }
        return false;
    }
    true
}
