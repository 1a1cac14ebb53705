//! The query pipeline: open the forest, narrow to candidates, filter by
//! content, rank, then render launcher rows.

use folio_library::{Library, LibraryPaths, NodeKind, NodeRef};
use folio_protocol::{
    Action, ActionKind, ErrorEnvelope, Icon, Item, ItemKind, QueryRequest, ResponseEnvelope,
};
use folio_search::{
    describe, filter_by_content, rank, resolve_scope, ChildTarget, ContentIndex, KeyMode,
    Navigation, ParentTarget, QueryContext, SpotlightIndex,
};
use std::path::Path;

pub async fn run(request: &QueryRequest, library_root: &Path) -> ResponseEnvelope {
    match execute(request, library_root).await {
        Ok(items) => ResponseEnvelope::ok(items),
        Err(envelope) => ResponseEnvelope::error(envelope),
    }
}

async fn execute(request: &QueryRequest, library_root: &Path) -> Result<Vec<Item>, ErrorEnvelope> {
    request
        .validate()
        .map_err(|err| super::invalid_request(err.to_string(), None))?;

    let paths =
        LibraryPaths::discover(library_root).map_err(|err| super::classify_library_error(&err))?;
    let library = Library::open(&paths).map_err(|err| super::classify_library_error(&err))?;

    let mut candidates = resolve_scope(&library, request.scope_path.as_deref(), request.kind);

    if let Some(content_query) = request.content_query() {
        let roots = library
            .roots()
            .iter()
            .map(|&root| library.folder(root).location.clone())
            .collect();
        let hits = SpotlightIndex::new(roots)
            .matching_paths(content_query, request.kind)
            .await
            .map_err(|err| super::classify_error(&err))?;
        candidates = filter_by_content(&library, candidates, &hits);
    }

    let mode = if request.search_full_path {
        KeyMode::FullPath
    } else {
        KeyMode::Name
    };
    let nodes = match request.fuzzy_query() {
        Some(query) => rank(&library, candidates.nodes(), query, mode),
        None => candidates.nodes(),
    };

    let ctx = QueryContext {
        kind: request.kind,
        content_query: request.content_query().map(str::to_owned),
        root_label: library.primary_label().to_owned(),
    };

    Ok(nodes
        .into_iter()
        .map(|node| render_item(&library, node, &ctx))
        .collect())
}

/// One node to one launcher row.
fn render_item(library: &Library, node: NodeRef, ctx: &QueryContext) -> Item {
    let nav = describe(library, node, ctx);
    let title = library.title(node);
    let openable = library.openable(node).to_path_buf();

    Item {
        uid: library.location(node).to_path_buf(),
        kind: wire_kind(node),
        title: display_title(node, title),
        subtitle: subtitle_line(&nav),
        autocomplete: Some(title.to_owned()),
        open: openable.clone(),
        icon: Icon::file(openable),
        actions: action_rows(&nav),
    }
}

/// Folders carry the triangle glyph, documents an alignment indent, so the
/// two kinds stay visually distinct in a flat result list.
fn display_title(node: NodeRef, title: &str) -> String {
    match node.kind() {
        NodeKind::Folder => format!("\u{25B8} {title}"),
        NodeKind::Document => format!("   {title}"),
    }
}

fn subtitle_line(nav: &Navigation) -> String {
    let mut line = format!("     {}", nav.display_path.join("/"));
    if let Some(count) = nav.document_count {
        let noun = if count == 1 { "document" } else { "documents" };
        line.push_str(&format!(" ({count} {noun})"));
    }
    line
}

fn wire_kind(node: NodeRef) -> ItemKind {
    match node.kind() {
        NodeKind::Folder => ItemKind::Folder,
        NodeKind::Document => ItemKind::Document,
    }
}

fn action_rows(nav: &Navigation) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(child) = &nav.child {
        actions.push(drill_down(child, &nav.breadcrumb));
    }
    actions.push(drill_up(&nav.parent));
    actions
}

fn drill_down(child: &ChildTarget, breadcrumb: &str) -> Action {
    match child {
        ChildTarget::Reachable { request } => Action::enabled(
            ActionKind::DrillDown,
            format!("Go into: {breadcrumb}"),
            request.clone(),
        ),
        ChildTarget::NoSubFolders => Action::disabled(
            ActionKind::DrillDown,
            format!("No sub-folders in: {breadcrumb}"),
        ),
        ChildTarget::NoDocuments => Action::disabled(
            ActionKind::DrillDown,
            format!("No documents in: {breadcrumb}"),
        ),
        ChildTarget::Empty => {
            Action::disabled(ActionKind::DrillDown, format!("Empty: {breadcrumb}"))
        }
    }
}

fn drill_up(parent: &ParentTarget) -> Action {
    match parent {
        ParentTarget::Folder { display, request } => {
            let title = if display.is_empty() {
                "Up to top level".to_owned()
            } else {
                format!("Up to: {display}")
            };
            Action::enabled(ActionKind::DrillUp, title, request.clone())
        }
        ParentTarget::AtTopLevel => Action::disabled(ActionKind::DrillUp, "At top level"),
    }
}
