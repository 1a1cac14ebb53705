//! View-mode preference commands: list the selectable views as launcher
//! rows, read the effective one, persist a new one.

use folio_protocol::{ErrorEnvelope, ItemKind, Status};
use serde::Serialize;

use crate::settings::{Settings, View};

/// One selectable view, shaped like a launcher row.
#[derive(Debug, Serialize)]
pub struct ViewRow {
    pub view: View,
    pub title: String,
    pub subtitle: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct ViewListReport {
    pub status: Status,
    pub kind: ItemKind,
    pub views: Vec<ViewRow>,
}

#[derive(Debug, Serialize)]
pub struct ViewReport {
    pub status: Status,
    pub kind: ItemKind,
    pub view: View,
}

pub fn list(kind: ItemKind) -> ViewListReport {
    list_from(&Settings::load(), kind)
}

fn list_from(settings: &Settings, kind: ItemKind) -> ViewListReport {
    let selected = settings.view_for(kind);
    let views = View::ALL
        .iter()
        .map(|&view| ViewRow {
            view,
            title: row_title(view, view == selected),
            subtitle: row_subtitle(view),
            selected: view == selected,
        })
        .collect();
    ViewListReport {
        status: Status::Ok,
        kind,
        views,
    }
}

fn row_title(view: View, selected: bool) -> String {
    if selected {
        format!("{} (selected)", view.display_name())
    } else {
        view.display_name().to_owned()
    }
}

fn row_subtitle(view: View) -> String {
    match view {
        View::Default => "Let the editor decide how to open items".to_owned(),
        other => format!("Switch to '{}' view after opening", other.display_name()),
    }
}

pub fn get(kind: ItemKind) -> ViewReport {
    ViewReport {
        status: Status::Ok,
        kind,
        view: Settings::load().view_for(kind),
    }
}

pub fn set(kind: ItemKind, view: View) -> Result<ViewReport, ErrorEnvelope> {
    let mut settings = Settings::load();
    settings.set_view(kind, view);
    settings.save().map_err(|err| ErrorEnvelope {
        code: "io".to_owned(),
        message: format!("cannot persist view settings: {err}"),
        hint: None,
    })?;
    Ok(ViewReport {
        status: Status::Ok,
        kind,
        view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_view_is_listed_and_the_fallback_is_selected() {
        let report = list_from(&Settings::default(), ItemKind::Folder);

        assert_eq!(report.views.len(), 4);
        let selected: Vec<_> = report.views.iter().filter(|row| row.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].view, View::Documents);
        assert_eq!(selected[0].title, "Documents (selected)");
    }

    #[test]
    fn configured_view_moves_the_marker() {
        let mut settings = Settings::default();
        settings.set_view(ItemKind::Folder, View::Library);

        let report = list_from(&settings, ItemKind::Folder);
        let titles: Vec<_> = report.views.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Default", "Library (selected)", "Documents", "Editor"]
        );
    }

    #[test]
    fn subtitles_explain_what_selection_does() {
        let report = list_from(&Settings::default(), ItemKind::Document);

        assert_eq!(
            report.views[0].subtitle,
            "Let the editor decide how to open items"
        );
        assert_eq!(
            report.views[1].subtitle,
            "Switch to 'Library' view after opening"
        );
        assert_eq!(
            report.views[3].subtitle,
            "Switch to 'Editor' view after opening"
        );
    }
}
