//! Per-kind view preferences, kept in a small JSON file under the platform
//! data directory.

use folio_protocol::ItemKind;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Overrides the settings file location (tests, portable setups).
pub const SETTINGS_ENV: &str = "FOLIO_FINDER_SETTINGS";

const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "folio-finder";

/// View modes the editor can open an item in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Default,
    Library,
    Documents,
    Editor,
}

impl View {
    pub const ALL: [View; 4] = [View::Default, View::Library, View::Documents, View::Editor];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Default => "default",
            View::Library => "library",
            View::Documents => "documents",
            View::Editor => "editor",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            View::Default => "Default",
            View::Library => "Library",
            View::Documents => "Documents",
            View::Editor => "Editor",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        View::ALL.iter().copied().find(|view| view.as_str() == raw)
    }

    /// What a kind opens with when nothing is configured.
    pub fn fallback_for(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Folder => View::Documents,
            ItemKind::Document => View::Editor,
        }
    }
}

/// Slots hold loose strings so an unknown stored value degrades to the
/// fallback instead of poisoning the whole file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    open_folder_with_view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    open_document_with_view: Option<String>,
}

impl Settings {
    /// Reads the settings file. Preferences must never break a query, so
    /// a missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let path = settings_path();
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("ignoring unreadable settings at {}: {err}", path.display());
                    Settings::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Settings::default(),
            Err(err) => {
                log::warn!("ignoring unreadable settings at {}: {err}", path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self) -> io::Result<()> {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(&path, body)
    }

    pub fn view_for(&self, kind: ItemKind) -> View {
        let stored = match kind {
            ItemKind::Folder => self.open_folder_with_view.as_deref(),
            ItemKind::Document => self.open_document_with_view.as_deref(),
        };
        stored
            .and_then(View::parse)
            .unwrap_or_else(|| View::fallback_for(kind))
    }

    pub fn set_view(&mut self, kind: ItemKind, view: View) {
        let slot = match kind {
            ItemKind::Folder => &mut self.open_folder_with_view,
            ItemKind::Document => &mut self.open_document_with_view,
        };
        *slot = Some(view.as_str().to_owned());
    }
}

fn settings_path() -> PathBuf {
    if let Some(path) = env::var_os(SETTINGS_ENV) {
        return PathBuf::from(path);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(SETTINGS_FILE)
}
