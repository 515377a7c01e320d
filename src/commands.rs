// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Named UI actions and the commands they trigger.
//!
//! Widgets never call into the editor directly: they look up an action name
//! in the [`ActionTable`] and hand the resulting [`Command`] to the session.

use crate::editor::EditMode;
use crate::error::{EditorError, EditorResult};
use crate::models::material::Material;
use crate::session::Screen;
use std::collections::HashMap;
use std::path::PathBuf;

/// An operation on the editing session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    NewProject,
    ShowScreen(Screen),
    /// Leave the editor for the start screen (after confirmation).
    BackToStart,
    TogglePlayback,
    Play,
    Pause,
    Seek(f64),
    AddMaterial(Material),
    AddImage(PathBuf),
    SetMode(EditMode),
    Select(Option<String>),
    Rename(String),
    OpenSaveModal,
    CloseSaveModal,
    SaveToStore,
    DownloadProject(PathBuf),
    ImportProject(PathBuf),
    LoadSaved(String),
    DeleteSaved(String),
    ExportFrame(PathBuf),
}

/// Maps action names to the commands they trigger.
#[derive(Debug, Clone)]
pub struct ActionTable {
    bindings: HashMap<&'static str, Command>,
}

impl Default for ActionTable {
    fn default() -> Self {
        let bindings = [
            ("new-project", Command::NewProject),
            ("import-project", Command::ShowScreen(Screen::Import)),
            ("back-from-import", Command::ShowScreen(Screen::Start)),
            ("back-to-start", Command::BackToStart),
            ("play-pause", Command::TogglePlayback),
            ("play", Command::Play),
            ("pause", Command::Pause),
            ("save", Command::OpenSaveModal),
            ("save-store", Command::SaveToStore),
            ("close-save-modal", Command::CloseSaveModal),
            ("video-mode", Command::SetMode(EditMode::Video)),
            ("object-mode", Command::SetMode(EditMode::Object)),
            ("add-rect", Command::AddMaterial(Material::Rectangle)),
            ("add-circle", Command::AddMaterial(Material::Circle)),
            ("add-text", Command::AddMaterial(Material::Text)),
        ];
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl ActionTable {
    /// Command bound to `action`.
    pub fn resolve(&self, action: &str) -> EditorResult<Command> {
        self.bindings
            .get(action)
            .cloned()
            .ok_or_else(|| EditorError::binding_missing(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let table = ActionTable::default();
        assert_eq!(table.resolve("play-pause").unwrap(), Command::TogglePlayback);
        assert_eq!(
            table.resolve("add-circle").unwrap(),
            Command::AddMaterial(Material::Circle)
        );
        assert_eq!(
            table.resolve("object-mode").unwrap(),
            Command::SetMode(EditMode::Object)
        );
    }

    #[test]
    fn test_unknown_action_is_binding_missing() {
        let table = ActionTable::default();
        let err = table.resolve("launch-rocket").unwrap_err();
        assert!(matches!(
            err,
            EditorError::BindingMissing { ref action } if action == "launch-rocket"
        ));
        assert!(err.is_log_only());
    }
}
