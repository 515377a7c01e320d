// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved-project store.
//!
//! Projects saved from the editor are kept together in a single JSON file
//! (`projects.json`) inside the configured storage directory, newest entry
//! last. The whole list is rewritten on every change.

use crate::error::{EditorError, EditorResult};
use crate::models::project::{generate_project_id, Project, DEFAULT_NAME};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "projects.json";

/// One entry of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub id: String,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub data: Project,
}

/// File-backed key-value store of saved projects.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Store rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved projects. A missing store file means an empty store.
    pub fn list(&self) -> EditorResult<Vec<SavedProject>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(EditorError::storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&json).map_err(|e| {
            EditorError::malformed(format!(
                "saved project list {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Save `project`, assigning it an id on first save. Returns the id.
    ///
    /// An entry with the same id is replaced in place; otherwise the entry is appended.
    pub fn save(&self, project: &mut Project) -> EditorResult<String> {
        let mut projects = self.list()?;

        let id = match &project.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => {
                let id = generate_project_id();
                project.id = Some(id.clone());
                id
            }
        };
        let name = if project.name.trim().is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            project.name.clone()
        };
        let entry = SavedProject {
            id: id.clone(),
            name,
            last_modified: Utc::now(),
            data: project.clone(),
        };

        match projects.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = entry,
            None => projects.push(entry),
        }
        self.write(&projects)?;
        log::info!("Saved project {} ({} in store)", id, projects.len());
        Ok(id)
    }

    /// Look up a saved project by id.
    pub fn load(&self, id: &str) -> EditorResult<Option<SavedProject>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Remove a saved project. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> EditorResult<bool> {
        let mut projects = self.list()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        let removed = projects.len() != before;
        if removed {
            self.write(&projects)?;
            log::info!("Deleted saved project {}", id);
        }
        Ok(removed)
    }

    fn write(&self, projects: &[SavedProject]) -> EditorResult<()> {
        let storage_err = |e: &dyn std::fmt::Display| {
            EditorError::storage(format!("failed to write {}: {}", self.path.display(), e))
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_err(&e))?;
        }
        let json = serde_json::to_string(projects).map_err(|e| storage_err(&e))?;
        std::fs::write(&self.path, json).map_err(|e| storage_err(&e))
    }
}
