// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project data serialization and deserialization.
//!
//! This module handles encoding projects as JSON, reading and writing
//! `.hmv` project files, and exporting single rendered frames as PNG.

use crate::error::{EditorError, EditorResult};
use crate::io::media::ImageAssets;
use crate::models::project::{Project, DEFAULT_NAME};
use crate::render::{
    self,
    raster::{FontBook, PixelSurface},
    FrameReport,
};
use std::path::{Path, PathBuf};

/// Extension used for exported project files.
pub const PROJECT_EXTENSION: &str = "hmv";

/// Encode a project as pretty-printed JSON.
pub fn encode(project: &Project) -> EditorResult<String> {
    serde_json::to_string_pretty(project)
        .map_err(|e| EditorError::storage(format!("failed to encode project: {}", e)))
}

/// Decode and validate a project from JSON.
pub fn decode(json: &str) -> EditorResult<Project> {
    let project: Project = serde_json::from_str(json)?;
    Project::replace(project)
}

/// Suggested file name for downloading `project`.
pub fn project_file_name(project: &Project) -> String {
    let name = project.name.trim();
    let name = if name.is_empty() { DEFAULT_NAME } else { name };
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{}.{}", sanitized, PROJECT_EXTENSION)
}

/// Export project data to an `.hmv` file.
pub fn export_project(project: &Project, path: &Path) -> EditorResult<()> {
    let json = encode(project)?;
    std::fs::write(path, json).map_err(|e| {
        EditorError::storage(format!("failed to write {}: {}", path.display(), e))
    })?;
    Ok(())
}

/// Import project data from an `.hmv` (or plain JSON) file.
pub fn import_project(path: &Path) -> EditorResult<Project> {
    let json = std::fs::read_to_string(path)?;
    decode(&json)
}

/// Ensure `path` carries the project extension.
pub fn with_project_extension(path: PathBuf) -> PathBuf {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(PROJECT_EXTENSION) => path,
        _ => path.with_extension(PROJECT_EXTENSION),
    }
}

/// Render the frame at `time` at project resolution and write it as PNG.
pub fn export_frame_png(
    project: &Project,
    time: f64,
    assets: &ImageAssets,
    fonts: &FontBook,
    path: &Path,
) -> EditorResult<FrameReport> {
    let mut surface = PixelSurface::with_fonts(project.width, project.height, fonts.clone());
    let report = render::draw(&mut surface, project, time, assets);
    surface
        .into_image()
        .save(path)
        .map_err(|e| EditorError::storage(format!("failed to write {}: {}", path.display(), e)))?;
    Ok(report)
}
