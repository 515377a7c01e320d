// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session state.
//!
//! [`Editor`] owns the live project, its playback time and decoded assets.
//! Every mutation goes through its methods; nothing is global.

use crate::config::CanvasDefaults;
use crate::error::EditorResult;
use crate::io::media::ImageAssets;
use crate::models::{
    material::Material,
    object::{ObjectKind, SceneObject},
    project::Project,
};
use crate::playback::controller::TimeController;
use std::path::Path;
use std::time::Duration;

/// Timeline editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Video,
    Object,
}

/// The live project plus everything needed to preview it.
pub struct Editor {
    project: Project,
    time: TimeController,
    assets: ImageAssets,
    mode: EditMode,
    selected: Option<String>,
    defaults: CanvasDefaults,
}

impl Editor {
    /// An editor holding a fresh empty project.
    pub fn new(defaults: CanvasDefaults) -> Self {
        let project = defaults.new_project();
        let time = TimeController::new(project.duration);
        Self {
            project,
            time,
            assets: ImageAssets::default(),
            mode: EditMode::default(),
            selected: None,
            defaults,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn time(&self) -> &TimeController {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeController {
        &mut self.time
    }

    pub fn assets(&self) -> &ImageAssets {
        &self.assets
    }

    pub fn current_time(&self) -> f64 {
        self.time.current_time()
    }

    /// Split borrows for drawing a frame.
    pub fn frame_parts(&mut self) -> (&mut TimeController, &Project, &ImageAssets) {
        (&mut self.time, &self.project, &self.assets)
    }

    /// Replace the live project with an empty one built from the defaults.
    pub fn new_project(&mut self, now: Duration) {
        self.install(self.defaults.new_project(), now);
        log::info!(
            "Created new project {}x{} @ {} fps, {}s",
            self.project.width,
            self.project.height,
            self.project.fps,
            self.project.duration
        );
    }

    /// Validate `data` and make it the live project.
    ///
    /// On error the current project, time and assets are left untouched.
    pub fn load_project(&mut self, data: Project, now: Duration) -> EditorResult<()> {
        let project = Project::replace(data)?;

        let unknown = project
            .objects
            .iter()
            .filter(|o| o.kind == ObjectKind::Unknown)
            .count();
        if unknown > 0 {
            log::warn!(
                "Project {:?} has {} object(s) of unknown type; they will not be drawn",
                project.name,
                unknown
            );
        }

        self.install(project, now);
        let failed = self.assets.load_project(&self.project).len();
        if failed > 0 {
            log::warn!("{} image(s) could not be decoded and will not be drawn", failed);
        }
        if self.assets.is_empty() {
            log::info!(
                "Loaded project {:?} with {} objects",
                self.project.name,
                self.project.objects.len()
            );
        } else {
            log::info!(
                "Loaded project {:?} with {} objects and {} images",
                self.project.name,
                self.project.objects.len(),
                self.assets.len()
            );
        }
        Ok(())
    }

    fn install(&mut self, project: Project, now: Duration) {
        self.time.reset(project.duration, now);
        self.project = project;
        self.assets.clear();
        self.selected = None;
    }

    /// Append `object` at the current time. Returns its id.
    pub fn add_object(&mut self, object: SceneObject) -> String {
        let kind = object.kind.name();
        let id = self.project.add_object(object, self.time.current_time());
        log::info!("Added {} {}, total: {}", kind, id, self.project.objects.len());
        id
    }

    /// Add the default object for a palette material.
    pub fn add_material(&mut self, material: Material) -> String {
        let object = material.create(&self.project);
        self.add_object(object)
    }

    /// Decode the image at `path` and add it at its natural size.
    pub fn add_image(&mut self, path: &Path) -> EditorResult<String> {
        let src = path.to_string_lossy().to_string();
        let image = self.assets.load(&src)?;
        let object = SceneObject::image(src, image.width() as f64, image.height() as f64);
        Ok(self.add_object(object))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.project.name = name.into();
    }

    /// Store-facing access for saving, which may assign an id.
    pub fn project_mut_for_save(&mut self) -> &mut Project {
        &mut self.project
    }

    pub fn seek(&mut self, time: f64, now: Duration) {
        self.time.seek(time, now);
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select an object by id; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<String>) {
        self.selected = id.filter(|id| self.project.object(id).is_some());
    }
}
