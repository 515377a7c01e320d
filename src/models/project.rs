// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project document management.
//!
//! A project is the complete editable document: canvas size, frame rate,
//! duration and the ordered list of scene objects. Order is paint order,
//! later objects are drawn on top.

use super::object::{Interval, SceneObject};
use crate::error::EditorError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
pub const DEFAULT_FPS: f64 = 30.0;
pub const DEFAULT_DURATION: f64 = 30.0;
pub const DEFAULT_NAME: &str = "Untitled Project";

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

/// Complete project data for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the project store on first save.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_FPS, DEFAULT_DURATION)
    }
}

impl Project {
    /// Create an empty, unsaved project.
    pub fn new(width: u32, height: u32, fps: f64, duration: f64) -> Self {
        Self {
            id: None,
            name: default_name(),
            width,
            height,
            fps,
            duration,
            objects: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append an object, filling in a generated id and a default interval
    /// of `[current_time, duration]` when they are missing. Returns the id.
    pub fn add_object(&mut self, mut object: SceneObject, current_time: f64) -> String {
        if object.id.is_empty() {
            object.id = generate_object_id();
        }
        if object.interval.is_none() {
            object.interval = Some(Interval::new(current_time, self.duration));
        }
        let id = object.id.clone();
        self.objects.push(object);
        id
    }

    /// Look up an object by id.
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Check the structural invariants a loaded document must satisfy.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.width == 0 || self.height == 0 {
            return Err(EditorError::malformed(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(EditorError::malformed(format!(
                "frame rate must be positive, got {}",
                self.fps
            )));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(EditorError::malformed(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(interval) = object.interval {
                if !interval.is_well_formed() {
                    return Err(EditorError::malformed(format!(
                        "object {} ({:?}) has invalid timeline [{}, {}]",
                        index, object.id, interval.start, interval.end
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate `data` and return it as the replacement document.
    ///
    /// On error nothing is returned, so the caller's live project stays untouched.
    pub fn replace(data: Project) -> Result<Project, EditorError> {
        data.validate()?;
        Ok(data)
    }
}

/// Generate a unique scene object identifier.
pub fn generate_object_id() -> String {
    format!("obj_{}", uuid::Uuid::new_v4().simple())
}

/// Generate a unique project identifier.
pub fn generate_project_id() -> String {
    format!("project_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::color::Color;

    #[test]
    fn test_default_project() {
        let project = Project::default();
        assert_eq!(project.id, None);
        assert_eq!((project.width, project.height), (1920, 1080));
        assert_eq!(project.fps, 30.0);
        assert_eq!(project.duration, 30.0);
        assert!(project.objects.is_empty());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_add_object_assigns_id_and_default_interval() {
        let mut project = Project::default();
        let id = project.add_object(SceneObject::rectangle(Color::WHITE, 10.0, 10.0), 3.0);
        assert!(!id.is_empty());
        let object = project.object(&id).unwrap();
        assert_eq!(object.interval, Some(Interval::new(3.0, 30.0)));
    }

    #[test]
    fn test_add_object_keeps_supplied_id_and_interval() {
        let mut project = Project::default();
        let object = SceneObject::circle(Color::WHITE, 5.0)
            .with_id("mine")
            .with_interval(Interval::new(1.0, 2.0));
        let id = project.add_object(object, 10.0);
        assert_eq!(id, "mine");
        assert_eq!(project.objects[0].interval, Some(Interval::new(1.0, 2.0)));
    }

    #[test]
    fn test_add_object_appends_in_order() {
        let mut project = Project::default();
        let a = project.add_object(SceneObject::circle(Color::WHITE, 1.0), 0.0);
        let b = project.add_object(SceneObject::circle(Color::WHITE, 1.0), 0.0);
        assert_ne!(a, b);
        assert_eq!(project.objects[0].id, a);
        assert_eq!(project.objects[1].id, b);
    }

    #[test]
    fn test_validate_rejects_bad_documents() {
        let mut project = Project::default();
        project.duration = 0.0;
        assert!(matches!(project.validate(), Err(EditorError::MalformedInput(_))));

        let mut project = Project::default();
        project.width = 0;
        assert!(project.validate().is_err());

        let mut project = Project::default();
        project.fps = f64::NAN;
        assert!(project.validate().is_err());

        let mut project = Project::default();
        project
            .objects
            .push(SceneObject::circle(Color::WHITE, 1.0).with_interval(Interval::new(5.0, 1.0)));
        assert!(Project::replace(project).is_err());
    }
}
