// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scene object data structures.
//!
//! This module defines the timed, transformable elements that make up a
//! project: rectangles, circles, text and images, together with their
//! transform and visibility interval.

use super::color::Color;
use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};

/// Translation, rotation (degrees) and non-uniform scale applied before painting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Transform {
    /// A pure translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Local-to-parent matrix: translate, then rotate, then scale.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

/// Closed time window `[start, end]` in seconds during which an object is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    /// Finite bounds with `start <= end`.
    pub fn is_well_formed(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start <= self.end
    }
}

fn default_extent() -> f64 {
    100.0
}

fn default_radius() -> f64 {
    50.0
}

fn default_font_size() -> f64 {
    48.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_opacity() -> f64 {
    1.0
}

/// Variant-specific payload of a scene object, tagged by `type` in project files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectKind {
    #[serde(rename = "rect")]
    Rectangle {
        #[serde(rename = "fillColor", default)]
        fill: Color,
        #[serde(default = "default_extent")]
        width: f64,
        #[serde(default = "default_extent")]
        height: f64,
    },
    #[serde(rename = "circle")]
    Circle {
        #[serde(rename = "fillColor", default)]
        fill: Color,
        #[serde(default = "default_radius")]
        radius: f64,
    },
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
        #[serde(default)]
        color: Color,
        #[serde(rename = "fontFamily", default = "default_font_family")]
        font_family: String,
        #[serde(rename = "fontSize", default = "default_font_size")]
        font_size: f64,
    },
    #[serde(rename = "image")]
    Image {
        /// Location of the encoded image; decoded pixels live in the asset store.
        #[serde(default)]
        src: String,
        #[serde(default = "default_extent")]
        width: f64,
        #[serde(default = "default_extent")]
        height: f64,
    },
    /// Any `type` this editor does not know how to paint.
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl ObjectKind {
    /// Short name used in logs and the properties panel.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Rectangle { .. } => "rect",
            ObjectKind::Circle { .. } => "circle",
            ObjectKind::Text { .. } => "text",
            ObjectKind::Image { .. } => "image",
            ObjectKind::Unknown => "unknown",
        }
    }
}

/// One timed, transformable, paintable element of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Empty until the object is added to a project.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// `None` means always visible.
    #[serde(rename = "timeline", default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl SceneObject {
    /// Create an object with identity transform, full opacity and no interval.
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: String::new(),
            transform: Transform::default(),
            opacity: 1.0,
            interval: None,
            kind,
        }
    }

    pub fn rectangle(fill: Color, width: f64, height: f64) -> Self {
        Self::new(ObjectKind::Rectangle {
            fill,
            width,
            height,
        })
    }

    pub fn circle(fill: Color, radius: f64) -> Self {
        Self::new(ObjectKind::Circle { fill, radius })
    }

    pub fn text(
        text: impl Into<String>,
        color: Color,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> Self {
        Self::new(ObjectKind::Text {
            text: text.into(),
            color,
            font_family: font_family.into(),
            font_size,
        })
    }

    pub fn image(src: impl Into<String>, width: f64, height: f64) -> Self {
        Self::new(ObjectKind::Image {
            src: src.into(),
            width,
            height,
        })
    }

    #[cfg(test)]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[cfg(test)]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[cfg(test)]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Whether the object should be painted at `time`.
    pub fn is_visible_at(&self, time: f64) -> bool {
        self.interval.map_or(true, |interval| interval.contains(time))
    }
}
