// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Built-in materials offered by the palette.

use super::{color::Color, object::SceneObject, object::Transform, project::Project};

/// Palette category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Shape,
    Text,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::All, Category::Shape, Category::Text];

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Shape => "Shapes",
            Category::Text => "Text",
        }
    }
}

/// A material that creates a default scene object when added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Rectangle,
    Circle,
    Text,
}

impl Material {
    pub const DEFAULTS: [Material; 3] = [Material::Rectangle, Material::Circle, Material::Text];

    pub fn name(self) -> &'static str {
        match self {
            Material::Rectangle => "Rectangle",
            Material::Circle => "Circle",
            Material::Text => "Text",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Material::Rectangle => "▭",
            Material::Circle => "●",
            Material::Text => "T",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Material::Rectangle | Material::Circle => Category::Shape,
            Material::Text => Category::Text,
        }
    }

    /// Whether the material is listed under `filter`.
    pub fn matches(self, filter: Category) -> bool {
        filter == Category::All || filter == self.category()
    }

    /// A new object for this material, centred on the project canvas.
    pub fn create(self, project: &Project) -> SceneObject {
        let cx = project.width as f64 / 2.0;
        let cy = project.height as f64 / 2.0;
        match self {
            Material::Rectangle => SceneObject::rectangle(Color::WHITE, 100.0, 100.0)
                .with_transform(Transform::translate(cx - 50.0, cy - 50.0)),
            Material::Circle => SceneObject::circle(Color::WHITE, 50.0)
                .with_transform(Transform::translate(cx, cy)),
            Material::Text => SceneObject::text("Text", Color::WHITE, "Arial", 48.0)
                .with_transform(Transform::translate(cx, cy)),
        }
    }
}
