// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image asset loading.
//!
//! Image objects reference their pixels by `src` path. This module decodes
//! those files once and keeps the RGBA buffers (or the decode error) keyed
//! by source, so rendering never touches the filesystem.

use crate::error::{EditorError, EditorResult};
use crate::models::{object::ObjectKind, project::Project};
use crate::render::RenderError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Decoded straight-alpha RGBA pixels.
pub type DecodedImage = image::RgbaImage;

/// Load and decode an image file.
pub fn load_image(path: &Path) -> EditorResult<DecodedImage> {
    let decoded = image::open(path).map_err(|e| EditorError::DecodeFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(decoded.to_rgba8())
}

/// Decoded images keyed by their `src`.
#[derive(Debug, Default)]
pub struct ImageAssets {
    decoded: HashMap<String, Arc<DecodedImage>>,
    failed: HashMap<String, String>,
}

impl ImageAssets {
    /// Register already-decoded pixels for `src`.
    #[cfg(test)]
    pub fn insert(&mut self, src: impl Into<String>, image: DecodedImage) {
        let src = src.into();
        self.failed.remove(&src);
        self.decoded.insert(src, Arc::new(image));
    }

    /// Decode `src` from disk unless it is already cached.
    ///
    /// A failed decode is remembered so later frames report it without retrying.
    pub fn load(&mut self, src: &str) -> EditorResult<Arc<DecodedImage>> {
        if let Some(image) = self.decoded.get(src) {
            return Ok(Arc::clone(image));
        }
        match load_image(Path::new(src)) {
            Ok(image) => {
                log::info!("Loaded image: {} ({}x{})", src, image.width(), image.height());
                let image = Arc::new(image);
                self.decoded.insert(src.to_string(), Arc::clone(&image));
                self.failed.remove(src);
                Ok(image)
            }
            Err(err) => {
                self.failed.insert(src.to_string(), err.to_string());
                Err(err)
            }
        }
    }

    /// Decode every image source referenced by `project`. Returns the failures.
    pub fn load_project(&mut self, project: &Project) -> Vec<EditorError> {
        let sources: Vec<String> = project
            .objects
            .iter()
            .filter_map(|object| match &object.kind {
                ObjectKind::Image { src, .. } if !src.is_empty() => Some(src.clone()),
                _ => None,
            })
            .collect();

        sources
            .iter()
            .filter_map(|src| self.load(src).err())
            .inspect(|err| log::error!("{}", err))
            .collect()
    }

    /// Cached pixels for `src`, or why they are unavailable.
    pub fn get(&self, src: &str) -> Result<Arc<DecodedImage>, RenderError> {
        if let Some(image) = self.decoded.get(src) {
            return Ok(Arc::clone(image));
        }
        match self.failed.get(src) {
            Some(reason) => Err(RenderError::Decode {
                src: src.to_string(),
                reason: reason.clone(),
            }),
            None => Err(RenderError::ImageUnavailable(src.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.decoded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoded.is_empty()
    }

    pub fn clear(&mut self) {
        self.decoded.clear();
        self.failed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{color::Color, object::SceneObject};

    #[test]
    fn test_insert_and_get() {
        let mut assets = ImageAssets::default();
        assets.insert("a.png", DecodedImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 255])));
        let image = assets.get("a.png").unwrap();
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(assets.len(), 1);
        assert_eq!(
            assets.get("b.png").unwrap_err(),
            RenderError::ImageUnavailable("b.png".to_string())
        );
    }

    #[test]
    fn test_failed_decode_is_remembered() {
        let dir = std::env::temp_dir().join(format!("hikari-media-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let bogus = dir.join("broken.png");
        std::fs::write(&bogus, b"definitely not a png").unwrap();
        let src = bogus.to_string_lossy().to_string();

        let mut assets = ImageAssets::default();
        let err = assets.load(&src).unwrap_err();
        assert!(matches!(err, EditorError::DecodeFailure { .. }));
        assert!(matches!(assets.get(&src), Err(RenderError::Decode { .. })));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_project_decodes_referenced_images() {
        let dir = std::env::temp_dir().join(format!("hikari-media-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dot.png");
        DecodedImage::from_pixel(4, 4, image::Rgba([0, 255, 0, 255]))
            .save(&path)
            .unwrap();

        let mut project = Project::default();
        project.add_object(SceneObject::image(path.to_string_lossy(), 4.0, 4.0), 0.0);
        project.add_object(SceneObject::circle(Color::WHITE, 2.0), 0.0);
        let missing = dir.join("missing.png");
        project.add_object(SceneObject::image(missing.to_string_lossy(), 4.0, 4.0), 0.0);

        let mut assets = ImageAssets::default();
        let failures = assets.load_project(&project);

        assert_eq!(failures.len(), 1);
        assert_eq!(assets.len(), 1);
        let decoded = assets.get(&path.to_string_lossy()).unwrap();
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 255, 0, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
