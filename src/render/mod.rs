// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame rendering.
//!
//! [`draw`] walks a project's scene objects in document order and paints the
//! visible ones onto a [`Surface`]. Output depends only on the project, the
//! time and the decoded image assets, so the same arguments always produce
//! the same frame.

pub mod painter;
pub mod raster;

use crate::io::media::{DecodedImage, ImageAssets};
use crate::models::{
    color::Color,
    object::{ObjectKind, SceneObject},
    project::Project,
};
use crate::util::geometry::content_scale;
use kurbo::{Affine, Point, Rect};

/// Font selection for text painting.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Pixel size in local units.
    pub size: f64,
}

/// Why a single object could not be painted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("image `{0}` has not been loaded")]
    ImageUnavailable(String),

    #[error("image `{src}` failed to decode: {reason}")]
    Decode { src: String, reason: String },

    #[error("font error: {0}")]
    Font(String),
}

/// Transform stack and global alpha shared by every surface implementation.
#[derive(Debug, Clone)]
pub struct SurfaceState {
    base: Affine,
    current: Affine,
    alpha: f64,
    stack: Vec<(Affine, f64)>,
}

impl SurfaceState {
    /// `base` is the transform restored by [`Surface::reset_transform`].
    pub fn new(base: Affine) -> Self {
        Self {
            base,
            current: base,
            alpha: 1.0,
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

/// A 2D raster target with a canvas-style transform stack.
///
/// Shapes are given in local coordinates and mapped through the current
/// transform. `save`/`restore` cover both the transform and the global alpha.
pub trait Surface {
    fn state_mut(&mut self) -> &mut SurfaceState;

    /// Size in device pixels.
    fn size(&self) -> (f64, f64);

    /// Fill the whole surface, ignoring transform and alpha.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Draw `text` with its baseline starting at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        color: Color,
    ) -> Result<(), RenderError>;

    /// Stretch `image` over `dest`. `key` identifies the asset for caching.
    fn draw_image(
        &mut self,
        key: &str,
        image: &DecodedImage,
        dest: Rect,
    ) -> Result<(), RenderError>;

    fn save(&mut self) {
        let state = self.state_mut();
        state.stack.push((state.current, state.alpha));
    }

    fn restore(&mut self) {
        let state = self.state_mut();
        if let Some((transform, alpha)) = state.stack.pop() {
            state.current = transform;
            state.alpha = alpha;
        }
    }

    /// Post-multiply the current transform.
    fn transform(&mut self, affine: Affine) {
        let state = self.state_mut();
        state.current = state.current * affine;
    }

    fn reset_transform(&mut self) {
        let state = self.state_mut();
        state.current = state.base;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state_mut().alpha = alpha.clamp(0.0, 1.0);
    }
}

/// Per-object failure recorded while drawing a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFailure {
    pub object_id: String,
    pub error: RenderError,
}

/// Summary of one [`draw`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub time: f64,
    pub painted: usize,
    pub hidden: usize,
    pub unknown: usize,
    pub failures: Vec<ObjectFailure>,
}

/// Render the frame at `time`.
///
/// Failures are contained per object: a bad object is recorded in the
/// report and the remaining objects are still painted.
pub fn draw(
    surface: &mut dyn Surface,
    project: &Project,
    time: f64,
    assets: &ImageAssets,
) -> FrameReport {
    let mut report = FrameReport {
        time,
        ..FrameReport::default()
    };

    surface.reset_transform();
    surface.clear(Color::BLACK);

    let (scale_x, scale_y) = content_scale(surface.size(), project);
    surface.save();
    surface.transform(Affine::scale_non_uniform(scale_x, scale_y));

    for object in &project.objects {
        if !object.is_visible_at(time) {
            report.hidden += 1;
            continue;
        }
        if object.kind == ObjectKind::Unknown {
            report.unknown += 1;
            continue;
        }

        surface.save();
        surface.transform(object.transform.to_affine());
        surface.set_global_alpha(effective_opacity(object.opacity));
        let result = paint_object(surface, object, assets);
        surface.restore();

        match result {
            Ok(()) => report.painted += 1,
            Err(error) => {
                log::debug!("Skipped object {} at {:.3}s: {}", object.id, time, error);
                report.failures.push(ObjectFailure {
                    object_id: object.id.clone(),
                    error,
                });
            }
        }
    }

    surface.restore();
    surface.reset_transform();
    report
}

fn effective_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Paint one object at the local origin of the current transform.
fn paint_object(
    surface: &mut dyn Surface,
    object: &SceneObject,
    assets: &ImageAssets,
) -> Result<(), RenderError> {
    match &object.kind {
        ObjectKind::Rectangle {
            fill,
            width,
            height,
        } => {
            surface.fill_rect(Rect::new(0.0, 0.0, *width, *height).abs(), *fill);
            Ok(())
        }
        ObjectKind::Circle { fill, radius } => {
            surface.fill_circle(Point::ORIGIN, radius.abs(), *fill);
            Ok(())
        }
        ObjectKind::Text {
            text,
            color,
            font_family,
            font_size,
        } => {
            let font = FontSpec {
                family: font_family.clone(),
                size: *font_size,
            };
            surface.fill_text(text, Point::ORIGIN, &font, *color)
        }
        ObjectKind::Image { src, width, height } => {
            let image = assets.get(src)?;
            surface.draw_image(src, &image, Rect::new(0.0, 0.0, *width, *height).abs())
        }
        ObjectKind::Unknown => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::raster::PixelSurface;
    use super::*;
    use crate::models::object::{Interval, Transform};

    fn red() -> Color {
        Color::rgb(255, 0, 0)
    }

    #[test]
    fn test_empty_project_draws_black_background() {
        let project = Project::new(64, 36, 30.0, 30.0);
        let mut surface = PixelSurface::new(64, 36);
        surface.clear(Color::WHITE);

        let report = draw(&mut surface, &project, 10.0, &ImageAssets::default());

        assert_eq!(report.painted, 0);
        for (_, _, pixel) in surface.image().enumerate_pixels() {
            assert_eq!(pixel.0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_rectangle_at_document_origin() {
        let mut project = Project::new(200, 100, 30.0, 30.0);
        project
            .objects
            .push(SceneObject::rectangle("#ff0000".parse().unwrap(), 100.0, 50.0).with_id("r"));
        let mut surface = PixelSurface::new(200, 100);

        let report = draw(&mut surface, &project, 0.0, &ImageAssets::default());

        assert_eq!(report.painted, 1);
        assert_eq!(surface.pixel(0, 0), red());
        assert_eq!(surface.pixel(99, 49), red());
        assert_eq!(surface.pixel(100, 49), Color::BLACK);
        assert_eq!(surface.pixel(99, 50), Color::BLACK);
    }

    #[test]
    fn test_rectangle_is_scaled_to_surface() {
        let mut project = Project::new(200, 100, 30.0, 30.0);
        project
            .objects
            .push(SceneObject::rectangle(red(), 100.0, 50.0).with_id("r"));
        let mut surface = PixelSurface::new(100, 50);

        draw(&mut surface, &project, 0.0, &ImageAssets::default());

        assert_eq!(surface.pixel(49, 24), red());
        assert_eq!(surface.pixel(50, 24), Color::BLACK);
        assert_eq!(surface.pixel(49, 25), Color::BLACK);
    }

    #[test]
    fn test_later_objects_paint_on_top() {
        let blue = Color::rgb(0, 0, 255);
        let mut project = Project::new(100, 100, 30.0, 30.0);
        project
            .objects
            .push(SceneObject::rectangle(red(), 60.0, 60.0).with_id("under"));
        project.objects.push(
            SceneObject::rectangle(blue, 60.0, 60.0)
                .with_id("over")
                .with_transform(Transform::translate(30.0, 30.0)),
        );
        let mut surface = PixelSurface::new(100, 100);

        draw(&mut surface, &project, 0.0, &ImageAssets::default());

        assert_eq!(surface.pixel(10, 10), red());
        assert_eq!(surface.pixel(45, 45), blue);
        assert_eq!(surface.pixel(80, 80), blue);
    }

    #[test]
    fn test_interval_controls_visibility() {
        let mut project = Project::new(10, 10, 30.0, 30.0);
        project.objects.push(
            SceneObject::rectangle(red(), 10.0, 10.0)
                .with_id("r")
                .with_interval(Interval::new(2.0, 4.0)),
        );
        let assets = ImageAssets::default();
        let mut surface = PixelSurface::new(10, 10);

        let before = draw(&mut surface, &project, 1.9, &assets);
        assert_eq!(before.hidden, 1);
        assert_eq!(surface.pixel(5, 5), Color::BLACK);

        draw(&mut surface, &project, 2.0, &assets);
        assert_eq!(surface.pixel(5, 5), red());
        draw(&mut surface, &project, 4.0, &assets);
        assert_eq!(surface.pixel(5, 5), red());
        draw(&mut surface, &project, 4.1, &assets);
        assert_eq!(surface.pixel(5, 5), Color::BLACK);
    }

    #[test]
    fn test_opacity_blends_with_background() {
        let mut project = Project::new(10, 10, 30.0, 30.0);
        project.objects.push(
            SceneObject::rectangle(Color::WHITE, 10.0, 10.0)
                .with_id("half")
                .with_opacity(0.5),
        );
        project.objects.push(
            SceneObject::rectangle(Color::WHITE, 10.0, 10.0)
                .with_id("invisible")
                .with_opacity(0.0)
                .with_transform(Transform::translate(5.0, 0.0)),
        );
        let mut surface = PixelSurface::new(10, 10);

        draw(&mut surface, &project, 0.0, &ImageAssets::default());

        let pixel = surface.pixel(2, 2);
        assert!((pixel.r as i32 - 128).abs() <= 1);
        assert_eq!(pixel.a, 255);
        assert_eq!(surface.pixel(7, 2), pixel);
    }

    #[test]
    fn test_missing_image_does_not_abort_frame() {
        let mut project = Project::new(20, 20, 30.0, 30.0);
        project
            .objects
            .push(SceneObject::image("missing.png", 20.0, 20.0).with_id("img"));
        project.objects.push(
            SceneObject::circle(red(), 5.0)
                .with_id("dot")
                .with_transform(Transform::translate(10.0, 10.0)),
        );
        let mut surface = PixelSurface::new(20, 20);

        let report = draw(&mut surface, &project, 0.0, &ImageAssets::default());

        assert_eq!(report.painted, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].object_id, "img");
        assert_eq!(
            report.failures[0].error,
            RenderError::ImageUnavailable("missing.png".to_string())
        );
        assert_eq!(surface.pixel(10, 10), red());
    }

    #[test]
    fn test_image_is_drawn_at_translated_origin() {
        let blue = Color::rgb(0, 0, 255);
        let mut pixels = DecodedImage::new(2, 1);
        pixels.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        pixels.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));
        let mut assets = ImageAssets::default();
        assets.insert("pic.png", pixels);

        let mut project = Project::new(20, 20, 30.0, 30.0);
        project.objects.push(
            SceneObject::image("pic.png", 4.0, 4.0)
                .with_id("img")
                .with_transform(Transform::translate(10.0, 5.0)),
        );
        let mut surface = PixelSurface::new(20, 20);

        let report = draw(&mut surface, &project, 0.0, &assets);

        assert_eq!(report.painted, 1);
        assert!(report.failures.is_empty());
        assert_eq!(surface.pixel(10, 5), red());
        assert_eq!(surface.pixel(11, 8), red());
        assert_eq!(surface.pixel(12, 5), blue);
        assert_eq!(surface.pixel(13, 8), blue);
        assert_eq!(surface.pixel(9, 5), Color::BLACK);
        assert_eq!(surface.pixel(14, 5), Color::BLACK);
        assert_eq!(surface.pixel(10, 4), Color::BLACK);
        assert_eq!(surface.pixel(10, 9), Color::BLACK);
    }

    #[test]
    fn test_text_baseline_starts_at_translated_origin() {
        let mut project = Project::new(64, 64, 30.0, 30.0);
        project.objects.push(
            SceneObject::text("H", Color::WHITE, "Arial", 20.0)
                .with_id("label")
                .with_transform(Transform::translate(30.0, 30.0)),
        );
        let mut surface = PixelSurface::new(64, 64);

        let report = draw(&mut surface, &project, 0.0, &ImageAssets::default());
        assert_eq!(report.painted, 1);

        let lit: Vec<(u32, u32)> = (0..64u32)
            .flat_map(|y| (0..64u32).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y) != Color::BLACK)
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| (29..52).contains(&x) && (8..32).contains(&y)));
        assert!(lit.iter().any(|&(_, y)| y >= 26));
        assert!(lit.iter().any(|&(_, y)| y <= 20));
    }

    #[test]
    fn test_unknown_objects_are_skipped() {
        let mut project = Project::new(10, 10, 30.0, 30.0);
        project.objects.push(SceneObject::new(ObjectKind::Unknown).with_id("u"));
        let mut surface = PixelSurface::new(10, 10);

        let report = draw(&mut surface, &project, 0.0, &ImageAssets::default());

        assert_eq!(report.unknown, 1);
        assert_eq!(report.painted, 0);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_draw_is_repeatable() {
        let mut project = Project::new(64, 64, 30.0, 30.0);
        project.objects.push(
            SceneObject::rectangle(red(), 30.0, 10.0)
                .with_id("a")
                .with_transform(Transform {
                    x: 32.0,
                    y: 32.0,
                    rotation: 33.0,
                    scale_x: 1.5,
                    scale_y: 0.75,
                })
                .with_opacity(0.8),
        );
        project.objects.push(
            SceneObject::circle(Color::rgb(0, 200, 100), 12.0)
                .with_id("b")
                .with_transform(Transform::translate(20.0, 40.0))
                .with_opacity(0.6),
        );
        let assets = ImageAssets::default();

        let mut first = PixelSurface::new(64, 64);
        draw(&mut first, &project, 1.0, &assets);
        let mut second = PixelSurface::new(64, 64);
        draw(&mut second, &project, 1.0, &assets);
        draw(&mut second, &project, 1.0, &assets);

        assert_eq!(first.image().as_raw(), second.image().as_raw());
    }

    #[test]
    fn test_surface_state_save_restore() {
        let mut surface = PixelSurface::new(4, 4);
        surface.set_global_alpha(0.25);
        surface.save();
        surface.transform(Affine::translate((1.0, 2.0)));
        surface.set_global_alpha(0.75);
        surface.restore();
        assert_eq!(surface.state_mut().current(), Affine::IDENTITY);
        assert_eq!(surface.state_mut().alpha(), 0.25);
        surface.restore();
        assert_eq!(surface.state_mut().alpha(), 0.25);
    }
}
