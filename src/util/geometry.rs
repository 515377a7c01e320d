// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the mapping between project (document) coordinates
//! and surface pixels, and the aspect-preserving fit used by the preview.

use crate::models::project::Project;
use kurbo::{Affine, Point};

/// Per-axis scale that maps document coordinates onto a surface of `surface` size.
pub fn content_scale(surface: (f64, f64), project: &Project) -> (f64, f64) {
    let (surface_width, surface_height) = surface;
    (
        surface_width / project.width.max(1) as f64,
        surface_height / project.height.max(1) as f64,
    )
}

/// Largest size with the canvas aspect ratio that fits inside `available`.
pub fn fit_size(available: (f32, f32), canvas_width: u32, canvas_height: u32) -> (f32, f32) {
    let (available_width, available_height) = available;
    if available_width <= 0.0
        || available_height <= 0.0
        || canvas_width == 0
        || canvas_height == 0
    {
        return (0.0, 0.0);
    }

    let canvas_aspect = canvas_width as f32 / canvas_height as f32;
    let available_aspect = available_width / available_height;

    if canvas_aspect > available_aspect {
        // Canvas is wider - fit to width
        (available_width, available_width / canvas_aspect)
    } else {
        // Canvas is taller - fit to height
        (available_height * canvas_aspect, available_height)
    }
}

/// Points approximating a circle of `radius` around `center`, mapped through `transform`.
pub fn circle_outline(
    transform: Affine,
    center: Point,
    radius: f64,
    segments: usize,
) -> Vec<Point> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = i as f64 / segments as f64 * std::f64::consts::TAU;
            transform * Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Rotation of the transformed x axis, in radians.
pub fn rotation_of(transform: Affine) -> f64 {
    let [a, b, _, _, _, _] = transform.as_coeffs();
    b.atan2(a)
}

/// Geometric-mean scale factor of a transform (1.0 for pure rotations/translations).
pub fn uniform_scale_of(transform: Affine) -> f64 {
    transform.determinant().abs().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_scale_matches_surface() {
        let project = Project::new(1920, 1080, 30.0, 30.0);
        let (sx, sy) = content_scale((960.0, 540.0), &project);
        assert!((sx - 0.5).abs() < 0.0001);
        assert!((sy - 0.5).abs() < 0.0001);

        let (sx, sy) = content_scale((1920.0, 540.0), &project);
        assert!((sx - 1.0).abs() < 0.0001);
        assert!((sy - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_fit_size_wide_and_tall() {
        // Wide canvas in a square area - fit to width
        let (w, h) = fit_size((800.0, 800.0), 1920, 1080);
        assert!((w - 800.0).abs() < 0.001);
        assert!((h - 450.0).abs() < 0.001);

        // Tall area limited by height
        let (w, h) = fit_size((1000.0, 270.0), 1920, 1080);
        assert!((w - 480.0).abs() < 0.001);
        assert!((h - 270.0).abs() < 0.001);

        assert_eq!(fit_size((0.0, 100.0), 1920, 1080), (0.0, 0.0));
    }

    #[test]
    fn test_circle_outline_radius() {
        let points = circle_outline(Affine::IDENTITY, Point::new(5.0, 5.0), 2.0, 16);
        assert_eq!(points.len(), 16);
        for p in points {
            assert!((p.distance(Point::new(5.0, 5.0)) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotation_and_scale_extraction() {
        let t = Affine::rotate(std::f64::consts::FRAC_PI_2) * Affine::scale(3.0);
        assert!((rotation_of(t) - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((uniform_scale_of(t) - 3.0).abs() < 1e-9);
    }
}
