// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview surface backed by an egui painter.
//!
//! Shapes become egui primitives in screen space: transformed quads and
//! circle outlines as convex polygons, text as rotated galleys and images
//! as textured meshes. Output is anti-aliased by egui and only used for the
//! interactive preview; exports go through [`super::raster::PixelSurface`].

use super::{FontSpec, RenderError, Surface, SurfaceState};
use crate::io::media::DecodedImage;
use crate::models::color::Color;
use crate::util::geometry::{circle_outline, rotation_of, uniform_scale_of};
use egui::epaint::{TextShape, Vertex};
use kurbo::{Affine, Point, Rect, Vec2};
use std::collections::HashMap;

const CIRCLE_SEGMENTS: usize = 64;

/// egui never makes its font atlas wider than this.
const MAX_ATLAS_WIDTH: usize = 8 * 1024;

/// Approximate ascent of egui's fonts as a fraction of the font size.
const ASCENT_RATIO: f64 = 0.8;

/// GPU textures for decoded images, keyed by asset source.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, egui::TextureHandle>,
}

impl TextureCache {
    fn get_or_load(
        &mut self,
        ctx: &egui::Context,
        key: &str,
        image: &DecodedImage,
    ) -> egui::TextureId {
        self.textures
            .entry(key.to_string())
            .or_insert_with(|| {
                let size = [image.width() as usize, image.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
                ctx.load_texture(key, color_image, egui::TextureOptions::LINEAR)
            })
            .id()
    }

    /// Drop every texture, e.g. when a different project is loaded.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

/// [`Surface`] that paints into `viewport` of an egui painter.
pub struct PainterSurface<'a> {
    painter: egui::Painter,
    viewport: egui::Rect,
    state: SurfaceState,
    textures: &'a mut TextureCache,
}

impl<'a> PainterSurface<'a> {
    pub fn new(
        painter: egui::Painter,
        viewport: egui::Rect,
        textures: &'a mut TextureCache,
    ) -> Self {
        let base = Affine::translate(Vec2::new(viewport.min.x as f64, viewport.min.y as f64));
        Self {
            painter,
            viewport,
            state: SurfaceState::new(base),
            textures,
        }
    }

    fn color32(&self, color: Color) -> egui::Color32 {
        let tinted = color.with_alpha_factor(self.state.alpha());
        egui::Color32::from_rgba_unmultiplied(tinted.r, tinted.g, tinted.b, tinted.a)
    }

    fn to_screen(&self, point: Point) -> egui::Pos2 {
        let p = self.state.current() * point;
        egui::pos2(p.x as f32, p.y as f32)
    }

    /// Largest on-screen font size whose glyphs fit egui's font atlas.
    fn max_text_size(&self) -> f32 {
        let ctx = self.painter.ctx();
        let atlas_width = ctx.input(|i| i.max_texture_side).min(MAX_ATLAS_WIDTH) as f32;
        // Glyphs can be wider than the font size.
        atlas_width / (2.0 * ctx.pixels_per_point())
    }

    fn rect_corners(&self, rect: Rect) -> Vec<egui::Pos2> {
        [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]
        .into_iter()
        .map(|p| self.to_screen(p))
        .collect()
    }
}

fn font_family(family: &str) -> egui::FontFamily {
    match family.to_ascii_lowercase().as_str() {
        "monospace" | "courier" | "courier new" | "consolas" | "menlo" => {
            egui::FontFamily::Monospace
        }
        _ => egui::FontFamily::Proportional,
    }
}

impl Surface for PainterSurface<'_> {
    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn size(&self) -> (f64, f64) {
        (self.viewport.width() as f64, self.viewport.height() as f64)
    }

    fn clear(&mut self, color: Color) {
        let fill = egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
        self.painter.rect_filled(self.viewport, 0.0, fill);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let points = self.rect_corners(rect);
        let fill = self.color32(color);
        self.painter
            .add(egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let points = circle_outline(self.state.current(), center, radius, CIRCLE_SEGMENTS)
            .into_iter()
            .map(|p| egui::pos2(p.x as f32, p.y as f32))
            .collect();
        let fill = self.color32(color);
        self.painter
            .add(egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE));
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        color: Color,
    ) -> Result<(), RenderError> {
        if !(font.size.is_finite() && font.size > 0.0) {
            return Err(RenderError::Font(format!("invalid font size {}", font.size)));
        }
        if text.is_empty() {
            return Ok(());
        }
        let transform = self.state.current();
        let screen_size = (font.size * uniform_scale_of(transform)) as f32;
        if screen_size < 0.5 {
            return Ok(());
        }
        let limit = self.max_text_size();
        if screen_size > limit {
            return Err(RenderError::Font(format!(
                "font size {:.0}px exceeds the {:.0}px preview limit",
                screen_size, limit
            )));
        }

        let fill = self.color32(color);
        let font_id = egui::FontId::new(screen_size, font_family(&font.family));
        let galley = self.painter.layout_no_wrap(text.to_string(), font_id, fill);
        let top_left = self.to_screen(Point::new(origin.x, origin.y - font.size * ASCENT_RATIO));
        let shape =
            TextShape::new(top_left, galley, fill).with_angle(rotation_of(transform) as f32);
        self.painter.add(shape);
        Ok(())
    }

    fn draw_image(
        &mut self,
        key: &str,
        image: &DecodedImage,
        dest: Rect,
    ) -> Result<(), RenderError> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }
        let texture = self.textures.get_or_load(self.painter.ctx(), key, image);
        let tint = egui::Color32::WHITE.gamma_multiply(self.state.alpha() as f32);

        let corners = self.rect_corners(dest);
        let uvs = [
            egui::pos2(0.0, 0.0),
            egui::pos2(1.0, 0.0),
            egui::pos2(1.0, 1.0),
            egui::pos2(0.0, 1.0),
        ];
        let mut mesh = egui::Mesh::with_texture(texture);
        for (pos, uv) in corners.into_iter().zip(uvs) {
            mesh.vertices.push(Vertex { pos, uv, color: tint });
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        self.painter.add(egui::Shape::mesh(mesh));
        Ok(())
    }
}
