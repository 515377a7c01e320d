// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Software raster surface.
//!
//! Every device pixel whose centre maps (through the inverse transform)
//! inside a shape is blended source-over. There is no anti-aliasing, which
//! keeps output bit-for-bit reproducible. Used for frame export and tests.

use super::{FontSpec, RenderError, Surface, SurfaceState};
use crate::io::media::DecodedImage;
use crate::models::color::Color;
use crate::util::geometry::uniform_scale_of;
use fontdue::{Font, FontSettings};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use kurbo::{Affine, Point, Rect};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Bundled face used when a family has not been registered.
const DEFAULT_FACE: &str = "Ubuntu-Light";

static DEFAULT_FONT: OnceLock<Result<Font, String>> = OnceLock::new();

/// The sans-serif face shipped with egui.
fn default_font() -> Result<&'static Font, RenderError> {
    DEFAULT_FONT
        .get_or_init(|| {
            let definitions = egui::FontDefinitions::default();
            let data = definitions
                .font_data
                .get(DEFAULT_FACE)
                .ok_or_else(|| format!("bundled font {} missing", DEFAULT_FACE))?;
            Font::from_bytes(&*data.font, FontSettings::default()).map_err(str::to_string)
        })
        .as_ref()
        .map_err(|e| RenderError::Font(e.clone()))
}

/// Fonts by family name, falling back to the bundled face.
#[derive(Clone, Default)]
pub struct FontBook {
    families: HashMap<String, Font>,
}

impl FontBook {
    /// Register a TrueType/OpenType face under `family` (case-insensitive).
    pub fn register(&mut self, family: &str, bytes: &[u8]) -> Result<(), RenderError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| RenderError::Font(format!("failed to parse font {}: {}", family, e)))?;
        self.families.insert(family.to_ascii_lowercase(), font);
        Ok(())
    }

    /// Register every `family -> font file` pair, skipping files that fail to load.
    pub fn from_files<'a>(files: impl IntoIterator<Item = (&'a String, &'a PathBuf)>) -> Self {
        let mut book = Self::default();
        for (family, path) in files {
            let loaded = std::fs::read(path)
                .map_err(|e| RenderError::Font(format!("failed to read {}: {}", path.display(), e)))
                .and_then(|bytes| book.register(family, &bytes));
            match loaded {
                Ok(()) => log::info!("Registered font family {:?} from {}", family, path.display()),
                Err(e) => {
                    log::warn!("Font family {:?} falls back to the default face: {}", family, e)
                }
            }
        }
        book
    }

    pub fn font(&self, family: &str) -> Result<&Font, RenderError> {
        match self.families.get(&family.to_ascii_lowercase()) {
            Some(font) => Ok(font),
            None => default_font(),
        }
    }

    /// Rasterise a single line of text into a coverage mask.
    ///
    /// Sizes above `max_px` are rejected before any glyph is rasterised.
    pub fn layout(
        &self,
        text: &str,
        spec: &FontSpec,
        max_px: f64,
    ) -> Result<TextMask, RenderError> {
        let font = self.font(&spec.family)?;
        if !(spec.size.is_finite() && spec.size > 0.0) {
            return Err(RenderError::Font(format!("invalid font size {}", spec.size)));
        }
        if spec.size > max_px {
            return Err(RenderError::Font(format!(
                "font size {:.0}px exceeds the {:.0}px limit",
                spec.size, max_px
            )));
        }
        let px = spec.size as f32;

        let glyphs: Vec<_> = text.chars().map(|ch| font.rasterize(ch, px)).collect();

        let mut width: f32 = 0.0;
        let mut ascent: i32 = 0;
        let mut descent: i32 = 0;
        for (metrics, _) in &glyphs {
            ascent = ascent.max(metrics.height as i32 + metrics.ymin);
            descent = descent.max(-metrics.ymin);
            width += metrics.advance_width;
        }

        let mask_width = width.ceil().max(1.0) as u32;
        let mask_height = (ascent + descent).max(1) as u32;
        let mut coverage = GrayImage::new(mask_width, mask_height);

        let mut cursor_x: f32 = 0.0;
        for (metrics, bitmap) in &glyphs {
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = ascent - (metrics.height as i32 + metrics.ymin);
            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let value = bitmap[gy * metrics.width + gx];
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    let outside = px < 0
                        || py < 0
                        || px >= mask_width as i32
                        || py >= mask_height as i32;
                    if value == 0 || outside {
                        continue;
                    }
                    let slot = coverage.get_pixel_mut(px as u32, py as u32);
                    slot.0[0] = slot.0[0].max(value);
                }
            }
            cursor_x += metrics.advance_width;
        }

        Ok(TextMask {
            coverage,
            ascent: ascent as f64,
        })
    }
}

/// Coverage of a laid-out line; the baseline sits `ascent` pixels below the top.
pub struct TextMask {
    pub coverage: GrayImage,
    pub ascent: f64,
}

/// RGBA frame buffer implementing [`Surface`].
pub struct PixelSurface {
    pixels: RgbaImage,
    state: SurfaceState,
    fonts: FontBook,
}

impl PixelSurface {
    /// A transparent surface of the given size.
    #[cfg(test)]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_fonts(width, height, FontBook::default())
    }

    pub fn with_fonts(width: u32, height: u32, fonts: FontBook) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            state: SurfaceState::new(Affine::IDENTITY),
            fonts,
        }
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Color::rgba(r, g, b, a)
    }

    /// Blend `shade(local point)` into every pixel whose centre falls in `bounds`.
    fn fill_local<F>(&mut self, bounds: Rect, shade: F)
    where
        F: Fn(Point) -> Option<[u8; 4]>,
    {
        let transform = self.state.current();
        let alpha = self.state.alpha();
        if alpha <= 0.0 || transform.determinant().abs() < 1e-12 {
            return;
        }
        let inverse = transform.inverse();
        let device = transform.transform_rect_bbox(bounds);

        let (width, height) = self.pixels.dimensions();
        let x0 = device.x0.floor().max(0.0) as u32;
        let y0 = device.y0.floor().max(0.0) as u32;
        let x1 = (device.x1.ceil().max(0.0) as u32).min(width);
        let y1 = (device.y1.ceil().max(0.0) as u32).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                let local = inverse * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some(source) = shade(local) {
                    blend(self.pixels.get_pixel_mut(x, y), source, alpha);
                }
            }
        }
    }
}

/// Source-over blend of straight-alpha `source` scaled by `alpha`.
fn blend(dst: &mut Rgba<u8>, source: [u8; 4], alpha: f64) {
    let src_a = source[3] as f64 / 255.0 * alpha;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst.0[3] as f64 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for i in 0..3 {
        let c = (source[i] as f64 * src_a + dst.0[i] as f64 * dst_a * (1.0 - src_a)) / out_a;
        dst.0[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Nearest-neighbour lookup of `local` inside `dest` stretched over a `w`x`h` grid.
fn sample_cell(local: Point, dest: Rect, w: u32, h: u32) -> Option<(u32, u32)> {
    if !dest.contains(local) || dest.width() <= 0.0 || dest.height() <= 0.0 {
        return None;
    }
    let u = ((local.x - dest.x0) / dest.width() * w as f64).floor() as u32;
    let v = ((local.y - dest.y0) / dest.height() * h as f64).floor() as u32;
    Some((u.min(w.saturating_sub(1)), v.min(h.saturating_sub(1))))
}

impl Surface for PixelSurface {
    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn size(&self) -> (f64, f64) {
        let (w, h) = self.pixels.dimensions();
        (w as f64, h as f64)
    }

    fn clear(&mut self, color: Color) {
        let fill = Rgba(color.to_array());
        for pixel in self.pixels.pixels_mut() {
            *pixel = fill;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rgba = color.to_array();
        self.fill_local(rect, |p| rect.contains(p).then_some(rgba));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let rgba = color.to_array();
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.fill_local(bounds, |p| (p.distance(center) <= radius).then_some(rgba));
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
        let scale = uniform_scale_of(self.state.current());
        if text.is_empty() || scale < 1e-6 {
            return Ok(());
        }

        // Glyphs are rasterised at device size.
        let (width, height) = self.size();
        let device = FontSpec {
            family: font.family.clone(),
            size: font.size * scale,
        };
        let mask = self.fonts.layout(text, &device, width.max(height))?;
        let (w, h) = mask.coverage.dimensions();
        let top = origin.y - mask.ascent / scale;
        let dest = Rect::new(
            origin.x,
            top,
            origin.x + w as f64 / scale,
            top + h as f64 / scale,
        );
        let [r, g, b, a] = color.to_array();
        let coverage = &mask.coverage;
        self.fill_local(dest, |p| {
            let (u, v) = sample_cell(p, dest, w, h)?;
            let Luma([cov]) = *coverage.get_pixel(u, v);
            (cov > 0).then(|| [r, g, b, ((a as u16 * cov as u16) / 255) as u8])
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        _key: &str,
        image: &DecodedImage,
        dest: Rect,
    ) -> Result<(), RenderError> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.fill_local(dest, |p| {
            let (u, v) = sample_cell(p, dest, w, h)?;
            Some(image.get_pixel(u, v).0)
        });
        Ok(())
    }
}
