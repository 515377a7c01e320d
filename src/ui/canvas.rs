// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview canvas.
//!
//! Fits the project canvas into the available space with its aspect ratio
//! preserved and draws the current frame into it through a
//! [`PainterSurface`].

use super::UiEvent;
use crate::commands::Command;
use crate::playback::driver::EguiScheduler;
use crate::render::painter::{PainterSurface, TextureCache};
use crate::session::Session;
use crate::util::geometry::fit_size;

const STATUS_HEIGHT: f32 = 24.0;

/// Display the preview and its status line.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut Session,
    textures: &mut TextureCache,
    background_gray: u8,
) -> Option<UiEvent> {
    let mut event = None;

    let available = ui.available_size() - egui::vec2(0.0, STATUS_HEIGHT);
    let available = available.max(egui::Vec2::ZERO);
    let (area, response) = ui.allocate_exact_size(available, egui::Sense::click());
    ui.painter().rect_filled(area, 0.0, egui::Color32::from_gray(background_gray));

    let (width, height) = {
        let project = session.editor().project();
        fit_size((area.width(), area.height()), project.width, project.height)
    };
    let viewport = egui::Rect::from_center_size(area.center(), egui::vec2(width, height));

    let report = {
        let mut surface = PainterSurface::new(ui.painter_at(viewport), viewport, textures);
        let mut scheduler = EguiScheduler(ui.ctx());
        session.render_frame(&mut surface, &mut scheduler)
    };

    // Clicking empty preview space clears the selection.
    if response.clicked() && session.editor().selected().is_some() {
        event = Some(UiEvent::Command(Command::Select(None)));
    }

    ui.separator();
    ui.horizontal(|ui| {
        let project = session.editor().project();
        ui.label(format!("{}×{} @ {} fps", project.width, project.height, project.fps));
        ui.separator();
        ui.label(format!("{} objects, {} visible", project.objects.len(), report.painted));
        if session.editor().time().is_playing() {
            ui.separator();
            ui.label(format!("{} frames played", session.frames_rendered()));
        }
        if !report.failures.is_empty() {
            ui.separator();
            ui.label(
                egui::RichText::new(format!("{} could not be drawn", report.failures.len()))
                    .color(egui::Color32::from_rgb(230, 160, 60)),
            );
        }
    });

    event
}
