// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Timeline bar: transport, time display, scrubber and edit mode.

use super::UiEvent;
use crate::commands::Command;
use crate::editor::{EditMode, Editor};

/// Display the timeline bar.
pub fn show(ui: &mut egui::Ui, editor: &Editor, time_display: &str) -> Option<UiEvent> {
    let mut event = None;
    let time = editor.time();
    let state = time.state();

    ui.horizontal(|ui| {
        let label = if state.is_playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(label).clicked() {
            event = Some(UiEvent::Action("play-pause"));
        }

        ui.label(egui::RichText::new(time_display).monospace());

        ui.separator();

        if ui.selectable_label(editor.mode() == EditMode::Video, "Video").clicked() {
            event = Some(UiEvent::Action("video-mode"));
        }
        if ui.selectable_label(editor.mode() == EditMode::Object, "Object").clicked() {
            event = Some(UiEvent::Action("object-mode"));
        }

        ui.separator();

        let mut position = state.current_time;
        ui.spacing_mut().slider_width = (ui.available_width() - 16.0).max(50.0);
        let slider = egui::Slider::new(&mut position, 0.0..=time.duration()).show_value(false);
        if ui.add(slider).changed() {
            event = Some(UiEvent::Command(Command::Seek(position)));
        }
    });

    event
}
