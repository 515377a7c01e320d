// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project properties panel.
//!
//! Shows the project name and canvas settings, the object list in paint
//! order, and read-only details of the selected object.

use super::UiEvent;
use crate::commands::Command;
use crate::editor::Editor;
use crate::models::object::{ObjectKind, SceneObject};
use crate::util::time::format_time;

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, editor: &Editor) -> Option<UiEvent> {
    let mut event = None;
    let project = editor.project();

    ui.heading("Project");
    ui.horizontal(|ui| {
        ui.label("Name:");
        let mut name = project.name.clone();
        if ui.text_edit_singleline(&mut name).changed() {
            event = Some(UiEvent::Command(Command::Rename(name)));
        }
    });
    ui.label(format!(
        "{}×{} · {} fps · {}",
        project.width,
        project.height,
        project.fps,
        format_time(project.duration)
    ));

    ui.separator();
    ui.heading(format!("Objects ({})", project.objects.len()));

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() * 0.6)
        .show(ui, |ui| {
            if project.objects.is_empty() {
                ui.label(egui::RichText::new("Add a material to get started").weak());
            }
            for object in &project.objects {
                let selected = editor.selected() == Some(object.id.as_str());
                let visible = object.is_visible_at(editor.current_time());
                let mut text = egui::RichText::new(list_label(object));
                if !visible {
                    text = text.weak();
                }
                if ui.selectable_label(selected, text).clicked() {
                    let next = if selected { None } else { Some(object.id.clone()) };
                    event = Some(UiEvent::Command(Command::Select(next)));
                }
            }
        });

    if let Some(object) = editor.selected().and_then(|id| project.object(id)) {
        ui.separator();
        ui.heading("Selected");
        details(ui, object);
    }

    event
}

fn list_label(object: &SceneObject) -> String {
    let summary = match &object.kind {
        ObjectKind::Text { text, .. } => format!("\"{}\"", text),
        ObjectKind::Image { src, .. } => src
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(src)
            .to_string(),
        _ => object.id.clone(),
    };
    format!("{} · {}", object.kind.name(), summary)
}

fn details(ui: &mut egui::Ui, object: &SceneObject) {
    egui::Grid::new("selected_object").num_columns(2).show(ui, |ui| {
        ui.label("Id");
        ui.label(&object.id);
        ui.end_row();

        let t = &object.transform;
        ui.label("Position");
        ui.label(format!("{:.1}, {:.1}", t.x, t.y));
        ui.end_row();

        ui.label("Rotation");
        ui.label(format!("{:.1}°", t.rotation));
        ui.end_row();

        ui.label("Scale");
        ui.label(format!("{:.2} × {:.2}", t.scale_x, t.scale_y));
        ui.end_row();

        ui.label("Opacity");
        ui.label(format!("{:.2}", object.opacity));
        ui.end_row();

        if let Some(interval) = object.interval {
            ui.label("Visible");
            ui.label(format!("{} – {}", format_time(interval.start), format_time(interval.end)));
            ui.end_row();
        }

        match &object.kind {
            ObjectKind::Rectangle { fill, width, height } => {
                ui.label("Size");
                ui.label(format!("{} × {}", width, height));
                ui.end_row();
                ui.label("Fill");
                ui.label(fill.to_string());
                ui.end_row();
            }
            ObjectKind::Circle { fill, radius } => {
                ui.label("Radius");
                ui.label(radius.to_string());
                ui.end_row();
                ui.label("Fill");
                ui.label(fill.to_string());
                ui.end_row();
            }
            ObjectKind::Text {
                color,
                font_family,
                font_size,
                ..
            } => {
                ui.label("Font");
                ui.label(format!("{} {}px", font_family, font_size));
                ui.end_row();
                ui.label("Color");
                ui.label(color.to_string());
                ui.end_row();
            }
            ObjectKind::Image { src, width, height } => {
                ui.label("Source");
                ui.label(src);
                ui.end_row();
                ui.label("Size");
                ui.label(format!("{} × {}", width, height));
                ui.end_row();
            }
            ObjectKind::Unknown => {
                ui.label("Type");
                ui.label("unsupported");
                ui.end_row();
            }
        }
    });
}
