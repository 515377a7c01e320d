// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Start and import screens.

use super::UiEvent;
use crate::commands::Command;
use crate::io::serialization::PROJECT_EXTENSION;
use crate::io::storage::SavedProject;

/// Landing screen: create, import, or reopen a saved project.
pub fn start(ui: &mut egui::Ui, saved: &[SavedProject]) -> Option<UiEvent> {
    let mut event = None;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(
            egui::RichText::new("Hikari")
                .size(32.0)
                .color(egui::Color32::from_gray(200)),
        );
        ui.label(
            egui::RichText::new("Video Composition Editor")
                .size(14.0)
                .color(egui::Color32::from_gray(150)),
        );
        ui.add_space(20.0);

        ui.horizontal(|ui| {
            // Centre the button pair.
            ui.add_space((ui.available_width() - 260.0).max(0.0) / 2.0);
            if ui.add_sized([120.0, 32.0], egui::Button::new("New Project")).clicked() {
                event = Some(UiEvent::Action("new-project"));
            }
            if ui.add_sized([120.0, 32.0], egui::Button::new("Import Project")).clicked() {
                event = Some(UiEvent::Action("import-project"));
            }
        });

        ui.add_space(30.0);
        ui.label(egui::RichText::new("Saved projects").strong());
        ui.add_space(8.0);

        if saved.is_empty() {
            ui.label(
                egui::RichText::new("Nothing saved yet")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
            return;
        }

        egui::ScrollArea::vertical().max_width(480.0).show(ui, |ui| {
            // Newest first.
            for entry in saved.iter().rev() {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&entry.name).strong());
                    let modified = entry.last_modified.format("%Y-%m-%d %H:%M").to_string();
                    ui.label(egui::RichText::new(modified).weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("Delete").clicked() {
                            event = Some(UiEvent::Command(Command::DeleteSaved(entry.id.clone())));
                        }
                        if ui.small_button("Open").clicked() {
                            event = Some(UiEvent::Command(Command::LoadSaved(entry.id.clone())));
                        }
                    });
                });
            }
        });
    });

    event
}

/// Import screen: pick a project file.
pub fn import(ui: &mut egui::Ui) -> Option<UiEvent> {
    let mut event = None;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Import Project");
        ui.add_space(10.0);
        let hint = format!("Choose a .{} file exported from Hikari", PROJECT_EXTENSION);
        ui.label(egui::RichText::new(hint).color(egui::Color32::from_gray(180)));
        ui.add_space(20.0);

        if ui.button("Choose File...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Hikari Project", &[PROJECT_EXTENSION, "json"])
                .pick_file()
            {
                event = Some(UiEvent::Command(Command::ImportProject(path)));
            }
        }
        ui.add_space(10.0);
        if ui.button("Back").clicked() {
            event = Some(UiEvent::Action("back-from-import"));
        }
    });

    event
}
