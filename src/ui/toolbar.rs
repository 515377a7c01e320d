// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Material palette.
//!
//! Lists the built-in materials under a category filter, plus an image
//! picker that adds a decoded image at its natural size.

use super::UiEvent;
use crate::commands::Command;
use crate::models::material::{Category, Material};

/// Image formats offered by the picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

fn action_for(material: Material) -> &'static str {
    match material {
        Material::Rectangle => "add-rect",
        Material::Circle => "add-circle",
        Material::Text => "add-text",
    }
}

/// Display the palette and return the material the user picked, if any.
pub fn show(ui: &mut egui::Ui, filter: &mut Category) -> Option<UiEvent> {
    let mut event = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Materials:");

        for category in Category::ALL {
            if ui.selectable_label(*filter == category, category.label()).clicked() {
                *filter = category;
            }
        }

        ui.separator();

        for material in Material::DEFAULTS.into_iter().filter(|m| m.matches(*filter)) {
            let label = format!("{} {}", material.icon(), material.name());
            if ui.button(label).clicked() {
                event = Some(UiEvent::Action(action_for(material)));
            }
        }

        if *filter == Category::All && ui.button("🖼 Image...").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
            {
                event = Some(UiEvent::Command(Command::AddImage(path)));
            }
        }

        ui.separator();

        ui.label(egui::RichText::new("New objects start at the current time").italics().weak());
    });

    event
}
