// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. Panels report what the user asked for as
//! [`UiEvent`]s, which are dispatched to the [`Session`] once the frame's
//! layout is complete.

use crate::commands::Command;
use crate::config::EditorConfig;
use crate::io::serialization::{project_file_name, PROJECT_EXTENSION};
use crate::models::material::Category;
use crate::playback::{clock::MonotonicClock, driver::EguiScheduler};
use crate::render::painter::TextureCache;
use crate::session::{Screen, Session};
use crate::ui::{canvas, properties, screens, timeline, toolbar, UiEvent};

/// Main application state.
pub struct HikariApp {
    /// Editor session (project, playback, saved projects)
    session: Session,

    /// GPU textures for image objects in the live project
    textures: TextureCache,

    /// Session generation the textures were loaded for
    textures_generation: u64,

    /// Palette category filter
    palette_filter: Category,

    /// Whether the "leave editor" confirmation is showing
    confirm_leave: bool,

    /// Grey level around the preview canvas
    background_gray: u8,
}

impl HikariApp {
    /// Create a new application instance.
    pub fn new(config: &EditorConfig) -> Self {
        let session = Session::new(config, Box::new(MonotonicClock::start()));
        Self {
            textures_generation: session.generation(),
            session,
            textures: TextureCache::default(),
            palette_filter: Category::default(),
            confirm_leave: false,
            background_gray: config.preview.background_gray,
        }
    }

    /// Dispatch one UI event and apply the error policy to the result.
    fn apply(&mut self, ctx: &egui::Context, event: UiEvent) {
        let mut scheduler = EguiScheduler(ctx);
        let result = match event {
            UiEvent::Action(name) => self.session.run_action(name, &mut scheduler),
            UiEvent::Command(command) => self.session.dispatch(command, &mut scheduler),
        };
        self.session.handle(result);

        if self.session.generation() != self.textures_generation {
            self.textures.clear();
            self.textures_generation = self.session.generation();
        }
    }

    fn editor_menu(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Project").clicked() {
                    events.push(UiEvent::Action("new-project"));
                    ui.close_menu();
                }
                if ui.button("Import Project...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Hikari Project", &[PROJECT_EXTENSION, "json"])
                        .pick_file()
                    {
                        events.push(UiEvent::Command(Command::ImportProject(path)));
                    }
                    ui.close_menu();
                }
                if ui.button("Save...").clicked() {
                    events.push(UiEvent::Action("save"));
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Export Frame as PNG...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("PNG", &["png"])
                        .set_file_name("frame.png")
                        .save_file()
                    {
                        events.push(UiEvent::Command(Command::ExportFrame(path)));
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Back to Start").clicked() {
                    self.confirm_leave = true;
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Playback", |ui| {
                let playing = self.session.editor().time().is_playing();
                if ui.button(if playing { "Pause (Space)" } else { "Play (Space)" }).clicked() {
                    events.push(UiEvent::Action("play-pause"));
                    ui.close_menu();
                }
                if ui.button("Rewind").clicked() {
                    events.push(UiEvent::Command(Command::Seek(0.0)));
                    ui.close_menu();
                }
            });
        });
    }

    fn save_modal(&mut self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        egui::Window::new("Save Project")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Save \"{}\"", self.session.editor().project().name));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save to Library").clicked() {
                        events.push(UiEvent::Action("save-store"));
                    }
                    if ui.button("Download .hmv...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Hikari Project", &[PROJECT_EXTENSION])
                            .set_file_name(project_file_name(self.session.editor().project()))
                            .save_file()
                        {
                            events.push(UiEvent::Command(Command::DownloadProject(path)));
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        events.push(UiEvent::Action("close-save-modal"));
                    }
                });
            });
    }

    fn confirm_leave_modal(&mut self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        egui::Window::new("Leave Editor")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Return to the start screen? Unsaved changes will be lost.");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Leave").clicked() {
                        events.push(UiEvent::Action("back-to-start"));
                        self.confirm_leave = false;
                    }
                    if ui.button("Stay").clicked() {
                        self.confirm_leave = false;
                    }
                });
            });
    }

    fn notice_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.session.notice().map(str::to_string) else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Hikari")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 40.0))
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.session.dismiss_notice();
        }
    }

    fn editor_screen(&mut self, ctx: &egui::Context, events: &mut Vec<UiEvent>) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.editor_menu(ui, events);
        });

        egui::TopBottomPanel::top("palette").show(ctx, |ui| {
            events.extend(toolbar::show(ui, &mut self.palette_filter));
        });

        egui::TopBottomPanel::bottom("timeline").show(ctx, |ui| {
            ui.add_space(4.0);
            events.extend(timeline::show(ui, self.session.editor(), self.session.time_display()));
            ui.add_space(4.0);
        });

        egui::SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| {
                events.extend(properties::show(ui, self.session.editor()));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            events.extend(canvas::show(
                ui,
                &mut self.session,
                &mut self.textures,
                self.background_gray,
            ));
        });

        if self.session.save_modal_open() {
            self.save_modal(ctx, events);
        }
        if self.confirm_leave {
            self.confirm_leave_modal(ctx, events);
        }

        // Space toggles playback unless a text field has focus.
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            events.push(UiEvent::Action("play-pause"));
        }
    }
}

impl eframe::App for HikariApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        match self.session.screen() {
            Screen::Start => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    events.extend(screens::start(ui, self.session.saved_projects()));
                });
            }
            Screen::Import => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    events.extend(screens::import(ui));
                });
            }
            Screen::Editor => self.editor_screen(ctx, &mut events),
        }

        self.notice_modal(ctx);

        for event in events {
            self.apply(ctx, event);
        }
    }
}
