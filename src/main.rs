// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hikari - Video Composition Editor
//!
//! A cross-platform desktop application for composing shapes, text and
//! images on a timeline, previewing playback and saving the result as
//! project files.

mod app;
mod commands;
mod config;
mod editor;
mod error;
mod io;
mod models;
mod playback;
mod render;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::HikariApp;
use config::EditorConfig;

fn main() -> Result<()> {
    let config = EditorConfig::load();

    // Initialize logging; RUST_LOG overrides the configured level
    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("{:#}; using defaults", e);
        EditorConfig::default()
    });

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Hikari - Video Composition Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Hikari",
        options,
        Box::new(move |_cc| Ok(Box::new(HikariApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
