// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Hikari editor.
//!
//! Panels never touch the session directly; they return [`UiEvent`]s that
//! the app dispatches after the frame's layout is done.

use crate::commands::Command;

pub mod canvas;
pub mod properties;
pub mod screens;
pub mod timeline;
pub mod toolbar;

/// Something a panel asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A named action, resolved through the action table.
    Action(&'static str),
    /// A command carrying data (paths, ids, times).
    Command(Command),
}
