// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback timing: clocks, the time controller and the per-frame loop.

pub mod clock;
pub mod controller;
pub mod driver;
