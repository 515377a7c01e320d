// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame-driven playback loop.
//!
//! The loop never blocks: each tick advances time, refreshes the time
//! display, renders and asks the scheduler for another frame. Once the
//! controller is paused the next tick returns [`Tick::Stopped`] without
//! rescheduling, which is how playback ends.

use super::clock::Clock;
use super::controller::TimeController;
use crate::io::media::ImageAssets;
use crate::models::project::Project;
use crate::render::{self, FrameReport, Surface};
use crate::util::time::format_time_display;

/// Host primitive that arranges for another tick on the next display frame.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Schedules frames by asking egui to repaint.
pub struct EguiScheduler<'a>(pub &'a egui::Context);

impl FrameScheduler for EguiScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_repaint();
    }
}

/// Outcome of one [`PlaybackLoop::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Playback is paused; no frame was drawn or scheduled.
    Stopped,
    /// A frame was drawn at `report.time` and the next one scheduled.
    Rendered(FrameReport),
}

/// Drives the time controller and renderer once per display frame.
pub struct PlaybackLoop<C: Clock> {
    clock: C,
    time_display: String,
    frames: u64,
}

impl<C: Clock> PlaybackLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            time_display: format_time_display(0.0, 0.0),
            frames: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// `m:ss / m:ss` as of the last update.
    pub fn time_display(&self) -> &str {
        &self.time_display
    }

    /// Frames rendered while playing since the loop was created.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Refresh the time display without ticking (after seeks, loads, pauses).
    pub fn refresh_display(&mut self, time: &TimeController) {
        self.time_display = format_time_display(time.current_time(), time.duration());
    }

    /// Start playback and schedule the first frame.
    pub fn start(&mut self, time: &mut TimeController, scheduler: &mut dyn FrameScheduler) {
        time.play(self.clock.now());
        scheduler.request_frame();
    }

    /// Pause playback. A frame already in flight still completes.
    pub fn stop(&mut self, time: &mut TimeController) {
        time.pause();
        self.refresh_display(time);
    }

    /// Toggle playback, scheduling a frame when it starts. Returns the new playing state.
    pub fn toggle(
        &mut self,
        time: &mut TimeController,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        let playing = time.toggle(self.clock.now());
        if playing {
            scheduler.request_frame();
        } else {
            self.refresh_display(time);
        }
        playing
    }

    /// Run one scheduled frame.
    pub fn tick(
        &mut self,
        time: &mut TimeController,
        project: &Project,
        assets: &ImageAssets,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Tick {
        if !time.is_playing() {
            return Tick::Stopped;
        }

        let current = time.tick(self.clock.now());
        self.time_display = format_time_display(current, time.duration());
        let report = render::draw(surface, project, current, assets);
        self.frames += 1;
        scheduler.request_frame();
        Tick::Rendered(report)
    }
}
