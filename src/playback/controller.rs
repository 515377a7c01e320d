// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback time state machine.
//!
//! While playing, the current time is always `anchor time + (now - anchor
//! wall clock)`; per-tick deltas are never accumulated, so frame jitter does
//! not drift the timeline. Reaching the end wraps to 0 and re-anchors.

use std::time::Duration;

/// Snapshot of the controller, read by the renderer and the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    pub is_playing: bool,
}

/// Wall-clock instant and timeline position captured when playback (re)started.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    wall: Duration,
    time: f64,
}

/// Owns the current time and the paused/playing state.
#[derive(Debug, Clone)]
pub struct TimeController {
    current: f64,
    duration: f64,
    anchor: Option<Anchor>,
}

impl TimeController {
    /// Paused at time 0.
    pub fn new(duration: f64) -> Self {
        Self {
            current: 0.0,
            duration,
            anchor: None,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_playing(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_time: self.current,
            is_playing: self.is_playing(),
        }
    }

    /// Paused -> Playing. No effect when already playing.
    pub fn play(&mut self, now: Duration) {
        if self.anchor.is_none() {
            log::debug!("Playback started at {:.3}s", self.current);
            self.anchor = Some(Anchor {
                wall: now,
                time: self.current,
            });
        }
    }

    /// Playing -> Paused, freezing the last computed time.
    pub fn pause(&mut self) {
        if self.anchor.take().is_some() {
            log::debug!("Playback paused at {:.3}s", self.current);
        }
    }

    /// Flip between playing and paused. Returns whether playback is now running.
    pub fn toggle(&mut self, now: Duration) -> bool {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
        self.is_playing()
    }

    /// Recompute the current time from the anchor. Paused controllers return
    /// the frozen time unchanged.
    pub fn tick(&mut self, now: Duration) -> f64 {
        let Some(anchor) = self.anchor else {
            return self.current;
        };

        let elapsed = now.saturating_sub(anchor.wall).as_secs_f64();
        let time = anchor.time + elapsed;
        if time >= self.duration {
            self.current = 0.0;
            self.anchor = Some(Anchor { wall: now, time: 0.0 });
        } else {
            self.current = time;
        }
        self.current
    }

    /// Jump to `time`, clamped into `[0, duration)`. Re-anchors when playing.
    pub fn seek(&mut self, time: f64, now: Duration) {
        self.current = self.clamp(time);
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.wall = now;
            anchor.time = self.current;
        }
    }

    /// Adopt a new duration (e.g. after loading a project) and rewind to 0.
    pub fn reset(&mut self, duration: f64, now: Duration) {
        self.duration = duration;
        self.seek(0.0, now);
    }

    fn clamp(&self, time: f64) -> f64 {
        if !time.is_finite() || time <= 0.0 {
            0.0
        } else if time >= self.duration {
            // Largest representable time still before the end.
            (self.duration - f64::EPSILON * self.duration.max(1.0)).max(0.0)
        } else {
            time
        }
    }
}
