//! Press qualification before a drag session starts.
//!
//! A reorder drag must not steal ordinary taps and scrolls, so a press only
//! turns into a drag once it has either been held for the configured
//! duration or travelled the configured distance. The gate is a separate
//! object so the resolver itself stays a plain `Idle -> Dragging -> Idle`
//! machine.

use std::time::{Duration, Instant};

use crate::config::ReorderConfig;

/// A press that has not yet qualified.
#[derive(Debug, Clone, Copy)]
struct PendingPress {
    index: usize,
    at: Instant,
}

/// Decides when a press on a row qualifies as a drag start.
#[derive(Debug, Clone)]
pub struct PressGate {
    min_press_duration: Duration,
    min_drag_distance: f64,
    pending: Option<PendingPress>,
}

impl PressGate {
    pub fn new(config: &ReorderConfig) -> Self {
        Self {
            min_press_duration: config.min_press_duration,
            min_drag_distance: config.min_drag_distance,
            pending: None,
        }
    }

    /// Record a press on the row at `index`. Replaces any earlier pending press.
    pub fn press(&mut self, index: usize, at: Instant) {
        self.pending = Some(PendingPress { index, at });
    }

    /// Check a pending press against the thresholds.
    ///
    /// Returns the pressed row once the press qualifies; the press is then
    /// consumed and the caller should begin a drag session for that row.
    pub fn poll(&mut self, translation: f64, now: Instant) -> Option<usize> {
        let press = self.pending?;
        let held = now.saturating_duration_since(press.at) >= self.min_press_duration;
        let moved = translation.abs() >= self.min_drag_distance;
        if held || moved {
            self.pending = None;
            Some(press.index)
        } else {
            None
        }
    }

    /// Release before qualifying. Returns the row, which the host may treat as a tap.
    pub fn release(&mut self) -> Option<usize> {
        self.pending.take().map(|press| press.index)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
