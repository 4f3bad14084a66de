//! Resolver configuration.

use std::time::Duration;

use loom_core::Axis;

/// Options for drag reordering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReorderConfig {
    /// Axis the list is laid out along
    pub axis: Axis,
    /// Gap between neighbouring items along the axis
    pub spacing: f64,
    /// Hold time after which a press turns into a drag
    pub min_press_duration: Duration,
    /// Travel after which a press turns into a drag
    pub min_drag_distance: f64,
    /// Idle time after which an unfinished session is cancelled
    pub session_timeout: Option<Duration>,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            spacing: 0.0,
            min_press_duration: Duration::from_millis(500),
            min_drag_distance: 8.0,
            session_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl ReorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the gap between items. Negative values count as zero.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_min_press_duration(mut self, duration: Duration) -> Self {
        self.min_press_duration = duration;
        self
    }

    pub fn with_min_drag_distance(mut self, distance: f64) -> Self {
        self.min_drag_distance = distance;
        self
    }

    /// Set or clear the stale-session timeout.
    pub fn with_session_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub(crate) fn effective_spacing(&self) -> f64 {
        if self.spacing > 0.0 {
            self.spacing
        } else {
            0.0
        }
    }
}
