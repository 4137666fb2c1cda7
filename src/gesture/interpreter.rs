//! Pointer position to split percentage.

use crate::foundation::core::Point;

/// Everything that decides whether a drag may move the split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragGate {
    pub unveil_on_touch: bool,
    pub automatic_enabled: bool,
    pub has_both_layers: bool,
    pub session_running: bool,
}

impl DragGate {
    pub fn allows_drag(self) -> bool {
        self.unveil_on_touch
            && !self.automatic_enabled
            && self.has_both_layers
            && !self.session_running
    }
}

/// Candidate percentage for a pointer at `pos` (relative to the frame's top-left).
///
/// The value is the pointer's distance from the bottom-left corner as a fraction of the
/// frame diagonal, floored. Positions outside the frame can exceed 100; callers feed the
/// result through the percentage validator. Returns `None` for an empty frame.
pub fn percent_for_pointer(pos: Point, width: f64, height: f64) -> Option<i32> {
    let max_distance = width.hypot(height);
    if max_distance.is_nan() || max_distance <= 0.0 || !pos.x.is_finite() || !pos.y.is_finite() {
        return None;
    }
    let distance = pos.x.hypot(height - pos.y);
    let fraction = distance / max_distance;
    let percent = (fraction * 100.0).floor();
    Some(percent.min(f64::from(i32::MAX)) as i32)
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/interpreter.rs"]
mod tests;
