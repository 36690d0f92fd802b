//! Release-time snap decision.

use crate::constants::SETTLE_WINDOW_SECS;
use crate::geometry::{Edge, Range, expanded_coord};

/// Outcome of a release: the boundary to settle at and whether it is the
/// expanded one for the configured edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    pub target: i32,
    pub expanded: bool,
}

/// Pick `range.min` or `range.max` for a release at `position` moving with
/// `velocity` (axis units per second, positive toward `max`).
///
/// A fling fast enough to cover the remaining distance to the far boundary
/// within [`SETTLE_WINDOW_SECS`] wins; otherwise the side of the midpoint the
/// child is on decides.
pub fn settle_target(position: i32, range: Range, velocity: f32) -> i32 {
    if position < range.mid() {
        let required = (range.max - position) as f32 / SETTLE_WINDOW_SECS;
        if velocity > required {
            range.max
        } else {
            range.min
        }
    } else {
        // required is <= 0 here
        let required = (range.min - position) as f32 / SETTLE_WINDOW_SECS;
        if velocity < required {
            range.min
        } else {
            range.max
        }
    }
}

pub fn decide(edge: Edge, position: i32, range: Range, velocity: f32) -> Snap {
    let target = settle_target(position, range, velocity);
    Snap {
        target,
        expanded: target == expanded_coord(edge, range),
    }
}
