//! Shared crate-wide constants.

use std::time::Duration;

/// Window, in seconds, a release velocity must be able to cover the remaining
/// distance in for a fling to reach the far boundary.
///
/// A release at position `p` on the min side of the midpoint flings to `max`
/// when `v > (max - p) / SETTLE_WINDOW_SECS`; the max side mirrors this with
/// the distance to `min`. Anything slower settles to the near boundary.
pub const SETTLE_WINDOW_SECS: f32 = 0.25;

/// Settle duration for a move spanning the whole range at zero velocity is
/// twice this; shorter moves scale down toward it.
pub const BASE_SETTLE_DURATION: Duration = Duration::from_millis(256);

/// Upper bound for any settle animation.
pub const MAX_SETTLE_DURATION: Duration = Duration::from_millis(600);

/// How far back the velocity tracker looks when a gesture is released.
///
/// Samples older than this relative to the newest one are dropped so a drag
/// that paused before release reports a velocity near zero.
pub const VELOCITY_HORIZON: Duration = Duration::from_millis(100);
