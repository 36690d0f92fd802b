//! Settle animation: interpolates the child from its release position to the
//! chosen boundary.

use std::time::Duration;

use crate::constants::{BASE_SETTLE_DURATION, MAX_SETTLE_DURATION};

/// How long a settle over `distance` should take.
///
/// A release velocity shortens the move so the child keeps roughly the speed
/// it was flung with; without one, the duration scales with the share of the
/// range being crossed. Both are capped at [`MAX_SETTLE_DURATION`].
pub fn settle_duration(distance: i32, range_len: i32, velocity: f32) -> Duration {
    let distance = distance.unsigned_abs();
    if distance == 0 {
        return Duration::ZERO;
    }
    let speed = velocity.abs();
    let duration = if speed > 0.0 {
        // A near-zero speed overflows `Duration`; it falls back to the cap.
        Duration::try_from_secs_f32(4.0 * distance as f32 / speed).unwrap_or(MAX_SETTLE_DURATION)
    } else if range_len > 0 {
        BASE_SETTLE_DURATION.mul_f32(distance as f32 / range_len as f32 + 1.0)
    } else {
        BASE_SETTLE_DURATION
    };
    duration.min(MAX_SETTLE_DURATION)
}

#[derive(Debug, Clone)]
pub struct SettleAnimation {
    from: i32,
    to: i32,
    current: i32,
    elapsed: Duration,
    duration: Duration,
}

impl SettleAnimation {
    pub fn new(from: i32, to: i32, duration: Duration) -> Self {
        let current = if duration.is_zero() { to } else { from };
        Self {
            from,
            to,
            current,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Animation for a move inside a range of `range_len`, released with
    /// `velocity`.
    pub fn for_move(from: i32, to: i32, range_len: i32, velocity: f32) -> Self {
        Self::new(from, to, settle_duration(to - from, range_len, velocity))
    }

    /// Advance by `dt` and return the interpolated coordinate.
    pub fn update(&mut self, dt: Duration) -> i32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        let t = self.progress();
        // Ease-out cubic: 1 - (1-t)^3
        let eased = 1.0 - (1.0 - t).powi(3);
        self.current = if t >= 1.0 {
            self.to
        } else {
            self.from + ((self.to - self.from) as f32 * eased).round() as i32
        };
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn target(&self) -> i32 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_is_done_immediately() {
        let anim = SettleAnimation::for_move(7, 7, 40, 0.0);
        assert!(anim.is_done());
        assert_eq!(anim.current(), 7);
        assert_eq!(anim.duration(), Duration::ZERO);
    }

    #[test]
    fn duration_scales_with_distance_and_is_capped() {
        assert_eq!(settle_duration(0, 100, 0.0), Duration::ZERO);
        assert_eq!(
            settle_duration(100, 100, 0.0),
            BASE_SETTLE_DURATION.mul_f32(2.0)
        );
        assert_eq!(settle_duration(100, 10, 0.0), MAX_SETTLE_DURATION);
        assert_eq!(
            settle_duration(50, 100, 0.0),
            BASE_SETTLE_DURATION.mul_f32(1.5)
        );
        // 4 * 20 / 400 = 0.2s
        let flung = settle_duration(-20, 100, -400.0);
        assert!((flung.as_secs_f32() - 0.2).abs() < 1e-4);
        assert_eq!(settle_duration(20, 100, 1.0), MAX_SETTLE_DURATION);
    }

    #[test]
    fn tiny_or_non_finite_velocity_stays_bounded() {
        assert_eq!(settle_duration(4, 16, 1e-20), MAX_SETTLE_DURATION);
        assert_eq!(settle_duration(-4, 16, -f32::MIN_POSITIVE), MAX_SETTLE_DURATION);
        assert_eq!(settle_duration(4, 16, f32::INFINITY), Duration::ZERO);
        assert_eq!(
            settle_duration(8, 16, f32::NAN),
            BASE_SETTLE_DURATION.mul_f32(1.5)
        );
    }

    #[test]
    fn interpolation_is_monotonic_and_lands_on_target() {
        let mut anim = SettleAnimation::new(-30, 0, Duration::from_millis(160));
        let mut last = anim.current();
        while !anim.is_done() {
            let next = anim.update(Duration::from_millis(16));
            assert!(next >= last);
            assert!(next <= 0);
            last = next;
        }
        assert_eq!(anim.current(), 0);
        assert_eq!(anim.target(), 0);
    }

    #[test]
    fn ease_out_front_loads_the_move() {
        let mut anim = SettleAnimation::new(0, 100, Duration::from_millis(100));
        let early = anim.update(Duration::from_millis(40));
        // 1 - 0.6^3 = 0.784
        assert_eq!(early, 78);
    }
}
