use std::collections::VecDeque;
use std::time::Instant;

use crate::constants::VELOCITY_HORIZON;

#[derive(Debug, Clone, Copy)]
struct Sample {
    coord: i32,
    at: Instant,
}

/// Estimates the drag velocity on the active axis from timed samples.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, coord: i32, at: Instant) {
        // Out-of-order timestamps restart the estimate.
        if let Some(last) = self.samples.back()
            && at < last.at
        {
            self.samples.clear();
        }
        self.samples.push_back(Sample { coord, at });
        while let Some(first) = self.samples.front() {
            if at.duration_since(first.at) > VELOCITY_HORIZON {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Units per second over the retained samples; zero until two samples
    /// with distinct timestamps exist.
    pub fn velocity(&self) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = last.at.duration_since(first.at).as_secs_f32();
        if dt <= 0.0 {
            return 0.0;
        }
        (last.coord - first.coord) as f32 / dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
