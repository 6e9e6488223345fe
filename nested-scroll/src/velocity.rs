use std::collections::VecDeque;

use crate::Vec2;

/// Number of trailing samples used by default.
pub const DEFAULT_SAMPLE_WINDOW: usize = 3;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    position: Vec2,
    time_ms: u64,
}

/// Pointer velocity estimate over a short trailing window.
///
/// Each segment between consecutive samples contributes its velocity weighted by its duration
/// and by recency, so one noisy sample cannot dominate the estimate.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    window: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_SAMPLE_WINDOW)
    }

    /// `window` is clamped to at least 2 samples.
    pub fn with_window(window: usize) -> Self {
        let window = window.max(2);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn add_sample(&mut self, position: Vec2, time_ms: u64) {
        if let Some(last) = self.samples.back_mut() {
            if time_ms < last.time_ms {
                // Out-of-order timestamps restart the window.
                self.samples.clear();
            } else if time_ms == last.time_ms {
                last.position = position;
                return;
            }
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { position, time_ms });
    }

    /// Pointer velocity in px/ms. Zero with fewer than two recent samples.
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples.back() else {
            return Vec2::ZERO;
        };
        let recent: Vec<&Sample> = self
            .samples
            .iter()
            .filter(|s| newest.time_ms - s.time_ms <= HORIZON_MS)
            .collect();

        let mut weighted = Vec2::ZERO;
        let mut total_weight = 0.0;
        for (i, pair) in recent.windows(2).enumerate() {
            let dt = (pair[1].time_ms - pair[0].time_ms) as f64;
            if dt <= 0.0 {
                continue;
            }
            let weight = dt * (i + 1) as f64;
            let d = pair[1].position - pair[0].position;
            weighted.x += d.x / dt * weight;
            weighted.y += d.y / dt * weight;
            total_weight += weight;
        }
        if total_weight == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(weighted.x / total_weight, weighted.y / total_weight)
    }
}
