//! Velocity estimation over a short window of pointer samples.

use smallvec::SmallVec;

/// Samples retained in the sliding window, oldest evicted first.
const WINDOW_CAPACITY: usize = 4;

/// Thresholds for [`VelocityEstimator`]. Velocities are in px/ms.
///
/// The defaults are empirically tuned; override them only when targeting
/// input devices with very different sampling characteristics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityConfig {
    /// Magnitudes below this are treated as under-reported by the coarse
    /// sampling window and get boosted.
    pub slow_velocity_cutoff: f32,
    /// Boost applied below `slow_velocity_cutoff`.
    pub slow_velocity_boost: f32,
    /// Magnitudes above this count as a significant (flick-like) gesture.
    pub significance_threshold: f32,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            slow_velocity_cutoff: 0.1,
            slow_velocity_boost: 1.5,
            significance_threshold: 0.6,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    y: f32,
    time_ms: i64,
}

/// Derives an instantaneous velocity from noisy `(position, time)` samples.
///
/// Velocity spans the whole window: `(newest_y - oldest_y)` over the elapsed
/// time. A zero-width time window leaves the previous velocity in place
/// rather than producing NaN.
#[derive(Clone, Debug, Default)]
pub struct VelocityEstimator {
    config: VelocityConfig,
    samples: SmallVec<[Sample; WINDOW_CAPACITY]>,
    last_y: Option<f32>,
    current: f32,
}

impl VelocityEstimator {
    pub fn new() -> Self {
        Self::with_config(VelocityConfig::default())
    }

    pub fn with_config(config: VelocityConfig) -> Self {
        Self {
            config,
            samples: SmallVec::new(),
            last_y: None,
            current: 0.0,
        }
    }

    /// Records a sample and returns its raw direction sign relative to the
    /// previous sample: `-1` upward, `1` downward, `0` for a tie or for the
    /// first sample after a reset.
    pub fn push(&mut self, y: f32, time_ms: i64) -> i8 {
        let direction = match self.last_y {
            Some(last) if y < last => -1,
            Some(last) if y > last => 1,
            _ => 0,
        };

        if self.samples.len() == WINDOW_CAPACITY {
            let _ = self.samples.remove(0);
        }
        self.samples.push(Sample { y, time_ms });

        if self.samples.len() >= 2 {
            let oldest = self.samples[0];
            let window_ms = (time_ms - oldest.time_ms) as f32;
            if window_ms > 0.0 {
                let mut velocity = (y - oldest.y) / window_ms;
                if velocity.abs() < self.config.slow_velocity_cutoff {
                    velocity *= self.config.slow_velocity_boost;
                }
                self.current = velocity;
            }
        }

        self.last_y = Some(y);
        direction
    }

    /// Current velocity in px/ms. Downward movement is positive.
    pub fn velocity(&self) -> f32 {
        self.current
    }

    /// Whether the gesture currently moves fast enough to count as a flick.
    pub fn is_significant(&self) -> bool {
        self.current.abs() > self.config.significance_threshold
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_y = None;
        self.current = 0.0;
    }
}
