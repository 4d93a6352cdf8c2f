//! Transition-zone hysteresis: deciding, mid-drag, which resting state the
//! gesture intends and whether that intent has been reversed.
//!
//! The detector consumes every move sample but runs its (comparatively
//! expensive) decision step at most once per throttle interval while idle.
//! Once committed to a zone it evaluates every sample, so a reversal is
//! never missed. Entry and exit use different thresholds: exiting requires
//! crossing back well inside the entry distance, which keeps the decision
//! from flickering when the cursor hovers near the boundary.

use smallvec::SmallVec;

use sheetkit_core::SheetState;

/// Samples in the position-smoothing buffer.
const SMOOTHING_WINDOW: usize = 5;
/// Below this many samples the raw position is used unsmoothed.
const SMOOTHING_MIN_SAMPLES: usize = 3;

/// Thresholds for [`TransitionZoneDetector`].
///
/// The defaults are empirically tuned values carried over unchanged; treat
/// them as configuration, not physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneConfig {
    /// Entry distance as a fraction of the viewport height.
    pub base_threshold_ratio: f32,
    /// Exit threshold as a fraction of the entry threshold.
    pub exit_ratio: f32,
    /// Fraction of the exit threshold the stable delta must cross back past
    /// to count as a reversal.
    pub reversal_ratio: f32,
    /// Scales |velocity| into the threshold reduction factor.
    pub velocity_factor_scale: f32,
    /// Upper bound on the velocity-driven threshold reduction.
    pub velocity_factor_cap: f32,
    /// Absolute minimum travel before any zone entry.
    pub min_travel_px: f32,
    /// Idle evaluations closer together than this are skipped.
    pub min_check_interval_ms: i64,
    /// Consecutive same-sign direction samples required for entry without
    /// significant velocity.
    pub required_consistency: u32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            base_threshold_ratio: 0.15,
            exit_ratio: 0.6,
            reversal_ratio: 0.8,
            velocity_factor_scale: 2.0,
            velocity_factor_cap: 0.5,
            min_travel_px: 30.0,
            min_check_interval_ms: 50,
            required_consistency: 3,
        }
    }
}

/// One move sample plus the context the decision needs.
#[derive(Clone, Copy, Debug)]
pub struct ZoneInput {
    pub now_ms: i64,
    /// Raw cursor Y of this sample.
    pub raw_y: f32,
    /// Cursor Y at drag start.
    pub drag_start_y: f32,
    /// Direction sign of this sample (from the velocity estimator).
    pub direction_sample: i8,
    /// The resting state the drag started from.
    pub current_state: SheetState,
    /// `None` while layout has not been measured; forces the detector out.
    pub viewport_height: Option<f32>,
    /// Current velocity in px/ms.
    pub velocity: f32,
    pub velocity_is_significant: bool,
    /// Whether the current state has a configured drag behaviour. States
    /// without one never produce a zone.
    pub behaviour_assigned: bool,
}

/// The mutable hysteresis state, kept as an explicit struct so the
/// algorithm is auditable and testable apart from gesture plumbing.
#[derive(Clone, Debug, Default)]
pub struct TransitionIntent {
    in_zone: bool,
    target: Option<SheetState>,
    /// Raw cursor Y at the moment the zone was entered (diagnostic only).
    enter_position: f32,
    direction: i8,
    last_direction: i8,
    direction_consistency: u32,
    samples: SmallVec<[f32; SMOOTHING_WINDOW]>,
    stable_position: f32,
}

impl TransitionIntent {
    /// Feeds one raw direction sign, debouncing jitter: the committed
    /// direction only flips after two consecutive same-sign samples.
    pub fn observe_direction(&mut self, sign: i8) {
        if sign == 0 {
            return;
        }
        if sign == self.last_direction {
            self.direction_consistency += 1;
        } else {
            self.direction_consistency = 1;
        }
        if self.direction_consistency >= 2 || self.direction == 0 {
            self.direction = sign;
        }
        self.last_direction = sign;
    }

    /// Feeds one raw cursor position into the mean filter.
    pub fn observe_position(&mut self, raw_y: f32) {
        if self.samples.len() == SMOOTHING_WINDOW {
            let _ = self.samples.remove(0);
        }
        self.samples.push(raw_y);
        self.stable_position = if self.samples.len() >= SMOOTHING_MIN_SAMPLES {
            self.samples.iter().sum::<f32>() / self.samples.len() as f32
        } else {
            raw_y
        };
    }

    fn enter(&mut self, target: SheetState, raw_y: f32) {
        if !self.in_zone {
            self.enter_position = raw_y;
        }
        self.in_zone = true;
        self.target = Some(target);
    }

    fn leave(&mut self) {
        self.in_zone = false;
        self.target = None;
    }

    pub fn in_zone(&self) -> bool {
        self.in_zone
    }

    pub fn target(&self) -> Option<SheetState> {
        self.target
    }

    pub fn enter_position(&self) -> f32 {
        self.enter_position
    }

    /// The debounced movement direction: `-1` upward, `1` downward, `0`
    /// before any movement.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn direction_consistency(&self) -> u32 {
        self.direction_consistency
    }

    /// Mean-filtered cursor position (raw below three samples).
    pub fn stable_position(&self) -> f32 {
        self.stable_position
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Stateful hysteresis machine deciding the gesture's transition intent.
#[derive(Clone, Debug, Default)]
pub struct TransitionZoneDetector {
    config: ZoneConfig,
    intent: TransitionIntent,
    last_check_ms: Option<i64>,
}

impl TransitionZoneDetector {
    pub fn new() -> Self {
        Self::with_config(ZoneConfig::default())
    }

    pub fn with_config(config: ZoneConfig) -> Self {
        Self {
            config,
            intent: TransitionIntent::default(),
            last_check_ms: None,
        }
    }

    pub fn in_zone(&self) -> bool {
        self.intent.in_zone()
    }

    pub fn target(&self) -> Option<SheetState> {
        self.intent.target()
    }

    pub fn intent(&self) -> &TransitionIntent {
        &self.intent
    }

    /// Clears all hysteresis state for a new drag session.
    pub fn reset(&mut self) {
        self.intent.reset();
        self.last_check_ms = None;
    }

    /// Consumes one move sample and updates the zone decision.
    pub fn evaluate(&mut self, input: &ZoneInput) {
        // Smoothing and direction debouncing track every sample; only the
        // decision below is throttled.
        self.intent.observe_direction(input.direction_sample);
        self.intent.observe_position(input.raw_y);

        if let Some(last) = self.last_check_ms {
            let idle = !input.velocity_is_significant && !self.intent.in_zone();
            if idle && input.now_ms - last < self.config.min_check_interval_ms {
                return;
            }
        }
        self.last_check_ms = Some(input.now_ms);

        let viewport_height = match input.viewport_height {
            Some(height) if input.behaviour_assigned => height,
            _ => {
                self.intent.leave();
                return;
            }
        };

        let stable_delta = self.intent.stable_position() - input.drag_start_y;

        let base_threshold = viewport_height * self.config.base_threshold_ratio;
        let velocity_factor = (input.velocity.abs() * self.config.velocity_factor_scale)
            .min(self.config.velocity_factor_cap);
        let enter_threshold = base_threshold * (1.0 - velocity_factor);
        let exit_threshold = enter_threshold * self.config.exit_ratio;

        if self.intent.in_zone() {
            if let Some(target) = self.intent.target() {
                let reversal_edge = exit_threshold * self.config.reversal_ratio;
                let reversed = match target {
                    SheetState::Full => stable_delta > -reversal_edge,
                    SheetState::Closed => stable_delta < reversal_edge,
                    SheetState::Default => match input.current_state {
                        // Heading up out of Closed: reversal is moving back down.
                        SheetState::Closed => stable_delta > -reversal_edge,
                        // Heading down out of Full: reversal is moving back up.
                        SheetState::Full => stable_delta < reversal_edge,
                        SheetState::Default => false,
                    },
                };
                if !reversed {
                    // Sticky zone.
                    return;
                }
                log::debug!("transition intent reversed away from {target}");
            }
        }

        let confident = self.intent.direction_consistency() >= self.config.required_consistency
            || input.velocity_is_significant;
        let travelled = stable_delta.abs() > self.config.min_travel_px;
        let upward = stable_delta < -enter_threshold;
        let downward = stable_delta > enter_threshold;

        let new_target = if confident && travelled {
            match input.current_state {
                SheetState::Default if upward => Some(SheetState::Full),
                SheetState::Default if downward => Some(SheetState::Closed),
                SheetState::Closed if upward => Some(SheetState::Default),
                SheetState::Full if downward => Some(SheetState::Default),
                _ => None,
            }
        } else {
            None
        };

        match new_target {
            Some(target) => {
                if !self.intent.in_zone() {
                    log::debug!(
                        "entered transition zone toward {target} at y={}",
                        input.raw_y
                    );
                }
                self.intent.enter(target, input.raw_y);
            }
            None => self.intent.leave(),
        }
    }
}

#[cfg(test)]
#[path = "tests/zone_tests.rs"]
mod tests;
