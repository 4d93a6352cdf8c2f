use super::*;

/// Drives a detector the way the controller does: direction signs derived
/// from consecutive raw positions, velocity supplied explicitly so tests
/// control the threshold scaling.
struct Driver {
    detector: TransitionZoneDetector,
    drag_start_y: f32,
    last_y: Option<f32>,
    state: SheetState,
    viewport_height: Option<f32>,
    behaviour_assigned: bool,
    velocity: f32,
    significant: bool,
}

impl Driver {
    fn new(drag_start_y: f32, state: SheetState) -> Self {
        Self {
            detector: TransitionZoneDetector::new(),
            drag_start_y,
            last_y: None,
            state,
            viewport_height: Some(1000.0),
            behaviour_assigned: true,
            velocity: 0.0,
            significant: false,
        }
    }

    fn movement(&mut self, now_ms: i64, y: f32) {
        let direction_sample = match self.last_y {
            Some(last) if y < last => -1,
            Some(last) if y > last => 1,
            _ => 0,
        };
        self.last_y = Some(y);
        self.detector.evaluate(&ZoneInput {
            now_ms,
            raw_y: y,
            drag_start_y: self.drag_start_y,
            direction_sample,
            current_state: self.state,
            viewport_height: self.viewport_height,
            velocity: self.velocity,
            velocity_is_significant: self.significant,
            behaviour_assigned: self.behaviour_assigned,
        });
    }
}

#[test]
fn steady_upward_drag_from_default_targets_full() {
    let mut driver = Driver::new(500.0, SheetState::Default);

    // 30 px per 60 ms steps; stays below the significance threshold so the
    // full 150 px entry distance (1000 * 0.15) applies.
    let mut y = 500.0;
    for step in 1..=9 {
        y -= 30.0;
        driver.movement(step * 60, y);
    }

    // Mean of the last five samples (350..230) is 290: 210 px past start.
    assert!(driver.detector.in_zone());
    assert_eq!(driver.detector.target(), Some(SheetState::Full));
}

#[test]
fn downward_drag_from_default_targets_closed() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    let mut y = 500.0;
    for step in 1..=9 {
        y += 30.0;
        driver.movement(step * 60, y);
    }
    assert_eq!(driver.detector.target(), Some(SheetState::Closed));
}

#[test]
fn upward_drag_from_closed_targets_default() {
    let mut driver = Driver::new(900.0, SheetState::Closed);
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 700.0);
    assert_eq!(driver.detector.target(), Some(SheetState::Default));
}

#[test]
fn downward_drag_from_full_targets_default() {
    let mut driver = Driver::new(100.0, SheetState::Full);
    driver.velocity = 1.0;
    driver.significant = true;
    driver.movement(16, 300.0);
    assert_eq!(driver.detector.target(), Some(SheetState::Default));
}

#[test]
fn upward_drag_from_full_never_enters_a_zone() {
    let mut driver = Driver::new(300.0, SheetState::Full);
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 50.0);
    assert!(!driver.detector.in_zone());
}

#[test]
fn small_drag_stays_out_of_any_zone() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.movement(16, 490.0);
    assert!(!driver.detector.in_zone());
    assert_eq!(driver.detector.target(), None);
}

#[test]
fn minimum_travel_floor_applies_below_scaled_thresholds() {
    // Tiny viewport: the scaled entry threshold (22.5 px) sits under the
    // 30 px floor, which must still gate entry.
    let mut driver = Driver::new(100.0, SheetState::Default);
    driver.viewport_height = Some(150.0);
    driver.movement(60, 80.0);
    driver.movement(120, 76.0);
    driver.movement(180, 72.0);
    driver.movement(240, 68.0);

    // Stable delta is -26: past the threshold, under the floor.
    assert!(!driver.detector.in_zone());
}

#[test]
fn significant_velocity_lowers_entry_and_substitutes_for_consistency() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.velocity = -1.0;
    driver.significant = true;

    // Single sample, 100 px past start: the velocity factor caps at 0.5,
    // halving the entry threshold to 75 px.
    driver.movement(16, 400.0);

    assert!(driver.detector.in_zone());
    assert_eq!(driver.detector.target(), Some(SheetState::Full));
    assert_eq!(driver.detector.intent().enter_position(), 400.0);
}

#[test]
fn missing_viewport_forces_the_detector_out() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 400.0);
    assert!(driver.detector.in_zone());

    driver.viewport_height = None;
    driver.movement(32, 390.0);
    assert!(!driver.detector.in_zone());
    assert_eq!(driver.detector.target(), None);
}

#[test]
fn unassigned_behaviour_forces_the_detector_out() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.behaviour_assigned = false;
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 400.0);
    assert!(!driver.detector.in_zone());
}

#[test]
fn zone_is_sticky_between_reversal_edge_and_entry_threshold() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 400.0);
    assert!(driver.detector.in_zone());

    // Back to zero velocity: entry would need 150 px, the reversal edge is
    // 72 px (150 * 0.6 * 0.8). A stable delta of about -100 sits between
    // the two and must hold the zone.
    driver.velocity = 0.0;
    driver.significant = false;
    driver.movement(80, 400.0);
    driver.movement(140, 400.0);

    assert!(driver.detector.in_zone());
    assert_eq!(driver.detector.target(), Some(SheetState::Full));
}

#[test]
fn reversal_clears_a_full_intent() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 400.0);
    assert!(driver.detector.in_zone());

    // Cursor returns toward the start: the smoothed delta crosses back past
    // -72 px and the intent must clear before release.
    driver.velocity = 0.0;
    driver.significant = false;
    driver.movement(80, 480.0);

    assert!(!driver.detector.in_zone());
    assert_eq!(driver.detector.target(), None);
}

#[test]
fn reversal_clears_a_closed_intent() {
    let mut driver = Driver::new(400.0, SheetState::Default);
    driver.velocity = 1.0;
    driver.significant = true;
    driver.movement(16, 500.0);
    assert_eq!(driver.detector.target(), Some(SheetState::Closed));

    driver.velocity = 0.0;
    driver.significant = false;
    driver.movement(80, 420.0);

    assert!(!driver.detector.in_zone());
}

#[test]
fn idle_evaluations_inside_the_throttle_window_are_skipped() {
    let mut driver = Driver::new(500.0, SheetState::Default);

    // Build consistency while staying short of the 150 px entry distance.
    driver.movement(60, 400.0);
    driver.movement(120, 380.0);
    driver.movement(180, 360.0);
    assert!(!driver.detector.in_zone());

    // 30 ms after the last check, this sample would push the smoothed delta
    // past the entry threshold, but the idle throttle skips the decision.
    driver.movement(210, 200.0);
    assert!(!driver.detector.in_zone());

    // Outside the window the same position commits.
    driver.movement(280, 200.0);
    assert!(driver.detector.in_zone());
    assert_eq!(driver.detector.target(), Some(SheetState::Full));
}

#[test]
fn throttle_does_not_apply_while_in_a_zone() {
    let mut driver = Driver::new(500.0, SheetState::Default);
    driver.velocity = -1.0;
    driver.significant = true;
    driver.movement(16, 400.0);
    assert!(driver.detector.in_zone());

    // 10 ms later, insignificant velocity: still evaluated, and the large
    // reversal clears the zone immediately.
    driver.velocity = 0.0;
    driver.significant = false;
    driver.movement(26, 490.0);
    assert!(!driver.detector.in_zone());
}

#[test]
fn direction_flips_only_after_two_consecutive_samples() {
    let mut intent = TransitionIntent::default();

    intent.observe_direction(-1);
    assert_eq!(intent.direction(), -1);
    intent.observe_direction(-1);
    assert_eq!(intent.direction(), -1);

    // A single reversed sample must not flip the committed direction.
    intent.observe_direction(1);
    assert_eq!(intent.direction(), -1);

    // The second consecutive one does.
    intent.observe_direction(1);
    assert_eq!(intent.direction(), 1);
}

#[test]
fn ties_do_not_touch_direction_state() {
    let mut intent = TransitionIntent::default();
    intent.observe_direction(-1);
    intent.observe_direction(-1);
    let consistency = intent.direction_consistency();

    intent.observe_direction(0);
    assert_eq!(intent.direction(), -1);
    assert_eq!(intent.direction_consistency(), consistency);
}

#[test]
fn stable_position_uses_raw_value_below_three_samples() {
    let mut intent = TransitionIntent::default();
    intent.observe_position(100.0);
    assert_eq!(intent.stable_position(), 100.0);
    intent.observe_position(200.0);
    assert_eq!(intent.stable_position(), 200.0);

    intent.observe_position(300.0);
    assert_eq!(intent.stable_position(), 200.0);
}

#[test]
fn smoothing_buffer_holds_the_last_five_samples() {
    let mut intent = TransitionIntent::default();
    for y in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0] {
        intent.observe_position(y);
    }
    // Mean of 20..60.
    assert_eq!(intent.stable_position(), 40.0);
}
