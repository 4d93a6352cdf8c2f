//! Gesture controller: composes the velocity estimator, offset mappings,
//! and zone detector into a per-sheet drag pipeline.
//!
//! The controller never owns the state machine; the operations that read or
//! commit resting states take it by reference, so the machine stays equally
//! drivable by plain commands.

use sheetkit_core::{SheetState, SheetStateMachine, StatePositions};

use crate::offset::{DragBehaviour, DragTuning};
use crate::velocity::{VelocityConfig, VelocityEstimator};
use crate::zone::{TransitionZoneDetector, ZoneConfig, ZoneInput};

/// A drag behaviour assignment for one resting state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateBehaviour {
    pub state: SheetState,
    pub behaviour: DragBehaviour,
    pub tuning: DragTuning,
}

impl StateBehaviour {
    pub fn new(state: SheetState, behaviour: DragBehaviour) -> Self {
        Self {
            state,
            behaviour,
            tuning: DragTuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: DragTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// At most one behaviour assignment per resting state; re-assigning a state
/// overwrites the prior entry.
#[derive(Clone, Debug, Default)]
pub struct BehaviourMap {
    entries: Vec<StateBehaviour>,
}

impl BehaviourMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: SheetState) -> Option<&StateBehaviour> {
        self.entries.iter().find(|entry| entry.state == state)
    }

    pub fn is_assigned(&self, state: SheetState) -> bool {
        self.get(state).is_some()
    }

    pub fn set(&mut self, entry: StateBehaviour) {
        match self.entries.iter_mut().find(|e| e.state == entry.state) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

impl FromIterator<StateBehaviour> for BehaviourMap {
    fn from_iter<I: IntoIterator<Item = StateBehaviour>>(iter: I) -> Self {
        let mut map = Self::new();
        for entry in iter {
            map.set(entry);
        }
        map
    }
}

/// Ephemeral per-gesture state, created on drag start and discarded on end.
///
/// The behaviour and tuning are frozen here so a mid-drag re-assignment
/// never changes the mapping under the user's finger.
#[derive(Clone, Copy, Debug)]
struct DragSession {
    drag_start_y: f32,
    initial_sheet_position: f32,
    behaviour: DragBehaviour,
    tuning: DragTuning,
}

/// Consumes raw gesture events and produces the frame's visual offset and
/// the current transition intent.
#[derive(Debug, Default)]
pub struct GestureController {
    positions: Option<StatePositions>,
    viewport_height: Option<f32>,
    behaviours: BehaviourMap,
    velocity: VelocityEstimator,
    detector: TransitionZoneDetector,
    session: Option<DragSession>,
    offset: f32,
    active_behaviour: DragBehaviour,
    active_tuning: DragTuning,
}

impl GestureController {
    pub fn new() -> Self {
        Self::with_configs(VelocityConfig::default(), ZoneConfig::default())
    }

    pub fn with_configs(velocity: VelocityConfig, zone: ZoneConfig) -> Self {
        Self {
            positions: None,
            viewport_height: None,
            behaviours: BehaviourMap::new(),
            velocity: VelocityEstimator::with_config(velocity),
            detector: TransitionZoneDetector::with_config(zone),
            session: None,
            offset: 0.0,
            active_behaviour: DragBehaviour::default(),
            active_tuning: DragTuning::default(),
        }
    }

    /// Replaces the position snapshot wholesale (e.g. after a resize).
    pub fn set_positions(&mut self, positions: StatePositions) {
        self.positions = Some(positions);
    }

    pub fn positions(&self) -> Option<StatePositions> {
        self.positions
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = Some(height);
    }

    /// Adds or replaces a per-state drag assignment at runtime.
    ///
    /// Takes effect for the next drag session; an active session keeps the
    /// behaviour it started with.
    pub fn set_state_behaviour(&mut self, entry: StateBehaviour, machine: &SheetStateMachine) {
        let applies_now = entry.state == machine.state();
        if applies_now {
            self.active_behaviour = entry.behaviour;
            self.active_tuning = entry.tuning;
        }
        self.behaviours.set(entry);
    }

    /// The drag behaviour that applies to the current resting state.
    pub fn behaviour(&self) -> DragBehaviour {
        self.active_behaviour
    }

    /// The sheet's current visual offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn in_zone(&self) -> bool {
        self.detector.in_zone()
    }

    pub fn target_state(&self) -> Option<SheetState> {
        self.detector.target()
    }

    /// Current velocity in px/ms.
    pub fn velocity(&self) -> f32 {
        self.velocity.velocity()
    }

    pub fn is_significant_velocity(&self) -> bool {
        self.velocity.is_significant()
    }

    /// Begins a drag session at cursor position `y`.
    pub fn drag_start(&mut self, y: f32, time_ms: i64, machine: &SheetStateMachine) {
        let state = machine.state();
        let initial_sheet_position = match self.positions {
            Some(positions) => positions.offset_for(state),
            // Layout not measured yet: hold the last known offset.
            None => self.offset,
        };
        let (behaviour, tuning) = match self.behaviours.get(state) {
            Some(entry) => (entry.behaviour, entry.tuning),
            None => (DragBehaviour::FollowCursor, DragTuning::default()),
        };

        self.velocity.reset();
        self.detector.reset();
        // Seed the window so the first move measures against the true origin.
        let _ = self.velocity.push(y, time_ms);

        self.offset = initial_sheet_position;
        self.active_behaviour = behaviour;
        self.active_tuning = tuning;
        self.session = Some(DragSession {
            drag_start_y: y,
            initial_sheet_position,
            behaviour,
            tuning,
        });

        log::trace!("drag start at y={y} from {state} (behaviour {behaviour:?})");
    }

    /// Consumes one move sample and returns the frame's visual offset.
    pub fn drag_move(&mut self, y: f32, time_ms: i64, machine: &SheetStateMachine) -> f32 {
        let Some(session) = self.session else {
            return self.offset;
        };

        let direction_sample = self.velocity.push(y, time_ms);
        let state = machine.state();
        self.detector.evaluate(&ZoneInput {
            now_ms: time_ms,
            raw_y: y,
            drag_start_y: session.drag_start_y,
            direction_sample,
            current_state: state,
            viewport_height: self.viewport_height,
            velocity: self.velocity.velocity(),
            velocity_is_significant: self.velocity.is_significant(),
            behaviour_assigned: self.behaviours.is_assigned(state),
        });

        self.offset = session.behaviour.map(
            y,
            session.drag_start_y,
            session.initial_sheet_position,
            &session.tuning,
        );
        self.offset
    }

    /// Ends the drag: commits the detector's target if one is held,
    /// otherwise snaps back to the current resting position.
    pub fn drag_end(&mut self, machine: &mut SheetStateMachine) {
        if self.session.take().is_none() {
            return;
        }

        match self.detector.target() {
            Some(SheetState::Full) => machine.expand(),
            Some(SheetState::Closed) => machine.close(),
            Some(SheetState::Default) => match machine.state() {
                SheetState::Closed => machine.open(),
                SheetState::Full => machine.collapse(),
                SheetState::Default => {}
            },
            None => {}
        }

        self.settle(machine);
    }

    /// A lost or cancelled pointer: identical to an uncommitted drag end.
    pub fn drag_cancel(&mut self, machine: &SheetStateMachine) {
        if self.session.take().is_none() {
            return;
        }
        self.settle(machine);
    }

    /// Re-reads the authoritative position for the machine's current state
    /// and snaps the offset to it, resetting all per-gesture state.
    ///
    /// This is the sole synchronization point between the state machine and
    /// the continuous offset; calling it when the offset already matches is
    /// a no-op.
    pub fn update_position_from_state(&mut self, machine: &SheetStateMachine) {
        let Some(positions) = self.positions else {
            return;
        };
        let state = machine.state();
        let target = positions.offset_for(state);
        if self.offset == target {
            return;
        }

        log::debug!("snapping offset {} -> {target} ({state})", self.offset);
        self.offset = target;
        self.velocity.reset();
        self.detector.reset();
        if let Some(entry) = self.behaviours.get(state) {
            self.active_behaviour = entry.behaviour;
            self.active_tuning = entry.tuning;
        }
    }

    fn settle(&mut self, machine: &SheetStateMachine) {
        self.update_position_from_state(machine);
        self.velocity.reset();
        self.detector.reset();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
