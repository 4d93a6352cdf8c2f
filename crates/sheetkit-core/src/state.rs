//! Sheet resting states and the state machine driving them.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use web_time::Duration;

use crate::settle::SettleTimer;

/// How long a committed transition keeps [`SheetStateMachine::is_transitioning`]
/// set, unless configured otherwise.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// A resting position of the sheet.
///
/// Ordered by openness (`Closed < Default < Full`) so gesture code can
/// reason about direction, though the machine itself moves along a fixed
/// adjacency graph rather than the total order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SheetState {
    /// Fully off-screen.
    #[default]
    Closed,
    /// Partially open.
    Default,
    /// Fully open.
    Full,
}

impl fmt::Display for SheetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetState::Closed => f.write_str("closed"),
            SheetState::Default => f.write_str("default"),
            SheetState::Full => f.write_str("full"),
        }
    }
}

/// The authoritative finite-state model of resting positions.
///
/// The machine is the only component allowed to declare "the sheet is now in
/// state X". Transitions follow a fixed adjacency graph:
///
/// - `Closed -> Default` via [`open`](Self::open)
/// - `Default -> Closed` via [`close`](Self::close)
/// - `Default -> Full` via [`expand`](Self::expand)
/// - `Full -> Default` via [`collapse`](Self::collapse)
/// - `Full -> Closed` via [`close`](Self::close)
///
/// Requesting the current state (or any pair outside the table) is a silent
/// no-op. Every committed transition re-arms the settle timer backing
/// [`is_transitioning`](Self::is_transitioning), syncs the optional open
/// binding, and invokes the optional change callback.
pub struct SheetStateMachine {
    state: SheetState,
    settle: SettleTimer,
    transition_duration: Duration,
    open_binding: Option<Rc<Cell<bool>>>,
    on_state_change: Option<Box<dyn FnMut(SheetState)>>,
}

impl fmt::Debug for SheetStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetStateMachine")
            .field("state", &self.state)
            .field("transition_duration", &self.transition_duration)
            .field("has_open_binding", &self.open_binding.is_some())
            .field("has_on_state_change", &self.on_state_change.is_some())
            .finish()
    }
}

impl Default for SheetStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetStateMachine {
    /// Creates a machine resting in [`SheetState::Closed`].
    pub fn new() -> Self {
        Self::with_initial_state(SheetState::Closed)
    }

    pub fn with_initial_state(state: SheetState) -> Self {
        Self {
            state,
            settle: SettleTimer::new(),
            transition_duration: DEFAULT_TRANSITION_DURATION,
            open_binding: None,
            on_state_change: None,
        }
    }

    /// Overrides how long [`is_transitioning`](Self::is_transitioning) stays
    /// set after a committed transition.
    pub fn set_transition_duration(&mut self, duration: Duration) {
        self.transition_duration = duration;
    }

    /// Binds an external boolean kept equal to `state != Closed` on every
    /// committed transition.
    pub fn bind_open(&mut self, open: Rc<Cell<bool>>) {
        open.set(self.state != SheetState::Closed);
        self.open_binding = Some(open);
    }

    /// Installs a side-effect callback invoked with each newly committed state.
    pub fn set_on_state_change(&mut self, callback: impl FnMut(SheetState) + 'static) {
        self.on_state_change = Some(Box::new(callback));
    }

    pub fn state(&self) -> SheetState {
        self.state
    }

    /// Whether a committed transition is still settling.
    pub fn is_transitioning(&self) -> bool {
        self.settle.is_active()
    }

    /// Opens the sheet one step: `Closed -> Default`, `Default -> Full`,
    /// no-op from `Full`.
    pub fn open(&mut self) {
        match self.state {
            SheetState::Closed => self.set_state(SheetState::Default),
            SheetState::Default => self.set_state(SheetState::Full),
            SheetState::Full => {}
        }
    }

    /// Closes the sheet from any open state.
    pub fn close(&mut self) {
        match self.state {
            SheetState::Default | SheetState::Full => self.set_state(SheetState::Closed),
            SheetState::Closed => {}
        }
    }

    /// `Default -> Full`; no-op otherwise.
    pub fn expand(&mut self) {
        if self.state == SheetState::Default {
            self.set_state(SheetState::Full);
        }
    }

    /// `Full -> Default`; no-op otherwise.
    pub fn collapse(&mut self) {
        if self.state == SheetState::Full {
            self.set_state(SheetState::Default);
        }
    }

    fn set_state(&mut self, new_state: SheetState) {
        if self.state == new_state {
            return;
        }

        log::debug!("sheet transition: {} -> {}", self.state, new_state);

        self.settle.arm(self.transition_duration);
        self.state = new_state;

        if let Some(open) = &self.open_binding {
            open.set(new_state != SheetState::Closed);
        }

        if let Some(callback) = &mut self.on_state_change {
            callback(new_state);
        }
    }
}
