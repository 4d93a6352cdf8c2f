//! Resting-state model for sheetkit bottom sheets.
//!
//! This crate owns the authoritative answer to "which resting position is
//! the sheet in": the [`SheetState`] enum, the [`SheetStateMachine`] driving
//! transitions between resting positions, and the [`StatePositions`]
//! snapshot mapping each state to an on-screen offset.
//!
//! Gesture interpretation lives in `sheetkit-gesture` and depends on this
//! crate; nothing here depends on gesture code, so the machine is equally
//! drivable by plain `open`/`close`/`expand`/`collapse` commands.

mod positions;
mod settle;
mod state;

pub use positions::{PositionConfig, StatePositions};
pub use settle::SettleTimer;
pub use state::{SheetState, SheetStateMachine, DEFAULT_TRANSITION_DURATION};
