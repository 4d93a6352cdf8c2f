//! Gesture interpretation for sheetkit bottom sheets.
//!
//! Turns a stream of raw pointer samples into a dampened visual offset and
//! a flicker-free decision about which resting state the gesture intends:
//!
//! - [`VelocityEstimator`] derives an instantaneous velocity from a short
//!   sliding window of samples;
//! - [`DragBehaviour`] maps raw drag distance to a (possibly dampened)
//!   visual offset;
//! - [`TransitionZoneDetector`] is the hysteresis machine deciding the
//!   gesture's transition intent and detecting its reversal;
//! - [`GestureController`] composes the three per sheet, committing or
//!   cancelling against a `sheetkit_core::SheetStateMachine` on release.
//!
//! All timestamps are host-supplied milliseconds; velocities are px/ms.

mod controller;
mod offset;
mod velocity;
mod zone;

pub use controller::{BehaviourMap, GestureController, StateBehaviour};
pub use offset::{DragBehaviour, DragTuning};
pub use velocity::{VelocityConfig, VelocityEstimator};
pub use zone::{TransitionIntent, TransitionZoneDetector, ZoneConfig, ZoneInput};
