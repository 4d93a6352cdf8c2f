//! Per-state target offsets and the arithmetic deriving them.
//!
//! Offsets are pixel distances from the top of the viewport; `Closed` is
//! conventionally the viewport height, i.e. fully off-screen. Measuring
//! content is a collaborator's job — this module only turns measurements
//! into a position table.

use crate::state::SheetState;

/// Tuning for [`StatePositions::compute`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionConfig {
    /// Fraction of the viewport left above the sheet in the `Full` state.
    pub full_state_top_margin: f32,
    /// Smallest visible height of the sheet in the `Default` state.
    pub default_state_min_pixels: f32,
    /// Largest visible height of the sheet in the `Default` state.
    pub default_state_max_pixels: f32,
    /// Content shorter than this should not be offered a `Full` state.
    pub min_content_height_for_full_screen: f32,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            full_state_top_margin: 0.0,
            default_state_min_pixels: 100.0,
            default_state_max_pixels: 600.0,
            min_content_height_for_full_screen: 300.0,
        }
    }
}

impl PositionConfig {
    /// Whether measured content is tall enough to justify the `Full` state.
    pub fn allows_full_screen(&self, content_height: f32) -> bool {
        content_height >= self.min_content_height_for_full_screen
    }
}

/// An immutable snapshot mapping each resting state to its target offset.
///
/// Layout collaborators replace the whole snapshot when measurements change
/// (resize, content growth); readers never observe a half-updated table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatePositions {
    pub closed: f32,
    pub default: f32,
    pub full: f32,
}

impl StatePositions {
    /// The target offset for `state`.
    pub fn offset_for(&self, state: SheetState) -> f32 {
        match state {
            SheetState::Closed => self.closed,
            SheetState::Default => self.default,
            SheetState::Full => self.full,
        }
    }

    /// Derives a position table from the viewport extent and an optional
    /// measured content height.
    ///
    /// Without a content measurement the `Default` state falls back to the
    /// configured minimum visible height.
    pub fn compute(
        viewport_height: f32,
        content_height: Option<f32>,
        config: &PositionConfig,
    ) -> Self {
        let default_height = match content_height {
            Some(height) => height.clamp(
                config.default_state_min_pixels,
                config.default_state_max_pixels,
            ),
            None => config.default_state_min_pixels,
        };

        Self {
            closed: viewport_height,
            default: viewport_height - default_height,
            full: (viewport_height * config.full_state_top_margin).round(),
        }
    }
}
