//! Pure drag-to-offset mappings.
//!
//! Each mapping turns a raw cursor position into a visual offset relative to
//! the sheet position captured at drag start. The non-linear mappings
//! progressively resist movement so over-dragging feels elastic instead of
//! tearing the sheet off its resting position.

/// Raw deltas below this magnitude stay in the rubber band's soft zone.
const RUBBER_BAND_SOFT_ZONE_PX: f32 = 15.0;
/// Flat scaling applied inside the soft zone.
const RUBBER_BAND_SOFT_SCALE: f32 = 0.85;
/// The rubber band never attenuates more than 80% of the raw delta.
const RUBBER_BAND_MAX_ATTENUATION: f32 = 0.8;
/// The logarithmic mapping never attenuates more than 90% of the raw delta.
const LOGARITHMIC_MAX_ATTENUATION: f32 = 0.9;

/// How a drag maps onto the sheet's visual offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragBehaviour {
    /// Unconstrained 1:1 tracking of the cursor.
    #[default]
    FollowCursor,
    /// Dampening grows continuously with drag distance.
    Logarithmic,
    /// Soft give near the origin, then progressively stiffer resistance.
    RubberBand,
}

/// Tuning parameters shared by the dampened mappings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragTuning {
    /// Distance at which dampening saturates.
    pub max_drag_distance: f32,
    /// Stiffness of the rubber band's second regime.
    pub rubber_band_factor: f32,
    /// Strength of the logarithmic dampening.
    pub logarithmic_base: f32,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            max_drag_distance: 300.0,
            rubber_band_factor: 0.5,
            logarithmic_base: 0.9,
        }
    }
}

impl DragBehaviour {
    /// Maps the current cursor position to a visual offset.
    ///
    /// `initial_sheet_position` is the sheet offset at drag start and
    /// `drag_start_y` the cursor position at drag start.
    pub fn map(
        self,
        current_y: f32,
        drag_start_y: f32,
        initial_sheet_position: f32,
        tuning: &DragTuning,
    ) -> f32 {
        let delta = current_y - drag_start_y;
        match self {
            DragBehaviour::FollowCursor => initial_sheet_position + delta,
            DragBehaviour::Logarithmic => {
                let attenuation = (delta.abs() / tuning.max_drag_distance)
                    .min(LOGARITHMIC_MAX_ATTENUATION)
                    * tuning.logarithmic_base;
                initial_sheet_position + delta * (1.0 - attenuation)
            }
            DragBehaviour::RubberBand => {
                if delta.abs() < RUBBER_BAND_SOFT_ZONE_PX {
                    return initial_sheet_position + delta * RUBBER_BAND_SOFT_SCALE;
                }
                let attenuation = (delta.abs() / tuning.max_drag_distance)
                    .min(RUBBER_BAND_MAX_ATTENUATION)
                    * tuning.rubber_band_factor;
                initial_sheet_position + delta * (1.0 - attenuation)
            }
        }
    }
}
