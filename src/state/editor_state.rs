//! The interaction state machine of the editor.
//!
//! Each tool owns its own sub-state; `InteractionState` is the single
//! editor-wide view of it. Only one tool is active at a time, so only one
//! interaction can be live.
//!
//! # State Transitions
//!
//! Within one tool, the valid transitions are:
//! ```text
//!  Draw:     Idle ──down──► Drawing ──up/cancel──► Idle
//!
//!  Crop:                  ┌──► Creating ──┐
//!            Crop(Idle) ──┼──► Moving   ──┼──up──► Crop(Idle) ──confirm──► Idle
//!                         └──► Resizing ──┘
//!
//!  Shape:                 ┌──► Drawing  ──┐
//!            Shape(Idle) ─┼──► Moving   ──┼──up──► Shape(Idle)
//!                         ├──► Resizing ──┘
//!                         └──► PolygonBuilding ──finish/cancel──► Shape(Idle)
//!
//!  Text:     TextPending ──click──► TextPending
//! ```
//!
//! Switching tools, undo and redo cancel whatever is live first, so they
//! always land in the idle state of the new tool.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropPhase {
    Idle,
    Creating,
    Moving,
    Resizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapePhase {
    Idle,
    Drawing,
    Moving,
    Resizing,
}

/// The possible interaction states of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// No tool, or the draw tool with the pointer up
    Idle,
    /// Freehand painting into the raster
    Drawing,
    Crop(CropPhase),
    Shape(ShapePhase),
    /// Collecting polygon vertices
    PolygonBuilding,
    /// Text tool waiting for a click
    TextPending,
}

impl InteractionState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, next: &InteractionState) -> bool {
        use InteractionState as S;
        if self == next {
            return true;
        }
        match (self, next) {
            (S::Idle, S::Drawing) | (S::Drawing, S::Idle) => true,

            (S::Crop(CropPhase::Idle), S::Crop(_)) => true,
            (S::Crop(_), S::Crop(CropPhase::Idle)) => true,
            // Confirm releases the crop tool
            (S::Crop(CropPhase::Idle), S::Idle) => true,

            (S::Shape(ShapePhase::Idle), S::Shape(_) | S::PolygonBuilding) => true,
            (S::Shape(_), S::Shape(ShapePhase::Idle)) => true,
            (S::PolygonBuilding, S::Shape(ShapePhase::Idle)) => true,

            // All other transitions are invalid
            _ => false,
        }
    }

    /// Returns true if no interaction is in progress
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            InteractionState::Idle
                | InteractionState::TextPending
                | InteractionState::Crop(CropPhase::Idle)
                | InteractionState::Shape(ShapePhase::Idle)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Drawing => "Drawing",
            InteractionState::Crop(CropPhase::Idle) => "Crop",
            InteractionState::Crop(CropPhase::Creating) => "Crop: creating",
            InteractionState::Crop(CropPhase::Moving) => "Crop: moving",
            InteractionState::Crop(CropPhase::Resizing) => "Crop: resizing",
            InteractionState::Shape(ShapePhase::Idle) => "Shape",
            InteractionState::Shape(ShapePhase::Drawing) => "Shape: drawing",
            InteractionState::Shape(ShapePhase::Moving) => "Shape: moving",
            InteractionState::Shape(ShapePhase::Resizing) => "Shape: resizing",
            InteractionState::PolygonBuilding => "Polygon",
            InteractionState::TextPending => "Text",
        }
    }
}

impl std::fmt::Display for InteractionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drags_return_to_their_tool_idle() {
        let moving = InteractionState::Shape(ShapePhase::Moving);
        assert!(moving.can_transition_to(&InteractionState::Shape(ShapePhase::Idle)));
        assert!(!moving.can_transition_to(&InteractionState::Crop(CropPhase::Idle)));
        assert!(!moving.can_transition_to(&InteractionState::Shape(ShapePhase::Resizing)));
    }

    #[test]
    fn polygon_building_only_starts_from_shape_idle() {
        let idle = InteractionState::Shape(ShapePhase::Idle);
        assert!(idle.can_transition_to(&InteractionState::PolygonBuilding));
        assert!(!InteractionState::Drawing.can_transition_to(&InteractionState::PolygonBuilding));
    }

    #[test]
    fn crop_confirm_releases_the_tool() {
        let crop = InteractionState::Crop(CropPhase::Idle);
        assert!(crop.can_transition_to(&InteractionState::Idle));
        assert!(!InteractionState::Crop(CropPhase::Moving).can_transition_to(&InteractionState::Idle));
    }
}
