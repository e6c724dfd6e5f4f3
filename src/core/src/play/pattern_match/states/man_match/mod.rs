use crate::play::field::FIELD_CENTER_X;
use crate::play::pattern_match::{
    current_target, CoverageState, CoverageStateHandler, PatternMatchContext,
};
use nalgebra::Vector2;

const MATCH_SPACING: f32 = 2.5; // yards of cushion held in both axes

/// Converted man coverage on a matched vertical receiver. Terminal until
/// the play resets.
pub struct ManMatchState;

impl CoverageStateHandler for ManMatchState {
    fn try_transition(&self, _ctx: &PatternMatchContext) -> Option<CoverageState> {
        None
    }

    fn target_position(&self, ctx: &PatternMatchContext) -> Option<Vector2<f32>> {
        let target = match current_target(ctx) {
            Some(receiver) => receiver,
            None => return Some(ctx.fallback_position()),
        };

        // Ride the route from inside-and-over: a fixed lateral shade toward
        // the middle of the field plus a depth cushion.
        let inside = if target.position.x < FIELD_CENTER_X {
            MATCH_SPACING
        } else {
            -MATCH_SPACING
        };

        Some(Vector2::new(
            target.position.x + inside,
            target.position.y + MATCH_SPACING,
        ))
    }
}
