use crate::play::pattern_match::{current_target, CoverageState, CoverageStateHandler, PatternMatchContext};
use nalgebra::Vector2;

/// Underneath defender stepping into a crosser's path. The collision
/// point is the crosser's lateral position at the defender's own depth,
/// so the defender never chases the route downfield.
pub struct CollisionState;

impl CoverageStateHandler for CollisionState {
    fn try_transition(&self, _ctx: &PatternMatchContext) -> Option<CoverageState> {
        None
    }

    fn target_position(&self, ctx: &PatternMatchContext) -> Option<Vector2<f32>> {
        match current_target(ctx) {
            Some(crosser) => Some(Vector2::new(crosser.position.x, ctx.defender.position.y)),
            None => Some(ctx.fallback_position()),
        }
    }
}
