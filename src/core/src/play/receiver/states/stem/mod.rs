use crate::play::receiver::states::pressured_stem_adjustment;
use crate::play::receiver::{
    ReceiverContext, ReceiverState, RoutePhase, RoutePhaseHandler, STEM_DURATION,
};

/// Full-stride vertical push that sells every route the same way.
pub struct StemState;

impl RoutePhaseHandler for StemState {
    fn speed_multiplier(&self, _state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        0.85
    }

    fn try_transition(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> Option<RoutePhase> {
        if state.phase_time >= STEM_DURATION {
            return Some(RoutePhase::PreBreak);
        }

        None
    }

    fn stem_adjustment(&self, state: &ReceiverState, ctx: &ReceiverContext) -> f32 {
        pressured_stem_adjustment(state, ctx)
    }
}
