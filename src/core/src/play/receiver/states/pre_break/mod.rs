use crate::play::receiver::{
    ReceiverContext, ReceiverState, RoutePhase, RoutePhaseHandler, PRE_BREAK_DURATION,
};

/// Gearing down into the break point.
pub struct PreBreakState;

impl RoutePhaseHandler for PreBreakState {
    fn speed_multiplier(&self, _state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        0.7
    }

    fn try_transition(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> Option<RoutePhase> {
        if state.phase_time >= PRE_BREAK_DURATION {
            return Some(RoutePhase::Break);
        }

        None
    }
}
