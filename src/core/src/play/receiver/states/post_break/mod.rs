use crate::play::receiver::{
    ReceiverContext, ReceiverState, RoutePhase, RoutePhaseHandler, POST_BREAK_DURATION,
};

/// Exploding out of the break to stack the separation.
pub struct PostBreakState;

impl RoutePhaseHandler for PostBreakState {
    fn speed_multiplier(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        state.technique.release_multiplier()
    }

    fn try_transition(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> Option<RoutePhase> {
        if state.phase_time >= POST_BREAK_DURATION {
            return Some(RoutePhase::Completion);
        }

        None
    }
}
