use crate::play::receiver::{ReceiverContext, ReceiverState, RoutePhase, RoutePhaseHandler};

/// Route finished: full speed to the spot, then settled. Terminal.
pub struct CompletionState;

impl RoutePhaseHandler for CompletionState {
    fn speed_multiplier(&self, _state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        1.0
    }

    fn try_transition(&self, _state: &ReceiverState, _ctx: &ReceiverContext) -> Option<RoutePhase> {
        None
    }
}
