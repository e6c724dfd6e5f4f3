use crate::play::receiver::{
    ReceiverContext, ReceiverState, RoutePhase, RoutePhaseHandler, BREAK_DURATION,
};

/// The plant step. Speed is whatever the separation technique allows:
/// a plant-and-cut nearly stops, a speed cut carries through.
pub struct BreakState;

impl RoutePhaseHandler for BreakState {
    fn speed_multiplier(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        state.technique.break_multiplier()
    }

    fn try_transition(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> Option<RoutePhase> {
        if state.phase_time >= BREAK_DURATION {
            return Some(RoutePhase::PostBreak);
        }

        None
    }
}
