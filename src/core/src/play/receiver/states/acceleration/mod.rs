use crate::play::receiver::states::pressured_stem_adjustment;
use crate::play::receiver::{
    ReceiverContext, ReceiverState, RoutePhase, RoutePhaseHandler, ACCELERATION_DURATION,
};

/// First steps off the line: still gathering speed, fighting the jam.
pub struct AccelerationState;

impl RoutePhaseHandler for AccelerationState {
    fn speed_multiplier(&self, _state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        0.6
    }

    fn try_transition(&self, state: &ReceiverState, _ctx: &ReceiverContext) -> Option<RoutePhase> {
        if state.phase_time >= ACCELERATION_DURATION {
            return Some(RoutePhase::Stem);
        }

        None
    }

    fn stem_adjustment(&self, state: &ReceiverState, ctx: &ReceiverContext) -> f32 {
        pressured_stem_adjustment(state, ctx)
    }
}
