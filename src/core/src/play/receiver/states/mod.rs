pub mod acceleration;
pub mod breaking;
pub mod completion;
pub mod post_break;
pub mod pre_break;
pub mod stem;

use crate::play::field::FieldSide;
use crate::play::player::Leverage;
use crate::play::receiver::{
    ReceiverContext, ReceiverState, DEFENDER_PRESSURE_RANGE, STEM_ADJUST_HEAD_UP,
    STEM_ADJUST_LEVERAGED,
};

/// Leverage-driven stem bend, shared by the acceleration and stem phases.
///
/// A defender sitting outside pushes the stem inside and vice versa; a
/// head-up defender gets a small outside nudge. Quiet releases bend
/// nothing.
pub(crate) fn pressured_stem_adjustment(_state: &ReceiverState, ctx: &ReceiverContext) -> f32 {
    let Some(defender) = ctx.nearest_defender else {
        return 0.0;
    };

    if ctx.player.distance_to(defender.position) > DEFENDER_PRESSURE_RANGE {
        return 0.0;
    }

    let toward_sideline = FieldSide::of_x(ctx.player.position.x).direction();

    match Leverage::between(defender.position.x, ctx.player.position.x) {
        Leverage::Outside => -STEM_ADJUST_LEVERAGED * toward_sideline,
        Leverage::Inside => STEM_ADJUST_LEVERAGED * toward_sideline,
        Leverage::HeadUp => STEM_ADJUST_HEAD_UP * toward_sideline,
    }
}
