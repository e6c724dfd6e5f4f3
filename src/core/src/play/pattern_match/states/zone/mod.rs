use crate::play::pattern_match::{CoverageState, CoverageStateHandler, PatternMatchContext};
use crate::play::route::RouteClass;
use nalgebra::Vector2;

const COLLISION_RANGE: f32 = 7.0; // crossers closer than this get bodied

/// Default zone state: hold the landmark, read the threats.
///
/// Deep defenders convert to man on the first vertical release into their
/// zone; underneath defenders step up to collision a crosser. Everything
/// else stays zoned.
pub struct ZoneState;

impl CoverageStateHandler for ZoneState {
    fn try_transition(&self, ctx: &PatternMatchContext) -> Option<CoverageState> {
        let zone = ctx.zone?;

        if zone.name.is_deep() {
            for receiver in ctx.threats() {
                let Some(route) = receiver.route.as_ref() else {
                    continue;
                };

                let depth = receiver.depth_beyond_los(ctx.los);
                if route.classify(depth) == RouteClass::Vertical {
                    return Some(CoverageState::ManMatch { target: receiver.id });
                }
            }

            return None;
        }

        // Underneath: collision crossing routes only.
        for receiver in ctx.offense.iter().filter(|p| p.is_route_runner()) {
            let depth = receiver.depth_beyond_los(ctx.los);
            let is_crosser = receiver
                .route
                .as_ref()
                .is_some_and(|route| route.classify(depth) == RouteClass::Crossing);

            if is_crosser && ctx.defender.distance_to(receiver.position) <= COLLISION_RANGE {
                return Some(CoverageState::Collision { target: receiver.id });
            }
        }

        None
    }

    fn target_position(&self, ctx: &PatternMatchContext) -> Option<Vector2<f32>> {
        // Zone defenders sit on their landmark.
        ctx.zone.map(|zone| zone.center)
    }
}
