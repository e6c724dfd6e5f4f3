use crate::play::coverage::CoverageType;
use crate::play::field;
use crate::play::formation::SLOT_DISTANCE_FROM_CENTER;
use crate::play::player::{Leverage, PlayPlayer};
use crate::play::route::{templates, Route, RouteType};
use log::debug;

/// The read stays open for a fifth of a second past the trigger; outside
/// that window the receiver just keeps running his stem.
pub const DECISION_WINDOW: f32 = 0.2;

const OPEN_AREA_RANGE: f32 = 6.0; // nearest defender farther than this reads "open"

const QUICK_TIMING_SCALE: f32 = 0.8;
const DEVELOPING_TIMING_SCALE: f32 = 1.2;

/// When the choice route declares against each coverage. Man shells get
/// read early; quarters holds its disguise the longest.
pub fn option_trigger_time(coverage: CoverageType) -> f32 {
    match coverage {
        CoverageType::Cover0 => 1.5,
        CoverageType::Cover1 => 1.6,
        CoverageType::Cover2 => 1.8,
        CoverageType::Tampa2 => 1.8,
        CoverageType::Cover3 => 1.9,
        CoverageType::Cover6 => 2.0,
        CoverageType::Cover4 => 2.2,
    }
}

/// Convert a choice route into a concrete break, or `None` when the
/// decision window is closed or the picture is not readable yet.
pub fn evaluate_option_route(
    receiver: &PlayPlayer,
    nearest_defender: Option<&PlayPlayer>,
    coverage: CoverageType,
    time_elapsed: f32,
) -> Option<RouteType> {
    let trigger = option_trigger_time(coverage);
    if time_elapsed < trigger || time_elapsed > trigger + DECISION_WINDOW {
        return None;
    }

    let is_slot =
        field::distance_from_center(receiver.position.x) < SLOT_DISTANCE_FROM_CENTER;

    let Some(defender) = nearest_defender else {
        // Nobody near enough to read: break to grass.
        return Some(RouteType::Dig);
    };

    let is_man = defender
        .responsibility
        .as_ref()
        .is_some_and(|r| r.is_man());

    let decision = if is_man {
        match Leverage::between(defender.position.x, receiver.position.x) {
            Leverage::Inside => RouteType::Out,
            Leverage::Outside => {
                if is_slot {
                    RouteType::Dig
                } else {
                    RouteType::Slant
                }
            }
            // Head-up man gives no leverage read; take what the cushion
            // gives.
            Leverage::HeadUp => open_area_decision(receiver, defender),
        }
    } else {
        open_area_decision(receiver, defender)
    };

    debug!(
        "receiver {} converts choice to {} ({} at {:.2}s)",
        receiver.id,
        decision,
        if is_man { "man" } else { "zone" },
        time_elapsed
    );

    Some(decision)
}

fn open_area_decision(receiver: &PlayPlayer, defender: &PlayPlayer) -> RouteType {
    if receiver.distance_to(defender.position) > OPEN_AREA_RANGE {
        RouteType::Dig // space behind the underneath drop: break into it
    } else {
        RouteType::Hitch // defender on top: sit down in the hole
    }
}

/// Rebuild the route from where the receiver actually is. Quick breaks
/// compress the remaining timing; developing ones stretch it.
pub fn convert_route(receiver: &PlayPlayer, decision: RouteType, los: f32) -> Route {
    let scale = if decision.is_quick() {
        QUICK_TIMING_SCALE
    } else {
        DEVELOPING_TIMING_SCALE
    };

    templates::build_route_scaled(decision, receiver.position, los, scale)
}
