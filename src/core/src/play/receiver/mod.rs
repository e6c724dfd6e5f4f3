pub mod states;

pub use states::*;

use crate::play::field;
use crate::play::player::PlayPlayer;
use crate::play::route::{Route, SeparationTechnique};
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ACCELERATION_DURATION: f32 = 0.3; // off the line
pub const STEM_DURATION: f32 = 0.8;
pub const PRE_BREAK_DURATION: f32 = 0.2;
pub const BREAK_DURATION: f32 = 0.1; // the plant step
pub const POST_BREAK_DURATION: f32 = 0.3;

pub const DEFENDER_PRESSURE_RANGE: f32 = 5.0; // stem adjustments only under pressure
pub const STEM_ADJUST_LEVERAGED: f32 = 1.5;
pub const STEM_ADJUST_HEAD_UP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutePhase {
    Acceleration,
    Stem,
    PreBreak,
    Break,
    PostBreak,
    Completion,
}

impl Display for RoutePhase {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            RoutePhase::Acceleration => "acceleration",
            RoutePhase::Stem => "stem",
            RoutePhase::PreBreak => "pre-break",
            RoutePhase::Break => "break",
            RoutePhase::PostBreak => "post-break",
            RoutePhase::Completion => "completion",
        };
        write!(f, "{}", name)
    }
}

/// Per-receiver route execution state. Created on route init, discarded
/// on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverState {
    pub phase: RoutePhase,
    pub speed_multiplier: f32,
    pub phase_time: f32,
    pub has_executed_break: bool,
    pub leverage_adjustment: f32,
    pub technique: SeparationTechnique,
}

impl ReceiverState {
    pub fn new(technique: SeparationTechnique) -> Self {
        ReceiverState {
            phase: RoutePhase::Acceleration,
            speed_multiplier: 0.6,
            phase_time: 0.0,
            has_executed_break: false,
            leverage_adjustment: 0.0,
            technique,
        }
    }
}

pub struct ReceiverContext<'p> {
    pub player: &'p PlayPlayer,
    pub route: &'p Route,
    pub los: f32,
    pub time_elapsed: f32,
    pub nearest_defender: Option<&'p PlayPlayer>,
}

/// Logic handler for one route phase: its speed multiplier, its exit
/// condition, and (during the early phases) the leverage-driven stem bend.
pub trait RoutePhaseHandler {
    fn speed_multiplier(&self, state: &ReceiverState, ctx: &ReceiverContext) -> f32;

    fn try_transition(&self, state: &ReceiverState, ctx: &ReceiverContext) -> Option<RoutePhase>;

    fn stem_adjustment(&self, _state: &ReceiverState, _ctx: &ReceiverContext) -> f32 {
        0.0
    }
}

fn handler_for(phase: RoutePhase) -> &'static dyn RoutePhaseHandler {
    match phase {
        RoutePhase::Acceleration => &states::acceleration::AccelerationState,
        RoutePhase::Stem => &states::stem::StemState,
        RoutePhase::PreBreak => &states::pre_break::PreBreakState,
        RoutePhase::Break => &states::breaking::BreakState,
        RoutePhase::PostBreak => &states::post_break::PostBreakState,
        RoutePhase::Completion => &states::completion::CompletionState,
    }
}

pub struct ReceiverMovement;

impl ReceiverMovement {
    /// Advance one receiver by one tick and return his new position. The
    /// state is mutated; the position is a proposal for the single writer.
    pub fn process(state: &mut ReceiverState, ctx: &ReceiverContext, dt: f32) -> Vector2<f32> {
        let handler = handler_for(state.phase);

        if let Some(next) = handler.try_transition(state, ctx) {
            debug!("receiver {} {} -> {}", ctx.player.id, state.phase, next);

            if state.phase == RoutePhase::Break {
                state.has_executed_break = true;
            }

            state.phase = next;
            state.phase_time = 0.0;
        } else {
            state.phase_time += dt;
        }

        let handler = handler_for(state.phase);
        state.speed_multiplier = handler.speed_multiplier(state, ctx);
        // Recomputed whole each frame, never accumulated.
        state.leverage_adjustment = handler.stem_adjustment(state, ctx);

        let mut target = ctx.route.position_at(ctx.time_elapsed);
        target.x += state.leverage_adjustment;
        target = field::clamp_to_field(target);

        integrate(ctx.player.position, target, ctx.player.max_speed * state.speed_multiplier, dt)
    }
}

/// One movement step: snap onto the target when it is within reach,
/// otherwise advance along the unit vector at full frame speed.
pub fn integrate(position: Vector2<f32>, target: Vector2<f32>, speed: f32, dt: f32) -> Vector2<f32> {
    let to_target = target - position;
    let distance = to_target.norm();
    let frame_distance = speed * dt;

    if distance <= frame_distance || distance <= f32::EPSILON {
        target
    } else {
        position + to_target * (frame_distance / distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::player::{PlayerRole, Team};
    use crate::play::route::{templates, RouteType};

    fn route_runner(los: f32) -> PlayPlayer {
        let start = Vector2::new(10.0, los - 1.0);
        let mut player = PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, start);
        player.route = Some(templates::build_route(RouteType::Out, start, los));
        player
    }

    #[test]
    fn test_phase_progression() {
        let los = 30.0;
        let player = route_runner(los);
        let route = player.route.clone().unwrap();
        let mut state = ReceiverState::new(SeparationTechnique::PlantAndCut);

        let dt = 1.0 / 60.0;
        let mut time = 0.0_f32;
        let mut seen = vec![state.phase];

        let mut position = player.position;
        for _ in 0..300 {
            let mut snapshot = player.clone();
            snapshot.position = position;

            let ctx = ReceiverContext {
                player: &snapshot,
                route: &route,
                los,
                time_elapsed: time,
                nearest_defender: None,
            };

            position = ReceiverMovement::process(&mut state, &ctx, dt);
            if *seen.last().unwrap() != state.phase {
                seen.push(state.phase);
            }
            time += dt;
        }

        assert_eq!(seen.first(), Some(&RoutePhase::Acceleration));
        assert!(seen.contains(&RoutePhase::Stem));
        assert!(seen.contains(&RoutePhase::Break));
        assert_eq!(seen.last(), Some(&RoutePhase::Completion));
        assert!(state.has_executed_break);
    }

    #[test]
    fn test_integrate_snaps_when_close() {
        let position = Vector2::new(10.0, 30.0);
        let target = Vector2::new(10.05, 30.0);

        let next = integrate(position, target, 9.0, 1.0 / 60.0);
        assert_eq!(next, target);
    }

    #[test]
    fn test_integrate_advances_toward_target() {
        let position = Vector2::new(10.0, 30.0);
        let target = Vector2::new(10.0, 40.0);

        let next = integrate(position, target, 6.0, 1.0 / 60.0);
        assert!((next.y - 30.1).abs() < 1e-4);
        assert_eq!(next.x, 10.0);
    }

    #[test]
    fn test_movement_is_continuous() {
        let los = 30.0;
        let player = route_runner(los);
        let route = player.route.clone().unwrap();
        let mut state = ReceiverState::new(SeparationTechnique::SpeedCut);

        let dt = 1.0 / 60.0;
        let mut time = 0.0_f32;
        let mut position = player.position;

        for _ in 0..240 {
            let mut snapshot = player.clone();
            snapshot.position = position;

            let ctx = ReceiverContext {
                player: &snapshot,
                route: &route,
                los,
                time_elapsed: time,
                nearest_defender: None,
            };

            let next = ReceiverMovement::process(&mut state, &ctx, dt);
            let step = (next - position).norm();
            assert!(
                step <= snapshot.max_speed * dt * 1.2 + 1e-3,
                "discontinuous jump of {} yards",
                step
            );

            position = next;
            time += dt;
        }
    }
}
