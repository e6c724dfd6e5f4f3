use crate::play::coverage::{
    apply_coverage_adjustments, Adjustment, CoverageResponsibility, CoverageType, Rotation,
};
use crate::play::engine::{PlayContext, TICK_INTERVAL};
use crate::play::field::FIELD_CENTER_X;
use crate::play::formation::analyze_formation;
use crate::play::motion::{handle_motion_adjustments, Motion};
use crate::play::option;
use crate::play::pattern_match::{CoverageState, PatternMatchEngine};
use crate::play::personnel::{assign_roles, match_personnel};
use crate::play::pick::{self, PickResult};
use crate::play::player::{PlayPlayer, PlayPlayerCollection, Team};
use crate::play::receiver::{integrate, ReceiverContext, ReceiverMovement, ReceiverState};
use crate::play::route::{RouteType, SeparationTechnique};
use crate::play::coverage::alignment::tampa_2::mike_pole_depth;
use log::{debug, info};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

const DEFENDER_REACTION_SPEED: f32 = 0.9; // fraction of max speed while reading

/// Minimal consuming loop for the coverage core: owns the player list,
/// runs the fixed per-tick ordering, and is the single writer that
/// applies every subsystem's delta list.
pub struct PlayEngine {
    pub players: PlayPlayerCollection,
    pub context: PlayContext,
    receiver_states: HashMap<u32, ReceiverState>,
    pattern_match: PatternMatchEngine,
    pick_result: Option<PickResult>,
    rng: StdRng,
}

impl PlayEngine {
    pub fn new(players: Vec<PlayPlayer>, los: f32, coverage: CoverageType) -> Self {
        Self::with_seed(players, los, coverage, 0)
    }

    pub fn with_seed(players: Vec<PlayPlayer>, los: f32, coverage: CoverageType, seed: u64) -> Self {
        PlayEngine {
            players: PlayPlayerCollection::new(players),
            context: PlayContext::new(los, coverage),
            receiver_states: HashMap::new(),
            pattern_match: PatternMatchEngine::new(),
            pick_result: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Formation analysis, personnel match and full alignment for the
    /// current coverage. Runs at setup and again whenever coverage or
    /// formation changes.
    pub fn line_up(&mut self) {
        let offense = self.players.offense_vec();
        let formation = analyze_formation(&offense);
        let personnel = match_personnel(&formation.personnel);

        info!(
            "lining up {} against {} (strength {})",
            self.context.coverage, personnel, formation.strength
        );

        let adjustments = apply_coverage_adjustments(
            self.context.coverage,
            &self.players.defense_vec(),
            &offense,
            &formation,
            self.context.los,
            self.context.rotation,
        );

        self.apply_adjustments(&adjustments, true, 0.0);
    }

    pub fn set_coverage(&mut self, coverage: CoverageType, rotation: Option<Rotation>) {
        self.context.coverage = coverage;
        self.context.rotation = rotation;
        self.reset();
        self.line_up();
    }

    /// Pre-snap motion: move the player, then apply the coverage answer.
    pub fn send_motion(&mut self, motion: Motion) {
        let adjustments = handle_motion_adjustments(
            self.context.coverage,
            &motion,
            &self.players.defense_vec(),
            &self.players.offense_vec(),
            self.context.los,
        );

        if let Some(player) = self.players.by_id_mut(motion.player_id) {
            player.position = motion.end_position;
            player.in_motion = false;
        }

        self.apply_adjustments(&adjustments, true, 0.0);
    }

    pub fn snap(&mut self) {
        self.context.snapped = true;
        self.context.time = Default::default();
        self.receiver_states.clear();
        self.pattern_match.reset();
        self.pick_result = None;

        for player in &self.players.players {
            if player.team == Team::Offense && player.route.is_some() && !player.is_blocking {
                let technique = player
                    .route
                    .as_ref()
                    .map(|r| SeparationTechnique::for_route(r.route_type))
                    .unwrap_or(SeparationTechnique::SpeedCut);

                self.receiver_states
                    .insert(player.id, ReceiverState::new(technique));
            }
        }
    }

    pub fn pick_result(&self) -> Option<&PickResult> {
        self.pick_result.as_ref()
    }

    /// One fixed step. Ordering matters: receivers move on the current
    /// picture before defenders react to it, and validation runs last as
    /// a consistency check, never a gate.
    pub fn tick(&mut self) {
        if !self.context.snapped {
            return;
        }

        let dt = TICK_INTERVAL;
        let time_elapsed = self.context.time.increment(dt);
        let los = self.context.los;

        self.advance_receivers(time_elapsed, dt);
        self.evaluate_option_routes(time_elapsed);
        self.evaluate_picks(time_elapsed);

        let pattern_adjustments = self.pattern_match.evaluate(
            &self.players.defense_vec(),
            &self.players.offense_vec(),
            los,
            time_elapsed,
        );
        self.apply_adjustments(&pattern_adjustments, false, dt);

        self.pursue_man_targets(dt);
        self.run_tampa_pole(time_elapsed, dt);

        #[cfg(debug_assertions)]
        self.debug_validate();
    }

    /// Discard every in-flight state and return to the pre-snap picture.
    /// Nothing survives a reset.
    pub fn reset(&mut self) {
        self.context.snapped = false;
        self.context.time = Default::default();
        self.receiver_states.clear();
        self.pattern_match.reset();
        self.pick_result = None;

        for player in self.players.players.iter_mut() {
            player.position = player.start_position;
        }
    }

    fn advance_receivers(&mut self, time_elapsed: f32, dt: f32) {
        let snapshot = self.players.clone();
        let los = self.context.los;

        for (receiver_id, state) in self.receiver_states.iter_mut() {
            let Some(player) = snapshot.by_id(*receiver_id) else {
                continue;
            };
            let Some(route) = player.route.as_ref() else {
                continue;
            };

            let ctx = ReceiverContext {
                player,
                route,
                los,
                time_elapsed,
                nearest_defender: snapshot.nearest_defender(player.position),
            };

            let next_position = ReceiverMovement::process(state, &ctx, dt);
            if let Some(live) = self.players.by_id_mut(*receiver_id) {
                live.position = next_position;
            }
        }
    }

    fn evaluate_option_routes(&mut self, time_elapsed: f32) {
        let snapshot = self.players.clone();
        let los = self.context.los;
        let coverage = self.context.coverage;

        for player in snapshot.players.iter() {
            let runs_choice = player
                .route
                .as_ref()
                .is_some_and(|r| r.route_type == RouteType::Choice);
            if !runs_choice {
                continue;
            }

            let nearest = snapshot.nearest_defender(player.position);
            if let Some(decision) = option::evaluate_option_route(player, nearest, coverage, time_elapsed)
            {
                let converted = option::convert_route(player, decision, los);
                if let Some(live) = self.players.by_id_mut(player.id) {
                    debug!("receiver {} choice declared: {}", player.id, decision);
                    live.route = Some(converted);
                }
            }
        }
    }

    fn evaluate_picks(&mut self, time_elapsed: f32) {
        if self.pick_result.is_some() {
            return;
        }

        let offense = self.players.offense_vec();
        let analysis = pick::analyze_pick_potential(&offense, self.context.los);
        let Some(concept) = analysis.concept else {
            return;
        };

        let legal = analysis
            .legal_pick_zones
            .iter()
            .all(|zone| pick::is_legal_pick(*zone, self.context.los));
        if !legal {
            return;
        }

        let vs_man = self.context.coverage.is_man_scheme();
        let result = pick::resolve_pick(concept, vs_man, time_elapsed, &mut self.rng);

        if result.pick_executed {
            debug!(
                "{} pick springs for {:.1} yards of separation",
                concept, result.separation_created
            );

            let counters = pick::counter_pick(&analysis, &self.players.defense_vec(), vs_man);
            self.apply_adjustments(&counters, true, 0.0);
            self.pick_result = Some(result);
        } else if (pick::PICK_CONTACT_TIME..=pick::PICK_SEPARATION_TIME).contains(&time_elapsed) {
            // Contact happened and fizzled; don't re-roll every tick.
            self.pick_result = Some(result);
        }
    }

    /// Man-assigned defenders chase their receivers with a small cushion.
    /// Pattern-matched defenders are skipped: the state machine already
    /// positions them.
    fn pursue_man_targets(&mut self, dt: f32) {
        let snapshot = self.players.clone();

        for defender in snapshot.defense() {
            let Some(target_id) = defender
                .responsibility
                .as_ref()
                .and_then(|r| r.man_target())
            else {
                continue;
            };

            if self.pattern_match.state_of(defender.id) != CoverageState::Zone {
                continue;
            }

            let Some(receiver) = snapshot.by_id(target_id) else {
                continue;
            };

            let target = receiver.position + Vector2::new(0.0, 1.5);
            if let Some(live) = self.players.by_id_mut(defender.id) {
                live.position = integrate(
                    live.position,
                    target,
                    live.max_speed * DEFENDER_REACTION_SPEED,
                    dt,
                );
            }
        }
    }

    fn run_tampa_pole(&mut self, time_elapsed: f32, dt: f32) {
        if self.context.coverage != CoverageType::Tampa2 {
            return;
        }

        let defense = self.players.defense_vec();
        let offense = self.players.offense_vec();
        let roles = assign_roles(&defense, &analyze_formation(&offense));

        let Some(mike_id) = roles.mike() else {
            return;
        };

        let target = Vector2::new(FIELD_CENTER_X, self.context.los + mike_pole_depth(time_elapsed));
        if let Some(mike) = self.players.by_id_mut(mike_id) {
            mike.position = integrate(mike.position, target, mike.max_speed, dt);
        }
    }

    /// Single-writer application of a delta list. Pre-snap lists place
    /// players directly; post-snap lists steer them at reaction speed.
    fn apply_adjustments(&mut self, adjustments: &[Adjustment], instant: bool, dt: f32) {
        for adjustment in adjustments {
            let Some(player) = self.players.by_id_mut(adjustment.defender_id) else {
                continue;
            };

            if instant {
                player.position = adjustment.new_position;
                player.start_position = adjustment.new_position;
            } else {
                player.position = integrate(
                    player.position,
                    adjustment.new_position,
                    player.max_speed * DEFENDER_REACTION_SPEED,
                    dt,
                );
            }

            if let Some(responsibility) = &adjustment.new_responsibility {
                player.responsibility = Some(responsibility.clone());
            }
        }
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        let report = crate::play::validator::validate_coverage_assignments(
            &self.players.defense_vec(),
            &self.players.offense_vec(),
            self.context.coverage,
            self.context.los,
        );

        for error in &report.errors {
            log::error!("coverage invariant broken: {}", error.message);
        }
    }
}

/// Lightweight view of the responsibilities, mostly for logging and the
/// audit sweep.
pub fn responsibility_summary(players: &PlayPlayerCollection) -> Vec<(u32, String)> {
    players
        .defense()
        .map(|d| {
            let label = match &d.responsibility {
                Some(CoverageResponsibility::Man { target }) => format!("man #{}", target),
                Some(CoverageResponsibility::Zone { zone }) => format!("zone {:?}", zone.name),
                Some(CoverageResponsibility::Spy { target }) => format!("spy #{}", target),
                Some(CoverageResponsibility::Blitz) => "blitz".to_string(),
                None => "unassigned".to_string(),
            };
            (d.id, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::player::PlayerRole;
    use crate::play::route::{templates, RouteType};

    fn build_players(los: f32) -> Vec<PlayPlayer> {
        let mut players = vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, los - 5.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, los - 1.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(14.0, los - 1.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, los - 1.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::WideReceiver, Vector2::new(39.0, los - 1.0)),
            PlayPlayer::new(10, Team::Defense, PlayerRole::Cornerback, Vector2::new(5.0, los + 7.0)),
            PlayPlayer::new(11, Team::Defense, PlayerRole::Cornerback, Vector2::new(48.0, los + 7.0)),
            PlayPlayer::new(12, Team::Defense, PlayerRole::Safety, Vector2::new(18.0, los + 12.0)),
            PlayPlayer::new(13, Team::Defense, PlayerRole::Safety, Vector2::new(35.0, los + 12.0)),
            PlayPlayer::new(14, Team::Defense, PlayerRole::Linebacker, Vector2::new(22.0, los + 4.0)),
            PlayPlayer::new(15, Team::Defense, PlayerRole::Linebacker, Vector2::new(31.0, los + 4.0)),
            PlayPlayer::new(16, Team::Defense, PlayerRole::NickelBack, Vector2::new(40.0, los + 6.0)),
        ];

        for player in players.iter_mut() {
            if player.team == Team::Offense && player.is_eligible {
                let route_type = match player.id {
                    2 => RouteType::Go,
                    3 => RouteType::Out,
                    4 => RouteType::Curl,
                    _ => RouteType::Slant,
                };
                player.route = Some(templates::build_route(route_type, player.position, los));
            }
        }

        players
    }

    #[test]
    fn test_line_up_assigns_every_mapped_defender() {
        let los = 30.0;
        let mut engine = PlayEngine::new(build_players(los), los, CoverageType::Cover3);
        engine.line_up();

        let assigned = engine
            .players
            .defense()
            .filter(|d| d.responsibility.is_some())
            .count();
        assert!(assigned >= 6, "most defenders carry a responsibility, got {}", assigned);
    }

    #[test]
    fn test_tick_advances_receivers() {
        let los = 30.0;
        let mut engine = PlayEngine::new(build_players(los), los, CoverageType::Cover3);
        engine.line_up();
        engine.snap();

        let before = engine.players.by_id(2).unwrap().position;
        for _ in 0..30 {
            engine.tick();
        }
        let after = engine.players.by_id(2).unwrap().position;

        assert!((after - before).norm() > 0.5, "receiver never moved");
    }

    #[test]
    fn test_reset_discards_everything() {
        let los = 30.0;
        let mut engine = PlayEngine::new(build_players(los), los, CoverageType::Cover3);
        engine.line_up();
        engine.snap();

        for _ in 0..60 {
            engine.tick();
        }

        engine.reset();

        assert!(!engine.context.snapped);
        assert_eq!(engine.context.time.elapsed, 0.0);
        assert!(engine.pick_result().is_none());

        let receiver = engine.players.by_id(2).unwrap();
        assert_eq!(receiver.position, receiver.start_position);
    }

    #[test]
    fn test_same_seed_same_play(){
        let los = 30.0;

        let run = |seed: u64| {
            let mut engine = PlayEngine::with_seed(build_players(los), los, CoverageType::Cover1, seed);
            engine.line_up();
            engine.snap();
            for _ in 0..120 {
                engine.tick();
            }
            engine
                .players
                .players
                .iter()
                .map(|p| (p.id, p.position.x, p.position.y))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(9), run(9), "identical seeds must replay identically");
    }
}
