pub mod states;

pub use states::*;

use crate::play::coverage::{Adjustment, CoverageResponsibility, Zone};
use crate::play::player::PlayPlayer;
use log::debug;
use nalgebra::Vector2;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Live coverage state of a zone defender during the post-snap window.
///
/// `Zone` is the initial state. `ManMatch` and `Collision` are terminal
/// until the play resets: a defender who has matched a vertical route
/// never falls back off it mid-play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoverageState {
    Zone,
    ManMatch { target: u32 },
    Collision { target: u32 },
}

impl Display for CoverageState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CoverageState::Zone => write!(f, "zone"),
            CoverageState::ManMatch { target } => write!(f, "man-match #{}", target),
            CoverageState::Collision { target } => write!(f, "collision #{}", target),
        }
    }
}

pub struct PatternMatchContext<'p> {
    pub defender: &'p PlayPlayer,
    /// The defender's zone. Gone once he has converted to man; the man
    /// and collision handlers only ever use it as a fallback landmark.
    pub zone: Option<&'p Zone>,
    pub offense: &'p [PlayPlayer],
    pub los: f32,
    pub time_elapsed: f32,
    pub state: CoverageState,
}

impl<'p> PatternMatchContext<'p> {
    pub fn receiver(&self, receiver_id: u32) -> Option<&'p PlayPlayer> {
        self.offense.iter().find(|p| p.id == receiver_id)
    }

    pub fn fallback_position(&self) -> Vector2<f32> {
        self.zone
            .map(|zone| zone.center)
            .unwrap_or(self.defender.position)
    }

    /// Route runners currently threatening this defender's zone.
    pub fn threats(&self) -> impl Iterator<Item = &'p PlayPlayer> + '_ {
        self.offense.iter().filter(|p| {
            p.is_route_runner()
                && self
                    .zone
                    .is_some_and(|zone| zone.contains_x(p.position.x))
        })
    }
}

/// Logic handler for one coverage state, in the style of the receiver
/// phase handlers: a transition check and a target position.
pub trait CoverageStateHandler {
    fn try_transition(&self, ctx: &PatternMatchContext) -> Option<CoverageState>;

    fn target_position(&self, ctx: &PatternMatchContext) -> Option<Vector2<f32>>;
}

fn handler_for(state: CoverageState) -> &'static dyn CoverageStateHandler {
    match state {
        CoverageState::Zone => &states::zone::ZoneState,
        CoverageState::ManMatch { .. } => &states::man_match::ManMatchState,
        CoverageState::Collision { .. } => &states::collision::CollisionState,
    }
}

/// The receiver carried by the context's state, if it names one.
pub fn current_target<'p>(ctx: &PatternMatchContext<'p>) -> Option<&'p PlayPlayer> {
    match ctx.state {
        CoverageState::ManMatch { target } | CoverageState::Collision { target } => {
            ctx.receiver(target)
        }
        CoverageState::Zone => None,
    }
}

/// Per-defender pattern-match evaluation, re-run every tick against the
/// current snapshot. All state lives here; a reset wipes it.
#[derive(Default)]
pub struct PatternMatchEngine {
    states: HashMap<u32, CoverageState>,
}

impl PatternMatchEngine {
    pub fn new() -> Self {
        PatternMatchEngine {
            states: HashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.states.clear();
    }

    pub fn state_of(&self, defender_id: u32) -> CoverageState {
        self.states
            .get(&defender_id)
            .copied()
            .unwrap_or(CoverageState::Zone)
    }

    pub fn evaluate(
        &mut self,
        defense: &[PlayPlayer],
        offense: &[PlayPlayer],
        los: f32,
        time_elapsed: f32,
    ) -> Vec<Adjustment> {
        let mut adjustments = Vec::new();

        for defender in defense {
            let mut state = self.state_of(defender.id);

            // Zone defenders get read every tick; defenders already
            // converted keep riding their target even though their
            // responsibility is no longer a zone.
            let zone = match &defender.responsibility {
                Some(CoverageResponsibility::Zone { zone }) => Some(zone),
                _ if state != CoverageState::Zone => None,
                _ => continue,
            };

            let mut ctx = PatternMatchContext {
                defender,
                zone,
                offense,
                los,
                time_elapsed,
                state,
            };

            if let Some(next) = handler_for(state).try_transition(&ctx) {
                debug!("defender {} {} -> {}", defender.id, state, next);
                state = next;
                ctx.state = state;
                self.states.insert(defender.id, state);
            }

            if let Some(position) = handler_for(state).target_position(&ctx) {
                let mut adjustment = Adjustment::reposition(defender.id, position);

                if let CoverageState::ManMatch { target } = state {
                    adjustment = adjustment
                        .with_responsibility(CoverageResponsibility::Man { target });
                }

                adjustments.push(adjustment);
            }
        }

        adjustments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::coverage::ZoneName;
    use crate::play::player::{PlayerRole, Team};
    use crate::play::route::{templates, RouteType};

    fn deep_third_defender(id: u32, x: f32, los: f32) -> PlayPlayer {
        let mut defender =
            PlayPlayer::new(id, Team::Defense, PlayerRole::Cornerback, Vector2::new(x, los + 12.0));
        defender.responsibility = Some(CoverageResponsibility::Zone {
            zone: Zone::new(ZoneName::DeepThird, Vector2::new(x, los + 12.0), 17.77, 25.0, 12.0),
        });
        defender
    }

    fn hook_defender(id: u32, x: f32, los: f32) -> PlayPlayer {
        let mut defender =
            PlayPlayer::new(id, Team::Defense, PlayerRole::Linebacker, Vector2::new(x, los + 9.0));
        defender.responsibility = Some(CoverageResponsibility::Zone {
            zone: Zone::new(ZoneName::Hook, Vector2::new(x, los + 9.0), 10.0, 8.0, 9.0),
        });
        defender
    }

    fn vertical_receiver(id: u32, x: f32, los: f32, depth: f32) -> PlayPlayer {
        let mut receiver =
            PlayPlayer::new(id, Team::Offense, PlayerRole::WideReceiver, Vector2::new(x, los + depth));
        receiver.route = Some(templates::build_route(RouteType::Go, Vector2::new(x, los - 1.0), los));
        receiver
    }

    #[test]
    fn test_deep_defender_matches_vertical_route() {
        let los = 30.0;
        let defense = vec![deep_third_defender(10, 8.0, los)];
        let offense = vec![vertical_receiver(2, 9.0, los, 13.0)];

        let mut engine = PatternMatchEngine::new();
        let adjustments = engine.evaluate(&defense, &offense, los, 1.8);

        assert_eq!(engine.state_of(10), CoverageState::ManMatch { target: 2 });

        let adjustment = adjustments.iter().find(|a| a.defender_id == 10).unwrap();
        let responsibility = adjustment.new_responsibility.as_ref().unwrap();
        assert_eq!(responsibility.man_target(), Some(2));
    }

    #[test]
    fn test_shallow_receiver_stays_zoned() {
        let los = 30.0;
        let defense = vec![deep_third_defender(10, 8.0, los)];
        let offense = vec![vertical_receiver(2, 9.0, los, 5.0)];

        let mut engine = PatternMatchEngine::new();
        engine.evaluate(&defense, &offense, los, 0.8);

        assert_eq!(engine.state_of(10), CoverageState::Zone);
    }

    #[test]
    fn test_man_match_is_terminal() {
        let los = 30.0;
        let defense = vec![deep_third_defender(10, 8.0, los)];
        let mut offense = vec![vertical_receiver(2, 9.0, los, 13.0)];

        let mut engine = PatternMatchEngine::new();
        engine.evaluate(&defense, &offense, los, 1.8);

        // Receiver breaks the route off shallow; the match must hold
        offense[0].position.y = los + 6.0;
        engine.evaluate(&defense, &offense, los, 2.4);

        assert_eq!(engine.state_of(10), CoverageState::ManMatch { target: 2 });
    }

    #[test]
    fn test_underneath_defender_collisions_crosser() {
        let los = 30.0;
        let defense = vec![hook_defender(11, 26.0, los)];

        let mut crosser =
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(24.0, los + 4.0));
        crosser.route = Some(templates::build_route(
            RouteType::Cross,
            Vector2::new(40.0, los - 1.0),
            los,
        ));

        let mut engine = PatternMatchEngine::new();
        engine.evaluate(&defense, &[crosser], los, 1.2);

        assert_eq!(engine.state_of(11), CoverageState::Collision { target: 3 });
    }

    #[test]
    fn test_underneath_defender_ignores_vertical() {
        let los = 30.0;
        let defense = vec![hook_defender(11, 26.0, los)];
        let offense = vec![vertical_receiver(2, 26.0, los, 14.0)];

        let mut engine = PatternMatchEngine::new();
        engine.evaluate(&defense, &offense, los, 1.5);

        assert_eq!(engine.state_of(11), CoverageState::Zone);
    }

    #[test]
    fn test_reset_discards_matches() {
        let los = 30.0;
        let defense = vec![deep_third_defender(10, 8.0, los)];
        let offense = vec![vertical_receiver(2, 9.0, los, 13.0)];

        let mut engine = PatternMatchEngine::new();
        engine.evaluate(&defense, &offense, los, 1.8);
        engine.reset();

        assert_eq!(engine.state_of(10), CoverageState::Zone);
    }
}
