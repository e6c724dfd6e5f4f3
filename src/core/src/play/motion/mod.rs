use crate::play::coverage::{Adjustment, CoverageResponsibility, CoverageType, Rotation};
use crate::play::field::FieldSide;
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::{PlayPlayer, PlayerRole};
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const TRAVEL_SHIFT: f32 = 2.0; // yards every defender slides with the motion
const SPIN_SHIFT: f32 = 5.0; // safeties rotate away from the motion
const BUZZ_HOOK_DEPTH: f32 = 8.0;
const BUMP_NEAR_SHIFT: f32 = 1.5; // linebacker shift, asymmetric by side
const BUMP_FAR_SHIFT: f32 = 2.5;
const MINIMAL_RANGE: f32 = 15.0; // only a defender this close reacts at all
const MINIMAL_NUDGE: f32 = 1.0;

/// Pre-snap motion. At most one motion player exists at a time; the
/// record lives only through the motion window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub player_id: u32,
    pub motion_type: MotionType,
    pub start_position: Vector2<f32>,
    pub end_position: Vector2<f32>,
}

impl Motion {
    /// Sign of the lateral direction the motion travels.
    pub fn direction(&self) -> f32 {
        if self.end_position.x >= self.start_position.x {
            1.0
        } else {
            -1.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionType {
    Fly,
    Orbit,
    Jet,
    Return,
    Shift,
    Across,
    Glide,
}

impl Display for MotionType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            MotionType::Fly => "fly",
            MotionType::Orbit => "orbit",
            MotionType::Jet => "jet",
            MotionType::Return => "return",
            MotionType::Shift => "shift",
            MotionType::Across => "across",
            MotionType::Glide => "glide",
        };
        write!(f, "{}", name)
    }
}

/// How a coverage answers a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionResponse {
    Lock,
    Travel,
    Buzz,
    Spin,
    Check,
    PatternAdjust,
    MegTrigger,
    Bump,
    Minimal,
}

impl Display for MotionResponse {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            MotionResponse::Lock => "lock",
            MotionResponse::Travel => "travel",
            MotionResponse::Buzz => "buzz",
            MotionResponse::Spin => "spin",
            MotionResponse::Check => "check",
            MotionResponse::PatternAdjust => "pattern-adjust",
            MotionResponse::MegTrigger => "meg-trigger",
            MotionResponse::Bump => "bump",
            MotionResponse::Minimal => "minimal",
        };
        write!(f, "{}", name)
    }
}

/// The response table. Total over every (coverage, motion) pair, with
/// `Minimal` as the fallthrough, and pure: the same pair always reads
/// the same.
pub fn motion_response(coverage: CoverageType, motion_type: MotionType) -> MotionResponse {
    use CoverageType::*;
    use MotionType::*;

    match (coverage, motion_type) {
        // Straight man: the assigned defender runs with him.
        (Cover0, Fly | Jet | Across | Orbit | Return) => MotionResponse::Lock,
        (Cover0, Glide | Shift) => MotionResponse::Minimal,

        (Cover1, Fly | Across | Glide) => MotionResponse::Lock,
        (Cover1, Jet | Orbit | Return) => MotionResponse::Travel,
        (Cover1, Shift) => MotionResponse::Check,

        (Cover2, Jet | Fly) => MotionResponse::Buzz,
        (Cover2, Orbit | Return) => MotionResponse::Spin,
        (Cover2, Shift | Across) => MotionResponse::Check,

        (Cover3, Jet | Across) => MotionResponse::Buzz,
        (Cover3, Orbit | Return) => MotionResponse::Spin,
        (Cover3, Shift) => MotionResponse::Check,

        (Cover4, Fly | Jet) => MotionResponse::PatternAdjust,
        (Cover4, Across | Glide) => MotionResponse::MegTrigger,
        (Cover4, Shift) => MotionResponse::Check,

        (Cover6, Shift | Across | Jet) => MotionResponse::Check,
        (Cover6, Fly) => MotionResponse::PatternAdjust,

        (Tampa2, Jet | Fly | Across) => MotionResponse::Bump,
        (Tampa2, Shift) => MotionResponse::Check,

        _ => MotionResponse::Minimal,
    }
}

/// Compute the defensive answer to a motion as a pure delta list. The
/// caller applies it atomically; nothing here touches the players.
pub fn handle_motion_adjustments(
    coverage: CoverageType,
    motion: &Motion,
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    los: f32,
) -> Vec<Adjustment> {
    let response = motion_response(coverage, motion.motion_type);

    debug!(
        "{} answers {} motion with {}",
        coverage, motion.motion_type, response
    );

    match response {
        MotionResponse::Lock => lock(motion, defense),
        MotionResponse::Travel => travel(motion, defense),
        MotionResponse::Buzz => buzz(defense, offense, los),
        MotionResponse::Spin => spin(motion, defense, offense),
        MotionResponse::Check => check(coverage, motion, defense, offense, los),
        MotionResponse::PatternAdjust => pattern_adjust(motion, defense),
        MotionResponse::MegTrigger => meg_trigger(motion, defense),
        MotionResponse::Bump => bump(motion, defense, offense),
        MotionResponse::Minimal => minimal(motion, defense),
    }
}

/// The defender responsible for the motion man re-centers on his end
/// position at unchanged depth. Falls back to the nearest corner or
/// nickel when nobody carries the assignment.
fn lock(motion: &Motion, defense: &[PlayPlayer]) -> Vec<Adjustment> {
    let assigned = defense.iter().find(|d| {
        d.responsibility
            .as_ref()
            .and_then(|r| r.man_target())
            == Some(motion.player_id)
    });

    let defender = assigned.or_else(|| {
        defense
            .iter()
            .filter(|d| matches!(d.role, PlayerRole::Cornerback | PlayerRole::NickelBack))
            .min_by(|a, b| {
                a.distance_to(motion.end_position)
                    .partial_cmp(&b.distance_to(motion.end_position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    match defender {
        Some(defender) => vec![
            Adjustment::reposition(
                defender.id,
                Vector2::new(motion.end_position.x, defender.position.y),
            )
            .with_responsibility(CoverageResponsibility::Man {
                target: motion.player_id,
            }),
        ],
        None => Vec::new(),
    }
}

/// Everyone slides a fixed two yards with the motion.
fn travel(motion: &Motion, defense: &[PlayPlayer]) -> Vec<Adjustment> {
    let shift = TRAVEL_SHIFT * motion.direction();

    defense
        .iter()
        .map(|d| {
            Adjustment::reposition(d.id, Vector2::new(d.position.x + shift, d.position.y))
        })
        .collect()
}

/// Strong safety drops down into the hook window.
fn buzz(defense: &[PlayPlayer], offense: &[PlayPlayer], los: f32) -> Vec<Adjustment> {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);

    let Some(ss_id) = roles.strong_safety() else {
        return Vec::new();
    };

    match defense.iter().find(|d| d.id == ss_id) {
        Some(safety) => vec![Adjustment::reposition(
            safety.id,
            Vector2::new(safety.position.x, los + BUZZ_HOOK_DEPTH),
        )],
        None => Vec::new(),
    }
}

/// Safeties rotate five yards opposite the motion.
fn spin(motion: &Motion, defense: &[PlayPlayer], _offense: &[PlayPlayer]) -> Vec<Adjustment> {
    let shift = -SPIN_SHIFT * motion.direction();

    defense
        .iter()
        .filter(|d| d.role == PlayerRole::Safety)
        .map(|d| Adjustment::reposition(d.id, Vector2::new(d.position.x + shift, d.position.y)))
        .collect()
}

/// Re-analyze the formation with the motion man at his end point; if the
/// strength flipped, the whole shell realigns to the new picture.
fn check(
    coverage: CoverageType,
    motion: &Motion,
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    los: f32,
) -> Vec<Adjustment> {
    let before = analyze_formation(offense);

    let mut moved: Vec<PlayPlayer> = offense.to_vec();
    if let Some(player) = moved.iter_mut().find(|p| p.id == motion.player_id) {
        player.position = motion.end_position;
    }

    let after = analyze_formation(&moved);

    if before.strength == after.strength {
        return minimal(motion, defense);
    }

    debug!(
        "motion flips strength {} -> {}, realigning",
        before.strength, after.strength
    );

    crate::play::coverage::apply_coverage_adjustments(
        coverage,
        defense,
        &moved,
        &after,
        los,
        Some(Rotation::Sky),
    )
}

/// Quarters answer: put the motion man's defender back in his zone shell.
fn pattern_adjust(motion: &Motion, defense: &[PlayPlayer]) -> Vec<Adjustment> {
    let assigned = defense.iter().find(|d| {
        d.responsibility.as_ref().and_then(|r| r.man_target()) == Some(motion.player_id)
    });

    match assigned {
        Some(defender) => vec![Adjustment::reposition(defender.id, defender.position)
            .with_responsibility(CoverageResponsibility::Zone {
                zone: crate::play::coverage::Zone::new(
                    crate::play::coverage::ZoneName::DeepQuarter,
                    defender.position,
                    13.33,
                    25.0,
                    (defender.position.y - motion.end_position.y).abs().max(7.0),
                ),
            })],
        None => Vec::new(),
    }
}

/// Hard man trigger: whoever is over the motion man runs with him
/// everywhere he goes.
fn meg_trigger(motion: &Motion, defense: &[PlayPlayer]) -> Vec<Adjustment> {
    let nearest = defense.iter().min_by(|a, b| {
        a.distance_to(motion.end_position)
            .partial_cmp(&b.distance_to(motion.end_position))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match nearest {
        Some(defender) => vec![
            Adjustment::reposition(
                defender.id,
                Vector2::new(motion.end_position.x, defender.position.y),
            )
            .with_responsibility(CoverageResponsibility::Man {
                target: motion.player_id,
            }),
        ],
        None => Vec::new(),
    }
}

/// Linebackers bump their zones toward the motion, harder from the far
/// side.
fn bump(motion: &Motion, defense: &[PlayPlayer], _offense: &[PlayPlayer]) -> Vec<Adjustment> {
    let direction = motion.direction();
    let motion_side = FieldSide::of_x(motion.end_position.x);

    defense
        .iter()
        .filter(|d| d.role == PlayerRole::Linebacker)
        .map(|d| {
            let on_motion_side = FieldSide::of_x(d.position.x) == motion_side;
            let shift = if on_motion_side {
                BUMP_NEAR_SHIFT
            } else {
                BUMP_FAR_SHIFT
            };

            Adjustment::reposition(
                d.id,
                Vector2::new(d.position.x + shift * direction, d.position.y),
            )
        })
        .collect()
}

/// Zone coverages mostly hold: one nearby defender takes a small step.
fn minimal(motion: &Motion, defense: &[PlayPlayer]) -> Vec<Adjustment> {
    let nearest = defense
        .iter()
        .filter(|d| d.distance_to(motion.end_position) <= MINIMAL_RANGE)
        .min_by(|a, b| {
            a.distance_to(motion.end_position)
                .partial_cmp(&b.distance_to(motion.end_position))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match nearest {
        Some(defender) => {
            let nudge = MINIMAL_NUDGE * motion.direction();
            vec![Adjustment::reposition(
                defender.id,
                Vector2::new(defender.position.x + nudge, defender.position.y),
            )]
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::player::Team;

    fn motion(motion_type: MotionType, from_x: f32, to_x: f32) -> Motion {
        Motion {
            player_id: 5,
            motion_type,
            start_position: Vector2::new(from_x, 28.0),
            end_position: Vector2::new(to_x, 28.0),
        }
    }

    fn defense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(10, Team::Defense, PlayerRole::Cornerback, Vector2::new(5.0, 37.0)),
            PlayPlayer::new(11, Team::Defense, PlayerRole::Cornerback, Vector2::new(48.0, 37.0)),
            PlayPlayer::new(12, Team::Defense, PlayerRole::Safety, Vector2::new(18.0, 46.0)),
            PlayPlayer::new(13, Team::Defense, PlayerRole::Safety, Vector2::new(35.0, 46.0)),
            PlayPlayer::new(14, Team::Defense, PlayerRole::Linebacker, Vector2::new(22.0, 34.0)),
            PlayPlayer::new(15, Team::Defense, PlayerRole::Linebacker, Vector2::new(31.0, 34.0)),
            PlayPlayer::new(16, Team::Defense, PlayerRole::NickelBack, Vector2::new(40.0, 36.0)),
        ]
    }

    #[test]
    fn test_response_lookup_is_deterministic() {
        for coverage in CoverageType::all() {
            for motion_type in [
                MotionType::Fly,
                MotionType::Orbit,
                MotionType::Jet,
                MotionType::Return,
                MotionType::Shift,
                MotionType::Across,
                MotionType::Glide,
            ] {
                let first = motion_response(coverage, motion_type);
                let second = motion_response(coverage, motion_type);
                assert_eq!(first, second, "{} x {}", coverage, motion_type);
            }
        }
    }

    #[test]
    fn test_lock_recenters_assigned_defender() {
        let mut defense = defense();
        defense[0].responsibility = Some(CoverageResponsibility::Man { target: 5 });

        let motion = motion(MotionType::Fly, 10.0, 44.0);
        let adjustments = handle_motion_adjustments(CoverageType::Cover0, &motion, &defense, &[], 30.0);

        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].defender_id, 10);
        assert_eq!(adjustments[0].new_position.x, 44.0);
        assert_eq!(adjustments[0].new_position.y, 37.0, "lock keeps depth");
    }

    #[test]
    fn test_travel_shifts_everyone_two_yards() {
        let motion = motion(MotionType::Jet, 10.0, 44.0);
        let defense = defense();
        let adjustments = handle_motion_adjustments(CoverageType::Cover1, &motion, &defense, &[], 30.0);

        assert_eq!(adjustments.len(), defense.len());
        for (adjustment, defender) in adjustments.iter().zip(&defense) {
            assert_eq!(adjustment.new_position.x, defender.position.x + 2.0);
        }
    }

    #[test]
    fn test_spin_moves_safeties_opposite() {
        let motion = motion(MotionType::Orbit, 10.0, 44.0); // direction +1
        let defense = defense();
        let adjustments = handle_motion_adjustments(CoverageType::Cover2, &motion, &defense, &[], 30.0);

        assert_eq!(adjustments.len(), 2);
        for adjustment in &adjustments {
            let original = defense
                .iter()
                .find(|d| d.id == adjustment.defender_id)
                .unwrap();
            assert_eq!(adjustment.new_position.x, original.position.x - 5.0);
        }
    }

    #[test]
    fn test_bump_is_asymmetric() {
        let motion = motion(MotionType::Jet, 10.0, 44.0); // toward the right
        let defense = defense();
        let adjustments = handle_motion_adjustments(CoverageType::Tampa2, &motion, &defense, &[], 30.0);

        let near = adjustments.iter().find(|a| a.defender_id == 15).unwrap(); // x=31, motion side
        let far = adjustments.iter().find(|a| a.defender_id == 14).unwrap(); // x=22, far side

        assert_eq!(near.new_position.x, 31.0 + 1.5);
        assert_eq!(far.new_position.x, 22.0 + 2.5);
    }

    #[test]
    fn test_minimal_nudges_at_most_one_defender() {
        let motion = motion(MotionType::Glide, 10.0, 44.0);
        let adjustments = handle_motion_adjustments(CoverageType::Cover3, &motion, &defense(), &[], 30.0);

        assert!(adjustments.len() <= 1);
        if let Some(adjustment) = adjustments.first() {
            let original = defense()
                .into_iter()
                .find(|d| d.id == adjustment.defender_id)
                .unwrap();
            assert!((adjustment.new_position.x - original.position.x).abs() <= 1.0);
        }
    }
}
