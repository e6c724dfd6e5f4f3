use crate::play::coverage::alignment::{
    align_at, align_over, ordered_by_x, receivers_outside_in, AlignmentMap, TRIPS_SAFETY_SHADE,
};
use crate::play::field::{FieldSide, FIELD_CENTER_X};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

pub const MIKE_START_DEPTH: f32 = 4.5;
pub const MIKE_MAX_DEPTH: f32 = 18.0;
pub const MIKE_DROP_SECONDS: f32 = 3.0; // time to run the pole to full depth

/// Tampa 2: two-deep shell with the middle linebacker running the pole.
/// The Mike opens at linebacker depth; his drop to 18 yards happens live,
/// driven by [`mike_pole_depth`].
#[derive(Debug, Clone)]
pub struct Tampa2Tuning {
    pub press_depth: f32,
    pub outside_shade: f32,
    pub safety_depth: f32,
    pub safety_split: f32,
    pub hook_depth: f32,
    pub hook_spread: f32,
    pub curl_depth: f32,
}

impl Default for Tampa2Tuning {
    fn default() -> Self {
        Tampa2Tuning {
            press_depth: 1.0,
            outside_shade: 1.0,
            safety_depth: 16.5,
            safety_split: 13.0,
            hook_depth: 9.0,
            hook_spread: 9.0,
            curl_depth: 5.0,
        }
    }
}

/// Depth of the Mike's middle drop at `time_elapsed` seconds after the
/// snap: 4.5 yards at the snap, 18 at the top of the pole.
pub fn mike_pole_depth(time_elapsed: f32) -> f32 {
    let progress = (time_elapsed / MIKE_DROP_SECONDS).clamp(0.0, 1.0);
    MIKE_START_DEPTH + (MIKE_MAX_DEPTH - MIKE_START_DEPTH) * progress
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    tuning: &Tampa2Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    let trips_shade = formation
        .trips_side
        .map(|side| TRIPS_SAFETY_SHADE * side.direction())
        .unwrap_or(0.0);

    let safeties = ordered_by_x(defense, &roles.safeties());
    let halves = [
        FIELD_CENTER_X - tuning.safety_split,
        FIELD_CENTER_X + tuning.safety_split,
    ];
    for (safety_id, half_x) in safeties.iter().zip(halves) {
        alignment.insert(*safety_id, align_at(half_x + trips_shade, tuning.safety_depth, los));
    }

    let cornerbacks = roles.cornerbacks();
    for (cb_id, side) in cornerbacks.iter().zip([FieldSide::Left, FieldSide::Right]) {
        let receivers = receivers_outside_in(offense, side);
        if let Some(number_one) = receivers.first() {
            alignment.insert(
                *cb_id,
                align_over(
                    number_one,
                    tuning.outside_shade * side.direction(),
                    tuning.press_depth,
                    los,
                ),
            );
        }
    }

    // The Mike opens shallow in the middle before running the pole; the
    // other linebackers take the hooks. A lone linebacker still takes the
    // pole so the deep middle is not simply abandoned; the validator
    // flags the personnel problem separately.
    let mike = roles.mike();
    if let Some(mike_id) = mike {
        alignment.insert(mike_id, align_at(FIELD_CENTER_X, MIKE_START_DEPTH, los));
    }

    let outside_backers: Vec<u32> = roles
        .linebackers()
        .into_iter()
        .filter(|id| Some(*id) != mike)
        .collect();

    let offsets = outside_hook_offsets(outside_backers.len(), tuning.hook_spread);
    for (lb_id, offset) in outside_backers.iter().zip(offsets) {
        alignment.insert(*lb_id, align_at(FIELD_CENTER_X + offset, tuning.hook_depth, los));
    }

    if let Some(nb_id) = roles.nickel_back() {
        let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
        let receivers = receivers_outside_in(offense, strong_side);

        let target = match receivers.get(1) {
            Some(number_two) => align_over(number_two, 0.0, tuning.curl_depth, los),
            None => align_at(
                FIELD_CENTER_X + 10.0 * strong_side.direction(),
                tuning.curl_depth,
                los,
            ),
        };

        alignment.insert(nb_id, target);
    }

    alignment
}

fn outside_hook_offsets(count: usize, spread: f32) -> Vec<f32> {
    match count {
        0 => vec![],
        1 => vec![spread],
        _ => {
            // Symmetric around the vacated middle
            let mut offsets = vec![-spread, spread];
            for extra in 2..count {
                offsets.push(spread * (extra as f32));
            }
            offsets
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::player::{PlayerRole, Team};
    use nalgebra::Vector2;

    fn offense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::TightEnd, Vector2::new(31.0, 29.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::RunningBack, Vector2::new(27.0, 24.0)),
        ]
    }

    fn defense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(10, Team::Defense, PlayerRole::Cornerback, Vector2::new(5.0, 37.0)),
            PlayPlayer::new(11, Team::Defense, PlayerRole::Cornerback, Vector2::new(48.0, 37.0)),
            PlayPlayer::new(12, Team::Defense, PlayerRole::Safety, Vector2::new(18.0, 42.0)),
            PlayPlayer::new(13, Team::Defense, PlayerRole::Safety, Vector2::new(35.0, 42.0)),
            PlayPlayer::new(14, Team::Defense, PlayerRole::Linebacker, Vector2::new(20.0, 34.0)),
            PlayPlayer::new(15, Team::Defense, PlayerRole::Linebacker, Vector2::new(26.5, 34.0)),
            PlayPlayer::new(16, Team::Defense, PlayerRole::Linebacker, Vector2::new(33.0, 34.0)),
        ]
    }

    #[test]
    fn test_mike_opens_at_linebacker_depth() {
        let los = 30.0;
        let alignment = generate_alignment(&offense(), &defense(), los, &Default::default());

        // Middle slot of three linebackers is 15
        let mike = alignment.get(&15).unwrap();
        assert_eq!(mike.y - los, MIKE_START_DEPTH);
        assert!((mike.x - FIELD_CENTER_X).abs() < 1e-4);
    }

    #[test]
    fn test_mike_pole_progression() {
        assert_eq!(mike_pole_depth(0.0), MIKE_START_DEPTH);
        assert_eq!(mike_pole_depth(MIKE_DROP_SECONDS), MIKE_MAX_DEPTH);
        assert_eq!(mike_pole_depth(99.0), MIKE_MAX_DEPTH);

        let mid = mike_pole_depth(1.5);
        assert!(mid > MIKE_START_DEPTH && mid < MIKE_MAX_DEPTH);
    }

    #[test]
    fn test_outside_backers_take_the_hooks() {
        let los = 30.0;
        let alignment = generate_alignment(&offense(), &defense(), los, &Default::default());

        for lb in [14, 16] {
            let position = alignment.get(&lb).unwrap();
            assert_eq!(position.y - los, 9.0);
        }
    }

    #[test]
    fn test_lone_linebacker_still_runs_the_pole() {
        let mut defense = defense();
        defense.retain(|p| p.id != 14 && p.id != 16);
        defense.push(PlayPlayer::new(
            17,
            Team::Defense,
            PlayerRole::NickelBack,
            Vector2::new(40.0, 36.0),
        ));

        let alignment = generate_alignment(&offense(), &defense, 30.0, &Default::default());
        let mike = alignment.get(&15).unwrap();
        assert_eq!(mike.y - 30.0, MIKE_START_DEPTH);
    }
}
