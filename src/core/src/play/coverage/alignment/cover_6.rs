use crate::play::coverage::alignment::{
    align_at, align_over, cover_2::hook_offsets, receivers_outside_in, AlignmentMap,
};
use crate::play::field::{FieldSide, FIELD_CENTER_X, FIELD_WIDTH};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

/// Cover 6: quarter-quarter-half. Quarters to the strength, a cloud half
/// behind a squatting corner on the weak side.
#[derive(Debug, Clone)]
pub struct Cover6Tuning {
    pub quarter_width: f32,
    pub quarter_cb_depth: f32,
    pub quarter_safety_depth: f32,
    pub half_safety_depth: f32,
    pub weak_corner_depth: f32,
    pub outside_shade: f32,
    pub hook_depth: f32,
    pub hook_spread: f32,
    pub curl_depth: f32,
}

impl Default for Cover6Tuning {
    fn default() -> Self {
        Cover6Tuning {
            quarter_width: 13.33,
            quarter_cb_depth: 7.0,
            quarter_safety_depth: 12.0,
            half_safety_depth: 15.5,
            weak_corner_depth: 1.0, // squat corner jams underneath the half
            outside_shade: 1.0,
            hook_depth: 9.0,
            hook_spread: 8.0,
            curl_depth: 5.0,
        }
    }
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    tuning: &Cover6Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
    let weak_side = strong_side.opposite();

    // Quarter landmarks on the strong side, half landmark on the weak.
    let strong_outer_quarter = match strong_side {
        FieldSide::Left => tuning.quarter_width / 2.0,
        FieldSide::Right => FIELD_WIDTH - tuning.quarter_width / 2.0,
    };
    let strong_inner_quarter = match strong_side {
        FieldSide::Left => tuning.quarter_width * 1.5,
        FieldSide::Right => FIELD_WIDTH - tuning.quarter_width * 1.5,
    };
    let weak_half = FIELD_CENTER_X + (FIELD_WIDTH / 4.0) * weak_side.direction();

    // Strong safety plays the inside quarter, free safety the weak half.
    if let Some(ss_id) = roles.strong_safety() {
        alignment.insert(ss_id, align_at(strong_inner_quarter, tuning.quarter_safety_depth, los));
    }
    if let Some(fs_id) = roles.free_safety() {
        alignment.insert(fs_id, align_at(weak_half, tuning.half_safety_depth, los));
    }

    let cornerbacks = roles.cornerbacks();
    for (cb_id, side) in cornerbacks.iter().zip([FieldSide::Left, FieldSide::Right]) {
        let depth = if side == strong_side {
            tuning.quarter_cb_depth
        } else {
            tuning.weak_corner_depth
        };

        let receivers = receivers_outside_in(offense, side);
        let target = match receivers.first() {
            Some(number_one) => align_over(
                number_one,
                tuning.outside_shade * side.direction(),
                depth,
                los,
            ),
            None => {
                let landmark = if side == strong_side {
                    strong_outer_quarter
                } else {
                    weak_half
                };
                align_at(landmark, depth, los)
            }
        };

        alignment.insert(*cb_id, target);
    }

    let linebackers = roles.linebackers();
    let offsets = hook_offsets(linebackers.len(), tuning.hook_spread);
    for (lb_id, offset) in linebackers.iter().zip(offsets) {
        alignment.insert(*lb_id, align_at(FIELD_CENTER_X + offset, tuning.hook_depth, los));
    }

    if let Some(nb_id) = roles.nickel_back() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::player::{PlayerRole, Team};
    use nalgebra::Vector2;

    fn trips_right_offense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(35.0, 29.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::WideReceiver, Vector2::new(42.0, 29.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
        ]
    }

    fn defense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(10, Team::Defense, PlayerRole::Cornerback, Vector2::new(5.0, 37.0)),
            PlayPlayer::new(11, Team::Defense, PlayerRole::Cornerback, Vector2::new(48.0, 37.0)),
            PlayPlayer::new(12, Team::Defense, PlayerRole::Safety, Vector2::new(18.0, 42.0)),
            PlayPlayer::new(13, Team::Defense, PlayerRole::Safety, Vector2::new(35.0, 42.0)),
            PlayPlayer::new(14, Team::Defense, PlayerRole::Linebacker, Vector2::new(22.0, 34.0)),
            PlayPlayer::new(15, Team::Defense, PlayerRole::Linebacker, Vector2::new(31.0, 34.0)),
            PlayPlayer::new(16, Team::Defense, PlayerRole::NickelBack, Vector2::new(40.0, 36.0)),
        ]
    }

    #[test]
    fn test_split_field_shape() {
        let los = 30.0;
        let alignment = generate_alignment(&trips_right_offense(), &defense(), los, &Default::default());

        // Strength right: safety 13 quarters right, safety 12 holds the
        // weak half on the left
        let ss = alignment.get(&13).unwrap();
        let fs = alignment.get(&12).unwrap();

        assert!(ss.x > FIELD_CENTER_X);
        assert_eq!(ss.y - los, 12.0);

        assert!(fs.x < FIELD_CENTER_X);
        assert_eq!(fs.y - los, 15.5);
    }

    #[test]
    fn test_weak_corner_squats() {
        let los = 30.0;
        let alignment = generate_alignment(&trips_right_offense(), &defense(), los, &Default::default());

        // Weak side is left: corner 10 squats at the line
        let weak_cb = alignment.get(&10).unwrap();
        let strong_cb = alignment.get(&11).unwrap();

        assert_eq!(weak_cb.y - los, 1.0);
        assert_eq!(strong_cb.y - los, 7.0);
    }
}
