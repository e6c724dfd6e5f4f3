use crate::play::coverage::alignment::{
    align_at, align_over, ordered_by_x, receivers_outside_in, AlignmentMap, TRIPS_SAFETY_SHADE,
};
use crate::play::field::{FieldSide, FIELD_CENTER_X, FIELD_WIDTH};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

/// Cover 4 (quarters): four deep, three underneath.
#[derive(Debug, Clone)]
pub struct Cover4Tuning {
    pub quarter_width: f32,
    pub cb_depth: f32,
    pub safety_depth: f32,
    pub outside_shade: f32,
    pub underneath_depth: f32,
    pub underneath_spread: f32,
}

impl Default for Cover4Tuning {
    fn default() -> Self {
        Cover4Tuning {
            quarter_width: 13.33, // field width / 4
            cb_depth: 7.0,
            safety_depth: 12.0,
            outside_shade: 1.0,
            underneath_depth: 4.5,
            underneath_spread: 10.0,
        }
    }
}

impl Cover4Tuning {
    pub fn quarter_centers(&self) -> [f32; 4] {
        let half = self.quarter_width / 2.0;
        [
            half,
            self.quarter_width + half,
            FIELD_WIDTH - self.quarter_width - half,
            FIELD_WIDTH - half,
        ]
    }
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    tuning: &Cover4Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    let [outer_left, inner_left, inner_right, outer_right] = tuning.quarter_centers();

    let trips_shade = formation
        .trips_side
        .map(|side| TRIPS_SAFETY_SHADE * side.direction())
        .unwrap_or(0.0);

    // Safeties cap the inside quarters.
    let safeties = ordered_by_x(defense, &roles.safeties());
    for (safety_id, quarter_x) in safeties.iter().zip([inner_left, inner_right]) {
        alignment.insert(
            *safety_id,
            align_at(quarter_x + trips_shade, tuning.safety_depth, los),
        );
    }

    // Corners cap the outside quarters from over the #1s.
    let cornerbacks = roles.cornerbacks();
    for (cb_id, side) in cornerbacks.iter().zip([FieldSide::Left, FieldSide::Right]) {
        let receivers = receivers_outside_in(offense, side);
        let target = match receivers.first() {
            Some(number_one) => align_over(
                number_one,
                tuning.outside_shade * side.direction(),
                tuning.cb_depth,
                los,
            ),
            None => {
                let landmark = match side {
                    FieldSide::Left => outer_left,
                    FieldSide::Right => outer_right,
                };
                align_at(landmark, tuning.cb_depth, los)
            }
        };

        alignment.insert(*cb_id, target);
    }

    // Three underneath: linebackers across the middle, nickel to the
    // strong slot.
    let linebackers = roles.linebackers();
    let offsets = underneath_offsets(linebackers.len(), tuning.underneath_spread);
    for (lb_id, offset) in linebackers.iter().zip(offsets) {
        alignment.insert(
            *lb_id,
            align_at(FIELD_CENTER_X + offset, tuning.underneath_depth, los),
        );
    }

    if let Some(nb_id) = roles.nickel_back() {
        let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
        let receivers = receivers_outside_in(offense, strong_side);

        let target = match receivers.get(1) {
            Some(number_two) => align_over(number_two, 0.0, tuning.underneath_depth, los),
            None => align_at(
                FIELD_CENTER_X + 10.0 * strong_side.direction(),
                tuning.underneath_depth,
                los,
            ),
        };

        alignment.insert(nb_id, target);
    }

    alignment
}

fn underneath_offsets(count: usize, spread: f32) -> Vec<f32> {
    match count {
        0 => vec![],
        1 => vec![0.0],
        2 => vec![-spread, spread],
        _ => {
            let half = (count - 1) as f32 / 2.0;
            (0..count).map(|i| (i as f32 - half) * spread).collect()
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
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(14.0, 29.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::WideReceiver, Vector2::new(39.0, 29.0)),
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
    fn test_quarter_centers() {
        let centers = Cover4Tuning::default().quarter_centers();
        assert!((centers[0] - 6.665).abs() < 1e-3);
        assert!((centers[1] - 19.995).abs() < 1e-3);
        assert!((centers[2] - 33.335).abs() < 1e-2);
        assert!((centers[3] - 46.665).abs() < 1e-3);
    }

    #[test]
    fn test_safeties_cap_inside_quarters() {
        let los = 30.0;
        let alignment = generate_alignment(&offense(), &defense(), los, &Default::default());

        let left = alignment.get(&12).unwrap();
        let right = alignment.get(&13).unwrap();

        assert!(left.x < FIELD_CENTER_X && right.x > FIELD_CENTER_X);
        assert_eq!(left.y - los, 12.0);
        assert_eq!(right.y - los, 12.0);
    }

    #[test]
    fn test_seven_defenders_all_mapped() {
        let alignment = generate_alignment(&offense(), &defense(), 30.0, &Default::default());
        assert_eq!(alignment.len(), 7);
    }
}
