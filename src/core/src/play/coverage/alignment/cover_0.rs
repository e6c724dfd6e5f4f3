use crate::play::coverage::alignment::{align_at, align_over, take_nearest, AlignmentMap};
use crate::play::field::{FieldSide, FIELD_CENTER_X};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

/// Cover 0: no deep help, every eligible receiver pressed man.
#[derive(Debug, Clone)]
pub struct Cover0Tuning {
    pub press_depth: f32,
    pub inside_shade: f32,
    pub back_man_depth: f32,
    pub blitz_depth: f32,
    pub blitz_gap_offset: f32,
}

impl Default for Cover0Tuning {
    fn default() -> Self {
        Cover0Tuning {
            press_depth: 1.0,
            inside_shade: 0.5,
            back_man_depth: 3.5,
            blitz_depth: 1.5,
            blitz_gap_offset: 1.0,
        }
    }
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    tuning: &Cover0Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    let mut pool: Vec<&PlayPlayer> = offense.iter().filter(|p| p.is_eligible).collect();

    let press = |receiver: &PlayPlayer, depth: f32| {
        let inward = match FieldSide::of_x(receiver.position.x) {
            FieldSide::Left => tuning.inside_shade,
            FieldSide::Right => -tuning.inside_shade,
        };
        align_over(receiver, inward, depth, los)
    };

    // Corners and the nickel press the receivers closest to them.
    for cb_id in roles.cornerbacks() {
        if let Some(defender) = defense.iter().find(|p| p.id == cb_id) {
            if let Some(receiver) = take_nearest(&mut pool, defender.position.x) {
                alignment.insert(cb_id, press(receiver, tuning.press_depth));
            }
        }
    }

    if let Some(nb_id) = roles.nickel_back() {
        if let Some(defender) = defense.iter().find(|p| p.id == nb_id) {
            if let Some(receiver) = take_nearest(&mut pool, defender.position.x) {
                alignment.insert(nb_id, press(receiver, tuning.press_depth));
            }
        }
    }

    // Safeties take the next receivers with a little more cushion.
    for safety_id in [roles.strong_safety(), roles.free_safety()].into_iter().flatten() {
        if let Some(defender) = defense.iter().find(|p| p.id == safety_id) {
            if let Some(receiver) = take_nearest(&mut pool, defender.position.x) {
                alignment.insert(safety_id, press(receiver, tuning.back_man_depth));
            }
        }
    }

    // Linebackers cover what is left; with nobody left they come.
    let mut gap = -tuning.blitz_gap_offset;
    for lb_id in roles.linebackers() {
        if let Some(defender) = defense.iter().find(|p| p.id == lb_id) {
            match take_nearest(&mut pool, defender.position.x) {
                Some(receiver) => {
                    alignment.insert(lb_id, press(receiver, tuning.back_man_depth));
                }
                None => {
                    alignment.insert(lb_id, align_at(FIELD_CENTER_X + gap, tuning.blitz_depth, los));
                    gap = -gap + tuning.blitz_gap_offset;
                }
            }
        }
    }

    alignment
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
            PlayPlayer::new(5, Team::Offense, PlayerRole::RunningBack, Vector2::new(26.0, 24.0)),
        ]
    }

    fn defense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(10, Team::Defense, PlayerRole::Cornerback, Vector2::new(5.0, 37.0)),
            PlayPlayer::new(11, Team::Defense, PlayerRole::Cornerback, Vector2::new(48.0, 37.0)),
            PlayPlayer::new(12, Team::Defense, PlayerRole::Safety, Vector2::new(20.0, 42.0)),
            PlayPlayer::new(13, Team::Defense, PlayerRole::Safety, Vector2::new(33.0, 42.0)),
            PlayPlayer::new(14, Team::Defense, PlayerRole::Linebacker, Vector2::new(22.0, 34.0)),
            PlayPlayer::new(15, Team::Defense, PlayerRole::Linebacker, Vector2::new(31.0, 34.0)),
            PlayPlayer::new(16, Team::Defense, PlayerRole::NickelBack, Vector2::new(40.0, 36.0)),
        ]
    }

    #[test]
    fn test_everyone_aligns_tight_to_the_line() {
        let los = 30.0;
        let alignment = generate_alignment(&offense(), &defense(), los, &Default::default());

        assert!(!alignment.is_empty());
        for (_, position) in &alignment {
            let depth = position.y - los;
            assert!(depth <= 4.0, "cover zero has no deep alignment, got {}", depth);
        }
    }

    #[test]
    fn test_corners_press_the_widest_receivers() {
        let alignment = generate_alignment(&offense(), &defense(), 30.0, &Default::default());

        let left_cb = alignment.get(&10).unwrap();
        assert!((left_cb.x - 5.5).abs() < 1e-4, "press with inside shade, got {}", left_cb.x);
        assert_eq!(left_cb.y, 31.0);

        let right_cb = alignment.get(&11).unwrap();
        assert!((right_cb.x - 47.5).abs() < 1e-4);
    }

    #[test]
    fn test_no_receiver_left_means_pressure() {
        // Only two eligible receivers; both linebackers end up in the gaps
        let offense = vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
        ];

        let los = 30.0;
        let alignment = generate_alignment(&offense, &defense(), los, &Default::default());

        for lb in [14, 15] {
            let position = alignment.get(&lb).expect("linebacker aligned");
            assert!((position.y - los - 1.5).abs() < 1e-4, "blitz depth expected");
        }
    }
}
