use crate::play::coverage::alignment::{
    align_at, align_over, take_nearest, AlignmentMap, TRIPS_SAFETY_SHADE,
};
use crate::play::field::{FieldSide, FIELD_CENTER_X};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

/// Cover 1: man across with a single high safety and a robber.
#[derive(Debug, Clone)]
pub struct Cover1Tuning {
    pub press_depth: f32,
    pub inside_shade: f32,
    pub free_safety_depth: f32,
    pub strong_safety_depth: f32,
    pub robber_depth: f32,
    pub back_man_depth: f32,
    pub hole_depth: f32,
}

impl Default for Cover1Tuning {
    fn default() -> Self {
        Cover1Tuning {
            press_depth: 1.0,
            inside_shade: 0.5,
            free_safety_depth: 13.0,
            strong_safety_depth: 5.0,
            robber_depth: 8.0,
            back_man_depth: 4.0,
            hole_depth: 4.5,
        }
    }
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    tuning: &Cover1Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    // The free safety holds the middle of the field, shaded a few yards
    // toward a trips side.
    if let Some(fs_id) = roles.free_safety() {
        let shade = formation
            .trips_side
            .map(|side| TRIPS_SAFETY_SHADE * side.direction())
            .unwrap_or(0.0);

        alignment.insert(fs_id, align_at(FIELD_CENTER_X + shade, tuning.free_safety_depth, los));
    }

    let mut pool: Vec<&PlayPlayer> = offense.iter().filter(|p| p.is_eligible).collect();

    // The strong safety drops over the strong #2; with no #2 to walk out
    // on he plays the robber hole in the middle instead.
    if let Some(ss_id) = roles.strong_safety() {
        let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
        let strong_two = {
            let ordered = crate::play::coverage::alignment::receivers_outside_in(offense, strong_side);
            ordered.get(1).map(|p| p.id)
        };

        let target = match strong_two {
            Some(receiver_id) => {
                let index = pool.iter().position(|p| p.id == receiver_id);
                match index {
                    Some(i) => {
                        let receiver = pool.remove(i);
                        align_over(receiver, 0.0, tuning.strong_safety_depth, los)
                    }
                    None => align_at(FIELD_CENTER_X, tuning.robber_depth, los),
                }
            }
            None => align_at(FIELD_CENTER_X, tuning.robber_depth, los),
        };

        alignment.insert(ss_id, target);
    }

    let press = |receiver: &PlayPlayer, depth: f32| {
        let inward = match FieldSide::of_x(receiver.position.x) {
            FieldSide::Left => tuning.inside_shade,
            FieldSide::Right => -tuning.inside_shade,
        };
        align_over(receiver, inward, depth, los)
    };

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

    // Linebackers match the backs; leftover linebackers stack the hole,
    // fanning out so two of them never share a landmark.
    let mut hole_offset = 0.0;
    for lb_id in roles.linebackers() {
        if let Some(defender) = defense.iter().find(|p| p.id == lb_id) {
            match take_nearest(&mut pool, defender.position.x) {
                Some(receiver) => {
                    alignment.insert(lb_id, press(receiver, tuning.back_man_depth));
                }
                None => {
                    alignment.insert(
                        lb_id,
                        align_at(FIELD_CENTER_X + hole_offset, tuning.hole_depth, los),
                    );
                    hole_offset = if hole_offset <= 0.0 {
                        -hole_offset + 4.0
                    } else {
                        -hole_offset
                    };
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
    fn test_free_safety_holds_the_middle() {
        let offense = vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
        ];

        let alignment = generate_alignment(&offense, &defense(), 30.0, &Default::default());
        // Balanced formation defaults strength right, so safety 12 is free
        let fs = alignment.get(&12).expect("free safety aligned");
        assert!((fs.x - FIELD_CENTER_X).abs() < 1e-4);
        assert_eq!(fs.y, 43.0);
    }

    #[test]
    fn test_strong_safety_robber_without_number_two() {
        // Single receiver per side: no strong #2 exists anywhere
        let offense = vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
        ];

        let los = 30.0;
        let alignment = generate_alignment(&offense, &defense(), los, &Default::default());

        let ss = alignment.get(&13).expect("strong safety aligned");
        assert!((ss.x - FIELD_CENTER_X).abs() < 1e-4, "robber sits in the middle");
        assert_eq!(ss.y - los, 8.0);
    }
}
