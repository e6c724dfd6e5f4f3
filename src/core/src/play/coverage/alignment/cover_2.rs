use crate::play::coverage::alignment::{
    align_at, align_over, ordered_by_x, receivers_outside_in, AlignmentMap, TRIPS_CORNER_SHADE,
    TRIPS_SAFETY_SHADE,
};
use crate::play::field::{FieldSide, FIELD_CENTER_X};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

/// Cover 2: two deep halves, corners jamming the release underneath.
#[derive(Debug, Clone)]
pub struct Cover2Tuning {
    pub press_depth: f32,
    pub bail_depth: f32,
    pub outside_shade: f32,
    pub safety_depth: f32,
    pub safety_split: f32,
    pub hook_depth: f32,
    pub hook_spread: f32,
    pub curl_depth: f32,
    pub press_corners: bool,
}

impl Default for Cover2Tuning {
    fn default() -> Self {
        Cover2Tuning {
            press_depth: 1.0,
            bail_depth: 6.0, // 5-7 yard bail window
            outside_shade: 1.0,
            safety_depth: 16.5, // 15-18 yard landmark
            safety_split: 13.0,
            hook_depth: 9.0,
            hook_spread: 9.0,
            curl_depth: 5.0,
            press_corners: true,
        }
    }
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    tuning: &Cover2Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    let trips_shade = formation
        .trips_side
        .map(|side| TRIPS_SAFETY_SHADE * side.direction())
        .unwrap_or(0.0);

    // Two deep halves split off the middle of the field.
    let safeties = ordered_by_x(defense, &roles.safeties());
    let halves = [
        FIELD_CENTER_X - tuning.safety_split,
        FIELD_CENTER_X + tuning.safety_split,
    ];
    for (safety_id, half_x) in safeties.iter().zip(halves) {
        alignment.insert(*safety_id, align_at(half_x + trips_shade, tuning.safety_depth, los));
    }

    // Corners play the #1 on their side: press jam or bail.
    let corner_depth = if tuning.press_corners {
        tuning.press_depth
    } else {
        tuning.bail_depth
    };

    let cornerbacks = roles.cornerbacks();
    for (cb_id, side) in cornerbacks.iter().zip([FieldSide::Left, FieldSide::Right]) {
        let receivers = receivers_outside_in(offense, side);
        if let Some(number_one) = receivers.first() {
            let mut shade = tuning.outside_shade * side.direction();
            if formation.trips_side == Some(side) {
                shade += TRIPS_CORNER_SHADE * side.opposite().direction();
            }
            alignment.insert(*cb_id, align_over(number_one, shade, corner_depth, los));
        }
    }

    // Linebackers wall off the hook windows.
    let linebackers = roles.linebackers();
    let offsets = hook_offsets(linebackers.len(), tuning.hook_spread);
    for (lb_id, offset) in linebackers.iter().zip(offsets) {
        alignment.insert(*lb_id, align_at(FIELD_CENTER_X + offset, tuning.hook_depth, los));
    }

    // Nickel hangs in the strong-side curl.
    if let Some(nb_id) = roles.nickel_back() {
        let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
        let receivers = receivers_outside_in(offense, strong_side);

        let target = match receivers.get(1) {
            Some(number_two) => align_over(number_two, side_shade(strong_side), tuning.curl_depth, los),
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

fn side_shade(side: FieldSide) -> f32 {
    side.direction()
}

pub fn hook_offsets(count: usize, spread: f32) -> Vec<f32> {
    match count {
        0 => vec![],
        1 => vec![0.0],
        2 => vec![-spread * 0.7, spread * 0.7],
        _ => {
            let mut offsets = Vec::with_capacity(count);
            let half = (count - 1) as f32 / 2.0;
            for i in 0..count {
                offsets.push((i as f32 - half) * spread);
            }
            offsets
        }
    }
}
