use crate::play::coverage::alignment::{
    align_at, align_over, cover_2::hook_offsets, receivers_outside_in, AlignmentMap,
    TRIPS_SAFETY_SHADE,
};
use crate::play::coverage::Rotation;
use crate::play::field::{FieldSide, FIELD_CENTER_X, FIELD_WIDTH};
use crate::play::formation::analyze_formation;
use crate::play::personnel::assign_roles;
use crate::play::player::PlayPlayer;

/// Cover 3: three deep thirds with four underneath, strong safety
/// rotating down by the called rotation (sky by default).
#[derive(Debug, Clone)]
pub struct Cover3Tuning {
    pub deep_third_width: f32,
    pub deep_depth: f32,
    pub cb_bail_depth: f32,
    pub outside_shade: f32,
    pub hook_depth: f32,
    pub hook_spread: f32,
    pub curl_flat_depth: f32,
    pub buzz_depth: f32,
    pub cloud_flat_depth: f32,
}

impl Default for Cover3Tuning {
    fn default() -> Self {
        Cover3Tuning {
            deep_third_width: 17.77, // field width / 3
            deep_depth: 12.0,
            cb_bail_depth: 7.0,
            outside_shade: 1.0,
            hook_depth: 9.0, // 8-10 yard window
            hook_spread: 8.0,
            curl_flat_depth: 5.0,
            buzz_depth: 8.0,
            cloud_flat_depth: 4.0,
        }
    }
}

impl Cover3Tuning {
    pub fn third_centers(&self) -> [f32; 3] {
        let half = self.deep_third_width / 2.0;
        [half, FIELD_WIDTH / 2.0, FIELD_WIDTH - half]
    }
}

pub fn generate_alignment(
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    rotation: Option<Rotation>,
    tuning: &Cover3Tuning,
) -> AlignmentMap {
    let formation = analyze_formation(offense);
    let roles = assign_roles(defense, &formation);
    let mut alignment = AlignmentMap::new();

    let rotation = rotation.unwrap_or(Rotation::Sky);
    let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
    let [left_third, middle_third, right_third] = tuning.third_centers();

    let trips_shade = formation
        .trips_side
        .map(|side| TRIPS_SAFETY_SHADE * side.direction())
        .unwrap_or(0.0);

    // Free safety owns the middle third.
    if let Some(fs_id) = roles.free_safety() {
        alignment.insert(
            fs_id,
            align_at(middle_third + trips_shade, tuning.deep_depth, los),
        );
    }

    // Corners bail into the outside thirds from over the #1s.
    let cornerbacks = roles.cornerbacks();
    for (cb_id, side) in cornerbacks.iter().zip([FieldSide::Left, FieldSide::Right]) {
        // Cloud rotation keeps the strong corner down in the flat.
        let depth = if rotation == Rotation::Cloud && side == strong_side {
            tuning.cloud_flat_depth
        } else {
            tuning.cb_bail_depth
        };

        let receivers = receivers_outside_in(offense, side);
        let target = match receivers.first() {
            Some(number_one) => {
                align_over(number_one, tuning.outside_shade * side.direction(), depth, los)
            }
            None => {
                let landmark = match side {
                    FieldSide::Left => left_third,
                    FieldSide::Right => right_third,
                };
                align_at(landmark, depth, los)
            }
        };

        alignment.insert(*cb_id, target);
    }

    // Strong safety placement is the rotation call.
    if let Some(ss_id) = roles.strong_safety() {
        let target = match rotation {
            Rotation::Sky => {
                let receivers = receivers_outside_in(offense, strong_side);
                match receivers.get(1) {
                    Some(number_two) => align_over(number_two, 0.0, tuning.curl_flat_depth, los),
                    None => align_at(
                        FIELD_CENTER_X + 12.0 * strong_side.direction(),
                        tuning.curl_flat_depth,
                        los,
                    ),
                }
            }
            Rotation::Buzz => align_at(FIELD_CENTER_X, tuning.buzz_depth, los),
            Rotation::Cloud => {
                // Corner stayed low; the safety caps the strong third.
                let landmark = match strong_side {
                    FieldSide::Left => left_third,
                    FieldSide::Right => right_third,
                };
                align_at(landmark + trips_shade, tuning.deep_depth, los)
            }
        };

        alignment.insert(ss_id, target);
    }

    // Linebackers split the hook windows.
    let linebackers = roles.linebackers();
    let offsets = hook_offsets(linebackers.len(), tuning.hook_spread);
    for (lb_id, offset) in linebackers.iter().zip(offsets) {
        alignment.insert(*lb_id, align_at(FIELD_CENTER_X + offset, tuning.hook_depth, los));
    }

    // Nickel hangs over the weak-side slot.
    if let Some(nb_id) = roles.nickel_back() {
        let weak_side = strong_side.opposite();
        let receivers = receivers_outside_in(offense, weak_side);

        let target = match receivers.get(1) {
            Some(number_two) => align_over(number_two, 0.0, tuning.curl_flat_depth, los),
            None => align_at(
                FIELD_CENTER_X + 10.0 * weak_side.direction(),
                tuning.curl_flat_depth,
                los,
            ),
        };

        alignment.insert(nb_id, target);
    }

    alignment
}
