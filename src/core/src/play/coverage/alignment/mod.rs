pub mod cover_0;
pub mod cover_1;
pub mod cover_2;
pub mod cover_3;
pub mod cover_4;
pub mod cover_6;
pub mod tampa_2;

use crate::play::coverage::{CoverageType, Rotation};
use crate::play::field::{self, FieldSide};
use crate::play::player::PlayPlayer;
use nalgebra::Vector2;
use std::collections::HashMap;

// Shading applied when the formation overloads one side. Kept shared so
// every coverage shifts by the same reproducible amount.
pub const TRIPS_SAFETY_SHADE: f32 = 3.0; // yards toward the trips side
pub const TRIPS_CORNER_SHADE: f32 = 2.0;

pub type AlignmentMap = HashMap<u32, Vector2<f32>>;

/// Compute every defender's pre-snap target for the selected coverage.
///
/// Defenders the archetype has no slot for are simply absent from the map
/// and keep their prior position; the generators never fail.
pub fn generate_alignment(
    coverage: CoverageType,
    offense: &[PlayPlayer],
    defense: &[PlayPlayer],
    los: f32,
    rotation: Option<Rotation>,
) -> AlignmentMap {
    match coverage {
        CoverageType::Cover0 => cover_0::generate_alignment(offense, defense, los, &Default::default()),
        CoverageType::Cover1 => cover_1::generate_alignment(offense, defense, los, &Default::default()),
        CoverageType::Cover2 => cover_2::generate_alignment(offense, defense, los, &Default::default()),
        CoverageType::Cover3 => {
            cover_3::generate_alignment(offense, defense, los, rotation, &Default::default())
        }
        CoverageType::Cover4 => cover_4::generate_alignment(offense, defense, los, &Default::default()),
        CoverageType::Cover6 => cover_6::generate_alignment(offense, defense, los, &Default::default()),
        CoverageType::Tampa2 => tampa_2::generate_alignment(offense, defense, los, &Default::default()),
    }
}

/// Eligible receivers on one side, ordered outside-in: index 0 is the
/// widest receiver (the "#1"), index 1 the next inside, and so on.
pub fn receivers_outside_in<'p>(offense: &'p [PlayPlayer], side: FieldSide) -> Vec<&'p PlayPlayer> {
    let mut receivers: Vec<&PlayPlayer> = offense
        .iter()
        .filter(|p| p.is_eligible && FieldSide::of_x(p.position.x) == side)
        .collect();

    receivers.sort_by(|a, b| {
        let da = field::FIELD_CENTER_X - a.position.x;
        let db = field::FIELD_CENTER_X - b.position.x;

        match side {
            FieldSide::Left => db
                .partial_cmp(&da)
                .unwrap_or(std::cmp::Ordering::Equal),
            FieldSide::Right => da
                .partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal),
        }
    });

    receivers
}

/// Target over a receiver: lateral shade plus coverage depth off the LOS.
pub fn align_over(receiver: &PlayPlayer, shade_x: f32, depth: f32, los: f32) -> Vector2<f32> {
    field::clamp_to_field(Vector2::new(receiver.position.x + shade_x, los + depth))
}

/// Landmark target independent of any receiver.
pub fn align_at(x: f32, depth: f32, los: f32) -> Vector2<f32> {
    field::clamp_to_field(Vector2::new(x, los + depth))
}

/// Reorder defender ids by their current x position, leftmost first.
pub fn ordered_by_x(defense: &[PlayPlayer], ids: &[u32]) -> Vec<u32> {
    let mut with_x: Vec<(f32, u32)> = ids
        .iter()
        .filter_map(|id| {
            defense
                .iter()
                .find(|p| p.id == *id)
                .map(|p| (p.position.x, *id))
        })
        .collect();

    with_x.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    with_x.into_iter().map(|(_, id)| id).collect()
}

/// Pull the unclaimed receiver nearest to `x` out of the pool.
pub fn take_nearest<'p>(pool: &mut Vec<&'p PlayPlayer>, x: f32) -> Option<&'p PlayPlayer> {
    if pool.is_empty() {
        return None;
    }

    let mut best = 0usize;
    let mut best_distance = f32::MAX;

    for (index, receiver) in pool.iter().enumerate() {
        let distance = (receiver.position.x - x).abs();
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }

    Some(pool.remove(best))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::player::{PlayerRole, Team};

    fn receiver(id: u32, x: f32) -> PlayPlayer {
        PlayPlayer::new(id, Team::Offense, PlayerRole::WideReceiver, Vector2::new(x, 29.0))
    }

    #[test]
    fn test_receivers_outside_in_left() {
        let offense = vec![receiver(1, 14.0), receiver(2, 5.0), receiver(3, 20.0)];
        let ordered = receivers_outside_in(&offense, FieldSide::Left);

        let ids: Vec<u32> = ordered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_receivers_outside_in_right() {
        let offense = vec![receiver(1, 35.0), receiver(2, 48.0), receiver(3, 41.0)];
        let ordered = receivers_outside_in(&offense, FieldSide::Right);

        let ids: Vec<u32> = ordered.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_align_over_applies_depth_from_los() {
        let wr = receiver(1, 10.0);
        let target = align_over(&wr, 1.0, 7.0, 30.0);

        assert_eq!(target.x, 11.0);
        assert_eq!(target.y, 37.0);
    }
}
