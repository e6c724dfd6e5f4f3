use crate::play::coverage::alignment::{self, take_nearest, AlignmentMap};
use crate::play::coverage::{
    Adjustment, CoverageResponsibility, CoverageTechnique, CoverageType, Rotation, Zone, ZoneName,
};
use crate::play::field::FIELD_WIDTH;
use crate::play::formation::{FormationAnalysis, BUNCH_SPACING};
use crate::play::personnel::{assign_roles, DefensiveRole, DefensiveRoleMap};
use crate::play::player::{Leverage, PlayPlayer};
use log::debug;
use nalgebra::Vector2;

const BOX_CLUSTER_RANGE: f32 = 6.0; // defenders this close to a bunch join the box
const BOX_DEPTH_STAGGER: f32 = 2.0;

/// Re-derive each mapped defender's target position and responsibility for
/// the selected coverage against this formation.
///
/// Everything is returned as a delta list; the caller owns the players and
/// applies the list atomically. Defenders without a slot in the archetype
/// are left out and keep whatever they had.
pub fn apply_coverage_adjustments(
    coverage: CoverageType,
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    formation: &FormationAnalysis,
    los: f32,
    rotation: Option<Rotation>,
) -> Vec<Adjustment> {
    let roles = assign_roles(defense, formation);
    let alignment = alignment::generate_alignment(coverage, offense, defense, los, rotation);

    let mut adjustments = if coverage.is_man_scheme() {
        man_adjustments(coverage, defense, offense, &roles, &alignment, formation)
    } else {
        zone_adjustments(coverage, &roles, &alignment, los)
    };

    if formation.receiver_sets.bunch {
        apply_bunch_box(&mut adjustments, offense, los);
    }

    debug!(
        "{} adjustments for {} defenders ({} mapped)",
        coverage,
        defense.len(),
        adjustments.len()
    );

    adjustments
}

/// Man schemes: pair defenders to receivers with the same nearest-first
/// walk the alignment generators use, so position and assignment agree.
fn man_adjustments(
    coverage: CoverageType,
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    roles: &DefensiveRoleMap,
    alignment: &AlignmentMap,
    formation: &FormationAnalysis,
) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();
    let mut pool: Vec<&PlayPlayer> = offense.iter().filter(|p| p.is_eligible).collect();

    // Cover 1 peels two defenders off the pairing before the corners
    // pick: the free safety holds the deep middle, and the strong safety
    // matches the strong #2 (robber hole when there is none). Same order
    // the alignment generator walked, so position and assignment stay in
    // step.
    if coverage == CoverageType::Cover1 {
        if let Some(fs_id) = roles.free_safety() {
            if let Some(position) = alignment.get(&fs_id) {
                adjustments.push(
                    Adjustment::reposition(fs_id, *position).with_responsibility(
                        CoverageResponsibility::Zone {
                            zone: zone_at(ZoneName::DeepMiddle, *position, 18.0, 20.0, 13.0),
                        },
                    ),
                );
            }
        }

        if let Some(ss_id) = roles.strong_safety() {
            if let Some(position) = alignment.get(&ss_id) {
                let strong_side = formation.strength_side().unwrap_or(crate::play::field::FieldSide::Right);
                let strong_two = alignment::receivers_outside_in(offense, strong_side)
                    .get(1)
                    .map(|p| p.id);

                let responsibility = match strong_two {
                    Some(receiver_id) => {
                        pool.retain(|p| p.id != receiver_id);
                        CoverageResponsibility::Man { target: receiver_id }
                    }
                    None => CoverageResponsibility::Zone {
                        zone: zone_at(ZoneName::HoleMiddle, *position, 10.0, 8.0, 8.0),
                    },
                };

                adjustments.push(
                    Adjustment::reposition(ss_id, *position)
                        .with_responsibility(responsibility)
                        .with_technique(CoverageTechnique::Robber),
                );
            }
        }
    }

    let mut assign = |defender_id: u32| {
        let defender = defense.iter().find(|p| p.id == defender_id);
        let target = defender.and_then(|d| take_nearest(&mut pool, d.position.x));
        let position = alignment.get(&defender_id).copied();

        if let (Some(receiver), Some(position)) = (target, position) {
            adjustments.push(
                Adjustment::reposition(defender_id, position)
                    .with_responsibility(CoverageResponsibility::Man { target: receiver.id })
                    .with_leverage(Leverage::between(position.x, receiver.position.x)),
            );
        } else if let Some(position) = position {
            // Nobody left to cover: in Cover 0 the leftovers come, in
            // Cover 1 they hold the hole.
            let responsibility = if coverage == CoverageType::Cover0 {
                CoverageResponsibility::Blitz
            } else {
                CoverageResponsibility::Zone {
                    zone: zone_at(ZoneName::HoleMiddle, position, 10.0, 8.0, 4.5),
                }
            };
            adjustments.push(Adjustment::reposition(defender_id, position).with_responsibility(responsibility));
        }
    };

    for cb_id in roles.cornerbacks() {
        assign(cb_id);
    }
    if let Some(nb_id) = roles.nickel_back() {
        assign(nb_id);
    }
    if coverage == CoverageType::Cover0 {
        for safety_id in [roles.strong_safety(), roles.free_safety()].into_iter().flatten() {
            assign(safety_id);
        }
    }
    for lb_id in roles.linebackers() {
        assign(lb_id);
    }

    adjustments
}

/// Zone schemes: every mapped defender gets the zone his landmark implies.
fn zone_adjustments(
    coverage: CoverageType,
    roles: &DefensiveRoleMap,
    alignment: &AlignmentMap,
    los: f32,
) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();

    // Stable id order: the box stagger downstream depends on list order.
    let mut mapped: Vec<(u32, Vector2<f32>)> =
        alignment.iter().map(|(id, position)| (*id, *position)).collect();
    mapped.sort_by_key(|(id, _)| *id);

    for (defender_id, position) in mapped {
        let Some(role) = roles.role_of(defender_id) else {
            continue;
        };

        let zone = zone_for(coverage, role, roles, defender_id, position, los);
        adjustments.push(
            Adjustment::reposition(defender_id, position)
                .with_responsibility(CoverageResponsibility::Zone { zone }),
        );
    }

    adjustments
}

fn zone_for(
    coverage: CoverageType,
    role: DefensiveRole,
    roles: &DefensiveRoleMap,
    defender_id: u32,
    position: Vector2<f32>,
    los: f32,
) -> Zone {
    let depth = (position.y - los).max(1.0);

    match coverage {
        CoverageType::Cover2 => match role {
            DefensiveRole::FreeSafety | DefensiveRole::StrongSafety => {
                zone_at(ZoneName::DeepHalf, position, FIELD_WIDTH / 2.0, 25.0, depth)
            }
            DefensiveRole::Cornerback(_) => zone_at(ZoneName::Flat, position, 12.0, 8.0, depth),
            DefensiveRole::NickelBack => zone_at(ZoneName::Curl, position, 10.0, 10.0, depth),
            DefensiveRole::Linebacker(_) => zone_at(ZoneName::Hook, position, 10.0, 8.0, depth),
        },
        CoverageType::Cover3 => match role {
            DefensiveRole::Cornerback(_) => {
                zone_at(ZoneName::DeepThird, position, FIELD_WIDTH / 3.0, 25.0, depth)
            }
            DefensiveRole::FreeSafety => {
                zone_at(ZoneName::DeepThird, position, FIELD_WIDTH / 3.0, 25.0, depth)
            }
            DefensiveRole::StrongSafety => {
                // Cloud sends the safety deep; sky and buzz keep him low.
                if depth >= 10.0 {
                    zone_at(ZoneName::DeepThird, position, FIELD_WIDTH / 3.0, 25.0, depth)
                } else {
                    zone_at(ZoneName::Curl, position, 10.0, 10.0, depth)
                }
            }
            DefensiveRole::NickelBack => zone_at(ZoneName::Curl, position, 10.0, 10.0, depth),
            DefensiveRole::Linebacker(_) => zone_at(ZoneName::Hook, position, 10.0, 8.0, depth),
        },
        CoverageType::Cover4 => match role {
            DefensiveRole::Cornerback(_)
            | DefensiveRole::FreeSafety
            | DefensiveRole::StrongSafety => {
                zone_at(ZoneName::DeepQuarter, position, FIELD_WIDTH / 4.0, 25.0, depth)
            }
            DefensiveRole::NickelBack => zone_at(ZoneName::Curl, position, 10.0, 10.0, depth),
            DefensiveRole::Linebacker(_) => zone_at(ZoneName::Hook, position, 12.0, 8.0, depth),
        },
        CoverageType::Cover6 => match role {
            DefensiveRole::StrongSafety => {
                zone_at(ZoneName::DeepQuarter, position, FIELD_WIDTH / 4.0, 25.0, depth)
            }
            DefensiveRole::FreeSafety => {
                zone_at(ZoneName::DeepHalf, position, FIELD_WIDTH / 2.0, 25.0, depth)
            }
            DefensiveRole::Cornerback(_) => {
                if depth >= 5.0 {
                    zone_at(ZoneName::DeepQuarter, position, FIELD_WIDTH / 4.0, 25.0, depth)
                } else {
                    zone_at(ZoneName::Flat, position, 12.0, 8.0, depth)
                }
            }
            DefensiveRole::NickelBack => zone_at(ZoneName::Curl, position, 10.0, 10.0, depth),
            DefensiveRole::Linebacker(_) => zone_at(ZoneName::Hook, position, 10.0, 8.0, depth),
        },
        CoverageType::Tampa2 => match role {
            DefensiveRole::FreeSafety | DefensiveRole::StrongSafety => {
                zone_at(ZoneName::DeepHalf, position, FIELD_WIDTH / 2.0, 25.0, depth)
            }
            DefensiveRole::Cornerback(_) => zone_at(ZoneName::Flat, position, 12.0, 8.0, depth),
            DefensiveRole::NickelBack => zone_at(ZoneName::Curl, position, 10.0, 10.0, depth),
            DefensiveRole::Linebacker(_) => {
                if roles.mike() == Some(defender_id) {
                    zone_at(ZoneName::DeepMiddle, position, 17.0, 20.0, depth)
                } else {
                    zone_at(ZoneName::Hook, position, 10.0, 8.0, depth)
                }
            }
        },
        // Man schemes are handled by man_adjustments
        CoverageType::Cover0 | CoverageType::Cover1 => {
            zone_at(ZoneName::HoleMiddle, position, 10.0, 8.0, depth)
        }
    }
}

fn zone_at(name: ZoneName, center: Vector2<f32>, width: f32, height: f32, depth: f32) -> Zone {
    Zone::new(name, center, width, height, depth)
}

/// A bunch pulls its defenders into a box: clustered laterally on the
/// bunch with staggered depths so every level of the release is covered.
fn apply_bunch_box(adjustments: &mut [Adjustment], offense: &[PlayPlayer], los: f32) {
    let Some(centroid) = bunch_centroid(offense) else {
        return;
    };

    let mut level = 0;
    for adjustment in adjustments.iter_mut() {
        if (adjustment.new_position.x - centroid.x).abs() <= BOX_CLUSTER_RANGE
            && (adjustment.new_position.y - los) <= 12.0
        {
            let lateral = match level % 2 {
                0 => -1.5,
                _ => 1.5,
            };
            let depth = 1.5 + BOX_DEPTH_STAGGER * (level / 2) as f32;

            adjustment.new_position = Vector2::new(centroid.x + lateral, los + depth);
            adjustment.technique = Some(CoverageTechnique::Box);
            level += 1;
        }
    }
}

fn bunch_centroid(offense: &[PlayPlayer]) -> Option<Vector2<f32>> {
    let eligible: Vec<&PlayPlayer> = offense.iter().filter(|p| p.is_eligible).collect();

    for receiver in &eligible {
        let cluster: Vec<&&PlayPlayer> = eligible
            .iter()
            .filter(|other| {
                (other.position.x - receiver.position.x).abs() <= BUNCH_SPACING
                    && (other.position.y - receiver.position.y).abs() <= BUNCH_SPACING
            })
            .collect();

        if cluster.len() >= 3 {
            let sum = cluster
                .iter()
                .fold(Vector2::zeros(), |acc: Vector2<f32>, p| acc + p.position);
            return Some(sum / cluster.len() as f32);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::formation::analyze_formation;
    use crate::play::player::{PlayerRole, Team};

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

    fn spread_offense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(14.0, 29.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::WideReceiver, Vector2::new(39.0, 29.0)),
        ]
    }

    #[test]
    fn test_man_scheme_assigns_unique_targets() {
        let offense = spread_offense();
        let formation = analyze_formation(&offense);
        let adjustments = apply_coverage_adjustments(
            CoverageType::Cover0,
            &defense(),
            &offense,
            &formation,
            30.0,
            None,
        );

        let mut targets: Vec<u32> = adjustments
            .iter()
            .filter_map(|a| a.new_responsibility.as_ref())
            .filter_map(|r| r.man_target())
            .collect();

        let before = targets.len();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(before, targets.len(), "duplicate man target assigned");
    }

    #[test]
    fn test_zone_scheme_assigns_zones() {
        let offense = spread_offense();
        let formation = analyze_formation(&offense);
        let adjustments = apply_coverage_adjustments(
            CoverageType::Cover3,
            &defense(),
            &offense,
            &formation,
            30.0,
            None,
        );

        assert!(!adjustments.is_empty());
        for adjustment in &adjustments {
            let responsibility = adjustment.new_responsibility.as_ref().unwrap();
            assert!(responsibility.is_zone(), "cover 3 is a zone scheme");
        }
    }

    #[test]
    fn test_bunch_box_clusters_defenders() {
        let offense = vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(40.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(42.0, 28.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::WideReceiver, Vector2::new(41.0, 27.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
        ];

        let formation = analyze_formation(&offense);
        assert!(formation.receiver_sets.bunch);

        let adjustments = apply_coverage_adjustments(
            CoverageType::Cover2,
            &defense(),
            &offense,
            &formation,
            30.0,
            None,
        );

        let boxed: Vec<&Adjustment> = adjustments
            .iter()
            .filter(|a| a.technique == Some(CoverageTechnique::Box))
            .collect();

        assert!(!boxed.is_empty(), "someone must play the box over a bunch");

        // Staggered depths: no two box defenders at the same spot
        for (i, a) in boxed.iter().enumerate() {
            for b in boxed.iter().skip(i + 1) {
                assert!(
                    (a.new_position - b.new_position).norm() > 0.5,
                    "box defenders stacked on one landmark"
                );
            }
        }
    }
}
