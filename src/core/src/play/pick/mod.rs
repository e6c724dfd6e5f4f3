use crate::play::coverage::{Adjustment, CoverageResponsibility, CoverageTechnique, Zone};
use crate::play::field::{self, FieldSide};
use crate::play::formation::{
    BUNCH_SPACING, SLOT_DISTANCE_FROM_CENTER, STACK_ALIGNMENT, STACK_DEPTH_SEPARATION,
};
use crate::play::player::PlayPlayer;
use log::debug;
use nalgebra::Vector2;
use rand::Rng;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const PICK_CONTACT_TIME: f32 = 1.2; // rub contact develops
pub const PICK_SEPARATION_TIME: f32 = 1.6; // free runner clears

const MESH_CENTER_RANGE: f32 = 8.0; // slots this close to the middle can mesh
const OPENNESS_BONUS: f32 = 15.0; // percent, on a clean pick
const FAILED_OPENNESS_BONUS: f32 = 5.0;
const FAILED_SEPARATION_FACTOR: f32 = 0.3;
const ZONE_WIDEN_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickConcept {
    Mesh,
    Smash,
    Stack,
    Bunch,
}

impl PickConcept {
    /// Chance the rub actually springs the runner.
    pub fn effectiveness(&self, vs_man: bool) -> f32 {
        match (self, vs_man) {
            (PickConcept::Mesh, true) => 0.85,
            (PickConcept::Mesh, false) => 0.65,
            (PickConcept::Smash, true) => 0.88,
            (PickConcept::Smash, false) => 0.72,
            (PickConcept::Stack, true) => 0.78,
            (PickConcept::Stack, false) => 0.45,
            (PickConcept::Bunch, true) => 0.80,
            (PickConcept::Bunch, false) => 0.60,
        }
    }

    /// Yards of separation a clean rub buys.
    pub fn nominal_separation(&self, vs_man: bool) -> f32 {
        match (self, vs_man) {
            (PickConcept::Mesh, true) => 2.4,
            (PickConcept::Mesh, false) => 1.8,
            (PickConcept::Smash, true) => 2.6,
            (PickConcept::Smash, false) => 2.0,
            (PickConcept::Stack, true) => 2.2,
            (PickConcept::Stack, false) => 1.4,
            (PickConcept::Bunch, true) => 2.0,
            (PickConcept::Bunch, false) => 1.5,
        }
    }
}

impl Display for PickConcept {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            PickConcept::Mesh => "mesh",
            PickConcept::Smash => "smash",
            PickConcept::Stack => "stack",
            PickConcept::Bunch => "bunch",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickAnalysis {
    pub has_pick_potential: bool,
    pub concept: Option<PickConcept>,
    pub pick_receivers: Vec<u32>,
    pub legal_pick_zones: Vec<Vector2<f32>>,
}

impl PickAnalysis {
    fn none() -> Self {
        PickAnalysis {
            has_pick_potential: false,
            concept: None,
            pick_receivers: Vec::new(),
            legal_pick_zones: Vec::new(),
        }
    }
}

/// A pick is legal only in the one-yard band past the line of scrimmage,
/// boundary inclusive on both ends.
pub fn is_legal_pick(position: Vector2<f32>, los: f32) -> bool {
    let depth = position.y - los;
    (0.0..=1.0).contains(&depth)
}

/// Classify the formation's rub potential. Tightest concepts win the tie:
/// a bunch is also a stack, so bunch is checked first.
pub fn analyze_pick_potential(offense: &[PlayPlayer], los: f32) -> PickAnalysis {
    let eligible: Vec<&PlayPlayer> = offense.iter().filter(|p| p.is_eligible).collect();

    let found = find_bunch(&eligible)
        .or_else(|| find_stack(&eligible))
        .or_else(|| find_mesh(&eligible))
        .or_else(|| find_smash(&eligible));

    let Some((concept, receivers)) = found else {
        return PickAnalysis::none();
    };

    let mid_x = receivers
        .iter()
        .map(|p| p.position.x)
        .sum::<f32>()
        / receivers.len() as f32;

    let analysis = PickAnalysis {
        has_pick_potential: true,
        concept: Some(concept),
        pick_receivers: receivers.iter().map(|p| p.id).collect(),
        legal_pick_zones: vec![Vector2::new(mid_x, los + 0.5)],
    };

    debug!("{} look from receivers {:?}", concept, analysis.pick_receivers);

    analysis
}

fn find_bunch<'p>(eligible: &[&'p PlayPlayer]) -> Option<(PickConcept, Vec<&'p PlayPlayer>)> {
    for receiver in eligible {
        let cluster: Vec<&PlayPlayer> = eligible
            .iter()
            .filter(|other| {
                (other.position.x - receiver.position.x).abs() <= BUNCH_SPACING
                    && (other.position.y - receiver.position.y).abs() <= BUNCH_SPACING
            })
            .copied()
            .collect();

        if cluster.len() >= 3 {
            return Some((PickConcept::Bunch, cluster));
        }
    }

    None
}

fn find_stack<'p>(eligible: &[&'p PlayPlayer]) -> Option<(PickConcept, Vec<&'p PlayPlayer>)> {
    for (i, a) in eligible.iter().enumerate() {
        for b in eligible.iter().skip(i + 1) {
            let dx = (a.position.x - b.position.x).abs();
            let dy = (a.position.y - b.position.y).abs();

            if dx <= STACK_ALIGNMENT && dy > STACK_DEPTH_SEPARATION {
                return Some((PickConcept::Stack, vec![*a, *b]));
            }
        }
    }

    None
}

fn find_mesh<'p>(eligible: &[&'p PlayPlayer]) -> Option<(PickConcept, Vec<&'p PlayPlayer>)> {
    let slots: Vec<&PlayPlayer> = eligible
        .iter()
        .filter(|p| field::distance_from_center(p.position.x) <= MESH_CENTER_RANGE)
        .copied()
        .collect();

    if slots.len() >= 2 {
        return Some((PickConcept::Mesh, slots.into_iter().take(2).collect()));
    }

    None
}

fn find_smash<'p>(eligible: &[&'p PlayPlayer]) -> Option<(PickConcept, Vec<&'p PlayPlayer>)> {
    for side in [FieldSide::Left, FieldSide::Right] {
        let on_side: Vec<&PlayPlayer> = eligible
            .iter()
            .filter(|p| FieldSide::of_x(p.position.x) == side)
            .copied()
            .collect();

        let outside = on_side
            .iter()
            .find(|p| field::distance_from_center(p.position.x) >= SLOT_DISTANCE_FROM_CENTER);
        let slot = on_side
            .iter()
            .find(|p| field::distance_from_center(p.position.x) < SLOT_DISTANCE_FROM_CENTER);

        if let (Some(outside), Some(slot)) = (outside, slot) {
            return Some((PickConcept::Smash, vec![*outside, *slot]));
        }
    }

    None
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickResult {
    pub concept: PickConcept,
    pub pick_executed: bool,
    pub separation_created: f32,
    pub openness_bonus: f32, // percent
}

/// Resolve a rub inside the contact window. Outside `[1.2, 1.6]` seconds
/// the geometry does not matter and nothing happens. The success draw
/// comes from the injected rng so outcomes replay exactly under a fixed
/// seed.
pub fn resolve_pick(
    concept: PickConcept,
    vs_man: bool,
    time_elapsed: f32,
    rng: &mut impl Rng,
) -> PickResult {
    if !(PICK_CONTACT_TIME..=PICK_SEPARATION_TIME).contains(&time_elapsed) {
        return PickResult {
            concept,
            pick_executed: false,
            separation_created: 0.0,
            openness_bonus: 0.0,
        };
    }

    let roll: f32 = rng.random_range(0.0..1.0);
    let nominal = concept.nominal_separation(vs_man);

    if roll < concept.effectiveness(vs_man) {
        PickResult {
            concept,
            pick_executed: true,
            separation_created: nominal,
            openness_bonus: OPENNESS_BONUS,
        }
    } else {
        PickResult {
            concept,
            pick_executed: false,
            separation_created: nominal * FAILED_SEPARATION_FACTOR,
            openness_bonus: FAILED_OPENNESS_BONUS,
        }
    }
}

/// Defensive counter, as a pure delta list.
///
/// Against man the two nearest man-assigned defenders banjo: they swap
/// targets so neither has to fight through the rub. Against zone the
/// zones over the pick widen by twenty percent and everyone stays home.
pub fn counter_pick(
    analysis: &PickAnalysis,
    defense: &[PlayPlayer],
    vs_man: bool,
) -> Vec<Adjustment> {
    let Some(pick_point) = analysis.legal_pick_zones.first() else {
        return Vec::new();
    };

    if vs_man {
        banjo_switch(defense, *pick_point)
    } else {
        widen_zones(defense, *pick_point)
    }
}

fn banjo_switch(defense: &[PlayPlayer], pick_point: Vector2<f32>) -> Vec<Adjustment> {
    let mut man_defenders: Vec<&PlayPlayer> = defense
        .iter()
        .filter(|d| d.responsibility.as_ref().is_some_and(|r| r.is_man()))
        .collect();

    man_defenders.sort_by(|a, b| {
        a.distance_to(pick_point)
            .partial_cmp(&b.distance_to(pick_point))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if man_defenders.len() < 2 {
        return Vec::new();
    }

    banjo_pair(man_defenders[0], man_defenders[1])
}

fn banjo_pair(first: &PlayPlayer, second: &PlayPlayer) -> Vec<Adjustment> {
    let (Some(first_target), Some(second_target)) = (
        first.responsibility.as_ref().and_then(|r| r.man_target()),
        second.responsibility.as_ref().and_then(|r| r.man_target()),
    ) else {
        return Vec::new();
    };

    vec![
        Adjustment::reposition(first.id, first.position)
            .with_responsibility(CoverageResponsibility::Man {
                target: second_target,
            })
            .with_technique(CoverageTechnique::Banjo),
        Adjustment::reposition(second.id, second.position)
            .with_responsibility(CoverageResponsibility::Man {
                target: first_target,
            })
            .with_technique(CoverageTechnique::Banjo),
    ]
}

fn widen_zones(defense: &[PlayPlayer], pick_point: Vector2<f32>) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();

    for defender in defense {
        let Some(CoverageResponsibility::Zone { zone }) = &defender.responsibility else {
            continue;
        };

        if !zone.contains_x(pick_point.x) {
            continue;
        }

        let widened = Zone::new(
            zone.name,
            zone.center,
            zone.width * ZONE_WIDEN_FACTOR,
            zone.height,
            zone.depth,
        );

        adjustments.push(
            Adjustment::reposition(defender.id, defender.position)
                .with_responsibility(CoverageResponsibility::Zone { zone: widened }),
        );
    }

    adjustments
}
