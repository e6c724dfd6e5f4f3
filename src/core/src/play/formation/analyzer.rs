use crate::play::field::FieldSide;
use crate::play::formation::{
    BUNCH_SPACING, STACK_ALIGNMENT, STACK_DEPTH_SEPARATION, TRIPS_RECEIVER_COUNT,
};
use crate::play::player::{PlayPlayer, PlayerRole};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationStrength {
    Left,
    Right,
    Balanced,
}

impl Display for FormationStrength {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            FormationStrength::Left => write!(f, "left"),
            FormationStrength::Right => write!(f, "right"),
            FormationStrength::Balanced => write!(f, "balanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverSets {
    pub bunch: bool,
    pub stack: bool,
    pub spread: bool,
    pub heavy: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelCount {
    pub qb: u8,
    pub rb: u8,
    pub wr: u8,
    pub te: u8,
    pub fb: u8,
}

impl PersonnelCount {
    pub fn backs(&self) -> u8 {
        self.rb + self.fb
    }
}

/// Snapshot classification of the offensive alignment. Recomputed on every
/// formation-affecting change, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationAnalysis {
    pub strength: FormationStrength,
    pub left_receivers: Vec<u32>,
    pub right_receivers: Vec<u32>,
    pub has_te: bool,
    pub te_side: Option<FieldSide>,
    pub is_trips: bool,
    pub trips_side: Option<FieldSide>,
    pub receiver_sets: ReceiverSets,
    pub personnel: PersonnelCount,
}

impl FormationAnalysis {
    pub fn receivers_on(&self, side: FieldSide) -> &[u32] {
        match side {
            FieldSide::Left => &self.left_receivers,
            FieldSide::Right => &self.right_receivers,
        }
    }

    pub fn strength_side(&self) -> Option<FieldSide> {
        match self.strength {
            FormationStrength::Left => Some(FieldSide::Left),
            FormationStrength::Right => Some(FieldSide::Right),
            FormationStrength::Balanced => None,
        }
    }

    pub fn is_empty_backfield(&self) -> bool {
        self.personnel.backs() == 0
    }
}

/// Classify the offensive alignment. Pure: no errors, no side effects.
/// Formations without a TE or without trips simply degrade to the
/// receiver-count comparison.
pub fn analyze_formation(offense: &[PlayPlayer]) -> FormationAnalysis {
    let eligible: Vec<&PlayPlayer> = offense
        .iter()
        .filter(|p| p.is_eligible && !matches!(p.role, PlayerRole::Quarterback))
        .collect();

    let mut left_receivers = Vec::new();
    let mut right_receivers = Vec::new();

    for player in &eligible {
        match FieldSide::of_x(player.position.x) {
            FieldSide::Left => left_receivers.push(player.id),
            FieldSide::Right => right_receivers.push(player.id),
        }
    }

    let te_side = tight_end_side(&eligible);
    let has_te = eligible.iter().any(|p| p.role == PlayerRole::TightEnd);

    let (is_trips, trips_side) = if left_receivers.len() >= TRIPS_RECEIVER_COUNT
        && left_receivers.len() > right_receivers.len()
    {
        (true, Some(FieldSide::Left))
    } else if right_receivers.len() >= TRIPS_RECEIVER_COUNT
        && right_receivers.len() > left_receivers.len()
    {
        (true, Some(FieldSide::Right))
    } else {
        (false, None)
    };

    // Trips sets strength, then a TE, then raw receiver counts.
    let strength = if let Some(side) = trips_side {
        side_strength(side)
    } else if let Some(side) = te_side {
        side_strength(side)
    } else if left_receivers.len() > right_receivers.len() {
        FormationStrength::Left
    } else if right_receivers.len() > left_receivers.len() {
        FormationStrength::Right
    } else {
        FormationStrength::Balanced
    };

    let personnel = count_personnel(offense);
    let receiver_sets = classify_receiver_sets(&eligible, &personnel);

    FormationAnalysis {
        strength,
        left_receivers,
        right_receivers,
        has_te,
        te_side,
        is_trips,
        trips_side,
        receiver_sets,
        personnel,
    }
}

fn side_strength(side: FieldSide) -> FormationStrength {
    match side {
        FieldSide::Left => FormationStrength::Left,
        FieldSide::Right => FormationStrength::Right,
    }
}

fn tight_end_side(eligible: &[&PlayPlayer]) -> Option<FieldSide> {
    let mut left = 0usize;
    let mut right = 0usize;

    for player in eligible {
        if player.role == PlayerRole::TightEnd {
            match FieldSide::of_x(player.position.x) {
                FieldSide::Left => left += 1,
                FieldSide::Right => right += 1,
            }
        }
    }

    if left > right {
        Some(FieldSide::Left)
    } else if right > left {
        Some(FieldSide::Right)
    } else {
        None
    }
}

fn count_personnel(offense: &[PlayPlayer]) -> PersonnelCount {
    let mut personnel = PersonnelCount::default();

    for player in offense {
        match player.role {
            PlayerRole::Quarterback => personnel.qb += 1,
            PlayerRole::RunningBack => personnel.rb += 1,
            PlayerRole::WideReceiver => personnel.wr += 1,
            PlayerRole::TightEnd => personnel.te += 1,
            PlayerRole::Fullback => personnel.fb += 1,
            _ => {}
        }
    }

    personnel
}

fn classify_receiver_sets(eligible: &[&PlayPlayer], personnel: &PersonnelCount) -> ReceiverSets {
    let mut bunch = false;
    let mut stack = false;

    for (i, a) in eligible.iter().enumerate() {
        let mut close_neighbours = 0usize;

        for (j, b) in eligible.iter().enumerate() {
            if i == j {
                continue;
            }

            let dx = (a.position.x - b.position.x).abs();
            let dy = (a.position.y - b.position.y).abs();

            if dx <= BUNCH_SPACING && dy <= BUNCH_SPACING {
                close_neighbours += 1;
            }

            if i < j && dx <= STACK_ALIGNMENT && dy > STACK_DEPTH_SEPARATION {
                stack = true;
            }
        }

        if close_neighbours >= 2 {
            bunch = true;
        }
    }

    let heavy = personnel.te >= 2 || (personnel.te >= 1 && personnel.backs() >= 2);
    let spread = personnel.wr >= 3 && personnel.te == 0 && !bunch;

    ReceiverSets {
        bunch,
        stack,
        spread,
        heavy,
    }
}
