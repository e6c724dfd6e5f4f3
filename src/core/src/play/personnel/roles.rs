use crate::play::field::FieldSide;
use crate::play::formation::FormationAnalysis;
use crate::play::player::{PlayPlayer, PlayerRole};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Tagged coverage slot, assigned once per personnel change. Alignment
/// code dispatches on this, never on player id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefensiveRole {
    Cornerback(u8),
    FreeSafety,
    StrongSafety,
    Linebacker(u8),
    NickelBack,
}

impl Display for DefensiveRole {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            DefensiveRole::Cornerback(n) => write!(f, "CB{}", n + 1),
            DefensiveRole::FreeSafety => write!(f, "FS"),
            DefensiveRole::StrongSafety => write!(f, "SS"),
            DefensiveRole::Linebacker(n) => write!(f, "LB{}", n + 1),
            DefensiveRole::NickelBack => write!(f, "NB"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefensiveRoleMap {
    map: HashMap<u32, DefensiveRole>,
}

impl DefensiveRoleMap {
    pub fn role_of(&self, defender_id: u32) -> Option<DefensiveRole> {
        self.map.get(&defender_id).copied()
    }

    pub fn defender_with(&self, role: DefensiveRole) -> Option<u32> {
        // Lowest id wins so duplicate roles stay deterministic.
        self.map
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(id, _)| *id)
            .min()
    }

    pub fn free_safety(&self) -> Option<u32> {
        self.defender_with(DefensiveRole::FreeSafety)
    }

    pub fn strong_safety(&self) -> Option<u32> {
        self.defender_with(DefensiveRole::StrongSafety)
    }

    pub fn nickel_back(&self) -> Option<u32> {
        self.defender_with(DefensiveRole::NickelBack)
    }

    /// Cornerback ids ordered by slot index (left to right at assignment).
    pub fn cornerbacks(&self) -> Vec<u32> {
        self.ordered(|role| match role {
            DefensiveRole::Cornerback(n) => Some(n),
            _ => None,
        })
    }

    /// Linebacker ids ordered by slot index (left to right at assignment).
    pub fn linebackers(&self) -> Vec<u32> {
        self.ordered(|role| match role {
            DefensiveRole::Linebacker(n) => Some(n),
            _ => None,
        })
    }

    /// The middle linebacker: center slot of the assigned group.
    pub fn mike(&self) -> Option<u32> {
        let linebackers = self.linebackers();
        if linebackers.is_empty() {
            return None;
        }

        Some(linebackers[linebackers.len() / 2])
    }

    pub fn safeties(&self) -> Vec<u32> {
        self.map
            .iter()
            .filter(|(_, r)| matches!(r, DefensiveRole::FreeSafety | DefensiveRole::StrongSafety))
            .map(|(id, _)| *id)
            .sorted()
            .collect()
    }

    fn ordered(&self, slot: impl Fn(DefensiveRole) -> Option<u8>) -> Vec<u32> {
        self.map
            .iter()
            .filter_map(|(id, role)| slot(*role).map(|n| (n, *id)))
            .sorted()
            .map(|(_, id)| id)
            .collect()
    }
}

/// Assign coverage slots from the defensive roster. Cornerbacks and
/// linebackers are numbered left to right; the safety toward the
/// formation strength becomes the strong safety.
pub fn assign_roles(defense: &[PlayPlayer], formation: &FormationAnalysis) -> DefensiveRoleMap {
    let mut map = HashMap::new();

    fn by_x(group: Vec<&PlayPlayer>) -> Vec<&PlayPlayer> {
        group
            .into_iter()
            .sorted_by(|a, b| {
                a.position
                    .x
                    .partial_cmp(&b.position.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .collect()
    }

    let cornerbacks = by_x(
        defense
            .iter()
            .filter(|p| p.role == PlayerRole::Cornerback)
            .collect(),
    );
    for (index, cb) in cornerbacks.iter().enumerate() {
        map.insert(cb.id, DefensiveRole::Cornerback(index as u8));
    }

    let linebackers = by_x(
        defense
            .iter()
            .filter(|p| p.role == PlayerRole::Linebacker)
            .collect(),
    );
    for (index, lb) in linebackers.iter().enumerate() {
        map.insert(lb.id, DefensiveRole::Linebacker(index as u8));
    }

    for nb in defense.iter().filter(|p| p.role == PlayerRole::NickelBack) {
        map.insert(nb.id, DefensiveRole::NickelBack);
    }

    let safeties = by_x(
        defense
            .iter()
            .filter(|p| p.role == PlayerRole::Safety)
            .collect(),
    );

    match safeties.len() {
        0 => {}
        1 => {
            map.insert(safeties[0].id, DefensiveRole::FreeSafety);
        }
        _ => {
            // Strong safety declares to the strength; free safety takes the
            // other half. A balanced formation keeps the left/right split.
            let strong_side = formation.strength_side().unwrap_or(FieldSide::Right);
            let (strong, free) = match strong_side {
                FieldSide::Left => (safeties[0], safeties[safeties.len() - 1]),
                FieldSide::Right => (safeties[safeties.len() - 1], safeties[0]),
            };

            map.insert(strong.id, DefensiveRole::StrongSafety);
            map.insert(free.id, DefensiveRole::FreeSafety);
        }
    }

    DefensiveRoleMap { map }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::formation::analyze_formation;
    use crate::play::player::Team;
    use nalgebra::Vector2;

    fn defender(id: u32, role: PlayerRole, x: f32) -> PlayPlayer {
        PlayPlayer::new(id, Team::Defense, role, Vector2::new(x, 35.0))
    }

    fn trips_right_offense() -> Vec<PlayPlayer> {
        vec![
            PlayPlayer::new(1, Team::Offense, PlayerRole::Quarterback, Vector2::new(26.6, 25.0)),
            PlayPlayer::new(2, Team::Offense, PlayerRole::WideReceiver, Vector2::new(35.0, 29.0)),
            PlayPlayer::new(3, Team::Offense, PlayerRole::WideReceiver, Vector2::new(42.0, 29.0)),
            PlayPlayer::new(4, Team::Offense, PlayerRole::WideReceiver, Vector2::new(48.0, 29.0)),
            PlayPlayer::new(5, Team::Offense, PlayerRole::WideReceiver, Vector2::new(5.0, 29.0)),
        ]
    }

    fn nickel_defense() -> Vec<PlayPlayer> {
        vec![
            defender(10, PlayerRole::Cornerback, 5.0),
            defender(11, PlayerRole::Cornerback, 48.0),
            defender(12, PlayerRole::Safety, 18.0),
            defender(13, PlayerRole::Safety, 35.0),
            defender(14, PlayerRole::Linebacker, 22.0),
            defender(15, PlayerRole::Linebacker, 31.0),
            defender(16, PlayerRole::NickelBack, 40.0),
        ]
    }

    #[test]
    fn test_cornerbacks_numbered_left_to_right() {
        let formation = analyze_formation(&trips_right_offense());
        let roles = assign_roles(&nickel_defense(), &formation);

        assert_eq!(roles.role_of(10), Some(DefensiveRole::Cornerback(0)));
        assert_eq!(roles.role_of(11), Some(DefensiveRole::Cornerback(1)));
        assert_eq!(roles.cornerbacks(), vec![10, 11]);
    }

    #[test]
    fn test_strong_safety_declares_to_strength() {
        let formation = analyze_formation(&trips_right_offense());
        let roles = assign_roles(&nickel_defense(), &formation);

        // Trips right: the right-side safety (13) is strong
        assert_eq!(roles.strong_safety(), Some(13));
        assert_eq!(roles.free_safety(), Some(12));
    }

    #[test]
    fn test_mike_is_center_linebacker() {
        let formation = analyze_formation(&trips_right_offense());

        let mut defense = nickel_defense();
        defense.push(defender(17, PlayerRole::Linebacker, 26.0));

        let roles = assign_roles(&defense, &formation);
        // Three linebackers at x 22 / 26 / 31 -> middle slot is x=26
        assert_eq!(roles.mike(), Some(17));
    }

    #[test]
    fn test_single_safety_is_free() {
        let formation = analyze_formation(&trips_right_offense());
        let defense = vec![
            defender(10, PlayerRole::Cornerback, 5.0),
            defender(12, PlayerRole::Safety, 26.0),
        ];

        let roles = assign_roles(&defense, &formation);
        assert_eq!(roles.free_safety(), Some(12));
        assert_eq!(roles.strong_safety(), None);
    }
}
