use crate::play::formation::PersonnelCount;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const COVERAGE_DEFENDER_COUNT: u8 = 7;

/// Defensive personnel mix for the seven coverage defenders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensivePersonnel {
    pub cornerbacks: u8,
    pub safeties: u8,
    pub linebackers: u8,
    pub nickel_backs: u8,
}

impl DefensivePersonnel {
    pub fn total(&self) -> u8 {
        self.cornerbacks + self.safeties + self.linebackers + self.nickel_backs
    }

    pub fn package_name(&self) -> &'static str {
        if self.nickel_backs >= 1 && self.cornerbacks >= 3 {
            "Dime"
        } else if self.nickel_backs >= 1 {
            "Nickel"
        } else {
            "Base"
        }
    }
}

impl Display for DefensivePersonnel {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} (CB {}, S {}, LB {}, NB {})",
            self.package_name(),
            self.cornerbacks,
            self.safeties,
            self.linebackers,
            self.nickel_backs
        )
    }
}

/// Map offensive personnel to the required defensive mix.
///
/// The linebacker count is always recomputed last as `7 - CB - S - NB`
/// (floored at one). That recomputation, not the rule table, is what
/// guarantees the seven-defender invariant.
pub fn match_personnel(personnel: &PersonnelCount) -> DefensivePersonnel {
    let (cornerbacks, mut safeties, nickel_backs) = if personnel.wr >= 4 {
        (3, 2, 1) // Dime look against four or more wideouts
    } else if personnel.wr >= 3 {
        (2, 2, 1) // Nickel against 3-wide
    } else {
        (2, 2, 0) // Base
    };

    // Multiple tight ends, or a tight end with a loaded backfield, keeps
    // both safeties in the picture for run support.
    if personnel.te >= 2 || (personnel.te >= 1 && personnel.backs() >= 2) {
        safeties = 2;
    }

    let linebackers =
        (COVERAGE_DEFENDER_COUNT as i8 - cornerbacks as i8 - safeties as i8 - nickel_backs as i8)
            .max(1) as u8;

    let result = DefensivePersonnel {
        cornerbacks,
        safeties,
        linebackers,
        nickel_backs,
    };

    debug_assert_eq!(result.total(), COVERAGE_DEFENDER_COUNT);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personnel(rb: u8, wr: u8, te: u8, fb: u8) -> PersonnelCount {
        PersonnelCount {
            qb: 1,
            rb,
            wr,
            te,
            fb,
        }
    }

    #[test]
    fn test_four_wide_gets_dime_shape() {
        // Offense {WR:4, TE:0, RB:1, FB:0, QB:1}
        let result = match_personnel(&personnel(1, 4, 0, 0));

        assert!(result.nickel_backs >= 1);
        assert_eq!(result.total(), 7);
        assert_eq!(result.cornerbacks, 3);
        assert_eq!(result.linebackers, 1);
    }

    #[test]
    fn test_three_wide_gets_nickel() {
        let result = match_personnel(&personnel(1, 3, 1, 0));

        assert_eq!(result.nickel_backs, 1);
        assert_eq!(result.cornerbacks, 2);
        assert_eq!(result.safeties, 2);
        assert_eq!(result.linebackers, 2);
        assert_eq!(result.total(), 7);
    }

    #[test]
    fn test_base_against_two_wide() {
        let result = match_personnel(&personnel(1, 2, 1, 1));

        assert_eq!(result.nickel_backs, 0);
        assert_eq!(result.linebackers, 3);
        assert_eq!(result.total(), 7);
    }

    #[test]
    fn test_heavy_sets_keep_two_safeties() {
        for p in [personnel(1, 1, 2, 0), personnel(2, 1, 1, 1)] {
            let result = match_personnel(&p);
            assert_eq!(result.safeties, 2, "heavy set must hold two safeties");
            assert_eq!(result.total(), 7);
        }
    }

    #[test]
    fn test_total_is_always_seven() {
        for wr in 0..=5 {
            for te in 0..=3 {
                for rb in 0..=2 {
                    let result = match_personnel(&personnel(rb, wr, te, 1));
                    assert_eq!(result.total(), 7, "WR {} TE {} RB {}", wr, te, rb);
                    assert!(result.linebackers >= 1);
                }
            }
        }
    }
}
