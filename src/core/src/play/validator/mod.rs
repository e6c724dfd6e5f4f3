use crate::play::coverage::{
    Adjustment, CoverageResponsibility, CoverageType, Zone, ZoneName,
};
use crate::play::formation::analyze_formation;
use crate::play::player::{PlayPlayer, PlayerRole};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

pub const DEEP_SAFETY_DEPTH: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorCode {
    DefenderCount,
    DuplicateAssignment,
    UncoveredReceiver,
}

impl Display for ValidationErrorCode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ValidationErrorCode::DefenderCount => write!(f, "DEFENDER_COUNT"),
            ValidationErrorCode::DuplicateAssignment => write!(f, "DUPLICATE_ASSIGNMENT"),
            ValidationErrorCode::UncoveredReceiver => write!(f, "UNCOVERED_RECEIVER"),
        }
    }
}

/// Structured invariant violation. Data, not an exception: the caller
/// decides whether to auto-fix, warn or ignore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub message: String,
    pub player_ids: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarningSeverity {
    Low,
    Medium,
    High,
}

/// Advisory personnel/formation mismatch. Never blocking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub severity: WarningSeverity,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageStats {
    pub man_count: usize,
    pub zone_count: usize,
    pub blitz_count: usize,
    pub spy_count: usize,
    pub deep_safety_count: usize,
    pub duplicate_targets: Vec<u32>,
    pub uncovered_receivers: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub stats: CoverageStats,
}

/// Read-only consistency pass over the final assignment state.
pub fn validate_coverage_assignments(
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    coverage: CoverageType,
    los: f32,
) -> ValidationReport {
    let stats = collect_stats(defense, offense, coverage, los);
    let mut errors = Vec::new();

    if defense.len() != 7 {
        errors.push(ValidationError {
            code: ValidationErrorCode::DefenderCount,
            message: format!("coverage expects 7 defenders, got {}", defense.len()),
            player_ids: defense.iter().map(|d| d.id).collect(),
        });
    }

    if !stats.duplicate_targets.is_empty() {
        errors.push(ValidationError {
            code: ValidationErrorCode::DuplicateAssignment,
            message: format!(
                "receivers {:?} are man-covered by more than one defender",
                stats.duplicate_targets
            ),
            player_ids: stats.duplicate_targets.clone(),
        });
    }

    if coverage.is_man_scheme() && !stats.uncovered_receivers.is_empty() {
        errors.push(ValidationError {
            code: ValidationErrorCode::UncoveredReceiver,
            message: format!(
                "{} leaves eligible receivers {:?} without a man assignment",
                coverage, stats.uncovered_receivers
            ),
            player_ids: stats.uncovered_receivers.clone(),
        });
    }

    let warnings = collect_warnings(defense, offense, coverage);

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        stats,
    }
}

fn collect_stats(
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    coverage: CoverageType,
    los: f32,
) -> CoverageStats {
    let mut stats = CoverageStats::default();
    let mut target_counts: HashMap<u32, usize> = HashMap::new();

    for defender in defense {
        match &defender.responsibility {
            Some(CoverageResponsibility::Man { target }) => {
                stats.man_count += 1;
                *target_counts.entry(*target).or_default() += 1;
            }
            Some(CoverageResponsibility::Zone { .. }) => stats.zone_count += 1,
            Some(CoverageResponsibility::Spy { .. }) => stats.spy_count += 1,
            Some(CoverageResponsibility::Blitz) => stats.blitz_count += 1,
            None => {}
        }

        if defender.role == PlayerRole::Safety
            && defender.depth_beyond_los(los) >= DEEP_SAFETY_DEPTH
        {
            stats.deep_safety_count += 1;
        }
    }

    stats.duplicate_targets = target_counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(target, _)| *target)
        .collect();
    stats.duplicate_targets.sort_unstable();

    if coverage.is_man_scheme() {
        stats.uncovered_receivers = offense
            .iter()
            .filter(|p| p.is_eligible && !matches!(p.role, PlayerRole::Quarterback))
            .filter(|p| !target_counts.contains_key(&p.id))
            .map(|p| p.id)
            .collect();
        stats.uncovered_receivers.sort_unstable();
    }

    stats
}

fn collect_warnings(
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
    coverage: CoverageType,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let formation = analyze_formation(offense);

    let linebackers = defense
        .iter()
        .filter(|d| d.role == PlayerRole::Linebacker)
        .count();
    let safeties = defense.iter().filter(|d| d.role == PlayerRole::Safety).count();
    let cornerbacks = defense
        .iter()
        .filter(|d| d.role == PlayerRole::Cornerback)
        .count();

    if coverage == CoverageType::Tampa2 && linebackers < 3 {
        warnings.push(ValidationWarning {
            severity: WarningSeverity::High,
            message: format!(
                "Tampa 2 wants at least 3 LBs, only {} on the field",
                linebackers
            ),
            suggestion: "swap to a base personnel package or check to Cover 2".into(),
        });
    }

    if matches!(
        coverage,
        CoverageType::Cover2 | CoverageType::Cover4 | CoverageType::Cover6
    ) && safeties < 2
    {
        warnings.push(ValidationWarning {
            severity: WarningSeverity::High,
            message: format!("{} needs two safeties, only {} available", coverage, safeties),
            suggestion: "bring a nickel or dime package with a second safety".into(),
        });
    }

    if coverage == CoverageType::Cover0 && cornerbacks < 3 && formation.personnel.wr >= 3 {
        warnings.push(ValidationWarning {
            severity: WarningSeverity::Medium,
            message: format!(
                "Cover 0 against {} wideouts with {} corners leaves a back matched wide",
                formation.personnel.wr, cornerbacks
            ),
            suggestion: "add a corner or check out of the all-out pressure".into(),
        });
    }

    if coverage == CoverageType::Cover4 && formation.is_trips {
        warnings.push(ValidationWarning {
            severity: WarningSeverity::Medium,
            message: "quarters against trips strains the weak-side quarter".into(),
            suggestion: "consider a sky rotation or check to Cover 6".into(),
        });
    }

    if coverage == CoverageType::Tampa2 && formation.is_empty_backfield() {
        warnings.push(ValidationWarning {
            severity: WarningSeverity::Medium,
            message: "Tampa 2 against an empty backfield wastes the Mike's run fit".into(),
            suggestion: "a two-high match shell handles empty better".into(),
        });
    }

    if coverage == CoverageType::Cover0 && formation.receiver_sets.heavy {
        warnings.push(ValidationWarning {
            severity: WarningSeverity::Low,
            message: "Cover 0 against heavy personnel invites max-protect shots".into(),
            suggestion: "keep a safety deep against heavy sets".into(),
        });
    }

    warnings
}

/// Repair duplicate man targets: the extra defender is pointed at the
/// first uncovered receiver, or drops into a hook zone when everyone is
/// accounted for. Pure; returns the fix as a delta list.
pub fn auto_fix_assignments(
    defense: &[PlayPlayer],
    offense: &[PlayPlayer],
) -> Vec<Adjustment> {
    let mut adjustments = Vec::new();
    let mut seen_targets: Vec<u32> = Vec::new();

    let mut covered: Vec<u32> = defense
        .iter()
        .filter_map(|d| d.responsibility.as_ref().and_then(|r| r.man_target()))
        .collect();
    covered.sort_unstable();
    covered.dedup();

    let mut uncovered: Vec<u32> = offense
        .iter()
        .filter(|p| p.is_eligible && !matches!(p.role, PlayerRole::Quarterback))
        .filter(|p| !covered.contains(&p.id))
        .map(|p| p.id)
        .collect();
    uncovered.sort_unstable();

    for defender in defense {
        let Some(target) = defender
            .responsibility
            .as_ref()
            .and_then(|r| r.man_target())
        else {
            continue;
        };

        if !seen_targets.contains(&target) {
            seen_targets.push(target);
            continue;
        }

        // Duplicate: retarget or fall back to zone.
        let fix = if uncovered.is_empty() {
            CoverageResponsibility::Zone {
                zone: Zone::new(ZoneName::Hook, defender.position, 10.0, 8.0, 8.0),
            }
        } else {
            CoverageResponsibility::Man {
                target: uncovered.remove(0),
            }
        };

        adjustments.push(
            Adjustment::reposition(defender.id, defender.position).with_responsibility(fix),
        );
    }

    adjustments
}
