use crate::play::coverage::{apply_coverage_adjustments, CoverageType};
use crate::play::field::FIELD_CENTER_X;
use crate::play::formation::analyze_formation;
use crate::play::personnel::{match_personnel, DefensivePersonnel};
use crate::play::player::{PlayPlayer, PlayerRole, Team};
use crate::play::validator::validate_coverage_assignments;
use log::info;
use nalgebra::Vector2;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// One offensive look for the audit sweep.
pub struct FormationSample {
    pub name: &'static str,
    pub players: Vec<PlayPlayer>,
}

/// Outcome of validating one coverage against one formation.
#[derive(Debug, Clone)]
pub struct CoverageAudit {
    pub coverage: CoverageType,
    pub formation: &'static str,
    pub defender_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

/// Sweep every coverage against the formation library in parallel and
/// validate each generated assignment set. This is the QA harness the
/// driver binary runs; each cell is independent, so the sweep fans out
/// across threads.
pub fn run_coverage_audit(los: f32) -> Vec<CoverageAudit> {
    let formations = sample_formations(los);

    let audits: Vec<CoverageAudit> = formations
        .par_iter()
        .flat_map(|sample| {
            CoverageType::all()
                .into_iter()
                .map(|coverage| audit_pairing(coverage, sample, los))
                .collect::<Vec<_>>()
        })
        .collect();

    let failed = audits.iter().filter(|a| a.error_count > 0).count();
    info!(
        "coverage audit: {} pairings, {} with errors",
        audits.len(),
        failed
    );

    audits
}

fn audit_pairing(coverage: CoverageType, sample: &FormationSample, los: f32) -> CoverageAudit {
    let formation = analyze_formation(&sample.players);
    let personnel = match_personnel(&formation.personnel);
    let mut defense = build_defense(&personnel, los);

    let adjustments = apply_coverage_adjustments(
        coverage,
        &defense,
        &sample.players,
        &formation,
        los,
        None,
    );

    for adjustment in &adjustments {
        if let Some(defender) = defense.iter_mut().find(|d| d.id == adjustment.defender_id) {
            defender.position = adjustment.new_position;
            if let Some(responsibility) = &adjustment.new_responsibility {
                defender.responsibility = Some(responsibility.clone());
            }
        }
    }

    let report = validate_coverage_assignments(&defense, &sample.players, coverage, los);

    CoverageAudit {
        coverage,
        formation: sample.name,
        defender_count: defense.len(),
        error_count: report.errors.len(),
        warning_count: report.warnings.len(),
    }
}

/// Seven coverage defenders matching the required personnel mix, staged
/// at generic base depths. Alignment pulls them to their real landmarks.
pub fn build_defense(personnel: &DefensivePersonnel, los: f32) -> Vec<PlayPlayer> {
    let mut defense = Vec::with_capacity(7);
    let mut next_id = 100u32;

    let corner_lanes = [4.0, 49.0, 12.0, 41.0];
    for i in 0..personnel.cornerbacks {
        defense.push(PlayPlayer::new(
            next_id,
            Team::Defense,
            PlayerRole::Cornerback,
            Vector2::new(corner_lanes[i as usize % corner_lanes.len()], los + 7.0),
        ));
        next_id += 1;
    }

    let safety_lanes = [18.0, 35.0];
    for i in 0..personnel.safeties {
        defense.push(PlayPlayer::new(
            next_id,
            Team::Defense,
            PlayerRole::Safety,
            Vector2::new(safety_lanes[i as usize % safety_lanes.len()], los + 12.0),
        ));
        next_id += 1;
    }

    for i in 0..personnel.linebackers {
        let offset = (i as f32 - (personnel.linebackers as f32 - 1.0) / 2.0) * 5.0;
        defense.push(PlayPlayer::new(
            next_id,
            Team::Defense,
            PlayerRole::Linebacker,
            Vector2::new(FIELD_CENTER_X + offset, los + 4.5),
        ));
        next_id += 1;
    }

    for _ in 0..personnel.nickel_backs {
        defense.push(PlayPlayer::new(
            next_id,
            Team::Defense,
            PlayerRole::NickelBack,
            Vector2::new(38.0, los + 5.5),
        ));
        next_id += 1;
    }

    defense
}

/// Formation library covering the personnel groupings and receiver sets
/// the engine special-cases.
pub fn sample_formations(los: f32) -> Vec<FormationSample> {
    let receiver = |id: u32, role: PlayerRole, x: f32, y_off: f32| {
        PlayPlayer::new(id, Team::Offense, role, Vector2::new(x, los + y_off))
    };

    vec![
        FormationSample {
            name: "doubles",
            players: vec![
                receiver(1, PlayerRole::Quarterback, 26.6, -5.0),
                receiver(2, PlayerRole::WideReceiver, 5.0, -1.0),
                receiver(3, PlayerRole::WideReceiver, 14.0, -1.0),
                receiver(4, PlayerRole::WideReceiver, 48.0, -1.0),
                receiver(5, PlayerRole::WideReceiver, 39.0, -1.0),
                receiver(6, PlayerRole::RunningBack, 26.6, -6.5),
            ],
        },
        FormationSample {
            name: "trips right",
            players: vec![
                receiver(1, PlayerRole::Quarterback, 26.6, -5.0),
                receiver(2, PlayerRole::WideReceiver, 5.0, -1.0),
                receiver(3, PlayerRole::WideReceiver, 35.0, -1.0),
                receiver(4, PlayerRole::WideReceiver, 42.0, -1.0),
                receiver(5, PlayerRole::WideReceiver, 48.0, -1.0),
                receiver(6, PlayerRole::RunningBack, 26.6, -6.5),
            ],
        },
        FormationSample {
            name: "bunch left",
            players: vec![
                receiver(1, PlayerRole::Quarterback, 26.6, -5.0),
                receiver(2, PlayerRole::WideReceiver, 11.0, -1.0),
                receiver(3, PlayerRole::WideReceiver, 13.0, -2.0),
                receiver(4, PlayerRole::WideReceiver, 12.0, -3.0),
                receiver(5, PlayerRole::WideReceiver, 48.0, -1.0),
                receiver(6, PlayerRole::RunningBack, 26.6, -6.5),
            ],
        },
        FormationSample {
            name: "heavy",
            players: vec![
                receiver(1, PlayerRole::Quarterback, 26.6, -5.0),
                receiver(2, PlayerRole::TightEnd, 31.0, -1.0),
                receiver(3, PlayerRole::TightEnd, 22.0, -1.0),
                receiver(4, PlayerRole::WideReceiver, 46.0, -1.0),
                receiver(5, PlayerRole::RunningBack, 26.6, -6.5),
                receiver(6, PlayerRole::Fullback, 26.6, -4.5),
            ],
        },
        FormationSample {
            name: "empty four wide",
            players: vec![
                receiver(1, PlayerRole::Quarterback, 26.6, -5.0),
                receiver(2, PlayerRole::WideReceiver, 4.0, -1.0),
                receiver(3, PlayerRole::WideReceiver, 12.0, -1.0),
                receiver(4, PlayerRole::WideReceiver, 49.0, -1.0),
                receiver(5, PlayerRole::WideReceiver, 41.0, -1.0),
                receiver(6, PlayerRole::WideReceiver, 33.0, -1.0),
            ],
        },
    ]
}
