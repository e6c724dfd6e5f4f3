use core::play::{build_route, responsibility_summary, Motion, MotionType, RouteType};
use core::{
    analyze_formation, build_defense, match_personnel, run_coverage_audit, sample_formations,
    CoverageRotation, CoverageType, PlayEngine, Vector2,
};
use env_logger::Env;
use log::info;

const LOS: f32 = 30.0;
const PLAY_SECONDS: f32 = 3.0;

fn main() {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default()
        .default_filter_or("info")
    ).init();

    run_sample_play();

    let audits = run_coverage_audit(LOS);
    let with_errors = audits.iter().filter(|a| a.error_count > 0).count();
    let warnings: usize = audits.iter().map(|a| a.warning_count).sum();

    info!(
        "audit sweep: {} coverage/formation pairings, {} with errors, {} advisory warnings",
        audits.len(),
        with_errors,
        warnings
    );
}

/// Trips right against Cover 3 sky, with a jet motion before the snap.
fn run_sample_play() {
    let mut sample = sample_formations(LOS)
        .into_iter()
        .find(|f| f.name == "trips right")
        .expect("trips right is in the formation library");

    let routes = [
        RouteType::Comeback,
        RouteType::Corner,
        RouteType::Choice,
        RouteType::Go,
        RouteType::Flat,
    ];
    let mut next_route = routes.iter().cycle();

    for player in sample.players.iter_mut() {
        if player.is_eligible {
            let route_type = *next_route.next().expect("cycled route list");
            player.route = Some(build_route(route_type, player.position, LOS));
        }
    }

    let formation = analyze_formation(&sample.players);
    let personnel = match_personnel(&formation.personnel);
    info!("offense shows {} -> defense fields {}", formation.strength, personnel);

    let mut players = sample.players;
    let motion_man = players
        .iter()
        .find(|p| p.is_eligible)
        .map(|p| (p.id, p.position))
        .expect("an eligible receiver exists");
    players.extend(build_defense(&personnel, LOS));

    let mut engine = PlayEngine::with_seed(players, LOS, CoverageType::Cover3, 17);
    engine.context.rotation = Some(CoverageRotation::Sky);
    engine.line_up();

    for (defender_id, label) in responsibility_summary(&engine.players) {
        info!("  defender {:>3}: {}", defender_id, label);
    }

    engine.send_motion(Motion {
        player_id: motion_man.0,
        motion_type: MotionType::Jet,
        start_position: motion_man.1,
        end_position: Vector2::new(motion_man.1.x + 10.0, motion_man.1.y),
    });

    // The motion man's route restarts from where the motion left him.
    if let Some(player) = engine.players.by_id_mut(motion_man.0) {
        player.route = Some(build_route(RouteType::Slant, player.position, LOS));
    }

    engine.snap();

    let ticks = (PLAY_SECONDS * 60.0) as usize;
    for _ in 0..ticks {
        engine.tick();
    }

    match engine.pick_result() {
        Some(pick) if pick.pick_executed => info!(
            "{} pick executed: {:.1} yd separation (+{:.0}% open)",
            pick.concept, pick.separation_created, pick.openness_bonus
        ),
        Some(pick) => info!("{} pick attempt fizzled", pick.concept),
        None => info!("no pick look developed"),
    }

    info!("play complete at t={:.2}s", engine.context.time.elapsed);
}
