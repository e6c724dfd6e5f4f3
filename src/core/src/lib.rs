pub mod play;
pub mod simulator;

pub use simulator::*;

// Re-export the operational surface of the coverage core
pub use play::{
    analyze_formation, analyze_pick_potential, apply_coverage_adjustments, assign_roles,
    auto_fix_assignments, evaluate_option_route, generate_alignment, handle_motion_adjustments,
    is_legal_pick, match_personnel, motion_response, resolve_pick, validate_coverage_assignments,
    Adjustment, CoverageResponsibility, CoverageState, CoverageType, DefensivePersonnel,
    DefensiveRole, FormationAnalysis, FormationStrength, HashPosition, Leverage, Motion,
    MotionResponse, MotionType, PatternMatchEngine, PickAnalysis, PickConcept, PickResult,
    PlayContext, PlayEngine, PlayPlayer, PlayPlayerCollection, PlayerRole, ReceiverState, Route,
    RoutePhase, RouteType, SeparationTechnique, Team, ValidationError, ValidationReport,
    ValidationWarning, WarningSeverity, Zone, ZoneName,
};

// Namespace the rotation call: nalgebra's glob below also exports a
// `Rotation`
pub use play::coverage::Rotation as CoverageRotation;

pub use nalgebra::*;
