pub mod coverage;
pub mod engine;
pub mod field;
pub mod formation;
pub mod motion;
pub mod option;
pub mod pattern_match;
pub mod personnel;
pub mod pick;
pub mod player;
pub mod receiver;
pub mod route;
pub mod validator;

pub use coverage::*;
pub use engine::*;
pub use field::*;
pub use formation::*;
pub use motion::*;
pub use option::*;
pub use personnel::*;
pub use pick::*;
pub use player::*;
pub use route::*;
pub use validator::*;

// Re-export the state machines selectively: both carry a `states`
// module, so the globs would collide.
pub use pattern_match::{
    current_target, CoverageState, CoverageStateHandler, PatternMatchContext, PatternMatchEngine,
};
pub use receiver::{
    integrate, ReceiverContext, ReceiverMovement, ReceiverState, RoutePhase, RoutePhaseHandler,
    ACCELERATION_DURATION, BREAK_DURATION, DEFENDER_PRESSURE_RANGE, POST_BREAK_DURATION,
    PRE_BREAK_DURATION, STEM_DURATION,
};
