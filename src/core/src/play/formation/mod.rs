pub mod analyzer;

pub use analyzer::*;

// Shared formation-classification thresholds. The analyzer, the pick
// detector and the alignment shading all read the same set so a bunch is
// a bunch everywhere.
pub const BUNCH_SPACING: f32 = 3.0; // yards, both axes
pub const STACK_ALIGNMENT: f32 = 2.0; // yards of horizontal offset
pub const STACK_DEPTH_SEPARATION: f32 = 2.0; // yards of vertical offset
pub const TRIPS_RECEIVER_COUNT: usize = 3;
pub const SLOT_DISTANCE_FROM_CENTER: f32 = 8.0; // closer than this reads as a slot
