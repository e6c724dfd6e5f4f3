pub mod context;
pub mod engine;

pub use context::*;
pub use engine::*;
