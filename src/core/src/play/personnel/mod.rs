pub mod matcher;
pub mod roles;

pub use matcher::*;
pub use roles::*;
