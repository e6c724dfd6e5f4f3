use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named safety rotation for single-high shells. A pre-snap call, not a
/// live transition: it decides which defender's base alignment plays the
/// rotated role before any pattern matching runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    /// Strong safety drops into the strong curl/flat.
    Sky,
    /// Strong safety buzzes the middle hook.
    Buzz,
    /// Strong corner squats in the flat, safety caps his third.
    Cloud,
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Rotation::Sky => write!(f, "sky"),
            Rotation::Buzz => write!(f, "buzz"),
            Rotation::Cloud => write!(f, "cloud"),
        }
    }
}
