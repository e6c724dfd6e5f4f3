use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub const FIELD_WIDTH: f32 = 53.33; // sideline to sideline, yards
pub const FIELD_CENTER_X: f32 = 26.665;
pub const LEFT_HASH_X: f32 = 23.58;
pub const RIGHT_HASH_X: f32 = 29.75;
pub const SIDELINE_MARGIN: f32 = 1.0; // alignment targets stay off the paint

/// Horizontal ball placement before the snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashPosition {
    Left,
    Middle,
    Right,
}

impl HashPosition {
    pub fn ball_x(&self) -> f32 {
        match self {
            HashPosition::Left => LEFT_HASH_X,
            HashPosition::Middle => FIELD_CENTER_X,
            HashPosition::Right => RIGHT_HASH_X,
        }
    }
}

/// Side of the field relative to the midfield line at x = 26.665.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSide {
    Left,
    Right,
}

impl FieldSide {
    pub fn of_x(x: f32) -> FieldSide {
        if x < FIELD_CENTER_X {
            FieldSide::Left
        } else {
            FieldSide::Right
        }
    }

    pub fn opposite(&self) -> FieldSide {
        match self {
            FieldSide::Left => FieldSide::Right,
            FieldSide::Right => FieldSide::Left,
        }
    }

    /// Unit direction along x pointing toward this side.
    pub fn direction(&self) -> f32 {
        match self {
            FieldSide::Left => -1.0,
            FieldSide::Right => 1.0,
        }
    }
}

impl std::fmt::Display for FieldSide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FieldSide::Left => write!(f, "left"),
            FieldSide::Right => write!(f, "right"),
        }
    }
}

pub fn clamp_x(x: f32) -> f32 {
    x.clamp(SIDELINE_MARGIN, FIELD_WIDTH - SIDELINE_MARGIN)
}

/// Alignment target clamped to the playable width, depth left untouched.
pub fn clamp_to_field(position: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(clamp_x(position.x), position.y)
}

pub fn distance_from_center(x: f32) -> f32 {
    (x - FIELD_CENTER_X).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_side_of_x() {
        assert_eq!(FieldSide::of_x(10.0), FieldSide::Left);
        assert_eq!(FieldSide::of_x(40.0), FieldSide::Right);
        assert_eq!(FieldSide::of_x(FIELD_CENTER_X), FieldSide::Right);
    }

    #[test]
    fn test_hash_positions_inside_field() {
        for hash in [HashPosition::Left, HashPosition::Middle, HashPosition::Right] {
            let x = hash.ball_x();
            assert!(x > 0.0 && x < FIELD_WIDTH, "hash x out of bounds: {}", x);
        }
    }

    #[test]
    fn test_clamp_to_field() {
        let clamped = clamp_to_field(Vector2::new(-3.0, 12.0));
        assert_eq!(clamped.x, SIDELINE_MARGIN);
        assert_eq!(clamped.y, 12.0);

        let clamped = clamp_to_field(Vector2::new(60.0, 5.0));
        assert_eq!(clamped.x, FIELD_WIDTH - SIDELINE_MARGIN);
    }
}
