use crate::play::field;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const HEAD_UP_TOLERANCE: f32 = 0.5; // yards of lateral offset treated as head-up

/// Lateral relationship of a defender to the receiver he is playing over.
/// Inside leverage means the defender sits between the receiver and the
/// middle of the field, taking away in-breaking routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leverage {
    Inside,
    Outside,
    HeadUp,
}

impl Leverage {
    pub fn between(defender_x: f32, receiver_x: f32) -> Leverage {
        let offset = defender_x - receiver_x;

        if offset.abs() <= HEAD_UP_TOLERANCE {
            return Leverage::HeadUp;
        }

        let defender_center_offset = field::distance_from_center(defender_x);
        let receiver_center_offset = field::distance_from_center(receiver_x);

        if defender_center_offset < receiver_center_offset {
            Leverage::Inside
        } else {
            Leverage::Outside
        }
    }
}

impl Display for Leverage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Leverage::Inside => write!(f, "inside"),
            Leverage::Outside => write!(f, "outside"),
            Leverage::HeadUp => write!(f, "head-up"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_leverage_left_of_center() {
        // Receiver at x=10 (left side), defender shaded toward the middle
        assert_eq!(Leverage::between(12.0, 10.0), Leverage::Inside);
    }

    #[test]
    fn test_outside_leverage_left_of_center() {
        assert_eq!(Leverage::between(8.0, 10.0), Leverage::Outside);
    }

    #[test]
    fn test_inside_leverage_right_of_center() {
        // Mirrored on the right side: inside means lower x
        assert_eq!(Leverage::between(42.0, 44.0), Leverage::Inside);
        assert_eq!(Leverage::between(46.0, 44.0), Leverage::Outside);
    }

    #[test]
    fn test_head_up_within_tolerance() {
        assert_eq!(Leverage::between(10.3, 10.0), Leverage::HeadUp);
    }
}
