pub mod adjustments;
pub mod alignment;
pub mod rotation;

pub use adjustments::*;
pub use alignment::*;
pub use rotation::*;

use crate::play::player::Leverage;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverageType {
    Cover0,
    Cover1,
    Cover2,
    Cover3,
    Cover4,
    Cover6,
    Tampa2,
}

impl CoverageType {
    /// Man-first schemes: every eligible receiver must carry an assignment.
    pub fn is_man_scheme(&self) -> bool {
        matches!(self, CoverageType::Cover0 | CoverageType::Cover1)
    }

    /// Safeties expected to open the play deeper than 12 yards.
    pub fn expected_deep_safeties(&self) -> u8 {
        match self {
            CoverageType::Cover0 => 0,
            CoverageType::Cover1 | CoverageType::Cover3 => 1,
            CoverageType::Cover2 | CoverageType::Cover6 | CoverageType::Tampa2 => 2,
            CoverageType::Cover4 => 2,
        }
    }

    pub fn all() -> [CoverageType; 7] {
        [
            CoverageType::Cover0,
            CoverageType::Cover1,
            CoverageType::Cover2,
            CoverageType::Cover3,
            CoverageType::Cover4,
            CoverageType::Cover6,
            CoverageType::Tampa2,
        ]
    }
}

impl Display for CoverageType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CoverageType::Cover0 => write!(f, "Cover 0"),
            CoverageType::Cover1 => write!(f, "Cover 1"),
            CoverageType::Cover2 => write!(f, "Cover 2"),
            CoverageType::Cover3 => write!(f, "Cover 3"),
            CoverageType::Cover4 => write!(f, "Cover 4"),
            CoverageType::Cover6 => write!(f, "Cover 6"),
            CoverageType::Tampa2 => write!(f, "Tampa 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneName {
    DeepThird,
    DeepHalf,
    DeepQuarter,
    DeepMiddle,
    Hook,
    Curl,
    Flat,
    HoleMiddle,
}

impl ZoneName {
    /// Deep zones hand receivers off upward; underneath zones collision them.
    pub fn is_deep(&self) -> bool {
        matches!(
            self,
            ZoneName::DeepThird | ZoneName::DeepHalf | ZoneName::DeepQuarter | ZoneName::DeepMiddle
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: ZoneName,
    pub center: Vector2<f32>,
    pub width: f32,
    pub height: f32,
    pub depth: f32, // yards off the line of scrimmage
}

impl Zone {
    pub fn new(name: ZoneName, center: Vector2<f32>, width: f32, height: f32, depth: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0 && depth > 0.0);

        Zone {
            name,
            center,
            width,
            height,
            depth,
        }
    }

    pub fn contains_x(&self, x: f32) -> bool {
        (x - self.center.x).abs() <= self.width / 2.0
    }
}

/// What a defender is responsible for on this snap. Exactly one per
/// defender; the validator enforces that man targets are never shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoverageResponsibility {
    Man { target: u32 },
    Zone { zone: Zone },
    Spy { target: u32 },
    Blitz,
}

impl CoverageResponsibility {
    pub fn man_target(&self) -> Option<u32> {
        match self {
            CoverageResponsibility::Man { target } => Some(*target),
            _ => None,
        }
    }

    pub fn zone(&self) -> Option<&Zone> {
        match self {
            CoverageResponsibility::Zone { zone } => Some(zone),
            _ => None,
        }
    }

    pub fn is_man(&self) -> bool {
        matches!(self, CoverageResponsibility::Man { .. })
    }

    pub fn is_zone(&self) -> bool {
        matches!(self, CoverageResponsibility::Zone { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageTechnique {
    Press,
    Bail,
    Box,
    Robber,
    Banjo,
    Collision,
}

/// One proposed defender change. Subsystems return lists of these; the
/// consuming engine is the single writer that applies them atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adjustment {
    pub defender_id: u32,
    pub new_position: Vector2<f32>,
    pub new_responsibility: Option<CoverageResponsibility>,
    pub leverage: Option<Leverage>,
    pub technique: Option<CoverageTechnique>,
}

impl Adjustment {
    pub fn reposition(defender_id: u32, new_position: Vector2<f32>) -> Self {
        Adjustment {
            defender_id,
            new_position,
            new_responsibility: None,
            leverage: None,
            technique: None,
        }
    }

    pub fn with_responsibility(mut self, responsibility: CoverageResponsibility) -> Self {
        self.new_responsibility = Some(responsibility);
        self
    }

    pub fn with_technique(mut self, technique: CoverageTechnique) -> Self {
        self.technique = Some(technique);
        self
    }

    pub fn with_leverage(mut self, leverage: Leverage) -> Self {
        self.leverage = Some(leverage);
        self
    }
}
