use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const VERTICAL_ROUTE_DEPTH: f32 = 12.0; // current depth at/past this reads vertical
pub const HORIZONTAL_ROUTE_DEPTH: f32 = 8.0; // current depth at/under this reads horizontal

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteType {
    Go,
    Fade,
    Seam,
    Post,
    Corner,
    Out,
    Dig,
    Slant,
    Hitch,
    Curl,
    Comeback,
    Cross,
    Wheel,
    Flat,
    Screen,
    Choice,
}

impl RouteType {
    /// Quick game routes break before the defense can settle.
    pub fn is_quick(&self) -> bool {
        matches!(
            self,
            RouteType::Slant | RouteType::Hitch | RouteType::Flat | RouteType::Screen
        )
    }

    pub fn is_crossing(&self) -> bool {
        matches!(self, RouteType::Cross)
    }

    pub fn is_vertical_stem(&self) -> bool {
        matches!(
            self,
            RouteType::Go | RouteType::Fade | RouteType::Seam | RouteType::Post | RouteType::Wheel
        )
    }

    /// Nominal break depth in yards past the line of scrimmage.
    pub fn target_depth(&self) -> f32 {
        match self {
            RouteType::Go => 30.0,
            RouteType::Fade => 28.0,
            RouteType::Seam => 22.0,
            RouteType::Post => 18.0,
            RouteType::Corner => 16.0,
            RouteType::Comeback => 15.0,
            RouteType::Dig => 14.0,
            RouteType::Out => 12.0,
            RouteType::Curl => 12.0,
            RouteType::Wheel => 18.0,
            RouteType::Cross => 8.0,
            RouteType::Choice => 8.0,
            RouteType::Slant => 6.0,
            RouteType::Hitch => 6.0,
            RouteType::Flat => 3.0,
            RouteType::Screen => -1.0,
        }
    }
}

impl Display for RouteType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            RouteType::Go => "go",
            RouteType::Fade => "fade",
            RouteType::Seam => "seam",
            RouteType::Post => "post",
            RouteType::Corner => "corner",
            RouteType::Out => "out",
            RouteType::Dig => "dig",
            RouteType::Slant => "slant",
            RouteType::Hitch => "hitch",
            RouteType::Curl => "curl",
            RouteType::Comeback => "comeback",
            RouteType::Cross => "cross",
            RouteType::Wheel => "wheel",
            RouteType::Flat => "flat",
            RouteType::Screen => "screen",
            RouteType::Choice => "choice",
        };
        write!(f, "{}", name)
    }
}

/// How a route currently threatens a zone, read from the receiver's depth
/// rather than from the play sheet: defenders react to what they see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Vertical,
    Horizontal,
    Breaking,
    Crossing,
}

/// An assigned route: ordered waypoints with a matching, non-decreasing
/// timing track. Replaced wholesale when a concept or audible changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub route_type: RouteType,
    pub waypoints: Vec<Vector2<f32>>,
    pub timing: Vec<f32>,
    pub depth: f32,
}

impl Route {
    pub fn new(route_type: RouteType, waypoints: Vec<Vector2<f32>>, timing: Vec<f32>, los: f32) -> Self {
        let depth = depth_from_waypoints(&waypoints, los);

        Route {
            route_type,
            waypoints,
            timing,
            depth,
        }
    }

    /// Position along the route at `time` seconds after the snap.
    ///
    /// Clamped at both ends: before the first timing value this returns the
    /// first waypoint, at or past the last value the final waypoint, so the
    /// call is idempotent once the route is complete.
    pub fn position_at(&self, time: f32) -> Vector2<f32> {
        if self.waypoints.is_empty() {
            return Vector2::zeros();
        }

        if self.timing.len() != self.waypoints.len() {
            return self.waypoints[0];
        }

        if time <= self.timing[0] {
            return self.waypoints[0];
        }

        let last = self.waypoints.len() - 1;
        if time >= self.timing[last] {
            return self.waypoints[last];
        }

        for i in 0..last {
            let (t0, t1) = (self.timing[i], self.timing[i + 1]);

            if time >= t0 && time < t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return self.waypoints[i + 1];
                }

                let alpha = (time - t0) / span;
                return self.waypoints[i].lerp(&self.waypoints[i + 1], alpha);
            }
        }

        self.waypoints[last]
    }

    pub fn is_complete_at(&self, time: f32) -> bool {
        self.timing.last().is_some_and(|&t| time >= t)
    }

    /// Classify the live threat by current depth, not by the route name.
    /// Crossers are the exception: they are recognized by shape so that
    /// underneath defenders can collision them while still shallow.
    pub fn classify(&self, current_depth: f32) -> RouteClass {
        if self.route_type.is_crossing() {
            return RouteClass::Crossing;
        }

        if current_depth >= VERTICAL_ROUTE_DEPTH {
            RouteClass::Vertical
        } else if current_depth <= HORIZONTAL_ROUTE_DEPTH {
            RouteClass::Horizontal
        } else {
            RouteClass::Breaking
        }
    }
}

pub fn depth_from_waypoints(waypoints: &[Vector2<f32>], los: f32) -> f32 {
    waypoints
        .iter()
        .map(|w| w.y - los)
        .fold(0.0_f32, f32::max)
}

/// How the receiver sells and exits his break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparationTechnique {
    SpeedCut,
    PlantAndCut,
    Stacking,
}

impl SeparationTechnique {
    pub fn for_route(route_type: RouteType) -> SeparationTechnique {
        match route_type {
            RouteType::Slant | RouteType::Cross | RouteType::Flat | RouteType::Screen => {
                SeparationTechnique::SpeedCut
            }
            RouteType::Go | RouteType::Fade | RouteType::Seam | RouteType::Wheel => {
                SeparationTechnique::Stacking
            }
            _ => SeparationTechnique::PlantAndCut,
        }
    }

    /// Speed factor applied during the plant step of the break.
    pub fn break_multiplier(&self) -> f32 {
        match self {
            SeparationTechnique::SpeedCut => 0.75,
            SeparationTechnique::PlantAndCut => 0.4,
            SeparationTechnique::Stacking => 0.85,
        }
    }

    /// Speed factor coming out of the break; plant-and-cut explodes past
    /// the base 0.8 release.
    pub fn release_multiplier(&self) -> f32 {
        match self {
            SeparationTechnique::SpeedCut => 0.8,
            SeparationTechnique::PlantAndCut => 1.1,
            SeparationTechnique::Stacking => 0.9,
        }
    }
}
