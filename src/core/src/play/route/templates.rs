use crate::play::field::{self, FieldSide};
use crate::play::route::{Route, RouteType};
use nalgebra::Vector2;

const ROUTE_RUN_SPEED: f32 = 8.0; // yards per second used to lay out timing tracks
const CROSS_FIELD_TRAVEL: f32 = 18.0;

/// Build a route of the given type starting from `start`, with the break
/// direction picked from the receiver's side of the field (outs break to
/// the near sideline, digs and slants break toward the middle).
pub fn build_route(route_type: RouteType, start: Vector2<f32>, los: f32) -> Route {
    build_route_scaled(route_type, start, los, 1.0)
}

/// Same as [`build_route`] but with every timing entry multiplied by
/// `timing_scale`. Option conversions compress quick breaks (x0.8) and
/// stretch developing ones (x1.2).
pub fn build_route_scaled(
    route_type: RouteType,
    start: Vector2<f32>,
    los: f32,
    timing_scale: f32,
) -> Route {
    let waypoints = waypoints_for(route_type, start, los);
    let timing = timing_for(&waypoints, timing_scale);

    Route::new(route_type, waypoints, timing, los)
}

fn waypoints_for(route_type: RouteType, start: Vector2<f32>, los: f32) -> Vec<Vector2<f32>> {
    let side = FieldSide::of_x(start.x);
    let out = side.direction(); // toward the near sideline
    let inward = -out;
    let x = start.x;

    let points = match route_type {
        RouteType::Go => vec![
            (x, los + 10.0),
            (x, los + 30.0),
        ],
        RouteType::Fade => vec![
            (x + 1.5 * out, los + 10.0),
            (x + 3.0 * out, los + 28.0),
        ],
        RouteType::Seam => vec![
            (x, los + 8.0),
            (x, los + 22.0),
        ],
        RouteType::Post => vec![
            (x, los + 12.0),
            (x + 8.0 * inward, los + 18.0),
        ],
        RouteType::Corner => vec![
            (x, los + 12.0),
            (x + 7.0 * out, los + 16.0),
        ],
        RouteType::Out => vec![
            (x, los + 12.0),
            (x + 6.0 * out, los + 12.0),
        ],
        RouteType::Dig => vec![
            (x, los + 14.0),
            (x + 8.0 * inward, los + 14.0),
        ],
        RouteType::Slant => vec![
            (x, los + 3.0),
            (x + 6.0 * inward, los + 6.0),
        ],
        RouteType::Hitch => vec![
            (x, los + 6.0),
            (x + 0.5 * inward, los + 5.0),
        ],
        RouteType::Curl => vec![
            (x, los + 12.0),
            (x + 2.0 * inward, los + 10.0),
        ],
        RouteType::Comeback => vec![
            (x, los + 15.0),
            (x + 3.0 * out, los + 12.0),
        ],
        RouteType::Cross => vec![
            (x + 2.0 * inward, los + 2.0),
            (x + CROSS_FIELD_TRAVEL * inward, los + 8.0),
        ],
        RouteType::Wheel => vec![
            (x + 8.0 * out, los + 2.0),
            (x + 9.0 * out, los + 18.0),
        ],
        RouteType::Flat => vec![
            (x + 8.0 * out, los + 3.0),
        ],
        RouteType::Screen => vec![
            (x + 2.0 * inward, los - 1.0),
        ],
        // A choice route runs to its decision depth and converts there.
        RouteType::Choice => vec![
            (x, los + 8.0),
        ],
    };

    let mut waypoints = vec![start];
    waypoints.extend(
        points
            .into_iter()
            .map(|(px, py)| field::clamp_to_field(Vector2::new(px, py))),
    );

    waypoints
}

fn timing_for(waypoints: &[Vector2<f32>], scale: f32) -> Vec<f32> {
    let mut timing = Vec::with_capacity(waypoints.len());
    let mut elapsed = 0.0_f32;

    timing.push(0.0);

    for pair in waypoints.windows(2) {
        let leg = (pair[1] - pair[0]).norm();
        elapsed += (leg / ROUTE_RUN_SPEED) * scale;
        timing.push(elapsed);
    }

    timing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_is_monotonic() {
        let route = build_route(RouteType::Post, Vector2::new(10.0, 29.0), 30.0);

        assert_eq!(route.timing.len(), route.waypoints.len());
        for pair in route.timing.windows(2) {
            assert!(pair[1] >= pair[0], "timing must not decrease: {:?}", route.timing);
        }
    }

    #[test]
    fn test_out_breaks_toward_near_sideline() {
        let left = build_route(RouteType::Out, Vector2::new(8.0, 29.0), 30.0);
        let right = build_route(RouteType::Out, Vector2::new(46.0, 29.0), 30.0);

        assert!(left.waypoints.last().unwrap().x < 8.0);
        assert!(right.waypoints.last().unwrap().x > 46.0);
    }

    #[test]
    fn test_dig_breaks_toward_middle() {
        let route = build_route(RouteType::Dig, Vector2::new(8.0, 29.0), 30.0);
        assert!(route.waypoints.last().unwrap().x > 8.0);
    }

    #[test]
    fn test_scaled_timing() {
        let base = build_route(RouteType::Slant, Vector2::new(12.0, 29.0), 30.0);
        let quick = build_route_scaled(RouteType::Slant, Vector2::new(12.0, 29.0), 30.0, 0.8);

        let base_last = *base.timing.last().unwrap();
        let quick_last = *quick.timing.last().unwrap();
        assert!((quick_last - base_last * 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_waypoints_stay_on_field() {
        // Receiver tight to the left sideline; the out must clamp
        let route = build_route(RouteType::Out, Vector2::new(2.0, 29.0), 30.0);
        for w in &route.waypoints {
            assert!(w.x >= field::SIDELINE_MARGIN, "waypoint off the field: {}", w.x);
        }
    }
}
