use nalgebra::Point2;

use super::body::BodyID;
use super::tree::BodyTree;
use crate::consts::INTERCEPT_ITERATIONS;

/// Speed at a given fraction of a leg.
///
/// Ramps up linearly to the midpoint and back down to zero at arrival. This
/// is a convenient shape, not real constant-acceleration kinematics.
/// Degenerate distances give zero speed.
pub fn speed_profile(progress: f64, distance: f64, gs: f64) -> f64 {
    if !distance.is_finite() || distance <= 0.0 || !progress.is_finite() {
        return 0.0;
    }
    let p = progress.clamp(0.0, 1.0);
    if p < 0.5 {
        // Accelerating
        gs * p * distance
    } else {
        // Decelerating
        gs * distance * (1.0 - p)
    }
}

/// Flip-and-burn travel time over `distance` at constant `acceleration`.
pub fn travel_time(distance: f64, acceleration: f64) -> f64 {
    if !distance.is_finite() || distance <= 0.0 {
        return 0.0;
    }
    2.0 * (distance / acceleration).sqrt()
}

/// One leg of a journey between two waypoints.
///
/// Progress is measured by time, not by distance covered.
#[derive(Debug, Clone)]
pub struct Flight {
    pub start_body: BodyID,
    /// Where the start was when the journey began
    pub start_position: Point2<f64>,
    pub end_body: BodyID,
    /// Where the ship will intercept the destination
    pub end_position: Point2<f64>,
    pub departure: f64,
    pub eta: f64,
    /// E.g. "BTN-7274"
    pub number: String,
    pub(crate) progress: f64,
}

impl Flight {
    pub fn new(
        start_body: BodyID,
        start_position: Point2<f64>,
        end_body: BodyID,
        end_position: Point2<f64>,
        departure: f64,
        eta: f64,
        number: impl Into<String>,
    ) -> Self {
        Self {
            start_body,
            start_position,
            end_body,
            end_position,
            departure,
            eta: eta.max(departure),
            number: number.into(),
            progress: 0.0,
        }
    }

    /// Plans a leg leaving `start` at `departure`, aiming for where `end`
    /// will be when the ship gets there.
    pub fn plan(
        bodies: &BodyTree,
        start: BodyID,
        end: BodyID,
        departure: f64,
        number: impl Into<String>,
        acceleration: f64,
        precision: f64,
    ) -> Self {
        let start_position = bodies.position_at(start, departure, precision);

        let mut eta = departure;
        let mut end_position = bodies.position_at(end, departure, precision);
        for _ in 0..INTERCEPT_ITERATIONS {
            let distance = (end_position - start_position).norm();
            eta = departure + travel_time(distance, acceleration);
            end_position = bodies.position_at(end, eta, precision);
        }

        Self::new(
            start,
            start_position,
            end,
            end_position,
            departure,
            eta,
            number,
        )
    }

    pub fn distance(&self) -> f64 {
        (self.end_position - self.start_position).norm()
    }

    pub fn duration(&self) -> f64 {
        self.eta - self.departure
    }

    /// Fraction of the leg elapsed at `time`, in [0, 1]
    pub fn progress_at(&self, time: f64) -> f64 {
        let duration = self.duration();
        if duration <= 0.0 || !duration.is_finite() {
            return 1.0;
        }
        ((time - self.departure) / duration).clamp(0.0, 1.0)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Straight-line interpolation between the captured endpoints
    pub fn position(&self) -> Point2<f64> {
        let distance = self.distance();
        if !distance.is_finite() || distance == 0.0 {
            return self.start_position;
        }
        self.start_position + (self.end_position - self.start_position) * self.progress
    }

    pub fn speed(&self, gs: f64) -> f64 {
        speed_profile(self.progress, self.distance(), gs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use crate::consts::SHIP_GS;
    use crate::model::{BodyInfo, BodyKind};

    fn straight_leg() -> Flight {
        Flight::new(
            BodyID(0),
            Point2::new(0.0, 0.0),
            BodyID(1),
            Point2::new(100.0, 0.0),
            0.0,
            40.0,
            "T-1",
        )
    }

    #[test]
    fn test_quarter_way() {
        let mut flight = straight_leg();
        flight.set_progress(0.25);
        assert_relative_eq!(flight.position(), Point2::new(25.0, 0.0));
        assert_relative_eq!(flight.speed(SHIP_GS), SHIP_GS * 0.25 * 100.0);
    }

    #[test]
    fn test_speed_profile_shape() {
        let d = 250.0;
        assert_eq!(speed_profile(0.0, d, 1.0), 0.0);
        assert_eq!(speed_profile(1.0, d, 1.0), 0.0);

        let peak = speed_profile(0.5, d, 1.0);
        for i in 0..=100 {
            let p = i as f64 / 100.0;
            let s = speed_profile(p, d, 1.0);
            assert_abs_diff_eq!(s, speed_profile(1.0 - p, d, 1.0), epsilon = 1e-9);
            assert!(s <= peak);
        }
    }

    #[test]
    fn test_degenerate_speed() {
        assert_eq!(speed_profile(0.3, 0.0, 1.0), 0.0);
        assert_eq!(speed_profile(0.3, f64::NAN, 1.0), 0.0);
        assert_eq!(speed_profile(f64::NAN, 10.0, 1.0), 0.0);
    }

    #[test]
    fn test_progress_by_time() {
        let flight = straight_leg();
        assert_eq!(flight.progress_at(-5.0), 0.0);
        assert_eq!(flight.progress_at(10.0), 0.25);
        assert_eq!(flight.progress_at(40.0), 1.0);
        assert_eq!(flight.progress_at(100.0), 1.0);
    }

    #[test]
    fn test_zero_distance_leg_is_stationary() {
        let mut flight = Flight::new(
            BodyID(0),
            Point2::new(7.0, 3.0),
            BodyID(0),
            Point2::new(7.0, 3.0),
            12.0,
            12.0,
            "T-0",
        );
        assert_eq!(flight.progress_at(12.0), 1.0);
        flight.set_progress(0.5);
        assert_eq!(flight.position(), Point2::new(7.0, 3.0));
        assert_eq!(flight.speed(1.0), 0.0);
    }

    #[test]
    fn test_travel_time() {
        assert_eq!(travel_time(0.0, 1.0), 0.0);
        // Half the distance accelerating, half braking: d/2 = a (t/2)^2 / 2
        let t = travel_time(100.0, 1.0);
        assert_relative_eq!(t, 20.0);
        assert_relative_eq!(0.5 * 1.0 * (t / 2.0).powi(2), 50.0);
    }

    #[test]
    fn test_plan_intercepts_moving_target() {
        let mut tree = BodyTree::new();
        let sun = tree
            .add_fixed_body(BodyInfo::new("Sun", 1), BodyKind::Star, Point2::origin())
            .unwrap();
        let inner = tree
            .add_orbiting_body(
                BodyInfo::new("Inner", 1),
                BodyKind::Planet,
                sun,
                10.0,
                1000.0,
            )
            .unwrap();
        let outer = tree
            .add_orbiting_body(
                BodyInfo::new("Outer", 1),
                BodyKind::Planet,
                sun,
                50.0,
                8000.0,
            )
            .unwrap();

        let flight = Flight::plan(&tree, inner, outer, 0.0, "X", 1.0, 0.125);
        assert_relative_eq!(flight.start_position, Point2::new(10.0, 0.0));
        assert!(flight.eta > flight.departure);
        assert_relative_eq!(
            flight.end_position,
            tree.position_at(outer, flight.eta, 0.125),
            epsilon = 1e-9
        );
        // Close to self-consistent after a few iterations
        assert_abs_diff_eq!(
            flight.duration(),
            travel_time(flight.distance(), 1.0),
            epsilon = 1e-3
        );
    }
}
