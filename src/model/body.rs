use std::f64::consts::PI;

use nalgebra::{Point2, Point3, Vector2};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BodyKind {
    /// Anything stationary
    Star,
    /// Anything orbiting a star
    Planet,
    /// Moons, stations, anything orbiting a planet
    Satellite,
    /// Teleport endpoint to another star system. Stationary.
    Gate,
}

impl BodyKind {
    /// Stars and gates sit still at their stored position.
    pub fn is_stationary(self) -> bool {
        matches!(self, BodyKind::Star | BodyKind::Gate)
    }

    /// Only planets and satellites can be flown between.
    pub fn is_waypoint(self) -> bool {
        matches!(self, BodyKind::Planet | BodyKind::Satellite)
    }

    pub fn can_orbit(self, parent: BodyKind) -> bool {
        match self {
            BodyKind::Star | BodyKind::Gate => false,
            BodyKind::Planet => parent == BodyKind::Star,
            BodyKind::Satellite => matches!(parent, BodyKind::Planet | BodyKind::Satellite),
        }
    }
}

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub radius: u32,
    /// Colour of the orbit line, RGB in [0, 1]
    pub color: Point3<f32>,
}

impl BodyInfo {
    pub fn new(name: impl Into<String>, radius: u32) -> Self {
        Self {
            name: name.into(),
            radius,
            color: Point3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_color(mut self, color: Point3<f32>) -> Self {
        self.color = color;
        self
    }
}

/// A fixed circular path around a parent body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularOrbit {
    pub radius: f64,
    pub period: f64,
}

impl CircularOrbit {
    /// Seconds into the current cycle at the given time.
    ///
    /// The cycle length is the period divided by `precision`, rounded up,
    /// so the phase repeats on a whole number of ticks even when the
    /// period isn't a multiple of the precision.
    pub fn elapsed_in_cycle(&self, time: f64, precision: f64) -> f64 {
        let cycle = (self.period / precision).ceil();
        time.rem_euclid(cycle)
    }

    pub fn phase_angle(&self, time: f64, precision: f64) -> f64 {
        self.elapsed_in_cycle(time, precision) / self.period * 2.0 * PI
    }

    /// Fraction of the current revolution completed, in [0, 1)
    pub fn progress(&self, time: f64, precision: f64) -> f64 {
        (self.elapsed_in_cycle(time, precision) / self.period).fract()
    }

    /// Displacement from the parent's position
    pub fn offset(&self, time: f64, precision: f64) -> Vector2<f64> {
        let a = self.phase_angle(time, precision);
        Vector2::new(a.cos(), a.sin()) * self.radius
    }
}

#[derive(Debug, Clone)]
pub enum BodyState {
    Fixed,
    Orbiting {
        parent_id: BodyID,
        orbit: CircularOrbit,
    },
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub kind: BodyKind,
    pub state: BodyState,
    pub(crate) position: Point2<f64>,
    pub(crate) progress: f64,
    pub(crate) children: Vec<BodyID>,
}

impl Body {
    pub fn parent_id(&self) -> Option<BodyID> {
        match self.state {
            BodyState::Fixed => None,
            BodyState::Orbiting { parent_id, .. } => Some(parent_id),
        }
    }

    pub fn orbit(&self) -> Option<&CircularOrbit> {
        match &self.state {
            BodyState::Fixed => None,
            BodyState::Orbiting { orbit, .. } => Some(orbit),
        }
    }

    pub fn has_parent(&self) -> bool {
        self.parent_id().is_some()
    }

    /// Position as of the last evaluation, in world units
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// Position rounded to whole world units
    pub fn grid_position(&self) -> Point2<i64> {
        Point2::new(
            self.position.x.round() as i64,
            self.position.y.round() as i64,
        )
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn children(&self) -> &[BodyID] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kind_rules() {
        assert!(BodyKind::Planet.can_orbit(BodyKind::Star));
        assert!(!BodyKind::Planet.can_orbit(BodyKind::Planet));
        assert!(!BodyKind::Planet.can_orbit(BodyKind::Gate));
        assert!(BodyKind::Satellite.can_orbit(BodyKind::Planet));
        assert!(BodyKind::Satellite.can_orbit(BodyKind::Satellite));
        assert!(!BodyKind::Satellite.can_orbit(BodyKind::Star));
        assert!(!BodyKind::Star.can_orbit(BodyKind::Star));
        assert!(!BodyKind::Gate.can_orbit(BodyKind::Star));

        assert!(BodyKind::Gate.is_stationary());
        assert!(!BodyKind::Gate.is_waypoint());
        assert!(BodyKind::Satellite.is_waypoint());
    }

    #[test]
    fn test_quarter_period() {
        let orbit = CircularOrbit {
            radius: 100.0,
            period: 86400.0,
        };
        assert_relative_eq!(orbit.offset(0.0, 0.125), Vector2::new(100.0, 0.0));
        assert_relative_eq!(
            orbit.offset(21600.0, 0.125),
            Vector2::new(0.0, 100.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(orbit.progress(21600.0, 0.125), 0.25);
    }

    #[test]
    fn test_cycle_uses_quantized_period() {
        // A period of 10.05s with eighth-second precision repeats every 81s
        let orbit = CircularOrbit {
            radius: 1.0,
            period: 10.05,
        };
        assert_relative_eq!(orbit.elapsed_in_cycle(81.0, 0.125), 0.0);
        assert_relative_eq!(orbit.elapsed_in_cycle(85.0, 0.125), 4.0);
        assert_relative_eq!(orbit.elapsed_in_cycle(-1.0, 0.125), 80.0);
    }

    #[test]
    fn test_progress_stays_in_unit_interval() {
        let orbit = CircularOrbit {
            radius: 5.0,
            period: 3.3,
        };
        for i in 0..1000 {
            let p = orbit.progress(i as f64 * 0.77, 0.125);
            assert!((0.0..1.0).contains(&p), "progress {} out of range", p);
        }
    }
}
