use serde::Deserialize;

use crate::consts::{SHIP_GS, STANDARD_GRAVITY, TIME_PRECISION};
use crate::error::{Error, Result};

/// What a ship does once it arrives at the last waypoint of its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RouteEnd {
    /// Fly from the last waypoint back to the first, forever.
    #[default]
    Loop,
    /// Retrace the route backwards, then forwards again.
    Reverse,
    /// Stay parked at the last waypoint.
    Stop,
}

/// Tunables for a simulation run. Usually read from the `[simulation]`
/// table of a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Simulated seconds per wall-clock second
    pub speed_multiplier: f64,
    /// Granularity of the orbit phase, in seconds
    pub time_precision: f64,
    /// Ship acceleration, in multiples of standard gravity
    pub ship_gs: f64,
    pub route_end: RouteEnd,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            time_precision: TIME_PRECISION,
            ship_gs: SHIP_GS,
            route_end: RouteEnd::Loop,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.speed_multiplier) {
            return Err(Error::InvalidSpeedMultiplier(self.speed_multiplier));
        }
        if !is_positive(self.time_precision) {
            return Err(Error::InvalidTimePrecision(self.time_precision));
        }
        if !is_positive(self.ship_gs) {
            return Err(Error::InvalidAcceleration(self.ship_gs));
        }
        Ok(())
    }

    /// Ship acceleration in world units (km) per second squared
    pub fn ship_acceleration(&self) -> f64 {
        self.ship_gs * STANDARD_GRAVITY
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.route_end, RouteEnd::Loop);
        approx::assert_relative_eq!(config.ship_acceleration(), STANDARD_GRAVITY);
    }

    #[test]
    fn test_rejects_bad_values() {
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                speed_multiplier: bad,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidSpeedMultiplier(_))
            ));

            let config = SimConfig {
                time_precision: bad,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidTimePrecision(_))
            ));

            let config = SimConfig {
                ship_gs: bad,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidAcceleration(_))
            ));
        }
    }

    #[test]
    fn test_partial_table() {
        let config: SimConfig = toml::from_str(
            r#"
            speed_multiplier = 3600.0
            route_end = "reverse"
            "#,
        )
        .unwrap();
        assert_eq!(config.speed_multiplier, 3600.0);
        assert_eq!(config.time_precision, TIME_PRECISION);
        assert_eq!(config.route_end, RouteEnd::Reverse);
    }
}
