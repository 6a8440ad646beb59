//! Errors raised while building a [World](crate::model::World).
//!
//! Every variant here is a configuration problem caught at construction
//! time. Per-frame evaluation never fails.

use thiserror::Error;

use crate::model::{BodyID, BodyKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("body {name:?} has orbital period {period}, which must be finite and positive")]
    InvalidPeriod { name: String, period: f64 },

    #[error("body {name:?} has orbital radius {radius}, which must be finite and non-negative")]
    InvalidOrbitalRadius { name: String, radius: f64 },

    #[error("a body named {0:?} already exists")]
    DuplicateBody(String),

    #[error("no body with id {0:?}")]
    UnknownBody(BodyID),

    #[error("{child:?} {name:?} cannot orbit a {parent:?}")]
    InvalidParent {
        name: String,
        child: BodyKind,
        parent: BodyKind,
    },

    #[error("satellite {name:?} cannot orbit {parent:?}, which itself orbits a satellite")]
    OrbitTooDeep { name: String, parent: String },

    #[error("{kind:?} {name:?} needs a parent body")]
    MissingParent { name: String, kind: BodyKind },

    #[error("{kind:?} {name:?} is stationary and cannot have a parent body")]
    UnexpectedParent { name: String, kind: BodyKind },

    #[error("route {name:?} resolved only {found} valid waypoint(s), at least 2 are needed")]
    TooFewWaypoints { name: String, found: usize },

    #[error("no route named {0:?}")]
    UnknownRoute(String),

    #[error("speed multiplier {0} must be finite and positive")]
    InvalidSpeedMultiplier(f64),

    #[error("time precision {0} must be finite and positive")]
    InvalidTimePrecision(f64),

    #[error("ship acceleration of {0} G must be finite and positive")]
    InvalidAcceleration(f64),

    #[error("scenario contains no stars or gates")]
    EmptyScenario,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
}
