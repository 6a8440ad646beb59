//! Per-frame evaluation of the [World](crate::model::World).
//!
//! Positions are a pure function of time: everything is recomputed from
//! the clock each frame, with no integration and no state carried between
//! frames beyond which leg each ship is on.

pub mod orbit;
pub mod spacecraft;
