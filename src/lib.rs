pub mod clock;
pub mod config;
pub mod consts;
pub mod error;
pub mod file;
pub mod model;
pub mod physics;
pub mod simulation;

pub use error::{Error, Result};
