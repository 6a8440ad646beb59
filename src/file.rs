//! Scenario files.
//!
//! A scenario is a TOML document describing the star systems, routes and
//! ships to simulate:
//!
//! ```toml
//! [simulation]
//! speed_multiplier = 3600.0
//!
//! [[star]]
//! name = "Sol"
//! position = [0.0, 0.0]
//! radius = 696.0
//!
//! [[star.planet]]
//! name = "Earth"
//! radius = 6.4
//! orbital_radius = 149598.0   # megametres above the star's surface
//! orbital_period = 365.25     # days
//! colour = [80, 120, 255]
//!
//! [[star.planet.satellite]]
//! name = "Luna"
//! radius = 1.7
//! orbital_radius = 384.0
//! orbital_period = 27.3
//!
//! [[route]]
//! name = "BTN-7274"
//! locations = ["Earth", "Luna"]
//!
//! [[ship]]
//! name = "Endeavour"
//! route = "BTN-7274"
//! ```
//!
//! Sizes and distances are in megametres, periods in days. Bodies that fail
//! validation are skipped along with everything orbiting them, as are
//! routes with fewer than two valid stops and ships on unknown routes.

use std::fs;
use std::path::Path;

use nalgebra::{Point2, Point3};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SimConfig;
use crate::consts::{PERIOD_MULTIPLIER, SCALE_MULTIPLIER};
use crate::error::{Error, Result};
use crate::model::{BodyID, BodyInfo, BodyKind, BodyTree, World};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub simulation: SimConfig,
    #[serde(rename = "star")]
    pub stars: Vec<StarEntry>,
    #[serde(rename = "gate")]
    pub gates: Vec<GateEntry>,
    #[serde(rename = "route")]
    pub routes: Vec<RouteEntry>,
    #[serde(rename = "ship")]
    pub ships: Vec<ShipEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StarEntry {
    pub name: Option<String>,
    pub position: [f64; 2],
    pub radius: f64,
    pub colour: [u8; 3],
    #[serde(rename = "planet")]
    pub planets: Vec<PlanetEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanetEntry {
    pub name: Option<String>,
    pub radius: f64,
    pub orbital_radius: f64,
    pub orbital_period: f64,
    pub colour: [u8; 3],
    #[serde(rename = "satellite")]
    pub satellites: Vec<SatelliteEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SatelliteEntry {
    pub name: Option<String>,
    pub radius: f64,
    pub orbital_radius: f64,
    pub orbital_period: f64,
    pub colour: [u8; 3],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GateEntry {
    pub name: Option<String>,
    pub position: [f64; 2],
    pub radius: f64,
    pub colour: [u8; 3],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteEntry {
    pub name: Option<String>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShipEntry {
    pub name: Option<String>,
    pub route: String,
}

pub fn read_file(filename: impl AsRef<Path>, departure: f64) -> Result<World> {
    Scenario::read(filename)?.build(departure)
}

impl Scenario {
    pub fn read(filename: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&fs::read_to_string(filename)?)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Builds the world, with every ship leaving its first waypoint at
    /// `departure`, and evaluates it once at that time.
    pub fn build(&self, departure: f64) -> Result<World> {
        if self.stars.is_empty() && self.gates.is_empty() {
            return Err(Error::EmptyScenario);
        }

        let mut world = World::new(self.simulation)?;
        self.add_bodies(world.bodies_mut());
        log_hierarchy(world.bodies());

        for (i, entry) in self.routes.iter().enumerate() {
            let number = entry.name.clone().unwrap_or_else(|| format!("ROUTE_{}", i));
            if entry.locations.len() < 2 {
                warn!("Skipping route {}: needs at least two locations", number);
                continue;
            }
            match world.add_route_by_names(number.as_str(), entry.locations.as_slice()) {
                Ok(_) => debug!("{} : {}", number, entry.locations.join(" -> ")),
                Err(e) => warn!("Skipping route {}: {}", number, e),
            }
        }

        for (i, entry) in self.ships.iter().enumerate() {
            let name = entry.name.clone().unwrap_or_else(|| format!("SHIP_{}", i));
            if let Err(e) = world.add_ship(name.as_str(), &entry.route, departure) {
                warn!("Skipping ship {}: {}", name, e);
            }
        }

        world.evaluate(departure);
        Ok(world)
    }

    fn add_bodies(&self, tree: &mut BodyTree) {
        for (i, star) in self.stars.iter().enumerate() {
            let suffix = i.to_string();
            let info = body_info(&star.name, "STAR", &suffix, star.radius, star.colour);
            let star_radius = f64::from(info.radius);
            let position = Point2::new(star.position[0], star.position[1]);
            let star_id = match tree.add_fixed_body(info, BodyKind::Star, position) {
                Ok(id) => id,
                Err(e) => {
                    warn!("Skipping star: {}", e);
                    continue;
                }
            };

            for (j, planet) in star.planets.iter().enumerate() {
                let suffix = format!("{}_{}", suffix, j);
                let planet_id = match add_orbiting(
                    tree,
                    star_id,
                    star_radius,
                    BodyKind::Planet,
                    &planet.name,
                    "PLANET",
                    &suffix,
                    planet.radius,
                    planet.orbital_radius,
                    planet.orbital_period,
                    planet.colour,
                ) {
                    Some(id) => id,
                    None => continue,
                };
                let planet_radius = f64::from(tree.get_body(planet_id).info.radius);

                for (k, sat) in planet.satellites.iter().enumerate() {
                    add_orbiting(
                        tree,
                        planet_id,
                        planet_radius,
                        BodyKind::Satellite,
                        &sat.name,
                        "SATELLITE",
                        &format!("{}_{}", suffix, k),
                        sat.radius,
                        sat.orbital_radius,
                        sat.orbital_period,
                        sat.colour,
                    );
                }
            }
        }

        for (i, gate) in self.gates.iter().enumerate() {
            let info = body_info(&gate.name, "GATE", &i.to_string(), gate.radius, gate.colour);
            let position = Point2::new(gate.position[0], gate.position[1]);
            if let Err(e) = tree.add_fixed_body(info, BodyKind::Gate, position) {
                warn!("Skipping gate: {}", e);
            }
        }
    }
}

// Orbits are given as height above the parent's surface
#[allow(clippy::too_many_arguments)]
fn add_orbiting(
    tree: &mut BodyTree,
    parent_id: BodyID,
    parent_radius: f64,
    kind: BodyKind,
    name: &Option<String>,
    prefix: &str,
    suffix: &str,
    radius: f64,
    orbital_radius: f64,
    orbital_period: f64,
    colour: [u8; 3],
) -> Option<BodyID> {
    let info = body_info(name, prefix, suffix, radius, colour);
    let orbital_radius = orbital_radius * SCALE_MULTIPLIER + parent_radius;
    let orbital_period = orbital_period * PERIOD_MULTIPLIER;
    match tree.add_orbiting_body(info, kind, parent_id, orbital_radius, orbital_period) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Skipping {:?}: {}", kind, e);
            None
        }
    }
}

fn body_info(
    name: &Option<String>,
    prefix: &str,
    suffix: &str,
    radius: f64,
    colour: [u8; 3],
) -> BodyInfo {
    let name = name
        .clone()
        .unwrap_or_else(|| format!("{}_{}", prefix, suffix));
    let radius = (radius.max(0.0) * SCALE_MULTIPLIER).round() as u32;
    BodyInfo::new(name, radius).with_color(parse_colour(colour))
}

fn parse_colour(rgb: [u8; 3]) -> Point3<f32> {
    Point3::new(
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
    )
}

fn log_hierarchy(tree: &BodyTree) {
    fn walk(tree: &BodyTree, id: BodyID, depth: usize) {
        let body = tree.get_body(id);
        debug!("{}{}", "  ".repeat(depth), body.info.name);
        for child in body.children() {
            walk(tree, *child, depth + 1);
        }
    }
    for root in tree.roots() {
        walk(tree, *root, 0);
    }
}
