use tracing::{debug, warn};

use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::physics;

mod body;
mod flight;
mod route;
mod ship;
mod tree;

pub use body::{Body, BodyID, BodyInfo, BodyKind, BodyState, CircularOrbit};
pub use flight::{speed_profile, travel_time, Flight};
pub use route::{Route, RouteID, RouteTable};
pub use ship::{LegCursor, ShipID, SpaceCraft};
pub use tree::BodyTree;

/// All simulation data: the body hierarchy, the routes between bodies, and
/// the ships flying them.
///
/// Built once by a loader, then evaluated once per frame. Renderers should
/// only read from it.
#[derive(Debug, Clone)]
pub struct World {
    config: SimConfig,
    bodies: BodyTree,
    routes: RouteTable,
    ships: Vec<SpaceCraft>,
}

impl World {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bodies: BodyTree::new(),
            routes: RouteTable::new(),
            ships: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &BodyTree {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodyTree {
        &mut self.bodies
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn ships(&self) -> impl Iterator<Item = &SpaceCraft> {
        self.ships.iter()
    }

    pub fn get_ship(&self, id: ShipID) -> &SpaceCraft {
        &self.ships[id.0]
    }

    pub fn find_ship(&self, name: &str) -> Option<ShipID> {
        self.ships
            .iter()
            .find(|ship| ship.name == name)
            .map(|ship| ship.id)
    }

    pub fn add_route(
        &mut self,
        number: impl Into<String>,
        waypoints: impl IntoIterator<Item = BodyID>,
    ) -> Result<RouteID> {
        self.routes.add_route(&self.bodies, number, waypoints)
    }

    /// Adds a route through the named bodies. Names that don't match a
    /// planet or satellite are skipped.
    pub fn add_route_by_names<S: AsRef<str>>(
        &mut self,
        number: impl Into<String>,
        locations: &[S],
    ) -> Result<RouteID> {
        let bodies = &self.bodies;
        let waypoints: Vec<BodyID> = locations
            .iter()
            .filter_map(|name| {
                let name: &str = name.as_ref();
                let found = bodies.find_waypoint(name);
                if found.is_none() {
                    warn!("No planet or satellite named {}", name);
                }
                found
            })
            .collect();
        self.routes.add_route(bodies, number, waypoints)
    }

    /// Puts a new ship on the first leg of the named route, leaving at
    /// `departure`.
    pub fn add_ship(
        &mut self,
        name: impl Into<String>,
        route_number: &str,
        departure: f64,
    ) -> Result<ShipID> {
        let route_id = self
            .routes
            .find_route(route_number)
            .ok_or_else(|| Error::UnknownRoute(route_number.to_owned()))?;
        let route = self.routes.get_route(route_id);

        let leg = LegCursor::first();
        let flight = Flight::plan(
            &self.bodies,
            route.waypoint(leg.from),
            route.waypoint(leg.to),
            departure,
            route.number.clone(),
            self.config.ship_acceleration(),
            self.config.time_precision,
        );

        let id = ShipID(self.ships.len());
        let name = name.into();
        debug!("{} : {}", name, route.number);
        self.ships.push(SpaceCraft::new(id, name, route, flight));
        Ok(id)
    }

    /// Brings every body and ship up to `time`.
    pub fn evaluate(&mut self, time: f64) {
        physics::orbit::evaluate_all(&mut self.bodies, time, self.config.time_precision);
        physics::spacecraft::evaluate_all(
            &mut self.ships,
            &self.bodies,
            &self.routes,
            &self.config,
            time,
        );
    }
}
