use tracing::warn;

use super::body::BodyID;
use super::tree::BodyTree;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RouteID(pub usize);

/// An ordered list of places to go.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: RouteID,
    /// E.g. "BTN-7274"
    pub number: String,
    waypoints: Vec<BodyID>,
}

impl Route {
    pub fn waypoints(&self) -> &[BodyID] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> BodyID {
        self.waypoints[index]
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; routes hold at least two waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn get_route(&self, id: RouteID) -> &Route {
        &self.routes[id.0]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Adds a route through the given bodies.
    ///
    /// Waypoints that aren't in the tree, or that are stars or gates, are
    /// dropped. Fails if fewer than two remain.
    pub fn add_route(
        &mut self,
        bodies: &BodyTree,
        number: impl Into<String>,
        waypoints: impl IntoIterator<Item = BodyID>,
    ) -> Result<RouteID> {
        let number = number.into();
        let waypoints: Vec<BodyID> = waypoints
            .into_iter()
            .filter(|id| match bodies.try_get_body(*id) {
                Some(body) if body.kind.is_waypoint() => true,
                Some(body) => {
                    warn!(
                        "Route {}: {:?} {} is not a valid waypoint",
                        number, body.kind, body.info.name
                    );
                    false
                }
                None => {
                    warn!("Route {}: no body with id {:?}", number, id);
                    false
                }
            })
            .collect();

        if waypoints.len() < 2 {
            return Err(Error::TooFewWaypoints {
                name: number,
                found: waypoints.len(),
            });
        }

        let id = RouteID(self.routes.len());
        self.routes.push(Route {
            id,
            number,
            waypoints,
        });
        Ok(id)
    }

    /// First route with exactly this number.
    ///
    /// Numbers aren't required to be unique; later duplicates are shadowed.
    pub fn find_route(&self, number: &str) -> Option<RouteID> {
        self.routes
            .iter()
            .find(|route| route.number == number)
            .map(|route| route.id)
    }
}
