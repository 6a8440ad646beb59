use nalgebra::Point2;

use super::flight::Flight;
use super::route::{Route, RouteID};
use crate::config::RouteEnd;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShipID(pub usize);

/// Which pair of route waypoints the current leg flies between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegCursor {
    pub from: usize,
    pub to: usize,
}

impl LegCursor {
    pub fn first() -> Self {
        Self { from: 0, to: 1 }
    }

    /// The leg after this one, or `None` if the ship should stay put.
    pub fn next(self, route_len: usize, policy: RouteEnd) -> Option<Self> {
        debug_assert!(route_len >= 2);
        let last = route_len - 1;
        let forwards = self.to > self.from;

        let to = match policy {
            RouteEnd::Loop => (self.to + 1) % route_len,
            RouteEnd::Stop if self.to == last => return None,
            RouteEnd::Stop => self.to + 1,
            RouteEnd::Reverse => match (forwards, self.to) {
                (true, to) if to == last => last - 1,
                (true, to) => to + 1,
                (false, 0) => 1,
                (false, to) => to - 1,
            },
        };
        Some(Self { from: self.to, to })
    }
}

/// A single spacecraft. Always in flight once it has a route.
#[derive(Debug, Clone)]
pub struct SpaceCraft {
    pub id: ShipID,
    pub name: String,
    pub route_id: RouteID,
    pub(crate) leg: LegCursor,
    pub(crate) flight: Flight,
    pub(crate) speed: f64,
    pub(crate) position: Point2<f64>,
}

impl SpaceCraft {
    pub(crate) fn new(id: ShipID, name: String, route: &Route, flight: Flight) -> Self {
        let position = flight.start_position;
        Self {
            id,
            name,
            route_id: route.id,
            leg: LegCursor::first(),
            flight,
            speed: 0.0,
            position,
        }
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn leg(&self) -> LegCursor {
        self.leg
    }

    /// Speed as of the last evaluation
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn grid_position(&self) -> Point2<i64> {
        Point2::new(
            self.position.x.round() as i64,
            self.position.y.round() as i64,
        )
    }
}
