use tracing::{info, warn};

use crate::config::SimConfig;
use crate::consts::MAX_LEGS_PER_EVALUATION;
use crate::model::{BodyID, BodyTree, Flight, LegCursor, RouteTable, SpaceCraft};

/// Advances every ship along its route to `time`, then updates its
/// position and speed.
///
/// Bodies must already have been evaluated for this frame.
pub fn evaluate_all(
    ships: &mut [SpaceCraft],
    bodies: &BodyTree,
    routes: &RouteTable,
    config: &SimConfig,
    time: f64,
) {
    for ship in ships.iter_mut() {
        evaluate_ship(ship, bodies, routes, config, time);
    }
}

fn evaluate_ship(
    ship: &mut SpaceCraft,
    bodies: &BodyTree,
    routes: &RouteTable,
    config: &SimConfig,
    time: f64,
) {
    let route = routes.get_route(ship.route_id);
    let mut legs_flown = 0;
    let mut instant_legs = 0;
    loop {
        let progress = ship.flight.progress_at(time);
        ship.flight.set_progress(progress);
        if !ship.flight.is_complete() {
            break;
        }

        // A whole lap of zero-length legs means there's nowhere to go
        if ship.flight.duration() <= 0.0 {
            instant_legs += 1;
            if instant_legs >= route.len() {
                break;
            }
        } else {
            instant_legs = 0;
        }

        let next = match ship.leg.next(route.len(), config.route_end) {
            Some(next) => next,
            // End of the line; park at the destination
            None => break,
        };

        // Legs chain back to back, so a long gap between frames replays
        // every leg that would have been flown in between
        let mut departure = ship.flight.eta;
        legs_flown += 1;
        if legs_flown > MAX_LEGS_PER_EVALUATION {
            warn!(
                "{} flew more than {} legs in one frame; skipping ahead",
                ship.name, MAX_LEGS_PER_EVALUATION
            );
            departure = time;
        }

        ship.flight = plan_leg(
            bodies,
            route.waypoints(),
            next,
            departure,
            config,
            &route.number,
        );
        ship.leg = next;
        info!(
            "{} departing {} for {}",
            ship.name,
            bodies.get_body(ship.flight.start_body).info.name,
            bodies.get_body(ship.flight.end_body).info.name
        );

        if legs_flown > MAX_LEGS_PER_EVALUATION {
            ship.flight.set_progress(ship.flight.progress_at(time));
            break;
        }
    }

    ship.position = ship.flight.position();
    ship.speed = ship.flight.speed(config.ship_gs);
}

fn plan_leg(
    bodies: &BodyTree,
    waypoints: &[BodyID],
    leg: LegCursor,
    departure: f64,
    config: &SimConfig,
    number: &str,
) -> Flight {
    Flight::plan(
        bodies,
        waypoints[leg.from],
        waypoints[leg.to],
        departure,
        number,
        config.ship_acceleration(),
        config.time_precision,
    )
}
