use nalgebra::Point2;

use tracing::trace;

use crate::model::{BodyID, BodyState, BodyTree};

/// Moves every orbiting body to where it is at `time`.
///
/// Root bodies (stars and gates) are left where they are. Each body is
/// placed relative to its parent's position from this same pass, so the
/// tree is walked parents-first.
pub fn evaluate_all(bodies: &mut BodyTree, time: f64, precision: f64) {
    for i in 0..bodies.roots().len() {
        let root_id = bodies.roots()[i];
        let root_position = bodies.get_body(root_id).position();
        evaluate_children(bodies, root_id, root_position, time, precision);
    }
}

fn evaluate_children(
    bodies: &mut BodyTree,
    parent_id: BodyID,
    parent_position: Point2<f64>,
    time: f64,
    precision: f64,
) {
    // Depth is tiny (star -> planet -> satellite), so plain recursion is fine
    for i in 0..bodies.get_body(parent_id).children().len() {
        let child_id = bodies.get_body(parent_id).children()[i];
        let body = bodies.get_body_mut(child_id);

        let orbit = match &body.state {
            BodyState::Orbiting { orbit, .. } => *orbit,
            BodyState::Fixed => {
                debug_assert!(false, "{} is fixed but has a parent", body.info.name);
                continue;
            }
        };
        body.position = parent_position + orbit.offset(time, precision);
        body.progress = orbit.progress(time, precision);
        trace!(
            "{} : ({}, {})",
            body.info.name,
            body.position.x,
            body.position.y
        );

        let position = body.position;
        evaluate_children(bodies, child_id, position, time, precision);
    }
}
