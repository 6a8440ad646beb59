use nalgebra::Point2;

use tracing::debug;

use super::body::{Body, BodyID, BodyInfo, BodyKind, BodyState, CircularOrbit};
use crate::error::{Error, Result};

/// Arena of celestial bodies.
///
/// Bodies refer to their parent by [BodyID], and a parent owns the list of
/// its children. Since a parent has to exist before a child can be added,
/// the hierarchy is always a forest.
#[derive(Debug, Clone, Default)]
pub struct BodyTree {
    bodies: Vec<Body>,
    roots: Vec<BodyID>,
}

impl BodyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub(crate) fn get_body_mut(&mut self, id: BodyID) -> &mut Body {
        &mut self.bodies[id.0]
    }

    pub fn try_get_body(&self, id: BodyID) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Bodies without a parent, in insertion order
    pub fn roots(&self) -> &[BodyID] {
        &self.roots
    }

    pub fn children(&self, id: BodyID) -> impl Iterator<Item = &Body> {
        self.get_body(id)
            .children
            .iter()
            .map(move |child| self.get_body(*child))
    }

    pub fn find_body(&self, name: &str) -> Option<BodyID> {
        self.bodies
            .iter()
            .find(|body| body.info.name == name)
            .map(|body| body.id)
    }

    /// First planet or satellite with this name
    pub fn find_waypoint(&self, name: &str) -> Option<BodyID> {
        self.bodies
            .iter()
            .find(|body| body.info.name == name && body.kind.is_waypoint())
            .map(|body| body.id)
    }

    /// Adds a star or gate, sitting still at `position`.
    pub fn add_fixed_body(
        &mut self,
        info: BodyInfo,
        kind: BodyKind,
        position: Point2<f64>,
    ) -> Result<BodyID> {
        if !kind.is_stationary() {
            return Err(Error::MissingParent {
                name: info.name,
                kind,
            });
        }
        self.check_name(&info.name)?;

        let id = self.insert_new_body(info, kind, BodyState::Fixed, position);
        self.roots.push(id);
        Ok(id)
    }

    /// Adds a planet or satellite on a circular orbit around `parent_id`.
    pub fn add_orbiting_body(
        &mut self,
        info: BodyInfo,
        kind: BodyKind,
        parent_id: BodyID,
        orbital_radius: f64,
        orbital_period: f64,
    ) -> Result<BodyID> {
        if kind.is_stationary() {
            return Err(Error::UnexpectedParent {
                name: info.name,
                kind,
            });
        }
        let parent = self
            .try_get_body(parent_id)
            .ok_or(Error::UnknownBody(parent_id))?;
        if !kind.can_orbit(parent.kind) {
            return Err(Error::InvalidParent {
                name: info.name,
                child: kind,
                parent: parent.kind,
            });
        }
        // Satellites may nest one level, so the tree is never deeper than
        // star -> planet -> satellite -> satellite
        let grandparent_kind = parent.parent_id().map(|id| self.get_body(id).kind);
        if kind == BodyKind::Satellite && grandparent_kind == Some(BodyKind::Satellite) {
            return Err(Error::OrbitTooDeep {
                name: info.name,
                parent: parent.info.name.clone(),
            });
        }
        if !orbital_period.is_finite() || orbital_period <= 0.0 {
            return Err(Error::InvalidPeriod {
                name: info.name,
                period: orbital_period,
            });
        }
        if !orbital_radius.is_finite() || orbital_radius < 0.0 {
            return Err(Error::InvalidOrbitalRadius {
                name: info.name,
                radius: orbital_radius,
            });
        }
        self.check_name(&info.name)?;

        let orbit = CircularOrbit {
            radius: orbital_radius,
            period: orbital_period,
        };
        // Placed at the parent until the first evaluation
        let position = parent.position;
        let state = BodyState::Orbiting { parent_id, orbit };
        let id = self.insert_new_body(info, kind, state, position);
        self.get_body_mut(parent_id).children.push(id);
        Ok(id)
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.find_body(name).is_some() {
            return Err(Error::DuplicateBody(name.to_owned()));
        }
        Ok(())
    }

    fn insert_new_body(
        &mut self,
        info: BodyInfo,
        kind: BodyKind,
        state: BodyState,
        position: Point2<f64>,
    ) -> BodyID {
        let id = BodyID(self.bodies.len());
        debug!("Added {:?} {} as {:?}", kind, info.name, id);
        self.bodies.push(Body {
            id,
            info,
            kind,
            state,
            position,
            progress: 0.0,
            children: Vec::new(),
        });
        id
    }

    /// Absolute position of a body at an arbitrary time, without touching
    /// the stored positions.
    pub fn position_at(&self, id: BodyID, time: f64, precision: f64) -> Point2<f64> {
        let body = self.get_body(id);
        match &body.state {
            BodyState::Fixed => body.position,
            BodyState::Orbiting { parent_id, orbit } => {
                self.position_at(*parent_id, time, precision) + orbit.offset(time, precision)
            }
        }
    }

    /// Number of ancestors above this body
    pub fn depth(&self, id: BodyID) -> usize {
        let mut depth = 0;
        let mut current = self.get_body(id).parent_id();
        while let Some(parent_id) = current {
            depth += 1;
            current = self.get_body(parent_id).parent_id();
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sol() -> (BodyTree, BodyID, BodyID, BodyID) {
        let mut tree = BodyTree::new();
        let sun = tree
            .add_fixed_body(BodyInfo::new("Sun", 10), BodyKind::Star, Point2::origin())
            .unwrap();
        let earth = tree
            .add_orbiting_body(
                BodyInfo::new("Earth", 2),
                BodyKind::Planet,
                sun,
                100.0,
                86400.0,
            )
            .unwrap();
        let moon = tree
            .add_orbiting_body(
                BodyInfo::new("Moon", 1),
                BodyKind::Satellite,
                earth,
                10.0,
                3600.0,
            )
            .unwrap();
        (tree, sun, earth, moon)
    }

    #[test]
    fn test_structure() {
        let (tree, sun, earth, moon) = sol();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), &[sun]);
        assert_eq!(tree.get_body(sun).children(), &[earth]);
        assert_eq!(tree.get_body(earth).children(), &[moon]);
        assert_eq!(tree.get_body(moon).parent_id(), Some(earth));
        assert!(!tree.get_body(sun).has_parent());
        assert_eq!(tree.depth(moon), 2);
        assert_eq!(tree.children(sun).count(), 1);
    }

    #[test]
    fn test_lookups() {
        let (tree, sun, earth, _) = sol();
        assert_eq!(tree.find_body("Sun"), Some(sun));
        assert_eq!(tree.find_waypoint("Sun"), None);
        assert_eq!(tree.find_waypoint("Earth"), Some(earth));
        assert_eq!(tree.find_body("Pluto"), None);
    }

    #[test]
    fn test_rejects_bad_bodies() {
        let (mut tree, sun, earth, _) = sol();

        let err = tree
            .add_orbiting_body(BodyInfo::new("Mars", 1), BodyKind::Planet, sun, 50.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPeriod { .. }));

        let err = tree
            .add_orbiting_body(BodyInfo::new("Mars", 1), BodyKind::Planet, sun, 50.0, -3.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPeriod { .. }));

        let err = tree
            .add_orbiting_body(
                BodyInfo::new("Mars", 1),
                BodyKind::Planet,
                sun,
                f64::NAN,
                10.0,
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOrbitalRadius { .. }));

        let err = tree
            .add_orbiting_body(BodyInfo::new("Mars", 1), BodyKind::Planet, earth, 5.0, 10.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParent { .. }));

        let err = tree
            .add_orbiting_body(
                BodyInfo::new("Mars", 1),
                BodyKind::Planet,
                BodyID(99),
                5.0,
                10.0,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnknownBody(BodyID(99))));

        let err = tree
            .add_orbiting_body(BodyInfo::new("Earth", 1), BodyKind::Planet, sun, 5.0, 10.0)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateBody(_)));

        let err = tree
            .add_fixed_body(BodyInfo::new("Rock", 1), BodyKind::Planet, Point2::origin())
            .unwrap_err();
        assert!(matches!(err, Error::MissingParent { .. }));

        let err = tree
            .add_orbiting_body(BodyInfo::new("Gate", 1), BodyKind::Gate, sun, 5.0, 10.0)
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedParent { .. }));

        // Nothing was added by the failed calls
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get_body(sun).children().len(), 1);
    }

    #[test]
    fn test_satellites_nest_one_level() {
        let (mut tree, _, _, moon) = sol();

        let station = tree
            .add_orbiting_body(
                BodyInfo::new("Station", 1),
                BodyKind::Satellite,
                moon,
                2.0,
                90.0,
            )
            .unwrap();
        assert_eq!(tree.depth(station), 3);

        let err = tree
            .add_orbiting_body(
                BodyInfo::new("Probe", 1),
                BodyKind::Satellite,
                station,
                1.0,
                10.0,
            )
            .unwrap_err();
        assert!(matches!(err, Error::OrbitTooDeep { ref parent, .. } if parent == "Station"));
        assert_eq!(tree.len(), 4);
        assert!(tree.get_body(station).children().is_empty());
    }

    #[test]
    fn test_position_at() {
        let (tree, sun, earth, moon) = sol();
        let p = tree.position_at(earth, 0.0, 0.125);
        approx::assert_relative_eq!(p, Point2::new(100.0, 0.0));
        let p = tree.position_at(moon, 0.0, 0.125);
        approx::assert_relative_eq!(p, Point2::new(110.0, 0.0));
        let p = tree.position_at(sun, 1234.0, 0.125);
        approx::assert_relative_eq!(p, Point2::origin());
    }
}
