use crate::clock::TimeSource;
use crate::model::World;

/// A [World] driven by a clock.
///
/// Call [Simulation::step] once per frame, after input handling and before
/// drawing.
pub struct Simulation<C> {
    clock: C,
    world: World,
    time: f64,
    frame: u64,
}

impl<C: TimeSource> Simulation<C> {
    /// Takes ownership of a freshly loaded world and evaluates it once, so
    /// the first frame has valid positions.
    pub fn new(clock: C, mut world: World) -> Self {
        let time = clock.now();
        world.evaluate(time);
        Self {
            clock,
            world,
            time,
            frame: 0,
        }
    }

    pub fn step(&mut self) -> f64 {
        self.time = self.clock.now();
        self.world.evaluate(self.time);
        self.frame += 1;
        self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time of the last evaluation
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
