use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use starbound_radar::clock::{ManualClock, SystemClock, TimeSource};
use starbound_radar::config::RouteEnd;
use starbound_radar::file::Scenario;
use starbound_radar::model::World;
use starbound_radar::simulation::Simulation;

/// Tracks stars, planets and the ships flying between them, in real time.
#[derive(Debug, Parser)]
struct Args {
    /// Scenario file to load
    #[arg(default_value = "scenario.toml")]
    scenario: String,

    /// Simulated seconds per real second
    #[arg(long)]
    speed: Option<f64>,

    /// Orbit phase granularity, in seconds
    #[arg(long)]
    precision: Option<f64>,

    /// Ship acceleration, in G
    #[arg(long)]
    ship_gs: Option<f64>,

    /// What ships do at the end of their route
    #[arg(long, value_enum)]
    route_end: Option<RouteEnd>,

    /// Number of frames to run
    #[arg(long, default_value_t = 1)]
    frames: u64,

    /// Frame rate
    #[arg(long, default_value_t = 60.0)]
    hz: f64,

    /// Evaluate once at this simulation time instead of following the clock
    #[arg(long)]
    at: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut scenario = Scenario::read(&args.scenario)
        .with_context(|| format!("failed to load {}", args.scenario))?;
    let config = &mut scenario.simulation;
    if let Some(speed) = args.speed {
        config.speed_multiplier = speed;
    }
    if let Some(precision) = args.precision {
        config.time_precision = precision;
    }
    if let Some(gs) = args.ship_gs {
        config.ship_gs = gs;
    }
    if let Some(route_end) = args.route_end {
        config.route_end = route_end;
    }
    config.validate().context("invalid simulation settings")?;
    let frame_time = frame_period(args.hz)?;

    if let Some(time) = args.at {
        let clock = ManualClock::new(time);
        let world = scenario.build(clock.now())?;
        let sim = Simulation::new(clock, world);
        print_snapshot(sim.frame(), sim.time(), sim.world());
        return Ok(());
    }

    let clock = SystemClock::new(scenario.simulation.speed_multiplier)?;
    info!(
        "Start time: {} ({}x real time)",
        clock.now(),
        clock.multiplier()
    );
    let world = scenario.build(clock.now())?;
    let mut sim = Simulation::new(clock, world);

    for _ in 0..args.frames {
        let frame_start = Instant::now();
        let time = sim.step();
        print_snapshot(sim.frame(), time, sim.world());

        if let Some(remaining) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}

fn frame_period(hz: f64) -> anyhow::Result<Duration> {
    if !hz.is_finite() || hz <= 0.0 {
        bail!("frame rate {} must be finite and positive", hz);
    }
    Duration::try_from_secs_f64(1.0 / hz)
        .with_context(|| format!("frame rate {} is too low", hz))
}

fn print_snapshot(frame: u64, time: f64, world: &World) {
    println!("Frame #{} at t = {:.3}", frame, time);
    for body in world.bodies().bodies() {
        let indent = "  ".repeat(world.bodies().depth(body.id));
        let p = body.grid_position();
        println!(
            "{}{} [{:?}] : ({}, {}) r={}",
            indent, body.info.name, body.kind, p.x, p.y, body.info.radius
        );
    }
    for ship in world.ships() {
        let flight = ship.flight();
        let p = ship.grid_position();
        println!(
            "{} [{}] : ({}, {}) speed={:.1} progress={:.1}%",
            ship.name,
            flight.number,
            p.x,
            p.y,
            ship.speed(),
            flight.progress() * 100.0
        );
    }
    println!();
}
