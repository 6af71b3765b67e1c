//! Headless physics visualization driver
//!
//! Builds one of each scene, steps them for a fixed number of frames and
//! logs what a renderer would receive.

use glam::{DVec2, DVec3};
use physics_core::{
    length_contraction, time_dilation, velocity_addition, BarrierConfig, Body, Charge, Event,
    Result, TrailBuffer, WaveSource, ELECTRON_MASS,
};
use physics_frame::{
    field_line_vertices, height_field_vertices, interference_vertices, projectile,
    surface_indices, trail_vertices, wavefunction_vertices, BarrierScene, BodyScene, FieldScene,
    FrameParams, SpacetimeScene, WaveScene,
};
use rand::Rng;
use std::time::Instant;

const FRAME_COUNT: usize = 240;
const DT: f64 = 1.0 / 60.0;
const BODY_COUNT: usize = 12;
const SPAWN_HALF_EXTENT: f64 = 8.0;

/// Random balls inside the arena plus one fixed obstacle and a launched projectile
fn initialize_bodies() -> Vec<Body> {
    let mut rng = rand::rng();
    let mut bodies = Vec::with_capacity(BODY_COUNT + 2);

    for i in 0..BODY_COUNT {
        let position = DVec3::new(
            (rng.random::<f64>() * 2.0 - 1.0) * SPAWN_HALF_EXTENT,
            2.0 + rng.random::<f64>() * 10.0,
            0.0,
        );
        let velocity = DVec3::new(
            rng.random::<f64>() * 6.0 - 3.0,
            rng.random::<f64>() * 4.0,
            0.0,
        );
        let radius = 0.3 + rng.random::<f64>() * 0.4;
        let restitution = 0.6 + rng.random::<f64>() * 0.4;

        let body = if i % 4 == 0 {
            Body::cuboid(position, DVec3::splat(radius * 2.0), radius * 4.0)
        } else {
            Body::circle(position, radius, radius * 2.0)
        };
        bodies.push(body.with_velocity(velocity).with_restitution(restitution));
    }

    let platform = Body::cuboid(DVec3::new(0.0, 1.0, 0.0), DVec3::new(4.0, 0.5, 4.0), 1.0);
    bodies.push(platform.fixed());
    bodies.push(projectile(
        DVec3::new(-9.0, 1.0, 0.0),
        14.0,
        std::f64::consts::FRAC_PI_4,
        0.25,
        0.5,
    ));

    log::info!("✓ Initialized {} bodies", bodies.len());
    bodies
}

fn run_bodies(params: &FrameParams) -> Result<()> {
    let mut scene = BodyScene::new(initialize_bodies(), &params.collision)?;
    let initial_energy = scene.total_kinetic_energy();

    let mut contacts = 0;
    let mut impulses = 0;
    for _ in 0..FRAME_COUNT {
        let report = scene.step(DT, &params.collision)?;
        contacts += report.contacts.len();
        impulses += report.impulses_applied();
    }

    let trail_vertex_count: usize = scene
        .trails()
        .iter()
        .map(|trail| trail_vertices(trail, [1.0; 4]).len())
        .sum();

    log::info!("✓ Body scene: {:.2} s simulated", scene.time());
    log::info!("  Contacts: {}, impulses: {}", contacts, impulses);
    log::info!(
        "  Kinetic energy: {:.3} J -> {:.3} J",
        initial_energy,
        scene.total_kinetic_energy()
    );
    log::info!("  Trail vertices: {}", trail_vertex_count);
    Ok(())
}

fn run_field(params: &FrameParams) -> Result<()> {
    let charges = vec![
        Charge::new(DVec3::new(-2.0, 0.0, 0.0), 1.0e-9),
        Charge::new(DVec3::new(2.0, 0.0, 0.0), -1.0e-9),
    ];
    let mut scene = FieldScene::new(charges, params.field);

    // Drag the positive charge in a slow circle
    for frame in 0..FRAME_COUNT {
        if frame % 60 == 0 {
            let angle = frame as f64 * DT;
            scene.move_charge(0, DVec3::new(-2.0 * angle.cos(), 2.0 * angle.sin(), 0.0));
        }
        scene.lines()?;
    }

    let lines = scene.lines()?.to_vec();
    let vertices = field_line_vertices(&lines, scene.charges());
    log::info!(
        "✓ Field scene: {} lines, {} rebuilds over {} frames",
        lines.len(),
        scene.rebuilds(),
        FRAME_COUNT
    );
    log::info!("  Line vertices: {}", vertices.len());
    Ok(())
}

fn run_waves(params: &FrameParams) -> Result<()> {
    let sources = vec![
        WaveSource::new(DVec2::new(-1.5, 0.0), 1.0, 1.0, 1.0, 0.0),
        WaveSource::new(DVec2::new(1.5, 0.0), 1.0, 1.0, 1.0, 0.0),
    ];
    let mut scene = WaveScene::new(sources, &params.wave)?;

    for _ in 0..FRAME_COUNT {
        scene.pattern()?;
        scene.advance(DT, &params.wave)?;
    }

    let surface = interference_vertices(scene.pattern()?, 2.0);
    let height = height_field_vertices(scene.height_field());
    let indices = surface_indices(&params.wave.grid);
    log::info!(
        "✓ Wave scene: {} rebuilds, t={:.2} s",
        scene.rebuilds(),
        scene.time()
    );
    log::info!(
        "  Surface vertices: {} + {}, indices: {}",
        surface.len(),
        height.len(),
        indices.len()
    );
    Ok(())
}

fn run_barrier(params: &FrameParams) -> Result<()> {
    let mut scene = BarrierScene::new(BarrierConfig::new(1.0, 2.0, 0.5, ELECTRON_MASS));

    // Energy slider sweep
    for energy in [0.5, 1.0, 1.5, 1.9, 2.5] {
        scene.set_energy(energy);
        let plot = scene.plot(&params.barrier)?;
        log::info!(
            "  E={:.1} eV: T={:.4e}, R={:.4e}, tunneling={}",
            energy,
            plot.result.transmission_probability,
            plot.result.reflection_probability,
            plot.result.tunneling
        );
    }

    // Rejected input keeps the previous plot
    scene.set_energy(-1.0);
    if let Err(e) = scene.plot(&params.barrier) {
        log::info!("  Negative energy rejected: {e}");
    }

    let vertices = scene
        .last_plot()
        .map(|plot| wavefunction_vertices(&plot.samples))
        .unwrap_or_default();
    log::info!("✓ Barrier scene: {} wavefunction vertices", vertices.len());
    Ok(())
}

fn run_spacetime(params: &FrameParams) -> Result<()> {
    let events = vec![
        Event::new(0.0, 0.0),
        Event::new(1.0, 2.0),
        Event::new(-2.0, 1.0),
        Event::new(3.0, 3.0),
    ];
    let mut scene = SpacetimeScene::new(0.0, events)?;

    for beta in [0.0, 0.3, 0.6, 0.9] {
        scene.set_beta(beta)?;
        let axes = scene.axes()?;
        let pairs = scene.transformed(&params.spacetime)?;
        log::info!(
            "  beta={:.1}: gamma={:.4}, x' slope={:.2}, event (1, 2) -> ({:.3}, {:.3})",
            beta,
            scene.gamma()?,
            axes.x_axis_slope,
            pairs[1].moving.x,
            pairs[1].moving.t
        );
    }

    log::info!(
        "✓ Spacetime scene: 1 s at beta=0.8 dilates to {:.3} s, 1 m contracts to {:.3} m",
        time_dilation(1.0, 0.8)?,
        length_contraction(1.0, 0.8)?
    );
    log::info!("  0.5c + 0.5c = {:.3}c", velocity_addition(0.5, 0.5, 1.0)?);
    Ok(())
}

fn run() -> Result<()> {
    let params = FrameParams::default();
    let mut scene_times = TrailBuffer::new(5);

    let scenes: [(&str, fn(&FrameParams) -> Result<()>); 5] = [
        ("bodies", run_bodies),
        ("field", run_field),
        ("waves", run_waves),
        ("barrier", run_barrier),
        ("spacetime", run_spacetime),
    ];
    for (name, scene) in scenes {
        let start = Instant::now();
        scene(&params)?;
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        log::debug!("{} finished in {:.2} ms", name, elapsed);
        scene_times.push(elapsed);
    }

    let total: f64 = scene_times.iter().sum();
    log::info!("All scenes finished in {:.2} ms", total);
    Ok(())
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting physics visualization driver...");

    if let Err(e) = run() {
        log::error!("Scene rejected: {e}");
        std::process::exit(1);
    }
}
