//! Collision and projectile scene
//!
//! Owns the bodies and their motion trails between frames. Each step
//! integrates positions, bounces bodies off the arena, hands the moved
//! bodies to the [`CollisionEngine`] and records trails. A step that fails
//! validation leaves the scene exactly as it was.

use crate::params::CollisionParams;
use glam::DVec3;
use physics_core::{
    Aabb, Body, CollisionEngine, CollisionReport, Contact, DomainError, Result, Shape,
    TrailBuffer,
};

/// Position history of one body
pub type Trail = TrailBuffer<DVec3>;

/// Append each body's position to its trail, resizing the set of trails to
/// match `bodies` and every trail to `capacity`
pub fn record_trails(mut trails: Vec<Trail>, bodies: &[Body], capacity: usize) -> Vec<Trail> {
    trails.resize_with(bodies.len(), || TrailBuffer::new(capacity));
    for (trail, body) in trails.iter_mut().zip(bodies) {
        if trail.capacity() != capacity.max(1) {
            trail.set_capacity(capacity);
        }
        trail.push(body.position);
    }
    trails
}

/// Body launched from `position` at `speed` and `angle` (radians above +x)
pub fn projectile(position: DVec3, speed: f64, angle: f64, radius: f64, mass: f64) -> Body {
    Body::circle(position, radius, mass)
        .with_velocity(DVec3::new(angle.cos(), angle.sin(), 0.0) * speed)
}

fn half_extents(shape: &Shape) -> DVec3 {
    match *shape {
        Shape::Circle { radius } => DVec3::splat(radius),
        Shape::Box { size } => size * 0.5,
    }
}

/// Keep `body` inside `arena`, reflecting the velocity on each wall hit
fn bounce_off_walls(body: &mut Body, arena: &Aabb, restitution: f64) {
    let half = half_extents(&body.shape);
    for axis in 0..3 {
        let low = arena.min[axis] + half[axis];
        let high = arena.max[axis] - half[axis];
        if low > high {
            continue;
        }

        if body.position[axis] < low {
            body.position[axis] = low;
            if body.velocity[axis] < 0.0 {
                body.velocity[axis] = -body.velocity[axis] * restitution;
            }
        } else if body.position[axis] > high {
            body.position[axis] = high;
            if body.velocity[axis] > 0.0 {
                body.velocity[axis] = -body.velocity[axis] * restitution;
            }
        }
    }
}

/// Push penetrating pairs apart along their normal, weighted by inverse mass
fn separate(bodies: &mut [Body], report: &CollisionReport, fraction: f64) {
    for pair in &report.contacts {
        let Contact::Penetration { normal, depth } = pair.contact else {
            continue;
        };
        let inverse_a = bodies[pair.a].inverse_mass();
        let inverse_b = bodies[pair.b].inverse_mass();
        let inverse_sum = inverse_a + inverse_b;
        if inverse_sum == 0.0 {
            continue;
        }

        let correction = normal * (depth * fraction / inverse_sum);
        bodies[pair.a].position -= correction * inverse_a;
        bodies[pair.b].position += correction * inverse_b;
    }
}

fn validate_params(params: &CollisionParams) -> Result<()> {
    if !(0.0..=1.0).contains(&params.wall_restitution) {
        return Err(DomainError::InvalidRestitution {
            restitution: params.wall_restitution,
        });
    }
    if !(0.0..=1.0).contains(&params.positional_correction) {
        return Err(DomainError::InvalidGrid {
            reason: "positional correction must lie within [0, 1]",
        });
    }
    for value in params.gravity.to_array() {
        if !value.is_finite() {
            return Err(DomainError::NonFinite { name: "gravity" });
        }
    }
    Ok(())
}

/// Bodies, trails and the last collision report
#[derive(Debug, Clone)]
pub struct BodyScene {
    bodies: Vec<Body>,
    trails: Vec<Trail>,
    engine: CollisionEngine,
    report: CollisionReport,
    time: f64,
}

impl BodyScene {
    pub fn new(bodies: Vec<Body>, params: &CollisionParams) -> Result<Self> {
        for body in &bodies {
            body.validate()?;
        }
        let trails = record_trails(Vec::new(), &bodies, params.trail_length);
        log::info!("Body scene created with {} bodies", bodies.len());

        Ok(Self {
            bodies,
            trails,
            engine: CollisionEngine::new(),
            report: CollisionReport::default(),
            time: 0.0,
        })
    }

    /// Replace every body and restart the trails; rejected sets leave the
    /// scene untouched
    pub fn set_bodies(&mut self, bodies: Vec<Body>, params: &CollisionParams) -> Result<()> {
        *self = Self::new(bodies, params).inspect_err(|e| {
            log::warn!("Rejected body configuration: {e}");
        })?;
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn last_report(&self) -> &CollisionReport {
        &self.report
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Advance the scene by `dt` seconds
    pub fn step(&mut self, dt: f64, params: &CollisionParams) -> Result<&CollisionReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(DomainError::NonPositiveStep { step_size: dt });
        }
        validate_params(params)?;

        let mut next = self.bodies.clone();
        for body in next.iter_mut().filter(|b| !b.is_fixed()) {
            body.velocity += params.gravity * dt;
            body.position += body.velocity * dt;
            if let Some(arena) = &params.arena {
                bounce_off_walls(body, arena, params.wall_restitution);
            }
        }

        let report = self
            .engine
            .detect_and_resolve(&next)
            .inspect_err(|e| log::warn!("Rejected collision frame at t={:.3}: {e}", self.time))?;

        for (body, velocity) in next.iter_mut().zip(&report.velocities) {
            body.velocity = *velocity;
        }
        separate(&mut next, &report, params.positional_correction);

        if report.impulses_applied() > 0 {
            log::debug!(
                "t={:.3}: {} impulses applied",
                self.time,
                report.impulses_applied()
            );
        }

        self.trails = record_trails(std::mem::take(&mut self.trails), &next, params.trail_length);
        self.bodies = next;
        self.report = report;
        self.time += dt;

        Ok(&self.report)
    }
}
