//! Collision detection and impulse response for circle and box bodies
//!
//! Units: SI (m, kg, m/s). Pipeline per call: broad-phase over all
//! unordered pairs, narrow-phase shape dispatch, separating-velocity check,
//! impulse resolution. Only velocities are produced; positions are left to
//! the caller's integrator and input bodies are never mutated.
//!
//! Box-box contacts are detected as a boolean [`Contact::Overlap`] with no
//! normal or depth, so they never receive an impulse.

use crate::constants::CONTACT_EPSILON;
use crate::error::{ensure_finite, DomainError, Result};
use glam::DVec3;

/// Collision geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Circle (sphere in 3-D) of the given radius
    Circle { radius: f64 },
    /// Axis-aligned box with full edge lengths `size`
    Box { size: DVec3 },
}

impl Shape {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Shape::Circle { radius } => {
                ensure_finite("radius", radius)?;
                if radius <= 0.0 {
                    return Err(DomainError::NonPositiveRadius { radius });
                }
            }
            Shape::Box { size } => {
                for extent in size.to_array() {
                    ensure_finite("box size", extent)?;
                }
                if !size.cmpgt(DVec3::ZERO).all() {
                    return Err(DomainError::NonPositiveSize {
                        size: size.to_array(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Rigid body without rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec3,
    pub velocity: DVec3,
    /// kg; `f64::INFINITY` marks an immovable obstacle
    pub mass: f64,
    pub shape: Shape,
    pub restitution: f64,
    pub collision_enabled: bool,
}

impl Body {
    pub fn circle(position: DVec3, radius: f64, mass: f64) -> Self {
        Self::new(position, Shape::Circle { radius }, mass)
    }

    pub fn cuboid(position: DVec3, size: DVec3, mass: f64) -> Self {
        Self::new(position, Shape::Box { size }, mass)
    }

    fn new(position: DVec3, shape: Shape, mass: f64) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            mass,
            shape,
            restitution: 1.0,
            collision_enabled: true,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_collision(mut self, enabled: bool) -> Self {
        self.collision_enabled = enabled;
        self
    }

    /// Make the body immovable (infinite mass)
    pub fn fixed(mut self) -> Self {
        self.mass = f64::INFINITY;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.mass.is_infinite()
    }

    /// 1/m, zero for fixed bodies
    pub fn inverse_mass(&self) -> f64 {
        if self.is_fixed() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Linear momentum; zero for fixed bodies
    pub fn momentum(&self) -> DVec3 {
        if self.is_fixed() {
            DVec3::ZERO
        } else {
            self.velocity * self.mass
        }
    }

    /// Kinetic energy; zero for fixed bodies
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_fixed() {
            0.0
        } else {
            0.5 * self.mass * self.velocity.length_squared()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for value in self.position.to_array() {
            ensure_finite("position", value)?;
        }
        for value in self.velocity.to_array() {
            ensure_finite("velocity", value)?;
        }
        // Infinity is allowed (fixed body), NaN and non-positive are not
        if !(self.mass > 0.0) {
            return Err(DomainError::NonPositiveMass { mass: self.mass });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(DomainError::InvalidRestitution {
                restitution: self.restitution,
            });
        }
        self.shape.validate()
    }
}

/// Narrow-phase result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Contact with unit normal from the first body toward the second and
    /// penetration depth
    Penetration { normal: DVec3, depth: f64 },
    /// Boxes overlap; no contact geometry is computed
    Overlap,
}

impl Contact {
    pub fn normal(&self) -> Option<DVec3> {
        match *self {
            Contact::Penetration { normal, .. } => Some(normal),
            Contact::Overlap => None,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Contact::Penetration { normal, depth } => Contact::Penetration {
                normal: -normal,
                depth,
            },
            Contact::Overlap => Contact::Overlap,
        }
    }
}

/// Candidate pairs: all unordered pairs with collisions enabled on both sides
pub fn broad_phase(bodies: &[Body]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    broad_phase_into(bodies, &mut pairs);
    pairs
}

fn broad_phase_into(bodies: &[Body], pairs: &mut Vec<(usize, usize)>) {
    pairs.clear();
    for i in 0..bodies.len() {
        if !bodies[i].collision_enabled {
            continue;
        }
        for j in (i + 1)..bodies.len() {
            if bodies[j].collision_enabled {
                pairs.push((i, j));
            }
        }
    }
}

fn circle_circle(a: DVec3, radius_a: f64, b: DVec3, radius_b: f64) -> Option<Contact> {
    let delta = b - a;
    let distance = delta.length();
    let reach = radius_a + radius_b;

    if distance >= reach {
        return None;
    }
    if distance < CONTACT_EPSILON {
        log::trace!("coincident circle centers at {:?}; no contact normal", a);
        return None;
    }

    Some(Contact::Penetration {
        normal: delta / distance,
        depth: reach - distance,
    })
}

fn box_box(a: DVec3, size_a: DVec3, b: DVec3, size_b: DVec3) -> Option<Contact> {
    let gap = (b - a).abs();
    let reach = (size_a + size_b) * 0.5;
    gap.cmplt(reach).all().then_some(Contact::Overlap)
}

/// Circle against box, normal pointing from the circle toward the box
fn circle_box(center: DVec3, radius: f64, box_center: DVec3, size: DVec3) -> Option<Contact> {
    let half = size * 0.5;
    let min = box_center - half;
    let max = box_center + half;

    let closest = center.clamp(min, max);
    let delta = closest - center;
    let distance = delta.length();

    if distance >= radius {
        return None;
    }

    if distance > CONTACT_EPSILON {
        return Some(Contact::Penetration {
            normal: delta / distance,
            depth: radius - distance,
        });
    }

    // Center inside the box: leave through the nearest face
    let to_min = center - min;
    let to_max = max - center;
    let mut best = (f64::INFINITY, DVec3::ZERO);
    for axis in 0..3 {
        let unit = DVec3::AXES[axis];
        if to_min[axis] < best.0 {
            best = (to_min[axis], unit);
        }
        if to_max[axis] < best.0 {
            best = (to_max[axis], -unit);
        }
    }

    Some(Contact::Penetration {
        normal: best.1,
        depth: radius + best.0,
    })
}

/// Shape dispatch for a pair; the normal points from `a` toward `b`
pub fn narrow_phase(a: &Body, b: &Body) -> Option<Contact> {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position, ra, b.position, rb)
        }
        (Shape::Box { size: sa }, Shape::Box { size: sb }) => {
            box_box(a.position, sa, b.position, sb)
        }
        (Shape::Circle { radius }, Shape::Box { size }) => {
            circle_box(a.position, radius, b.position, size)
        }
        (Shape::Box { size }, Shape::Circle { radius }) => {
            circle_box(b.position, radius, a.position, size).map(Contact::flipped)
        }
    }
}

/// Impulse scalar and post-collision velocities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub impulse: f64,
    pub velocity_a: DVec3,
    pub velocity_b: DVec3,
}

fn impulse_between(
    velocity_a: DVec3,
    velocity_b: DVec3,
    a: &Body,
    b: &Body,
    normal: DVec3,
) -> Result<Option<Resolution>> {
    let inverse_a = a.inverse_mass();
    let inverse_b = b.inverse_mass();
    let inverse_sum = inverse_a + inverse_b;
    if inverse_sum == 0.0 {
        return Err(DomainError::ZeroInverseMass);
    }

    let approach = (velocity_b - velocity_a).dot(normal);
    if approach >= 0.0 {
        if approach == 0.0 {
            log::trace!("zero relative normal velocity; no impulse");
        }
        return Ok(None);
    }

    let restitution = a.restitution.min(b.restitution);
    let impulse = -(1.0 + restitution) * approach / inverse_sum;

    Ok(Some(Resolution {
        impulse,
        velocity_a: velocity_a - normal * (impulse * inverse_a),
        velocity_b: velocity_b + normal * (impulse * inverse_b),
    }))
}

/// Resolve one contact along `normal` (unit, from `a` toward `b`).
///
/// Returns `None` when the bodies are separating or moving in parallel.
pub fn resolve(a: &Body, b: &Body, normal: DVec3) -> Result<Option<Resolution>> {
    impulse_between(a.velocity, b.velocity, a, b, normal)
}

/// A detected contact and the impulse applied for it, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    pub a: usize,
    pub b: usize,
    pub contact: Contact,
    pub impulse: Option<f64>,
}

/// Output of one detection and resolution pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionReport {
    /// New velocity for every input body, in input order
    pub velocities: Vec<DVec3>,
    pub contacts: Vec<PairContact>,
}

impl CollisionReport {
    pub fn impulses_applied(&self) -> usize {
        self.contacts.iter().filter(|c| c.impulse.is_some()).count()
    }
}

/// Pairwise collision pipeline with a reusable candidate-pair buffer
#[derive(Debug, Clone, Default)]
pub struct CollisionEngine {
    pairs: Vec<(usize, usize)>,
}

impl CollisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect every contact and resolve it against a working copy of the
    /// velocities, so later pairs see earlier impulses.
    pub fn detect_and_resolve(&mut self, bodies: &[Body]) -> Result<CollisionReport> {
        for body in bodies {
            body.validate()?;
        }

        broad_phase_into(bodies, &mut self.pairs);

        let mut velocities: Vec<DVec3> = bodies.iter().map(|b| b.velocity).collect();
        let mut contacts = Vec::new();

        for &(i, j) in &self.pairs {
            let (a, b) = (&bodies[i], &bodies[j]);
            let Some(contact) = narrow_phase(a, b) else {
                continue;
            };

            let impulse = match contact {
                Contact::Penetration { normal, .. } => {
                    impulse_between(velocities[i], velocities[j], a, b, normal)?.map(|r| {
                        velocities[i] = r.velocity_a;
                        velocities[j] = r.velocity_b;
                        r.impulse
                    })
                }
                Contact::Overlap => None,
            };

            contacts.push(PairContact {
                a: i,
                b: j,
                contact,
                impulse,
            });
        }

        log::debug!(
            "collision pass: {} bodies, {} candidate pairs, {} contacts",
            bodies.len(),
            self.pairs.len(),
            contacts.len()
        );

        Ok(CollisionReport {
            velocities,
            contacts,
        })
    }
}
