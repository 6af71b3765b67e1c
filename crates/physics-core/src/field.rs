//! Electric field superposition and streamline tracing
//!
//! Units: positions in metres, charges in coulombs, field in N/C with
//! k = 8.99e9. The absorption radius and bounding box share the position
//! unit.

use crate::constants::*;
use crate::error::{ensure_finite, DomainError, Result};
use glam::DVec3;

/// Point charge; source of an electrostatic field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub position: DVec3,
    pub q: f64,
}

impl Charge {
    pub fn new(position: DVec3, q: f64) -> Self {
        Self { position, q }
    }

    /// Finite position and charge, with a field that stays finite down to
    /// the absorption radius
    pub fn validate(&self) -> Result<()> {
        for value in self.position.to_array() {
            ensure_finite("charge position", value)?;
        }
        ensure_finite("charge", self.q)?;
        ensure_finite(
            "field at absorption radius",
            K_COULOMB * self.q / (ABSORPTION_RADIUS * ABSORPTION_RADIUS),
        )?;
        Ok(())
    }
}

/// Resultant field evaluated at a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub point: DVec3,
    pub vector: DVec3,
    pub magnitude: f64,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Cube centred on the origin
    pub fn cube(half_extent: f64) -> Self {
        Self {
            min: DVec3::splat(-half_extent),
            max: DVec3::splat(half_extent),
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Coulomb field of a single charge at `point`
/// E = k * q / r² (pointing away from positive charges)
pub fn coulomb_field(charge: &Charge, point: DVec3) -> DVec3 {
    if charge.q == 0.0 {
        return DVec3::ZERO;
    }

    let r_vec = point - charge.position;
    let r = r_vec.length();

    if r < MIN_SAMPLE_DISTANCE {
        log::trace!(
            "skipping charge at {:?}: sample {:?} is inside the distance floor",
            charge.position,
            point
        );
        return DVec3::ZERO;
    }

    let field_magnitude = K_COULOMB * charge.q / (r * r);
    r_vec / r * field_magnitude
}

/// Superposed field of all charges at `point`
pub fn field_at(point: DVec3, charges: &[Charge]) -> FieldSample {
    let vector = charges
        .iter()
        .fold(DVec3::ZERO, |acc, charge| acc + coulomb_field(charge, point));

    FieldSample {
        point,
        vector,
        magnitude: vector.length(),
    }
}

/// Why a field line stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Came within [`ABSORPTION_RADIUS`] of a charge
    Absorbed,
    /// Field fell below [`MIN_FIELD_MAGNITUDE`]
    WeakField,
    /// Left the bounding box
    OutOfBounds,
    /// Step budget exhausted
    MaxSteps,
}

/// Integration direction relative to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceDirection {
    /// Along E (outward from positive charges)
    Forward,
    /// Against E (outward from negative charges)
    Backward,
}

impl TraceDirection {
    pub fn sign(self) -> f64 {
        match self {
            TraceDirection::Forward => 1.0,
            TraceDirection::Backward => -1.0,
        }
    }

    /// Direction that leads away from a charge of the given sign
    pub fn away_from(q: f64) -> Self {
        if q < 0.0 {
            TraceDirection::Backward
        } else {
            TraceDirection::Forward
        }
    }
}

/// Lazy, finite streamline integrated with explicit Euler steps.
///
/// Yields the start point first, then one point per step. Once exhausted,
/// [`FieldLine::termination`] reports the reason.
#[derive(Debug, Clone)]
pub struct FieldLine<'a> {
    charges: &'a [Charge],
    current: DVec3,
    step_size: f64,
    max_steps: usize,
    bounds: Aabb,
    direction: TraceDirection,
    steps: usize,
    started: bool,
    termination: Option<Termination>,
}

impl<'a> FieldLine<'a> {
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_direction(mut self, direction: TraceDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Number of Euler steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Field sample at the current point, or the reason to stop here
    fn advance_sample(&self) -> std::result::Result<FieldSample, Termination> {
        let absorbed = self
            .charges
            .iter()
            .any(|c| c.q != 0.0 && c.position.distance(self.current) < ABSORPTION_RADIUS);
        if absorbed {
            return Err(Termination::Absorbed);
        }

        let sample = field_at(self.current, self.charges);
        // Negated so a NaN magnitude also stops the line
        if !(sample.magnitude >= MIN_FIELD_MAGNITUDE) {
            return Err(Termination::WeakField);
        }

        if !self.bounds.contains(self.current) {
            return Err(Termination::OutOfBounds);
        }

        if self.steps >= self.max_steps {
            return Err(Termination::MaxSteps);
        }

        Ok(sample)
    }
}

impl Iterator for FieldLine<'_> {
    type Item = DVec3;

    fn next(&mut self) -> Option<DVec3> {
        if self.termination.is_some() {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.current);
        }

        let sample = match self.advance_sample() {
            Ok(sample) => sample,
            Err(reason) => {
                self.termination = Some(reason);
                return None;
            }
        };

        let heading = sample.vector / sample.magnitude * self.direction.sign();
        self.current += heading * self.step_size;
        self.steps += 1;

        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            return (0, Some(0));
        }
        let remaining = (self.max_steps - self.steps).saturating_add(usize::from(!self.started));
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for FieldLine<'_> {}

/// Start a streamline at `start` through the field of `charges`.
///
/// Uses a default bounding box of [`FieldTraceConfig::default`]; refine it
/// with [`FieldLine::with_bounds`].
pub fn trace_field_line(
    start: DVec3,
    charges: &[Charge],
    max_steps: usize,
    step_size: f64,
) -> Result<FieldLine<'_>> {
    ensure_finite("step_size", step_size)?;
    if step_size <= 0.0 {
        return Err(DomainError::NonPositiveStep { step_size });
    }
    for value in start.to_array() {
        ensure_finite("start", value)?;
    }
    for charge in charges {
        charge.validate()?;
    }

    Ok(FieldLine {
        charges,
        current: start,
        step_size,
        max_steps,
        bounds: FieldTraceConfig::default().bounds,
        direction: TraceDirection::Forward,
        steps: 0,
        started: false,
        termination: None,
    })
}

/// Parameters for tracing a bundle of field lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTraceConfig {
    pub max_steps: usize,
    pub step_size: f64,
    pub bounds: Aabb,
    pub seeds_per_charge: usize,
    /// Distance from each charge at which seeds are placed; must exceed
    /// [`ABSORPTION_RADIUS`] or lines are absorbed immediately
    pub seed_radius: f64,
}

impl Default for FieldTraceConfig {
    fn default() -> Self {
        Self {
            max_steps: 500,
            step_size: 0.1,
            bounds: Aabb::cube(10.0),
            seeds_per_charge: 8,
            seed_radius: 0.5,
        }
    }
}

/// One fully traced line of a bundle
#[derive(Debug, Clone, PartialEq)]
pub struct TracedLine {
    /// Index of the charge the line was seeded from
    pub source: usize,
    pub points: Vec<DVec3>,
    pub termination: Termination,
}

/// Seed points evenly spaced by angle on a circle in the XY plane
pub fn seed_points(charge: &Charge, count: usize, radius: f64) -> Vec<DVec3> {
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            charge.position + DVec3::new(angle.cos(), angle.sin(), 0.0) * radius
        })
        .collect()
}

/// Trace every seed of every charge.
///
/// Zero charges contribute no seeds. Seeds around negative charges trace
/// against the field so every line leaves its source.
pub fn trace_bundle(charges: &[Charge], config: &FieldTraceConfig) -> Result<Vec<TracedLine>> {
    for charge in charges {
        charge.validate()?;
    }
    let mut lines = Vec::with_capacity(charges.len() * config.seeds_per_charge);

    for (index, charge) in charges.iter().enumerate() {
        if charge.q == 0.0 {
            continue;
        }

        for seed in seed_points(charge, config.seeds_per_charge, config.seed_radius) {
            let mut line = trace_field_line(seed, charges, config.max_steps, config.step_size)?
                .with_bounds(config.bounds)
                .with_direction(TraceDirection::away_from(charge.q));
            let points: Vec<DVec3> = line.by_ref().collect();
            let termination = line.termination().unwrap_or(Termination::MaxSteps);

            lines.push(TracedLine {
                source: index,
                points,
                termination,
            });
        }
    }

    Ok(lines)
}
