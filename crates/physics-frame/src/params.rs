//! Physics parameters for runtime tuning
//!
//! Each visualization owns one parameter group; the UI edits these and the
//! scenes read them every frame.

use glam::{DVec2, DVec3};
use physics_core::{Aabb, FieldTraceConfig, GridSpec, C_NORMALIZED};

/// Collision / projectile scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionParams {
    /// Constant acceleration applied to every movable body (m/s²)
    pub gravity: DVec3,
    /// Points kept per body trail
    pub trail_length: usize,
    /// Walls the bodies bounce off; `None` leaves the scene open
    pub arena: Option<Aabb>,
    /// Restitution against the arena walls
    pub wall_restitution: f64,
    /// Fraction of penetration depth removed per frame
    pub positional_correction: f64,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            gravity: DVec3::new(0.0, -9.81, 0.0),
            trail_length: 120,
            arena: Some(Aabb::new(
                DVec3::new(-10.0, 0.0, -10.0),
                DVec3::new(10.0, 20.0, 10.0),
            )),
            wall_restitution: 0.8,
            positional_correction: 0.8,
        }
    }
}

/// Wave interference scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub grid: GridSpec,
    /// Time at which the static intensity surface is evaluated
    pub pattern_time: f64,
    /// Multiplier on the host dt for the traveling height field
    pub time_scale: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            grid: GridSpec::new(DVec2::splat(-10.0), DVec2::splat(10.0), 96),
            pattern_time: 0.0,
            time_scale: 1.0,
        }
    }
}

/// Quantum barrier plot range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierParams {
    /// Plot start (nm)
    pub x_min: f64,
    /// Plot end (nm)
    pub x_max: f64,
    pub samples: usize,
}

impl Default for BarrierParams {
    fn default() -> Self {
        Self {
            x_min: -3.0,
            x_max: 4.0,
            samples: 400,
        }
    }
}

/// Spacetime diagram
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacetimeParams {
    /// Speed of light in diagram units
    pub c: f64,
}

impl Default for SpacetimeParams {
    fn default() -> Self {
        Self { c: C_NORMALIZED }
    }
}

/// All parameter groups
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameParams {
    pub field: FieldTraceConfig,
    pub wave: WaveParams,
    pub collision: CollisionParams,
    pub barrier: BarrierParams,
    pub spacetime: SpacetimeParams,
}
