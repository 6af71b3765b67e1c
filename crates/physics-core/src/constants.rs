//! Physical constants and numeric thresholds
//!
//! Formulas in this crate are illustrative. Each component documents its
//! unit policy at the API boundary; the constants below carry the units
//! noted beside them.

/// Coulomb constant k = 1/(4πε₀) in N·m²/C²
pub const K_COULOMB: f64 = 8.99e9;

/// Reduced Planck constant ħ in J·s
pub const HBAR: f64 = 1.054_571_817e-34;

/// Joules per electronvolt
pub const EV_TO_J: f64 = 1.602_176_634e-19;

/// Metres per nanometre
pub const NM_TO_M: f64 = 1.0e-9;

/// Electron rest mass in kg
pub const ELECTRON_MASS: f64 = 9.109e-31;

/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Speed of light in spacetime-diagram units
pub const C_NORMALIZED: f64 = 1.0;

// Field-line tracing

/// A field line is absorbed once it comes this close to any charge
pub const ABSORPTION_RADIUS: f64 = 0.3;

/// Tracing stops when the resultant field magnitude falls below this
pub const MIN_FIELD_MAGNITUDE: f64 = 0.01;

/// Charge contributions closer than this are skipped (field blows up at r→0)
pub const MIN_SAMPLE_DISTANCE: f64 = 1.0e-6;

// Wave superposition

/// Largest grid resolution whose point count fits a `u32` index buffer
pub const MAX_GRID_RESOLUTION: usize = 65_535;

/// Heuristic distance falloff: a / (1 + WAVE_FALLOFF · d)
pub const WAVE_FALLOFF: f64 = 0.1;

// Collision

/// Closest-point distances below this are treated as the circle center
/// lying inside the box
pub const CONTACT_EPSILON: f64 = 1.0e-12;
