//! Domain errors
//!
//! Raised when an input violates a hard mathematical precondition. These are
//! propagated to the caller and never replaced with a guessed value, so a
//! rejected configuration can be surfaced by the UI instead of leaking NaN
//! into a rendered frame.

use thiserror::Error;

/// Result alias for fallible physics operations
pub type Result<T> = std::result::Result<T, DomainError>;

/// Input outside the domain of a physics routine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Velocity ratio must satisfy |β| < 1
    #[error("velocity ratio beta = {beta} must lie strictly within (-1, 1)")]
    InvalidBeta {
        /// Offending β
        beta: f64,
    },

    /// Speed of light must be positive and finite
    #[error("speed of light c = {c} must be positive and finite")]
    InvalidSpeedOfLight {
        /// Offending c
        c: f64,
    },

    /// Barrier width must be positive
    #[error("barrier width {width} must be positive")]
    NonPositiveWidth {
        /// Offending width
        width: f64,
    },

    /// Mass must be positive
    #[error("mass {mass} must be positive")]
    NonPositiveMass {
        /// Offending mass
        mass: f64,
    },

    /// Particle energy must be non-negative
    #[error("energy {energy} must be non-negative")]
    NegativeEnergy {
        /// Offending energy
        energy: f64,
    },

    /// Barrier height must be non-negative
    #[error("barrier height {height} must be non-negative")]
    NegativeBarrierHeight {
        /// Offending height
        height: f64,
    },

    /// Wavelength must be positive
    #[error("wavelength {wavelength} must be positive")]
    NonPositiveWavelength {
        /// Offending wavelength
        wavelength: f64,
    },

    /// Wave amplitude must be non-negative
    #[error("amplitude {amplitude} must be non-negative")]
    NegativeAmplitude {
        /// Offending amplitude
        amplitude: f64,
    },

    /// Wave frequency must be non-negative
    #[error("frequency {frequency} must be non-negative")]
    NegativeFrequency {
        /// Offending frequency
        frequency: f64,
    },

    /// Restitution must lie in [0, 1]
    #[error("restitution {restitution} must lie within [0, 1]")]
    InvalidRestitution {
        /// Offending restitution
        restitution: f64,
    },

    /// Circle radius must be positive
    #[error("radius {radius} must be positive")]
    NonPositiveRadius {
        /// Offending radius
        radius: f64,
    },

    /// Every box extent must be positive
    #[error("box size {size:?} must be positive along every axis")]
    NonPositiveSize {
        /// Offending size
        size: [f64; 3],
    },

    /// Both bodies have infinite mass, so no impulse can be distributed
    #[error("total inverse mass is zero; impulse is undefined")]
    ZeroInverseMass,

    /// Integration step must be positive
    #[error("step size {step_size} must be positive")]
    NonPositiveStep {
        /// Offending step
        step_size: f64,
    },

    /// Sampling grid is empty or inverted
    #[error("invalid sampling grid: {reason}")]
    InvalidGrid {
        /// Why the grid was rejected
        reason: &'static str,
    },

    /// A value that must be finite was NaN or infinite
    #[error("{name} must be finite")]
    NonFinite {
        /// Parameter name
        name: &'static str,
    },
}

/// Reject NaN and infinities for the named parameter
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5), Ok(1.5));
        assert_eq!(
            ensure_finite("x", f64::NAN),
            Err(DomainError::NonFinite { name: "x" })
        );
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = DomainError::InvalidBeta { beta: 1.0 };
        assert_eq!(
            err.to_string(),
            "velocity ratio beta = 1 must lie strictly within (-1, 1)"
        );
        assert_eq!(
            DomainError::ZeroInverseMass.to_string(),
            "total inverse mass is zero; impulse is undefined"
        );
    }
}
