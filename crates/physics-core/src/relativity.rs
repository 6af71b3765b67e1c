//! Lorentz boosts in 1+1 dimensional spacetime
//!
//! Units: the caller supplies `c` in whatever units `x` and `t` use. The
//! spacetime diagram works in [`C_NORMALIZED`] units (c = 1).

use crate::constants::C_NORMALIZED;
use crate::error::{ensure_finite, DomainError, Result};

/// Spacetime coordinate (x, t)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Event {
    pub x: f64,
    pub t: f64,
}

impl Event {
    pub fn new(x: f64, t: f64) -> Self {
        Self { x, t }
    }
}

/// Boosted coordinate together with the Lorentz factor used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostResult {
    pub event: Event,
    pub gamma: f64,
}

fn validate_beta(beta: f64) -> Result<f64> {
    // Negated so NaN is rejected too
    if !(beta.abs() < 1.0) {
        return Err(DomainError::InvalidBeta { beta });
    }
    Ok(beta)
}

fn validate_c(c: f64) -> Result<f64> {
    if !(c.is_finite() && c > 0.0) {
        return Err(DomainError::InvalidSpeedOfLight { c });
    }
    Ok(c)
}

/// γ = 1/√(1−β²); requires |β| < 1
pub fn lorentz_factor(beta: f64) -> Result<f64> {
    let beta = validate_beta(beta)?;
    Ok(1.0 / (1.0 - beta * beta).sqrt())
}

/// Boost `event` into a frame moving at `beta`·c.
///
/// x′ = γ(x − βct), t′ = γ(t − βx/c). The inverse transform is the same
/// call with `-beta`.
pub fn lorentz_boost(event: Event, beta: f64, c: f64) -> Result<BoostResult> {
    let gamma = lorentz_factor(beta)?;
    let c = validate_c(c)?;
    ensure_finite("x", event.x)?;
    ensure_finite("t", event.t)?;

    let x = ensure_finite("boosted x", gamma * (event.x - beta * c * event.t))?;
    let t = ensure_finite("boosted t", gamma * (event.t - beta * event.x / c))?;

    Ok(BoostResult {
        event: Event { x, t },
        gamma,
    })
}

/// Dilated coordinate time for a proper time interval: Δt = γΔτ
pub fn time_dilation(proper_time: f64, beta: f64) -> Result<f64> {
    Ok(lorentz_factor(beta)? * proper_time)
}

/// Contracted length for a proper length: L = L₀/γ
pub fn length_contraction(proper_length: f64, beta: f64) -> Result<f64> {
    Ok(proper_length / lorentz_factor(beta)?)
}

/// Relativistic velocity addition (u + v)/(1 + uv/c²)
pub fn velocity_addition(u: f64, v: f64, c: f64) -> Result<f64> {
    let c = validate_c(c)?;
    validate_beta(u / c)?;
    validate_beta(v / c)?;
    Ok((u + v) / (1.0 + u * v / (c * c)))
}

/// Invariant interval s² = (ct)² − x²
pub fn interval(event: Event, c: f64) -> Result<f64> {
    let c = validate_c(c)?;
    let ct = c * event.t;
    Ok(ct * ct - event.x * event.x)
}

/// Slopes dct/dx of a moving frame's axes on an (x, ct) diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostedAxes {
    /// x′ axis (t′ = 0): ct = βx
    pub x_axis_slope: f64,
    /// t′ axis (x′ = 0): ct = x/β; `None` when vertical (β = 0)
    pub t_axis_slope: Option<f64>,
}

/// Axes of a frame moving at `beta`
pub fn boosted_axes(beta: f64) -> Result<BoostedAxes> {
    let beta = validate_beta(beta)?;
    Ok(BoostedAxes {
        x_axis_slope: beta,
        t_axis_slope: (beta != 0.0).then(|| 1.0 / beta),
    })
}

/// Inertial frame moving at `beta`·c whose origin sits at `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub beta: f64,
    pub position: Event,
}

impl Frame {
    pub fn new(beta: f64, position: Event) -> Result<Self> {
        validate_beta(beta)?;
        Ok(Self { beta, position })
    }

    pub fn gamma(&self) -> Result<f64> {
        lorentz_factor(self.beta)
    }

    /// Coordinates of a lab-frame event as seen from this frame
    pub fn boost(&self, event: Event, c: f64) -> Result<Event> {
        let relative = Event::new(event.x - self.position.x, event.t - self.position.t);
        Ok(lorentz_boost(relative, self.beta, c)?.event)
    }

    /// Lab-frame coordinates of an event given in this frame
    pub fn to_rest(&self, event: Event, c: f64) -> Result<Event> {
        let lab = lorentz_boost(event, -self.beta, c)?.event;
        Ok(Event::new(
            ensure_finite("lab x", lab.x + self.position.x)?,
            ensure_finite("lab t", lab.t + self.position.t)?,
        ))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            beta: 0.0,
            position: Event::default(),
        }
    }
}

/// Boost with c = 1
pub fn lorentz_boost_normalized(event: Event, beta: f64) -> Result<BoostResult> {
    lorentz_boost(event, beta, C_NORMALIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPEED_OF_LIGHT;

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_gamma_at_rest_is_one() {
        assert_eq!(lorentz_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_gamma_strictly_increasing() {
        let mut previous = 1.0;
        for i in 1..100 {
            let beta = i as f64 / 100.0;
            let g = lorentz_factor(beta).unwrap();
            assert!(g > previous, "gamma must grow with beta ({beta})");
            assert_eq!(g, lorentz_factor(-beta).unwrap());
            previous = g;
        }
    }

    #[test]
    fn test_beta_out_of_range_rejected() {
        for beta in [1.0, -1.0, 1.5, -3.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(lorentz_factor(beta), Err(DomainError::InvalidBeta { .. })),
                "beta = {beta}"
            );
            assert!(lorentz_boost(Event::new(1.0, 1.0), beta, 1.0).is_err());
        }
    }

    #[test]
    fn test_invalid_c_rejected() {
        assert!(matches!(
            lorentz_boost(Event::new(1.0, 0.0), 0.5, 0.0),
            Err(DomainError::InvalidSpeedOfLight { .. })
        ));
        assert!(lorentz_boost(Event::new(1.0, 0.0), 0.5, -1.0).is_err());
    }

    #[test]
    fn test_boost_round_trip_normalized() {
        let events = [
            Event::new(0.0, 0.0),
            Event::new(1.0, 2.0),
            Event::new(-3.5, 0.25),
            Event::new(1.0e3, -7.0e2),
        ];
        for beta in [-0.9, -0.5, 0.0, 0.5, 0.9] {
            for &event in &events {
                let forward = lorentz_boost(event, beta, 1.0).unwrap();
                let back = lorentz_boost(forward.event, -beta, 1.0).unwrap();
                assert!(rel_close(back.event.x, event.x, 1e-9), "beta={beta}");
                assert!(rel_close(back.event.t, event.t, 1e-9), "beta={beta}");
            }
        }
    }

    #[test]
    fn test_boost_round_trip_si() {
        let event = Event::new(3.0e8, 2.0);
        for beta in [-0.9, -0.5, 0.0, 0.5, 0.9] {
            let forward = lorentz_boost(event, beta, SPEED_OF_LIGHT).unwrap();
            let back = lorentz_boost(forward.event, -beta, SPEED_OF_LIGHT).unwrap();
            assert!(rel_close(back.event.x, event.x, 1e-9));
            assert!(rel_close(back.event.t, event.t, 1e-9));
        }
    }

    #[test]
    fn test_boost_preserves_interval() {
        let event = Event::new(2.0, 5.0);
        let s2 = interval(event, 1.0).unwrap();
        for beta in [-0.8, 0.3, 0.95] {
            let boosted = lorentz_boost(event, beta, 1.0).unwrap().event;
            assert!(rel_close(interval(boosted, 1.0).unwrap(), s2, 1e-9));
        }
    }

    #[test]
    fn test_known_boost() {
        // beta = 0.6 gives gamma = 1.25
        let r = lorentz_boost_normalized(Event::new(1.0, 0.0), 0.6).unwrap();
        assert!((r.gamma - 1.25).abs() < 1e-12);
        assert!((r.event.x - 1.25).abs() < 1e-12);
        assert!((r.event.t + 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_dilation_and_contraction() {
        assert!((time_dilation(1.0, 0.6).unwrap() - 1.25).abs() < 1e-12);
        assert!((length_contraction(1.0, 0.6).unwrap() - 0.8).abs() < 1e-12);
        assert!(time_dilation(1.0, 1.0).is_err());
    }

    #[test]
    fn test_velocity_addition_stays_subluminal() {
        let w = velocity_addition(0.9, 0.9, 1.0).unwrap();
        assert!(w < 1.0);
        assert!((w - 1.8 / 1.81).abs() < 1e-12);
        assert!(velocity_addition(1.0, 0.5, 1.0).is_err());
    }

    #[test]
    fn test_frame_round_trip() {
        let frame = Frame::new(0.5, Event::new(2.0, 1.0)).unwrap();
        let event = Event::new(-1.0, 4.0);
        let seen = frame.boost(event, 1.0).unwrap();
        let back = frame.to_rest(seen, 1.0).unwrap();

        assert!(rel_close(back.x, event.x, 1e-9));
        assert!(rel_close(back.t, event.t, 1e-9));
        assert!(Frame::new(1.0, Event::default()).is_err());
    }

    #[test]
    fn test_boosted_axes() {
        let axes = boosted_axes(0.4).unwrap();
        assert_eq!(axes.x_axis_slope, 0.4);
        assert!((axes.t_axis_slope.unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(boosted_axes(0.0).unwrap().t_axis_slope, None);

        // Event on the t' axis boosts to x' = 0
        let on_axis = Event::new(0.4 * 3.0, 3.0);
        let boosted = lorentz_boost_normalized(on_axis, 0.4).unwrap();
        assert!(boosted.event.x.abs() < 1e-12);
    }

    #[test]
    fn test_boost_overflow_rejected() {
        let event = Event::new(1.0e308, -1.0e308);
        assert_eq!(
            lorentz_boost(event, 0.9, 1.0),
            Err(DomainError::NonFinite { name: "boosted x" })
        );

        let frame = Frame::new(0.9, Event::default()).unwrap();
        assert!(frame.boost(event, 1.0).is_err());
        assert!(frame.to_rest(Event::new(1.0e308, 1.0e308), 1.0).is_err());

        // Origin offset pushes the lab coordinate past f64::MAX
        let shifted = Frame::new(0.0, Event::new(f64::MAX, 0.0)).unwrap();
        assert_eq!(
            shifted.to_rest(Event::new(f64::MAX, 0.0), 1.0),
            Err(DomainError::NonFinite { name: "lab x" })
        );
    }
}
