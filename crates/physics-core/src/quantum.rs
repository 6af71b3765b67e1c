//! Quantum tunneling through a 1-D rectangular potential barrier
//!
//! Units at the API boundary: energy and barrier height in eV, barrier
//! width and wavefunction positions in nm, mass in kg. Conversion to SI
//! happens internally when computing κ.
//!
//! The transmission estimate is the thick-barrier approximation
//! T ≈ exp(−2κL), not the exact rectangular-barrier coefficient.

use crate::constants::*;
use crate::error::{ensure_finite, DomainError, Result};

/// Parameters of a tunneling configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierConfig {
    /// Particle energy (eV)
    pub energy: f64,
    /// Barrier height (eV)
    pub barrier_height: f64,
    /// Barrier width (nm)
    pub barrier_width: f64,
    /// Particle mass (kg)
    pub mass: f64,
}

impl BarrierConfig {
    pub fn new(energy: f64, barrier_height: f64, barrier_width: f64, mass: f64) -> Self {
        Self {
            energy,
            barrier_height,
            barrier_width,
            mass,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("energy", self.energy)?;
        ensure_finite("barrier height", self.barrier_height)?;
        ensure_finite("barrier width", self.barrier_width)?;
        ensure_finite("mass", self.mass)?;

        if self.barrier_width <= 0.0 {
            return Err(DomainError::NonPositiveWidth {
                width: self.barrier_width,
            });
        }
        if self.mass <= 0.0 {
            return Err(DomainError::NonPositiveMass { mass: self.mass });
        }
        if self.energy < 0.0 {
            return Err(DomainError::NegativeEnergy {
                energy: self.energy,
            });
        }
        if self.barrier_height < 0.0 {
            return Err(DomainError::NegativeBarrierHeight {
                height: self.barrier_height,
            });
        }
        Ok(())
    }

    pub fn is_classically_allowed(&self) -> bool {
        self.energy >= self.barrier_height
    }
}

impl Default for BarrierConfig {
    /// 1 eV electron against a 2 eV, 1 nm barrier
    fn default() -> Self {
        Self {
            energy: 1.0,
            barrier_height: 2.0,
            barrier_width: 1.0,
            mass: ELECTRON_MASS,
        }
    }
}

/// Transmission and reflection probabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunnelingResult {
    pub transmission_probability: f64,
    pub reflection_probability: f64,
    /// True when the particle crosses a barrier higher than its energy
    pub tunneling: bool,
}

/// Wave number k = √(2mE)/ħ in nm⁻¹ for a kinetic energy in eV
pub fn wave_number(energy: f64, mass: f64) -> f64 {
    (2.0 * mass * energy * EV_TO_J).sqrt() / HBAR * NM_TO_M
}

/// Decay constant κ = √(2m(V−E))/ħ in nm⁻¹; zero when E ≥ V
pub fn decay_constant(config: &BarrierConfig) -> f64 {
    if config.is_classically_allowed() {
        return 0.0;
    }
    wave_number(config.barrier_height - config.energy, config.mass)
}

/// Tunneling probabilities for a validated configuration
pub fn tunneling_for(config: &BarrierConfig) -> Result<TunnelingResult> {
    config.validate()?;

    if config.is_classically_allowed() {
        return Ok(TunnelingResult {
            transmission_probability: 1.0,
            reflection_probability: 0.0,
            tunneling: false,
        });
    }

    let kappa = decay_constant(config);
    let transmission = (-2.0 * kappa * config.barrier_width).exp().clamp(0.0, 1.0);

    Ok(TunnelingResult {
        transmission_probability: transmission,
        reflection_probability: 1.0 - transmission,
        tunneling: true,
    })
}

/// Tunneling probabilities from raw parameters (eV, eV, nm, kg)
pub fn tunneling(
    energy: f64,
    barrier_height: f64,
    barrier_width: f64,
    mass: f64,
) -> Result<TunnelingResult> {
    tunneling_for(&BarrierConfig::new(energy, barrier_height, barrier_width, mass))
}

/// Piecewise region of the wavefunction plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Before the barrier (x < 0)
    Incident,
    /// Inside the barrier (0 ≤ x ≤ width)
    Barrier,
    /// After the barrier (x > width)
    Transmitted,
}

impl Region {
    /// RGBA tag (sRGB, 0..1) for the renderer
    pub fn color(self) -> [f32; 4] {
        let colors = &catppuccin::PALETTE.mocha.colors;
        let color = match self {
            Region::Incident => &colors.blue,
            Region::Barrier => &colors.peach,
            Region::Transmitted => &colors.green,
        };
        let rgb = &color.rgb;
        [
            f32::from(rgb.r) / 255.0,
            f32::from(rgb.g) / 255.0,
            f32::from(rgb.b) / 255.0,
            1.0,
        ]
    }
}

/// One point of the sampled wavefunction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavefunctionSample {
    /// Position (nm)
    pub x: f64,
    /// Real amplitude ψ(x)
    pub psi: f64,
    pub region: Region,
}

/// Wavefunction shape inside the barrier
#[derive(Debug, Clone, Copy)]
enum Interior {
    /// e^{−κx}
    Decaying(f64),
    /// cos(k′x)
    Oscillating(f64),
}

impl Interior {
    fn psi(self, x: f64) -> f64 {
        match self {
            Interior::Decaying(kappa) => (-kappa * x).exp(),
            Interior::Oscillating(k) => (k * x).cos(),
        }
    }

    /// Phase carried into the transmitted wave at the far edge
    fn phase_at(self, x: f64) -> f64 {
        match self {
            Interior::Decaying(_) => 0.0,
            Interior::Oscillating(k) => k * x,
        }
    }
}

/// Sample ψ(x) on `samples` evenly spaced points in `[x_min, x_max]`.
///
/// The barrier occupies `0 ≤ x ≤ width`. Incident: cos(kx). Interior:
/// e^{−κx} below the barrier top, cos(k′x) above it. Transmitted: √T·cos
/// continuing from the interior value at the far edge.
pub fn sample_wavefunction(
    config: &BarrierConfig,
    x_min: f64,
    x_max: f64,
    samples: usize,
) -> Result<Vec<WavefunctionSample>> {
    let result = tunneling_for(config)?;
    ensure_finite("x_min", x_min)?;
    ensure_finite("x_max", x_max)?;
    if samples < 2 {
        return Err(DomainError::InvalidGrid {
            reason: "need at least 2 wavefunction samples",
        });
    }
    if x_min >= x_max {
        return Err(DomainError::InvalidGrid {
            reason: "x_min must be below x_max",
        });
    }
    ensure_finite("plot span", x_max - x_min)?;

    let k = wave_number(config.energy, config.mass);
    let width = config.barrier_width;
    let amplitude_out = result.transmission_probability.sqrt();

    let interior = if result.tunneling {
        Interior::Decaying(decay_constant(config))
    } else {
        Interior::Oscillating(wave_number(config.energy - config.barrier_height, config.mass))
    };
    let edge_phase = interior.phase_at(width);

    let step = (x_max - x_min) / (samples - 1) as f64;
    let points = (0..samples)
        .map(|i| {
            let x = x_min + step * i as f64;
            let (psi, region) = if x < 0.0 {
                ((k * x).cos(), Region::Incident)
            } else if x <= width {
                (interior.psi(x), Region::Barrier)
            } else {
                (
                    amplitude_out * (k * (x - width) + edge_phase).cos(),
                    Region::Transmitted,
                )
            };
            // kx can overflow for extreme energies over a wide range
            let psi = ensure_finite("wavefunction", psi)?;
            Ok(WavefunctionSample { x, psi, region })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_sum_to_one() {
        let energies = [0.0, 0.1, 0.5, 1.0, 1.9, 2.0, 3.5];
        let widths = [0.01, 0.2, 1.0, 5.0];
        let masses = [ELECTRON_MASS, 1.0e-30, 1.67e-27];

        for &e in &energies {
            for &w in &widths {
                for &m in &masses {
                    let r = tunneling(e, 2.0, w, m).unwrap();
                    let sum = r.transmission_probability + r.reflection_probability;
                    assert!((sum - 1.0).abs() < 1e-12, "E={e} w={w} m={m}");
                    assert!((0.0..=1.0).contains(&r.transmission_probability));
                }
            }
        }
    }

    #[test]
    fn test_over_barrier_is_classical() {
        let r = tunneling(2.5, 2.0, 1.0, ELECTRON_MASS).unwrap();
        assert_eq!(r.transmission_probability, 1.0);
        assert_eq!(r.reflection_probability, 0.0);
        assert!(!r.tunneling);

        let at_top = tunneling(2.0, 2.0, 1.0, ELECTRON_MASS).unwrap();
        assert!(!at_top.tunneling);
    }

    #[test]
    fn test_electron_scenario_strictly_between() {
        let r = tunneling(1.0, 2.0, 1.0, 9.109e-31).unwrap();
        assert!(r.tunneling);
        assert!(r.transmission_probability > 0.0);
        assert!(r.transmission_probability < 1.0);
    }

    #[test]
    fn test_transmission_grows_toward_barrier_top() {
        let mut previous = 0.0;
        for i in 0..20 {
            let energy = 1.0 + i as f64 * 0.05;
            let t = tunneling(energy, 2.0, 1.0, 9.109e-31)
                .unwrap()
                .transmission_probability;
            assert!(t > previous, "T must increase with energy (E={energy})");
            previous = t;
        }
    }

    #[test]
    fn test_thicker_barrier_transmits_less() {
        let thin = tunneling(1.0, 2.0, 0.5, ELECTRON_MASS).unwrap();
        let thick = tunneling(1.0, 2.0, 1.5, ELECTRON_MASS).unwrap();
        assert!(thick.transmission_probability < thin.transmission_probability);
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        assert!(matches!(
            tunneling(1.0, 2.0, 0.0, ELECTRON_MASS),
            Err(DomainError::NonPositiveWidth { .. })
        ));
        assert!(matches!(
            tunneling(1.0, 2.0, -1.0, ELECTRON_MASS),
            Err(DomainError::NonPositiveWidth { .. })
        ));
        assert!(matches!(
            tunneling(1.0, 2.0, 1.0, 0.0),
            Err(DomainError::NonPositiveMass { .. })
        ));
        assert!(matches!(
            tunneling(-1.0, 2.0, 1.0, ELECTRON_MASS),
            Err(DomainError::NegativeEnergy { .. })
        ));
        assert!(tunneling(f64::NAN, 2.0, 1.0, ELECTRON_MASS).is_err());
    }

    #[test]
    fn test_wavefunction_regions() {
        let config = BarrierConfig::default();
        let samples = sample_wavefunction(&config, -2.0, 3.0, 51).unwrap();

        assert_eq!(samples.len(), 51);
        assert_eq!(samples[0].region, Region::Incident);
        assert_eq!(samples[50].region, Region::Transmitted);
        assert!(samples.iter().any(|s| s.region == Region::Barrier));

        // Decays monotonically inside the barrier when tunneling
        let interior: Vec<f64> = samples
            .iter()
            .filter(|s| s.region == Region::Barrier)
            .map(|s| s.psi)
            .collect();
        for pair in interior.windows(2) {
            assert!(pair[1] < pair[0]);
        }

        let t = tunneling_for(&config).unwrap().transmission_probability;
        let amplitude = t.sqrt();
        for s in samples.iter().filter(|s| s.region == Region::Transmitted) {
            assert!(s.psi.abs() <= amplitude + 1e-12);
        }
    }

    #[test]
    fn test_wavefunction_continuous_at_barrier_edges() {
        let config = BarrierConfig::default();
        let kappa = decay_constant(&config);
        let t = tunneling_for(&config).unwrap().transmission_probability;

        // e^{-κL} equals √T at the far edge
        let inside_edge = (-kappa * config.barrier_width).exp();
        assert!((inside_edge - t.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_wavefunction_over_barrier_oscillates() {
        let config = BarrierConfig::new(3.0, 1.0, 2.0, ELECTRON_MASS);
        let samples = sample_wavefunction(&config, -1.0, 4.0, 201).unwrap();
        let interior: Vec<f64> = samples
            .iter()
            .filter(|s| s.region == Region::Barrier)
            .map(|s| s.psi)
            .collect();

        assert!(interior.iter().any(|&psi| psi < 0.0));
        assert!(interior.iter().any(|&psi| psi > 0.0));
    }

    #[test]
    fn test_wavefunction_rejects_bad_grid() {
        let config = BarrierConfig::default();
        assert!(sample_wavefunction(&config, 1.0, -1.0, 10).is_err());
        assert!(sample_wavefunction(&config, -1.0, 1.0, 1).is_err());
    }

    #[test]
    fn test_region_colors_are_distinct() {
        let colors = [
            Region::Incident.color(),
            Region::Barrier.color(),
            Region::Transmitted.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(colors.iter().all(|c| c[3] == 1.0));
    }

    #[test]
    fn test_wavefunction_rejects_overflowing_range() {
        let config = BarrierConfig::default();
        assert_eq!(
            sample_wavefunction(&config, -1.0e308, 1.0e308, 3),
            Err(DomainError::NonFinite { name: "plot span" })
        );
        assert!(sample_wavefunction(&config, f64::NEG_INFINITY, 1.0, 3).is_err());

        let wide = sample_wavefunction(&config, -1.0e300, 1.0e300, 5).unwrap();
        assert!(wide.iter().all(|s| s.x.is_finite() && s.psi.is_finite()));
    }
}
