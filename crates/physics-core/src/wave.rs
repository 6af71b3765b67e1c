//! Superposition of circular waves from point sources
//!
//! Units: positions and wavelength in scene units, time in seconds,
//! frequency in Hz, phase in radians. Amplitude falls off heuristically as
//! a / (1 + 0.1·d), not as a true 1/r law.

use crate::constants::{MAX_GRID_RESOLUTION, WAVE_FALLOFF};
use crate::error::{ensure_finite, DomainError, Result};
use glam::DVec2;
use std::f64::consts::TAU;

/// Point source of circular waves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSource {
    pub position: DVec2,
    pub amplitude: f64,
    pub wavelength: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl WaveSource {
    pub fn new(position: DVec2, amplitude: f64, wavelength: f64, frequency: f64, phase: f64) -> Self {
        Self {
            position,
            amplitude,
            wavelength,
            frequency,
            phase,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("source position", self.position.x)?;
        ensure_finite("source position", self.position.y)?;
        ensure_finite("amplitude", self.amplitude)?;
        ensure_finite("wavelength", self.wavelength)?;
        ensure_finite("frequency", self.frequency)?;
        ensure_finite("phase", self.phase)?;

        if self.amplitude < 0.0 {
            return Err(DomainError::NegativeAmplitude {
                amplitude: self.amplitude,
            });
        }
        if self.wavelength <= 0.0 {
            return Err(DomainError::NonPositiveWavelength {
                wavelength: self.wavelength,
            });
        }
        if self.frequency < 0.0 {
            return Err(DomainError::NegativeFrequency {
                frequency: self.frequency,
            });
        }
        Ok(())
    }

    /// Phase φ = 2π(d/λ − f·t) + φ₀ at `point`
    pub fn phase_at(&self, point: DVec2, time: f64) -> f64 {
        let distance = self.position.distance(point);
        TAU * (distance / self.wavelength - self.frequency * time) + self.phase
    }

    /// Amplitude after distance falloff at `point`
    pub fn amplitude_at(&self, point: DVec2) -> f64 {
        let distance = self.position.distance(point);
        self.amplitude / (1.0 + WAVE_FALLOFF * distance)
    }
}

/// Resultant amplitude and intensity at a point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveSample {
    pub amplitude: f64,
    pub intensity: f64,
}

/// Each source valid, and (Σaᵢ)² finite so no height or intensity overflows
fn validate_sources(sources: &[WaveSource]) -> Result<()> {
    sources.iter().try_for_each(WaveSource::validate)?;
    let total: f64 = sources.iter().map(|s| s.amplitude).sum();
    ensure_finite("combined intensity", total * total)?;
    Ok(())
}

/// Falloff amplitude and phase of one source, or `None` when either
/// overflows (distance or d/λ beyond f64 range)
fn contribution(source: &WaveSource, point: DVec2, time: f64) -> Option<(f64, f64)> {
    let a = source.amplitude_at(point);
    let phi = source.phase_at(point, time);
    if a.is_finite() && phi.is_finite() {
        Some((a, phi))
    } else {
        log::trace!(
            "skipping source at {:?}: phase overflows at {:?}",
            source.position,
            point
        );
        None
    }
}

/// Phasor sum (Σ aᵢcos φᵢ, Σ aᵢsin φᵢ) at `point`
fn phasor_sum(point: DVec2, sources: &[WaveSource], time: f64) -> DVec2 {
    sources
        .iter()
        .filter(|s| s.amplitude > 0.0)
        .filter_map(|source| contribution(source, point, time))
        .fold(DVec2::ZERO, |acc, (a, phi)| {
            acc + DVec2::new(a * phi.cos(), a * phi.sin())
        })
}

/// Interference of all `sources` at `point` and `time`.
///
/// Intensity is |Σ aᵢ e^{iφᵢ}|², so path differences produce constructive
/// and destructive interference; a single source yields a².
pub fn interference_at(point: DVec2, sources: &[WaveSource], time: f64) -> Result<WaveSample> {
    ensure_finite("point", point.x)?;
    ensure_finite("point", point.y)?;
    ensure_finite("time", time)?;
    validate_sources(sources)?;
    Ok(interference_unchecked(point, sources, time))
}

fn interference_unchecked(point: DVec2, sources: &[WaveSource], time: f64) -> WaveSample {
    if let [source] = sources {
        let amplitude = source.amplitude_at(point);
        return WaveSample {
            amplitude,
            intensity: amplitude * amplitude,
        };
    }

    let phasor = phasor_sum(point, sources, time);
    let intensity = phasor.length_squared();

    WaveSample {
        amplitude: intensity.sqrt(),
        intensity,
    }
}

/// Traveling height z(x, y, t) = Σ aᵢ sin φᵢ
pub fn height_at(point: DVec2, sources: &[WaveSource], time: f64) -> Result<f64> {
    ensure_finite("point", point.x)?;
    ensure_finite("point", point.y)?;
    ensure_finite("time", time)?;
    validate_sources(sources)?;
    Ok(height_unchecked(point, sources, time))
}

fn height_unchecked(point: DVec2, sources: &[WaveSource], time: f64) -> f64 {
    sources
        .iter()
        .filter_map(|source| contribution(source, point, time))
        .map(|(a, phi)| a * phi.sin())
        .sum()
}

/// Regular sampling grid over a rectangle, `resolution` points per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub min: DVec2,
    pub max: DVec2,
    pub resolution: usize,
}

impl GridSpec {
    pub fn new(min: DVec2, max: DVec2, resolution: usize) -> Self {
        Self {
            min,
            max,
            resolution,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution < 2 {
            return Err(DomainError::InvalidGrid {
                reason: "resolution must be at least 2",
            });
        }
        if self.resolution > MAX_GRID_RESOLUTION {
            return Err(DomainError::InvalidGrid {
                reason: "resolution exceeds the largest indexable grid",
            });
        }
        for value in self.min.to_array() {
            ensure_finite("grid min", value)?;
        }
        for value in self.max.to_array() {
            ensure_finite("grid max", value)?;
        }
        if !(self.min.x < self.max.x && self.min.y < self.max.y) {
            return Err(DomainError::InvalidGrid {
                reason: "min must be strictly below max on both axes",
            });
        }
        for value in (self.max - self.min).to_array() {
            ensure_finite("grid span", value)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resolution * self.resolution
    }

    pub fn is_empty(&self) -> bool {
        self.resolution == 0
    }

    /// Grid point at column `i`, row `j`
    pub fn point(&self, i: usize, j: usize) -> DVec2 {
        let span = self.max - self.min;
        let denom = (self.resolution - 1) as f64;
        self.min + span * DVec2::new(i as f64 / denom, j as f64 / denom)
    }

    /// Points in row-major order (rows along y)
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        (0..self.resolution).flat_map(move |j| (0..self.resolution).map(move |i| self.point(i, j)))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: DVec2::splat(-10.0),
            max: DVec2::splat(10.0),
            resolution: 64,
        }
    }
}

/// Static interference surface; rebuilt only when sources or grid change
#[derive(Debug, Clone, PartialEq)]
pub struct InterferencePattern {
    pub grid: GridSpec,
    /// Row-major intensities, one per grid point
    pub intensities: Vec<f64>,
    pub max_intensity: f64,
}

impl InterferencePattern {
    pub fn intensity(&self, i: usize, j: usize) -> f64 {
        self.intensities[j * self.grid.resolution + i]
    }
}

/// Evaluate [`interference_at`] over every grid point
pub fn sample_interference(
    sources: &[WaveSource],
    grid: GridSpec,
    time: f64,
) -> Result<InterferencePattern> {
    grid.validate()?;
    ensure_finite("time", time)?;
    validate_sources(sources)?;

    let intensities: Vec<f64> = grid
        .points()
        .map(|p| interference_unchecked(p, sources, time).intensity)
        .collect();
    let max_intensity = intensities.iter().copied().fold(0.0, f64::max);

    Ok(InterferencePattern {
        grid,
        intensities,
        max_intensity,
    })
}

/// Per-frame traveling height buffer, refilled in place
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    grid: GridSpec,
    heights: Vec<f64>,
}

impl HeightField {
    pub fn new(grid: GridSpec) -> Result<Self> {
        grid.validate()?;
        Ok(Self {
            grid,
            heights: vec![0.0; grid.len()],
        })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn height(&self, i: usize, j: usize) -> f64 {
        self.heights[j * self.grid.resolution + i]
    }

    /// Recompute every height for `time`
    pub fn update(&mut self, sources: &[WaveSource], time: f64) -> Result<()> {
        ensure_finite("time", time)?;
        validate_sources(sources)?;
        let grid = self.grid;
        for (height, point) in self.heights.iter_mut().zip(grid.points()) {
            *height = height_unchecked(point, sources, time);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_source(x: f64) -> WaveSource {
        WaveSource::new(DVec2::new(x, 0.0), 1.0, 1.0, 1.0, 0.0)
    }

    #[test]
    fn test_single_source_intensity_is_amplitude_squared() {
        let source = WaveSource::new(DVec2::ZERO, 2.0, 1.5, 0.5, 0.3);
        let point = DVec2::new(3.0, 4.0);
        let sample = interference_at(point, &[source], 0.7).unwrap();

        let expected = 2.0 / (1.0 + 0.1 * 5.0);
        assert!((sample.amplitude - expected).abs() < 1e-12);
        assert!((sample.intensity - expected * expected).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_sources_constructive_at_origin() {
        let sources = [unit_source(-1.0), unit_source(1.0)];
        let sample = interference_at(DVec2::ZERO, &sources, 0.0).unwrap();

        let amplitude_at_point = sources[0].amplitude_at(DVec2::ZERO);
        let expected = (2.0 * amplitude_at_point).powi(2);
        assert!((sample.intensity - expected).abs() < 1e-12);
        assert!((sample.amplitude - 2.0 * amplitude_at_point).abs() < 1e-12);
    }

    #[test]
    fn test_half_wavelength_offset_is_destructive() {
        // Opposite phases at equal distance cancel
        let a = WaveSource::new(DVec2::new(-1.0, 0.0), 1.0, 1.0, 1.0, 0.0);
        let b = WaveSource::new(DVec2::new(1.0, 0.0), 1.0, 1.0, 1.0, std::f64::consts::PI);
        let sample = interference_at(DVec2::ZERO, &[a, b], 0.25).unwrap();

        assert!(sample.intensity < 1e-20);
        assert!(sample.amplitude >= 0.0);
    }

    #[test]
    fn test_zero_amplitude_source_is_inert() {
        let live = unit_source(-1.0);
        let silent = WaveSource {
            amplitude: 0.0,
            ..unit_source(2.0)
        };
        let p = DVec2::new(0.3, 0.7);

        let alone = interference_at(p, &[live], 1.2).unwrap();
        let with_silent = interference_at(p, &[live, silent], 1.2).unwrap();
        assert!((alone.intensity - with_silent.intensity).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sources() {
        let sample = interference_at(DVec2::ONE, &[], 0.0).unwrap();
        assert_eq!(sample, WaveSample::default());
    }

    #[test]
    fn test_invalid_sources_rejected() {
        let bad_wavelength = WaveSource {
            wavelength: 0.0,
            ..unit_source(0.0)
        };
        assert!(matches!(
            interference_at(DVec2::ZERO, &[bad_wavelength], 0.0),
            Err(DomainError::NonPositiveWavelength { .. })
        ));

        let bad_amplitude = WaveSource {
            amplitude: -1.0,
            ..unit_source(0.0)
        };
        assert!(matches!(
            height_at(DVec2::ZERO, &[bad_amplitude], 0.0),
            Err(DomainError::NegativeAmplitude { .. })
        ));
    }

    #[test]
    fn test_height_matches_sine_sum() {
        let sources = [unit_source(-1.0), unit_source(2.5)];
        let p = DVec2::new(0.4, -0.9);
        let t = 0.33;
        let expected: f64 = sources
            .iter()
            .map(|s| s.amplitude_at(p) * s.phase_at(p, t).sin())
            .sum();

        assert!((height_at(p, &sources, t).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_never_negative() {
        let sources = [unit_source(-2.0), unit_source(0.5), unit_source(3.0)];
        let grid = GridSpec::new(DVec2::splat(-4.0), DVec2::splat(4.0), 16);
        let pattern = sample_interference(&sources, grid, 0.0).unwrap();

        assert_eq!(pattern.intensities.len(), 256);
        assert!(pattern.intensities.iter().all(|&i| i >= 0.0));
        assert!(pattern
            .intensities
            .iter()
            .all(|&i| i <= pattern.max_intensity));
    }

    #[test]
    fn test_grid_corners() {
        let grid = GridSpec::new(DVec2::new(-1.0, 0.0), DVec2::new(1.0, 4.0), 3);
        assert_eq!(grid.point(0, 0), DVec2::new(-1.0, 0.0));
        assert_eq!(grid.point(2, 2), DVec2::new(1.0, 4.0));
        assert_eq!(grid.point(1, 1), DVec2::new(0.0, 2.0));
        assert_eq!(grid.points().count(), 9);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let flat = GridSpec::new(DVec2::ZERO, DVec2::new(1.0, 0.0), 8);
        assert!(sample_interference(&[], flat, 0.0).is_err());
        let coarse = GridSpec::new(DVec2::ZERO, DVec2::ONE, 1);
        assert!(HeightField::new(coarse).is_err());
    }

    #[test]
    fn test_height_field_update_in_place() {
        let grid = GridSpec::new(DVec2::splat(-2.0), DVec2::splat(2.0), 5);
        let sources = [unit_source(0.0)];
        let mut field = HeightField::new(grid).unwrap();

        field.update(&sources, 0.1).unwrap();
        let p = grid.point(3, 1);
        assert!((field.height(3, 1) - height_at(p, &sources, 0.1).unwrap()).abs() < 1e-12);

        let before = field.heights().to_vec();
        field.update(&sources, 0.35).unwrap();
        assert_eq!(field.heights().len(), before.len());
        assert_ne!(field.heights(), &before[..]);
    }

    #[test]
    fn test_grid_rejects_non_finite_bounds() {
        let infinite =
            GridSpec::new(DVec2::splat(f64::NEG_INFINITY), DVec2::splat(f64::INFINITY), 4);
        assert_eq!(
            infinite.validate(),
            Err(DomainError::NonFinite { name: "grid min" })
        );

        let nan = GridSpec::new(DVec2::new(f64::NAN, 0.0), DVec2::splat(1.0), 4);
        assert!(nan.validate().is_err());

        // Finite bounds whose span overflows
        let huge = GridSpec::new(DVec2::splat(-1.0e308), DVec2::splat(1.0e308), 4);
        assert_eq!(
            huge.validate(),
            Err(DomainError::NonFinite { name: "grid span" })
        );
        assert!(sample_interference(&[unit_source(0.0)], huge, 0.0).is_err());
        assert!(HeightField::new(huge).is_err());
    }

    #[test]
    fn test_grid_resolution_capped() {
        let mut grid =
            GridSpec::new(DVec2::splat(-1.0), DVec2::splat(1.0), MAX_GRID_RESOLUTION);
        assert!(grid.validate().is_ok());
        grid.resolution += 1;
        assert!(matches!(grid.validate(), Err(DomainError::InvalidGrid { .. })));
    }

    #[test]
    fn test_wide_grid_stays_finite() {
        // Corner distances overflow even though the span fits
        let grid = GridSpec::new(DVec2::splat(-4.0e307), DVec2::splat(4.0e307), 3);
        let sources = [unit_source(-1.0), unit_source(1.0)];

        let pattern = sample_interference(&sources, grid, 0.0).unwrap();
        assert!(pattern.intensities.iter().all(|i| i.is_finite()));

        let mut field = HeightField::new(grid).unwrap();
        field.update(&sources, 0.5).unwrap();
        assert!(field.heights().iter().all(|h| h.is_finite()));
    }

    #[test]
    fn test_non_finite_time_and_amplitude_rejected() {
        let sources = [unit_source(0.0)];
        assert!(interference_at(DVec2::ZERO, &sources, f64::NAN).is_err());
        assert!(height_at(DVec2::ZERO, &sources, f64::INFINITY).is_err());
        assert!(interference_at(DVec2::new(f64::NAN, 0.0), &sources, 0.0).is_err());

        let loud = WaveSource::new(DVec2::ZERO, 1.0e200, 1.0, 1.0, 0.0);
        assert_eq!(
            interference_at(DVec2::ONE, &[loud, loud], 0.0),
            Err(DomainError::NonFinite { name: "combined intensity" })
        );
    }
}
