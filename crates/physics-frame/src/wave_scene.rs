//! Wave interference scene
//!
//! The static intensity surface is rebuilt only when the sources or grid
//! change; the traveling height field is refilled every frame.

use crate::params::WaveParams;
use physics_core::{
    sample_interference, ChangeDetector, GridSpec, HeightField, InterferencePattern, Result,
    WaveSource,
};

/// Inputs of the static surface
#[derive(Debug, Clone, PartialEq)]
pub struct WaveInput {
    pub sources: Vec<WaveSource>,
    pub grid: GridSpec,
    pub pattern_time: f64,
}

#[derive(Debug, Clone)]
pub struct WaveScene {
    input: WaveInput,
    pattern: ChangeDetector<WaveInput, InterferencePattern>,
    height: HeightField,
    time: f64,
}

impl WaveScene {
    pub fn new(sources: Vec<WaveSource>, params: &WaveParams) -> Result<Self> {
        Ok(Self {
            input: WaveInput {
                sources,
                grid: params.grid,
                pattern_time: params.pattern_time,
            },
            pattern: ChangeDetector::new(),
            height: HeightField::new(params.grid)?,
            time: 0.0,
        })
    }

    pub fn sources(&self) -> &[WaveSource] {
        &self.input.sources
    }

    pub fn set_sources(&mut self, sources: Vec<WaveSource>) {
        self.input.sources = sources;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Pick up grid and pattern-time edits
    pub fn apply_params(&mut self, params: &WaveParams) -> Result<()> {
        if params.grid != self.height.grid() {
            self.height = HeightField::new(params.grid)
                .inspect_err(|e| log::warn!("Rejected wave grid: {e}"))?;
        }
        self.input.grid = params.grid;
        self.input.pattern_time = params.pattern_time;
        Ok(())
    }

    /// Static interference intensity, rebuilt on change only
    pub fn pattern(&mut self) -> Result<&InterferencePattern> {
        self.pattern
            .get_or_rebuild(&self.input, |input| {
                let pattern = sample_interference(&input.sources, input.grid, input.pattern_time)?;
                log::info!(
                    "Interference surface rebuilt: {}x{} points, {} sources, peak {:.3}",
                    input.grid.resolution,
                    input.grid.resolution,
                    input.sources.len(),
                    pattern.max_intensity
                );
                Ok(pattern)
            })
            .inspect_err(|e| log::warn!("Rejected wave configuration: {e}"))
    }

    pub fn rebuilds(&self) -> u64 {
        self.pattern.rebuilds()
    }

    /// Advance time by `dt`·`time_scale` and refill the height field
    pub fn advance(&mut self, dt: f64, params: &WaveParams) -> Result<&HeightField> {
        let time = self.time + dt * params.time_scale;
        self.height
            .update(&self.input.sources, time)
            .inspect_err(|e| log::warn!("Rejected wave frame: {e}"))?;
        self.time = time;
        Ok(&self.height)
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height
    }
}
