//! Quantum tunneling plot

use crate::params::BarrierParams;
use physics_core::{
    sample_wavefunction, tunneling_for, BarrierConfig, ChangeDetector, Result, TunnelingResult,
    WavefunctionSample,
};

/// Transmission figures plus the sampled wavefunction for one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BarrierPlot {
    pub result: TunnelingResult,
    pub samples: Vec<WavefunctionSample>,
}

#[derive(Debug, Clone)]
pub struct BarrierScene {
    config: BarrierConfig,
    plot: ChangeDetector<(BarrierConfig, BarrierParams), BarrierPlot>,
}

impl BarrierScene {
    pub fn new(config: BarrierConfig) -> Self {
        Self {
            config,
            plot: ChangeDetector::new(),
        }
    }

    pub fn config(&self) -> &BarrierConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BarrierConfig) {
        self.config = config;
    }

    /// Slider edit of the particle energy (eV)
    pub fn set_energy(&mut self, energy: f64) {
        self.config.energy = energy;
    }

    /// Plot for the current configuration; recomputed on change only
    pub fn plot(&mut self, params: &BarrierParams) -> Result<&BarrierPlot> {
        self.plot
            .get_or_rebuild(&(self.config, *params), |(config, params)| {
                let result = tunneling_for(config)?;
                let samples =
                    sample_wavefunction(config, params.x_min, params.x_max, params.samples)?;
                log::info!(
                    "Barrier plot rebuilt: E={:.3} eV, V0={:.3} eV, T={:.4e}",
                    config.energy,
                    config.barrier_height,
                    result.transmission_probability
                );
                Ok(BarrierPlot { result, samples })
            })
            .inspect_err(|e| log::warn!("Rejected barrier configuration: {e}"))
    }

    /// Last successfully computed plot
    pub fn last_plot(&self) -> Option<&BarrierPlot> {
        self.plot.get()
    }
}
