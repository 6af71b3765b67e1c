//! Electric field-line bundle, retraced only when charges or tracing
//! parameters change

use physics_core::{trace_bundle, ChangeDetector, Charge, FieldTraceConfig, Result, TracedLine};

/// Everything the bundle depends on
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    pub charges: Vec<Charge>,
    pub config: FieldTraceConfig,
}

#[derive(Debug, Clone)]
pub struct FieldScene {
    input: FieldInput,
    bundle: ChangeDetector<FieldInput, Vec<TracedLine>>,
}

impl FieldScene {
    pub fn new(charges: Vec<Charge>, config: FieldTraceConfig) -> Self {
        Self {
            input: FieldInput { charges, config },
            bundle: ChangeDetector::new(),
        }
    }

    pub fn charges(&self) -> &[Charge] {
        &self.input.charges
    }

    pub fn set_charges(&mut self, charges: Vec<Charge>) {
        self.input.charges = charges;
    }

    pub fn set_config(&mut self, config: FieldTraceConfig) {
        self.input.config = config;
    }

    /// Move one charge, e.g. while the user drags it
    pub fn move_charge(&mut self, index: usize, position: glam::DVec3) {
        if let Some(charge) = self.input.charges.get_mut(index) {
            charge.position = position;
        }
    }

    /// Field lines for the current input; retraced only when it changed.
    /// A rejected input keeps the previous bundle available via
    /// [`FieldScene::last_lines`].
    pub fn lines(&mut self) -> Result<&[TracedLine]> {
        let lines = self
            .bundle
            .get_or_rebuild(&self.input, |input| {
                let lines = trace_bundle(&input.charges, &input.config)?;
                log::info!(
                    "Field bundle rebuilt: {} lines from {} charges",
                    lines.len(),
                    input.charges.len()
                );
                Ok(lines)
            })
            .inspect_err(|e| log::warn!("Rejected field configuration: {e}"))?;
        Ok(lines.as_slice())
    }

    pub fn last_lines(&self) -> Option<&[TracedLine]> {
        self.bundle.get().map(Vec::as_slice)
    }

    pub fn rebuilds(&self) -> u64 {
        self.bundle.rebuilds()
    }
}
