//! Spacetime diagram: lab-frame events viewed from a moving frame

use crate::params::SpacetimeParams;
use physics_core::{boosted_axes, BoostedAxes, Event, Frame, Result};

/// One event in both frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPair {
    pub lab: Event,
    pub moving: Event,
}

#[derive(Debug, Clone, Default)]
pub struct SpacetimeScene {
    frame: Frame,
    events: Vec<Event>,
}

impl SpacetimeScene {
    pub fn new(beta: f64, events: Vec<Event>) -> Result<Self> {
        Ok(Self {
            frame: Frame::new(beta, Event::default())?,
            events,
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Change the frame velocity; `|beta| ≥ 1` is rejected and the current
    /// frame kept
    pub fn set_beta(&mut self, beta: f64) -> Result<()> {
        self.frame = Frame::new(beta, self.frame.position)
            .inspect_err(|e| log::warn!("Rejected frame velocity: {e}"))?;
        Ok(())
    }

    /// Move the origin of the moving frame
    pub fn set_origin(&mut self, origin: Event) {
        self.frame.position = origin;
    }

    pub fn gamma(&self) -> Result<f64> {
        self.frame.gamma()
    }

    /// x′ and t′ axes of the moving frame
    pub fn axes(&self) -> Result<BoostedAxes> {
        boosted_axes(self.frame.beta)
    }

    /// Every event as seen from the moving frame
    pub fn transformed(&self, params: &SpacetimeParams) -> Result<Vec<EventPair>> {
        let pairs = self
            .events
            .iter()
            .map(|&lab| {
                Ok(EventPair {
                    lab,
                    moving: self.frame.boost(lab, params.c)?,
                })
            })
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| log::warn!("Rejected spacetime configuration: {e}"))?;

        log::debug!(
            "Boosted {} events at beta={:.3}",
            pairs.len(),
            self.frame.beta
        );
        Ok(pairs)
    }
}
