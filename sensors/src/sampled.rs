//! Comparator built from sampled levels of the two elements.
//!
//! For parts without an analog comparator: an ADC (or anything else that can
//! produce a level per element) stands in, and the comparisons are made in
//! software. The sampler is started on the first reading and kept running
//! until `disable`, so back-to-back readings never restart it.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::comparator::{Comparator, SensingElement};

pub const SETTLE_MS: u32 = 1;
/// Steps in the low range of the reference ladder the codes come from.
pub const LADDER_STEPS: u32 = 24;

/// Source of raw levels for elements A and B.
pub trait LevelSource {
    type Error: Debug;

    fn start(&mut self) -> Result<(), Self::Error>;

    /// One averaged level per element, indexed by `SensingElement::index`.
    fn sample(&mut self) -> Result<[u32; 2], Self::Error>;

    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Raw level corresponding to the top of the reference ladder.
    fn full_scale(&self) -> u32;
}

pub struct SampledComparator<S, D> {
    source: S,
    delay: D,
    running: bool,
}

impl<S, D> SampledComparator<S, D>
where
    S: LevelSource,
    D: DelayNs,
{
    pub fn new(source: S, delay: D) -> Self {
        SampledComparator {
            source,
            delay,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn reference_level(&self, reference: u8) -> u32 {
        reference as u32 * self.source.full_scale() / LADDER_STEPS
    }

    /// Both element levels, or `None` if the source failed.
    fn levels(&mut self) -> Option<[u32; 2]> {
        if !self.running {
            if let Err(e) = self.source.start() {
                warn!("Failed to start level source: {:?}", e);
                return None;
            }
            self.running = true;
        }
        self.delay.delay_ms(SETTLE_MS);

        match self.source.sample() {
            Ok(levels) => Some(levels),
            Err(e) => {
                warn!("Failed to sample levels: {:?}", e);
                None
            }
        }
    }
}

impl<S, D> Comparator for SampledComparator<S, D>
where
    S: LevelSource,
    D: DelayNs,
{
    /// A failed sample reads as below the reference, so a broken source
    /// never classifies as daylight.
    fn read_threshold(&mut self, element: SensingElement, reference: u8) -> bool {
        let threshold = self.reference_level(reference);
        match self.levels() {
            Some(levels) => {
                let level = levels[element.index()];
                debug!("{:?}: {} vs reference {}", element, level, threshold);
                level >= threshold
            }
            None => false,
        }
    }

    fn read_direct(&mut self) -> Option<bool> {
        self.levels().map(|[a, b]| a > b)
    }

    fn disable(&mut self) {
        if !self.running {
            return;
        }
        if let Err(e) = self.source.stop() {
            warn!("Failed to stop level source: {:?}", e);
        }
        self.running = false;
    }
}
