// Test doubles for output pins and bearings.

use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use sensors::{Bearing, SunDirection};

/// Output pin recording every level written to it. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        RecordingPin::default()
    }

    pub fn is_high(&self) -> bool {
        self.levels.borrow().last().copied().unwrap_or(false)
    }

    pub fn levels(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }

    /// Number of low-to-high edges written so far.
    pub fn rising_edges(&self) -> usize {
        let levels = self.levels.borrow();
        let mut previous = false;
        let mut edges = 0;
        for &level in levels.iter() {
            if level && !previous {
                edges += 1;
            }
            previous = level;
        }
        edges
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

/// Bearing that replays a script, then repeats its fallback forever.
pub struct ScriptedBearing {
    script: VecDeque<SunDirection>,
    fallback: SunDirection,
    pub calls: usize,
}

impl ScriptedBearing {
    pub fn new(script: &[SunDirection], fallback: SunDirection) -> Self {
        ScriptedBearing {
            script: script.iter().copied().collect(),
            fallback,
            calls: 0,
        }
    }

    pub fn constant(direction: SunDirection) -> Self {
        ScriptedBearing::new(&[], direction)
    }
}

impl Bearing for ScriptedBearing {
    fn locate(&mut self) -> SunDirection {
        self.calls += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
