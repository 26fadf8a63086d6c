//! Software stand-in for the comparator peripheral.
//!
//! Levels are expressed on the same scale as the reference ladder codes, so a
//! level of `6` sits exactly at the dim reference. Handles are cheap clones
//! sharing one sky, which lets a test keep a handle while a sensor owns
//! another.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::comparator::{Comparator, SensingElement};

/// A single comparator reading, in the order it was taken.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Reading {
    Threshold { element: SensingElement, reference: u8 },
    Direct,
}

#[derive(Debug, Default)]
struct Sky {
    levels: [u8; 2],
    direct: Option<bool>,
    queued: VecDeque<bool>,
    scheduled: Vec<(usize, [u8; 2])>,
    readings: Vec<Reading>,
    disables: usize,
    powered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedComparator {
    sky: Rc<RefCell<Sky>>,
}

impl SimulatedComparator {
    pub fn new(a: u8, b: u8) -> Self {
        let comparator = SimulatedComparator::default();
        comparator.set_levels(a, b);
        comparator
    }

    pub fn set_levels(&self, a: u8, b: u8) {
        self.sky.borrow_mut().levels = [a, b];
    }

    pub fn set_level(&self, element: SensingElement, level: u8) {
        self.sky.borrow_mut().levels[element.index()] = level;
    }

    pub fn level(&self, element: SensingElement) -> u8 {
        self.sky.borrow().levels[element.index()]
    }

    /// Pins the direct comparison result regardless of the element levels.
    /// `None` goes back to comparing levels.
    pub fn force_direct(&self, a_greater: Option<bool>) {
        self.sky.borrow_mut().direct = a_greater;
    }

    /// Queues direct comparison results to be returned, in order, before
    /// falling back to the forced result or the levels.
    pub fn queue_direct(&self, results: &[bool]) {
        self.sky.borrow_mut().queued.extend(results.iter().copied());
    }

    /// Changes the levels to `a`/`b` once the comparator has been disabled
    /// `after_disables` times in total, i.e. part way through a sequence of
    /// readings.
    pub fn schedule_levels(&self, after_disables: usize, a: u8, b: u8) {
        self.sky.borrow_mut().scheduled.push((after_disables, [a, b]));
    }

    pub fn readings(&self) -> Vec<Reading> {
        self.sky.borrow().readings.clone()
    }

    pub fn clear_readings(&self) {
        self.sky.borrow_mut().readings.clear();
    }

    pub fn disable_count(&self) -> usize {
        self.sky.borrow().disables
    }

    /// Whether the peripheral was left configured after the last reading.
    pub fn is_powered(&self) -> bool {
        self.sky.borrow().powered
    }
}

impl Comparator for SimulatedComparator {
    fn read_threshold(&mut self, element: SensingElement, reference: u8) -> bool {
        let mut sky = self.sky.borrow_mut();
        sky.powered = true;
        sky.readings.push(Reading::Threshold { element, reference });
        sky.levels[element.index()] >= reference
    }

    fn read_direct(&mut self) -> Option<bool> {
        let mut sky = self.sky.borrow_mut();
        sky.powered = true;
        sky.readings.push(Reading::Direct);
        if let Some(a_greater) = sky.queued.pop_front() {
            return Some(a_greater);
        }
        match sky.direct {
            Some(a_greater) => Some(a_greater),
            None => Some(sky.levels[0] > sky.levels[1]),
        }
    }

    fn disable(&mut self) {
        let mut sky = self.sky.borrow_mut();
        sky.powered = false;
        sky.disables += 1;
        let disables = sky.disables;
        if let Some(at) = sky.scheduled.iter().position(|(after, _)| *after == disables) {
            let (_, levels) = sky.scheduled.remove(at);
            sky.levels = levels;
        }
    }
}
