use log::debug;

use crate::comparator::{Comparator, SensingElement};

pub const DARK_REFERENCE: u8 = 2;
pub const DIM_REFERENCE: u8 = 6;

/// Ambient light, ordered from least to most illumination.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
pub enum LightCondition {
    Dark,
    Dim,
    Bright,
}

impl LightCondition {
    pub const ALL: [LightCondition; 3] = [
        LightCondition::Dark,
        LightCondition::Dim,
        LightCondition::Bright,
    ];
}

/// Comparator reference ladder codes separating the light conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Below this the panel is in the dark.
    pub dark: u8,
    /// Below this (and not dark) the light is too dim to track.
    pub dim: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            dark: DARK_REFERENCE,
            dim: DIM_REFERENCE,
        }
    }
}

impl Thresholds {
    /// Reference code for a condition; `Bright` has none, it is whatever is
    /// left once the other thresholds fail.
    pub fn reference(&self, condition: LightCondition) -> Option<u8> {
        match condition {
            LightCondition::Dark => Some(self.dark),
            LightCondition::Dim => Some(self.dim),
            LightCondition::Bright => None,
        }
    }
}

pub struct LightSensor<C> {
    comparator: C,
    thresholds: Thresholds,
}

impl<C> LightSensor<C>
where
    C: Comparator,
{
    pub fn new(comparator: C, thresholds: Thresholds) -> Self {
        LightSensor {
            comparator,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn comparator_mut(&mut self) -> &mut C {
        &mut self.comparator
    }

    /// Classifies ambient light, checking the most restrictive threshold
    /// first. Anything that satisfies neither threshold is `Bright`.
    pub fn classify(&mut self) -> LightCondition {
        for condition in [LightCondition::Dark, LightCondition::Dim] {
            if let Some(reference) = self.thresholds.reference(condition) {
                if self.meets_threshold(reference) {
                    return condition;
                }
            }
        }
        LightCondition::Bright
    }

    /// True when light is below `reference` on both elements.
    ///
    /// Element A is read first; if it is already at or above the reference the
    /// check fails without consulting element B. The comparator is left
    /// disabled on both exits.
    pub fn meets_threshold(&mut self, reference: u8) -> bool {
        let a_above = self.comparator.read_threshold(SensingElement::A, reference);
        if a_above {
            self.comparator.disable();
            debug!("Reference {}: element A at or above, not met", reference);
            return false;
        }

        let b_above = self.comparator.read_threshold(SensingElement::B, reference);
        self.comparator.disable();
        debug!("Reference {}: element B above = {}", reference, b_above);
        !b_above
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::{Reading, SimulatedComparator};

    fn sensor(a: u8, b: u8) -> (LightSensor<SimulatedComparator>, SimulatedComparator) {
        let sky = SimulatedComparator::new(a, b);
        (LightSensor::new(sky.clone(), Thresholds::default()), sky)
    }

    #[test]
    fn test_classify_levels() {
        assert_eq!(sensor(0, 0).0.classify(), LightCondition::Dark);
        assert_eq!(sensor(1, 1).0.classify(), LightCondition::Dark);
        assert_eq!(sensor(2, 2).0.classify(), LightCondition::Dim);
        assert_eq!(sensor(5, 5).0.classify(), LightCondition::Dim);
        assert_eq!(sensor(6, 6).0.classify(), LightCondition::Bright);
        assert_eq!(sensor(15, 15).0.classify(), LightCondition::Bright);
    }

    #[test]
    fn test_classify_is_monotonic_in_illumination() {
        let (mut light, sky) = sensor(0, 0);
        let mut previous = LightCondition::Dark;
        for level in 0..=15 {
            sky.set_levels(level, level);
            let condition = light.classify();
            assert!(
                condition >= previous,
                "level {} reported {:?} after {:?}",
                level,
                condition,
                previous
            );
            previous = condition;
        }
        assert_eq!(previous, LightCondition::Bright);
    }

    #[test]
    fn test_one_bright_element_fails_the_threshold() {
        // Either element at or above the reference means the threshold is not met.
        assert_eq!(sensor(9, 0).0.classify(), LightCondition::Bright);
        assert_eq!(sensor(0, 9).0.classify(), LightCondition::Bright);
        assert_eq!(sensor(1, 4).0.classify(), LightCondition::Dim);
    }

    #[test]
    fn test_first_reading_short_circuits() {
        let (mut light, sky) = sensor(7, 0);
        assert!(!light.meets_threshold(DARK_REFERENCE));
        assert_eq!(
            sky.readings(),
            vec![Reading::Threshold {
                element: SensingElement::A,
                reference: DARK_REFERENCE
            }]
        );
        assert!(!sky.is_powered());
        assert_eq!(sky.disable_count(), 1);
    }

    #[test]
    fn test_second_reading_confirms() {
        let (mut light, sky) = sensor(0, 0);
        assert!(light.meets_threshold(DIM_REFERENCE));
        assert_eq!(
            sky.readings(),
            vec![
                Reading::Threshold {
                    element: SensingElement::A,
                    reference: DIM_REFERENCE
                },
                Reading::Threshold {
                    element: SensingElement::B,
                    reference: DIM_REFERENCE
                },
            ]
        );
        assert!(!sky.is_powered());
    }

    #[test]
    fn test_classify_leaves_comparator_disabled() {
        for level in [0, 3, 12] {
            let (mut light, sky) = sensor(level, level);
            light.classify();
            assert!(!sky.is_powered());
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let sky = SimulatedComparator::new(4, 4);
        let mut light = LightSensor::new(sky, Thresholds { dark: 5, dim: 8 });
        assert_eq!(light.classify(), LightCondition::Dark);
    }
}
