use log::debug;

use crate::comparator::{Comparator, SensingElement};
use crate::light::{LightCondition, LightSensor};

/// Which sensing element the sun currently favours.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum SunDirection {
    TowardElementA,
    TowardElementB,
    /// Not enough light for the comparison to mean anything.
    Indeterminate,
}

impl SunDirection {
    pub fn toward(element: SensingElement) -> SunDirection {
        match element {
            SensingElement::A => SunDirection::TowardElementA,
            SensingElement::B => SunDirection::TowardElementB,
        }
    }

    pub fn element(&self) -> Option<SensingElement> {
        match self {
            SunDirection::TowardElementA => Some(SensingElement::A),
            SunDirection::TowardElementB => Some(SensingElement::B),
            SunDirection::Indeterminate => None,
        }
    }
}

/// Anything that can report the sun's bearing relative to the two elements.
pub trait Bearing {
    fn locate(&mut self) -> SunDirection;
}

pub struct SunLocator<C> {
    light: LightSensor<C>,
}

impl<C> SunLocator<C>
where
    C: Comparator,
{
    pub fn new(light: LightSensor<C>) -> Self {
        SunLocator { light }
    }

    pub fn classify(&mut self) -> LightCondition {
        self.light.classify()
    }

    pub fn light_mut(&mut self) -> &mut LightSensor<C> {
        &mut self.light
    }

    /// Re-classifies the light and, only in full daylight, compares the two
    /// elements directly.
    pub fn locate(&mut self) -> SunDirection {
        let condition = self.light.classify();
        if condition != LightCondition::Bright {
            debug!("Sun direction indeterminate in {:?} light", condition);
            return SunDirection::Indeterminate;
        }

        let comparator = self.light.comparator_mut();
        let reading = comparator.read_direct();
        comparator.disable();

        match reading {
            Some(true) => SunDirection::TowardElementA,
            Some(false) => SunDirection::TowardElementB,
            None => {
                debug!("Direct comparison failed, sun direction indeterminate");
                SunDirection::Indeterminate
            }
        }
    }
}

impl<C: Comparator> Bearing for SunLocator<C> {
    fn locate(&mut self) -> SunDirection {
        SunLocator::locate(self)
    }
}
