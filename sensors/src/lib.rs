//! Light sensing for the tracker: light classification and sun bearing on
//! top of a two-element comparator.

pub mod comparator;
pub mod light;
pub mod locator;
pub mod sampled;
pub mod simulated;

pub use comparator::{Comparator, SensingElement};
pub use light::{LightCondition, LightSensor, Thresholds};
pub use locator::{Bearing, SunDirection, SunLocator};
pub use sampled::{LevelSource, SampledComparator};
pub use simulated::SimulatedComparator;
