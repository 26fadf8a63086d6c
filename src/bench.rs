//! Host run of the controller over a scripted day, without hardware.

use clock::{Clock, VirtualClock};
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};
use log::info;
use motion::{Motion, Panel};
use sensors::{LightSensor, SimulatedComparator, SunLocator};

use crate::config::Config;

/// Element levels per cycle, from midnight through a day into the next night.
const SKY: [(u8, u8); 16] = [
    (0, 0),
    (1, 0),
    (3, 2),
    (5, 4),
    (7, 10),
    (9, 12),
    (12, 13),
    (14, 14),
    (14, 12),
    (13, 10),
    (11, 8),
    (8, 6),
    (5, 4),
    (3, 2),
    (1, 1),
    (0, 0),
];

#[derive(Default)]
struct BenchPin {
    high: bool,
}

impl ErrorType for BenchPin {
    type Error = Infallible;
}

impl OutputPin for BenchPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    let sky = SimulatedComparator::new(0, 0);
    let time = VirtualClock::new();

    let locator = SunLocator::new(LightSensor::new(sky.clone(), config.thresholds()));
    let motion = Motion::new(BenchPin::default(), BenchPin::default(), config.motor());
    let mut panel = Panel::new(
        locator,
        motion,
        BenchPin::default(),
        Clock::new(time.clone()),
        config.panel(),
    );
    panel.start();

    info!(
        "{:>5} {:>7} {:>7} {:>16} {:>7} {:>13} {:>9}",
        "cycle", "levels", "light", "action", "mode", "displacement", "time (s)"
    );
    for (cycle, (a, b)) in SKY.into_iter().enumerate() {
        sky.set_levels(a, b);
        let report = panel.tick();
        info!(
            "{:>5} {:>7} {:>7} {:>16} {:>7} {:>13} {:>9}",
            cycle,
            format!("{}/{}", a, b),
            format!("{:?}", report.condition),
            format!("{:?}", report.action),
            format!("{:?}", report.next),
            report.displacement,
            time.elapsed_ms() / 1000
        );
    }
    Ok(())
}
