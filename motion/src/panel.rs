use clock::Clock;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info};
use sensors::{Comparator, LightCondition, SunLocator};

use crate::motion::{set_pin, Motion};
use crate::states::{transition, Action, OperatingMode};

pub const SLEEP_DURATION_S: u32 = 60 * 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelConfig {
    /// Idle period between two cycles.
    pub idle_secs: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        PanelConfig {
            idle_secs: SLEEP_DURATION_S,
        }
    }
}

/// Outcome of one controller cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub previous: OperatingMode,
    pub condition: LightCondition,
    pub action: Action,
    pub next: OperatingMode,
    pub displacement: i32,
}

/// The tracker's top-level state machine.
///
/// Owns every piece of state that survives a cycle: the operating mode and,
/// through `Motion`, the displacement accumulator.
pub struct Panel<C, EN, DIR, IND, D> {
    locator: SunLocator<C>,
    motion: Motion<EN, DIR>,
    indicator: IND,
    clock: Clock<D>,
    config: PanelConfig,
    mode: OperatingMode,
}

impl<C, EN, DIR, IND, D> Panel<C, EN, DIR, IND, D>
where
    C: Comparator,
    EN: OutputPin,
    DIR: OutputPin,
    IND: OutputPin,
    D: DelayNs,
{
    pub fn new(
        locator: SunLocator<C>,
        motion: Motion<EN, DIR>,
        indicator: IND,
        clock: Clock<D>,
        config: PanelConfig,
    ) -> Self {
        Panel {
            locator,
            motion,
            indicator,
            clock,
            config,
            mode: OperatingMode::default(),
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn motion(&self) -> &Motion<EN, DIR> {
        &self.motion
    }

    /// Idles the motor outputs and lights the status indicator until the
    /// first cycle takes over.
    pub fn start(&mut self) {
        self.motion.init();
        set_pin(&mut self.indicator, true, "status indicator");
        info!("Panel starting in {:?} mode", self.mode);
    }

    /// Reads the light, runs the current mode's behaviour and commits the
    /// next mode. Does not idle.
    pub fn cycle(&mut self) -> CycleReport {
        let previous = self.mode;
        set_pin(&mut self.indicator, previous.indicator(), "status indicator");

        let condition = self.locator.classify();
        let (action, next) = transition(previous, condition);

        match action {
            Action::Hold => {}
            Action::Track => match self.locator.locate().element() {
                Some(toward) => {
                    self.motion.drive_toward(toward, &mut self.locator, &mut self.clock);
                }
                None => debug!("Sun could not be located, not tracking"),
            },
            Action::SunriseRecovery => {
                self.motion.return_to_sunrise(&mut self.locator, &mut self.clock);
            }
        }

        if next != previous {
            info!("Mode {:?} -> {:?} ({:?} light)", previous, next, condition);
        }
        self.mode = next;

        CycleReport {
            previous,
            condition,
            action,
            next,
            displacement: self.motion.displacement(),
        }
    }

    /// One cycle followed by the idle period.
    pub fn tick(&mut self) -> CycleReport {
        let report = self.cycle();
        info!(
            "Cycle: {:?} light, {:?}, mode {:?}, displacement {} ms",
            report.condition, report.action, report.next, report.displacement
        );
        self.clock.sleep_secs(self.config.idle_secs);
        report
    }

    /// Runs until power is removed.
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.tick();
        }
    }
}
