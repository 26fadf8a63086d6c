use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use log::{debug, info, warn};
use sensors::{Bearing, SensingElement};

pub const MOTOR_STEP_DURATION_MS: u32 = 50;
pub const MOTOR_FULL_ROTATION_MS: u32 = 30 * 1000;
/// Longest drive whose duration still fits the signed displacement.
pub const MAX_ROTATION_LIMIT_MS: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorConfig {
    /// How long the motor runs between two bearing checks.
    pub step_ms: u32,
    /// Upper bound on a single drive.
    pub max_rotation_ms: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        MotorConfig {
            step_ms: MOTOR_STEP_DURATION_MS,
            max_rotation_ms: MOTOR_FULL_ROTATION_MS,
        }
    }
}

/// Writes `high` to `pin`, logging instead of failing.
pub(crate) fn set_pin<P: OutputPin>(pin: &mut P, high: bool, name: &str) {
    if let Err(e) = pin.set_state(PinState::from(high)) {
        warn!("Failed to drive {} {}: {:?}", name, if high { "high" } else { "low" }, e);
    }
}

/// Reversible DC motor behind an enable output and a direction output.
///
/// There is no encoder. The net time the motor has run toward element A minus
/// the time toward element B stands in for the panel's angular offset from
/// its reference orientation.
pub struct Motion<EN, DIR> {
    enable: EN,
    direction: DIR,
    config: MotorConfig,
    displacement: i32,
}

// Direction low: toward A
// Direction high: toward B
impl<EN, DIR> Motion<EN, DIR>
where
    EN: OutputPin,
    DIR: OutputPin,
{
    pub fn new(enable: EN, direction: DIR, config: MotorConfig) -> Motion<EN, DIR> {
        let config = MotorConfig {
            step_ms: config.step_ms.max(1),
            max_rotation_ms: config.max_rotation_ms.min(MAX_ROTATION_LIMIT_MS),
        };
        Motion {
            enable,
            direction,
            config,
            displacement: 0,
        }
    }

    /// Puts both outputs into their idle level.
    pub fn init(&mut self) {
        set_pin(&mut self.enable, false, "motor enable");
        set_pin(&mut self.direction, false, "motor direction");
    }

    pub fn config(&self) -> MotorConfig {
        self.config
    }

    /// Net signed drive time since the last sunrise recovery, in ms.
    /// Positive is toward element A.
    pub fn displacement(&self) -> i32 {
        self.displacement
    }

    /// Runs the motor toward `toward` until the bearing flips to the other
    /// element or the maximum rotation time runs out, whichever comes first.
    ///
    /// The bearing is checked after every step. Returns the signed drive
    /// time that was added to the displacement.
    pub fn drive_toward<B, D>(&mut self, toward: SensingElement, bearing: &mut B, delay: &mut D) -> i32
    where
        B: Bearing,
        D: DelayNs,
    {
        set_pin(&mut self.enable, true, "motor enable");
        set_pin(&mut self.direction, toward == SensingElement::B, "motor direction");

        let mut remaining = self.config.max_rotation_ms;
        while remaining > 0 {
            let step = remaining.min(self.config.step_ms);
            delay.delay_ms(step);
            remaining -= step;

            // The sun now favours the other element, so it has been swept past.
            if let Some(seen) = bearing.locate().element() {
                if seen != toward {
                    debug!("Bearing flipped to {:?}, stopping", seen);
                    break;
                }
            }
        }

        set_pin(&mut self.enable, false, "motor enable");

        let elapsed = i32::try_from(self.config.max_rotation_ms - remaining).unwrap_or(i32::MAX);
        let signed = match toward {
            SensingElement::A => elapsed,
            SensingElement::B => -elapsed,
        };
        self.accumulate(signed);

        if remaining == 0 {
            info!("Drive toward {:?} timed out after {} ms", toward, elapsed);
        } else {
            info!("Drive toward {:?} aligned after {} ms", toward, elapsed);
        }
        info!("Net displacement: {} ms", self.displacement);
        signed
    }

    /// Drives back toward the reference orientation after a night.
    ///
    /// The direction opposes the sign of the displacement (A when it is
    /// negative, otherwise B). The displacement is cleared before the drive,
    /// so afterwards it holds only the recovery drive itself.
    pub fn return_to_sunrise<B, D>(&mut self, bearing: &mut B, delay: &mut D) -> SensingElement
    where
        B: Bearing,
        D: DelayNs,
    {
        let toward = if self.displacement < 0 {
            SensingElement::A
        } else {
            SensingElement::B
        };
        info!(
            "Sunrise recovery: displacement {} ms, driving toward {:?}",
            self.displacement, toward
        );

        self.displacement = 0;
        self.drive_toward(toward, bearing, delay);
        toward
    }

    fn accumulate(&mut self, signed: i32) {
        self.displacement = match self.displacement.checked_add(signed) {
            Some(total) => total,
            None => {
                warn!("Displacement saturated at {} + {}", self.displacement, signed);
                self.displacement.saturating_add(signed)
            }
        };
    }
}
