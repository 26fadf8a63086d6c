use anyhow::ensure;
use motion::motion::{MAX_ROTATION_LIMIT_MS, MOTOR_FULL_ROTATION_MS, MOTOR_STEP_DURATION_MS};
use motion::panel::SLEEP_DURATION_S;
use motion::{MotorConfig, PanelConfig};
use sensors::light::{DARK_REFERENCE, DIM_REFERENCE};
use sensors::Thresholds;
use serde::{Deserialize, Serialize};

/// Highest code on the comparator reference ladder.
const MAX_REFERENCE: u8 = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub motor: MotorSection,
    pub light: LightSection,
    pub cycle: CycleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorSection {
    pub step_ms: u32,
    pub max_rotation_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSection {
    pub dark_reference: u8,
    pub dim_reference: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSection {
    pub idle_secs: u32,
}

impl Default for MotorSection {
    fn default() -> Self {
        MotorSection {
            step_ms: MOTOR_STEP_DURATION_MS,
            max_rotation_ms: MOTOR_FULL_ROTATION_MS,
        }
    }
}

impl Default for LightSection {
    fn default() -> Self {
        LightSection {
            dark_reference: DARK_REFERENCE,
            dim_reference: DIM_REFERENCE,
        }
    }
}

impl Default for CycleSection {
    fn default() -> Self {
        CycleSection {
            idle_secs: SLEEP_DURATION_S,
        }
    }
}

impl Config {
    /// Loads the configuration compiled into the binary
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::parse(include_str!("../config.toml"))?;
        log::info!("Loaded embedded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.motor.step_ms > 0, "motor.step_ms must be positive");
        ensure!(
            self.motor.max_rotation_ms >= self.motor.step_ms,
            "motor.max_rotation_ms ({}) must be at least motor.step_ms ({})",
            self.motor.max_rotation_ms,
            self.motor.step_ms
        );
        ensure!(
            self.motor.max_rotation_ms <= MAX_ROTATION_LIMIT_MS,
            "motor.max_rotation_ms must be at most {}",
            MAX_ROTATION_LIMIT_MS
        );
        ensure!(
            self.light.dim_reference <= MAX_REFERENCE,
            "light.dim_reference must be at most {}",
            MAX_REFERENCE
        );
        ensure!(
            self.light.dark_reference < self.light.dim_reference,
            "light.dark_reference ({}) must be below light.dim_reference ({})",
            self.light.dark_reference,
            self.light.dim_reference
        );
        ensure!(self.cycle.idle_secs > 0, "cycle.idle_secs must be positive");
        Ok(())
    }
}

// Conversions into the crate-level settings
impl Config {
    pub fn motor(&self) -> MotorConfig {
        MotorConfig {
            step_ms: self.motor.step_ms,
            max_rotation_ms: self.motor.max_rotation_ms,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            dark: self.light.dark_reference,
            dim: self.light.dim_reference,
        }
    }

    pub fn panel(&self) -> PanelConfig {
        PanelConfig {
            idle_secs: self.cycle.idle_secs,
        }
    }
}
