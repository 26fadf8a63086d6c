pub mod motion;
pub mod panel;
pub mod states;

#[cfg(test)]
mod testing;

pub use motion::{MotorConfig, Motion};
pub use panel::{CycleReport, Panel, PanelConfig};
pub use states::{transition, Action, OperatingMode};
