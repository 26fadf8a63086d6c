// Operating modes of the panel and the transition table between them.
// To add or modify states, edit this file only.

use sensors::LightCondition;

/// - Bright: full daylight, actively following the sun
/// - Dim: some light but too little to track, holding position
/// - Dark: night, waiting for the first light to run sunrise recovery
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum OperatingMode {
    #[default]
    Bright,
    Dim,
    Dark,
}

/// What the controller does during a cycle before committing the next mode.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Action {
    Hold,
    /// Drive toward the located sun, if it can be located.
    Track,
    /// Return toward the reference orientation ahead of sunrise.
    SunriseRecovery,
}

impl OperatingMode {
    pub const ALL: [OperatingMode; 3] = [
        OperatingMode::Bright,
        OperatingMode::Dim,
        OperatingMode::Dark,
    ];

    /// Check if the panel is following the sun in this mode
    pub fn is_tracking(&self) -> bool {
        matches!(self, OperatingMode::Bright)
    }

    /// The status indicator is lit while handling the dark mode
    pub fn indicator(&self) -> bool {
        matches!(self, OperatingMode::Dark)
    }
}

/// Total transition table over every mode and observed light condition.
pub fn transition(mode: OperatingMode, condition: LightCondition) -> (Action, OperatingMode) {
    use LightCondition as L;
    use OperatingMode as M;

    match (mode, condition) {
        (M::Bright, L::Dark) => (Action::Hold, M::Dark),
        (M::Bright, L::Dim) => (Action::Hold, M::Dim),
        (M::Bright, L::Bright) => (Action::Track, M::Bright),

        (M::Dim, L::Dark) => (Action::Hold, M::Dark),
        (M::Dim, L::Dim) => (Action::Hold, M::Dim),
        (M::Dim, L::Bright) => (Action::Hold, M::Bright),

        (M::Dark, L::Dark) => (Action::Hold, M::Dark),
        (M::Dark, L::Dim) => (Action::SunriseRecovery, M::Dim),
        (M::Dark, L::Bright) => (Action::Hold, M::Bright),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_bright() {
        assert_eq!(OperatingMode::default(), OperatingMode::Bright);
    }

    #[test]
    fn test_transition_table() {
        use LightCondition as L;
        use OperatingMode as M;

        let expected = [
            (M::Bright, L::Dark, Action::Hold, M::Dark),
            (M::Bright, L::Dim, Action::Hold, M::Dim),
            (M::Bright, L::Bright, Action::Track, M::Bright),
            (M::Dim, L::Dark, Action::Hold, M::Dark),
            (M::Dim, L::Dim, Action::Hold, M::Dim),
            (M::Dim, L::Bright, Action::Hold, M::Bright),
            (M::Dark, L::Dark, Action::Hold, M::Dark),
            (M::Dark, L::Dim, Action::SunriseRecovery, M::Dim),
            (M::Dark, L::Bright, Action::Hold, M::Bright),
        ];

        for (mode, condition, action, next) in expected {
            assert_eq!(transition(mode, condition), (action, next), "{:?} x {:?}", mode, condition);
        }
    }

    #[test]
    fn test_transition_is_total_and_deterministic() {
        for mode in OperatingMode::ALL {
            for condition in LightCondition::ALL {
                let first = transition(mode, condition);
                assert_eq!(first, transition(mode, condition));
                assert!(OperatingMode::ALL.contains(&first.1));
            }
        }
    }

    #[test]
    fn test_only_bright_tracks_and_only_dark_recovers() {
        for mode in OperatingMode::ALL {
            for condition in LightCondition::ALL {
                match transition(mode, condition).0 {
                    Action::Track => assert!(mode.is_tracking()),
                    Action::SunriseRecovery => assert_eq!(mode, OperatingMode::Dark),
                    Action::Hold => {}
                }
            }
        }
    }

    #[test]
    fn test_indicator_only_in_dark() {
        assert!(OperatingMode::Dark.indicator());
        assert!(!OperatingMode::Dim.indicator());
        assert!(!OperatingMode::Bright.indicator());
    }
}
