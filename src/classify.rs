/// Temperature classification for the room air conditioner
use std::fmt;

/// Above this temperature the air conditioner is switched to cooling
pub const COOLING_THRESHOLD_C: f32 = 25.0;
/// Above this temperature the room is in a warning state
pub const WARNING_THRESHOLD_C: f32 = 26.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorAction {
    ActiveCooling,
    Standby,
}

impl ActuatorAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActuatorAction::ActiveCooling => "ACTIVE_COOLING",
            ActuatorAction::Standby => "STANDBY",
        }
    }
}

impl fmt::Display for ActuatorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Normal,
    Caution,
    Warning,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "NORMAL",
            Status::Caution => "CAUTION",
            Status::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulated air conditioner action for a temperature
pub fn actuator_action(temperature: f32) -> ActuatorAction {
    if temperature > COOLING_THRESHOLD_C {
        ActuatorAction::ActiveCooling
    } else {
        ActuatorAction::Standby
    }
}

pub fn status(temperature: f32) -> Status {
    if temperature > WARNING_THRESHOLD_C {
        Status::Warning
    } else if temperature > COOLING_THRESHOLD_C {
        Status::Caution
    } else {
        Status::Normal
    }
}

/// Classify a temperature into (action, status). No hysteresis: the result
/// depends on the single value only.
pub fn classify(temperature: f32) -> (ActuatorAction, Status) {
    (actuator_action(temperature), status(temperature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_at_cooling_threshold() {
        assert_eq!(classify(25.0), (ActuatorAction::Standby, Status::Normal));
        assert_eq!(
            classify(25.01),
            (ActuatorAction::ActiveCooling, Status::Caution)
        );
    }

    #[test]
    fn boundary_at_warning_threshold() {
        assert_eq!(status(26.0), Status::Caution);
        assert_eq!(status(26.01), Status::Warning);
        assert_eq!(actuator_action(26.01), ActuatorAction::ActiveCooling);
    }

    #[test]
    fn cold_room_is_normal() {
        assert_eq!(classify(-10.0), (ActuatorAction::Standby, Status::Normal));
    }

    #[test]
    fn labels() {
        assert_eq!(ActuatorAction::ActiveCooling.to_string(), "ACTIVE_COOLING");
        assert_eq!(ActuatorAction::Standby.to_string(), "STANDBY");
        assert_eq!(Status::Warning.to_string(), "WARNING");
        assert_eq!(Status::Caution.as_str(), "CAUTION");
        assert_eq!(Status::Normal.as_str(), "NORMAL");
    }
}
