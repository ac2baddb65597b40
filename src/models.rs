use time::OffsetDateTime;

use crate::classify::{ActuatorAction, Status};

// Validity bounds for room sensor readings
pub const MIN_TEMPERATURE_C: f32 = -50.0; // exclusive
pub const MAX_TEMPERATURE_C: f32 = 100.0; // exclusive
pub const MIN_HUMIDITY_PCT: f32 = 0.0;
pub const MAX_HUMIDITY_PCT: f32 = 100.0;

/// One room sensor observation as delivered by the data source
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: OffsetDateTime,
    pub time_label: String,
    pub temperature: f32,
    pub humidity: f32,
}

impl Reading {
    pub fn new(
        timestamp: OffsetDateTime,
        time_label: impl Into<String>,
        temperature: f32,
        humidity: f32,
    ) -> Self {
        Reading {
            timestamp,
            time_label: time_label.into(),
            temperature,
            humidity,
        }
    }

    /// A reading is valid when both values are finite and physically plausible.
    ///
    /// Invalid readings stay in the history but never reach derived outputs.
    pub fn is_valid(&self) -> bool {
        self.temperature.is_finite()
            && self.humidity.is_finite()
            && self.temperature > MIN_TEMPERATURE_C
            && self.temperature < MAX_TEMPERATURE_C
            && self.humidity >= MIN_HUMIDITY_PCT
            && self.humidity <= MAX_HUMIDITY_PCT
    }

    pub fn value(&self, field: Field) -> f32 {
        match field {
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Humidity,
}

/// Point of the fixed-cadence chart series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub time_label: String,
    pub temperature: f32,
    pub humidity: f32,
}

/// Classified fixed-cadence table row, most recent first
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub time_label: String,
    pub temperature: f32,
    pub humidity: f32,
    pub actuator_action: ActuatorAction,
    pub status: Status,
}

/// Averages over a raw history window. `None` means no data, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollingStats {
    pub avg_temperature: Option<f32>,
    pub avg_humidity: Option<f32>,
    pub samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn reading(temperature: f32, humidity: f32) -> Reading {
        Reading::new(datetime!(2024-05-01 10:10 UTC), "10:10", temperature, humidity)
    }

    #[test]
    fn validity_bounds() {
        assert!(reading(25.0, 60.0).is_valid());
        assert!(reading(-49.9, 0.0).is_valid());
        assert!(reading(99.9, 100.0).is_valid());

        assert!(!reading(-50.0, 50.0).is_valid());
        assert!(!reading(100.0, 50.0).is_valid());
        assert!(!reading(20.0, -0.1).is_valid());
        assert!(!reading(20.0, 100.1).is_valid());
        assert!(!reading(f32::NAN, 50.0).is_valid());
        assert!(!reading(20.0, f32::INFINITY).is_valid());
    }

    #[test]
    fn value_selects_field() {
        let r = reading(21.5, 40.0);
        assert_eq!(r.value(Field::Temperature), 21.5);
        assert_eq!(r.value(Field::Humidity), 40.0);
    }
}
