pub mod temperature;

use core::fmt::{Debug, Formatter};
use temperature::*;

/// The last decoded measurement of both channels.
///
/// A channel's value is only meaningful while its `*_valid` flag is set.
/// When a channel fails its checksum the flag is cleared but the previous
/// value is kept, so a stale value can be observed through the accessors.
#[derive(Copy, Clone, PartialEq)]
pub struct Reading {
    pub temperature: Temperature<Celsius>,
    pub temperature_f: Temperature<Fahrenheit>,
    pub relative_humidity: f32,
    pub temperature_valid: bool,
    pub humidity_valid: bool,
}

impl Reading {
    pub fn temperature_in(&self, unit: TemperatureUnit) -> f32 {
        match unit {
            TemperatureUnit::Celsius => self.temperature.raw_value(),
            TemperatureUnit::Fahrenheit => self.temperature_f.raw_value(),
        }
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            temperature: Temperature::new(0.0),
            temperature_f: Temperature::new(0.0),
            relative_humidity: 0.0,
            temperature_valid: false,
            humidity_valid: false,
        }
    }
}

impl Debug for Reading {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reading")
            .field("temperature", &self.temperature)
            .field("temperature_f", &self.temperature_f)
            .field("relative_humidity", &self.relative_humidity)
            .field("temperature_valid", &self.temperature_valid)
            .field("humidity_valid", &self.humidity_valid)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reading {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(
            f,
            "Reading(temperature: {}, relative_humidity: {}, valid: {}/{})",
            &self.temperature,
            &self.relative_humidity,
            self.temperature_valid,
            self.humidity_valid,
        );
    }
}

/// A consumed sample: either both channels or neither.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    pub temperature: Option<f32>,
    pub relative_humidity: Option<f32>,
}

impl Sample {
    pub const EMPTY: Sample = Sample {
        temperature: None,
        relative_humidity: None,
    };

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.relative_humidity.is_none()
    }
}
