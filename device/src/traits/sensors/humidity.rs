use crate::domain::{temperature::TemperatureUnit, Sample};

/// A combined temperature and relative humidity sensor that can free-run
/// periodic acquisitions and be polled for samples.
pub trait HumiditySensor {
    type Error;

    /// Whether the sensor is currently configured for periodic acquisition.
    fn is_periodic(&self) -> bool;

    /// Switch to periodic acquisition at the default rate and repeatability.
    fn configure_periodic(&mut self) -> Result<(), Self::Error>;

    /// Start acquisition with the current configuration.
    fn begin_acquisition(&mut self) -> Result<(), Self::Error>;

    /// Take one sample, consuming the ready state.
    fn sample(&mut self, unit: TemperatureUnit) -> Result<Sample, Self::Error>;
}
