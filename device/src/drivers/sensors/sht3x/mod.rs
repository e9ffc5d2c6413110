//! Driver for the Sensirion SHT3x-DIS humidity and temperature sensor.
//!
//! The driver owns the bus and a delay source. It keeps the acquisition
//! configuration, the last decoded [`Reading`] and the per-channel
//! data-ready flags. Checksum failures never surface as errors: the
//! affected channel keeps its previous value, its flag is lowered and a
//! warning is logged. Only bus failures and an unknown mode string are
//! reported through [`Error`].

pub mod command;
pub mod config;
pub mod convert;
pub mod crc;
pub mod ready;
pub mod register;

use crate::domain::temperature::TemperatureUnit;
use crate::domain::{Reading, Sample};
use crate::traits::i2c::I2cAddress;
use crate::traits::sensors::humidity::HumiditySensor;
use command::Command;
use config::{Configured, Mode, Rate, Repeatability, SensorConfig};
use convert::{raw_to_celsius, raw_to_fahrenheit, raw_to_humidity};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use ready::{Channel, DataReady};
use register::measurement::Measurement;
use register::status::{Alerts, Status, StatusRead};

/// Address with the ADDR pin pulled low.
pub const ADDR: u8 = 0x44;
/// Address with the ADDR pin pulled high.
pub const ADDR_ALT: u8 = 0x45;

// wait before reading a measurement frame
const FETCH_SETTLE_MS: u32 = 50;
// wait between a periodic fetch command and the frame read
const PERIODIC_FETCH_MS: u32 = 100;
const BREAK_SETTLE_MS: u32 = 50;
const CLEAR_STATUS_SETTLE_MS: u32 = 50;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error<E> {
    I2c(E),
    /// The mode was neither `single-shot` nor `periodic`.
    InvalidMode,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Error<E> {
        Error::I2c(e)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "i2c error: {:?}", e),
            Error::InvalidMode => f.write_str(
                "invalid mode, valid options are \"single-shot\" or \"periodic\"",
            ),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    /// Not configured yet; the power-on defaults apply.
    Idle,
    Configured,
    /// An acquisition command has been sent and no frame fetched since.
    Acquiring,
    /// The last frame decoded on both channels.
    DataReady,
    /// At least one channel of the last frame failed its checksum.
    DataInvalid,
}

pub struct Sht3x<I, D> {
    i2c: I,
    delay: D,
    address: I2cAddress,
    config: SensorConfig,
    state: State,
    ready: DataReady,
    reading: Reading,
}

impl<I, D> Sht3x<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address: I2cAddress::new(address),
            config: SensorConfig::default(),
            state: State::Idle,
            ready: DataReady::default(),
            reading: Reading::default(),
        }
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    pub fn address(&self) -> I2cAddress {
        self.address
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The last decoded values, stale channels included.
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Applies textual settings. Invalid accuracy or rate fall back to
    /// defaults with a warning; an unknown mode is an error and leaves the
    /// current configuration untouched.
    pub fn configure(
        &mut self,
        mode: &str,
        rate: Option<f32>,
        accuracy: &str,
        blocking: bool,
    ) -> Result<Configured, Error<I::Error>> {
        let configured = SensorConfig::parse(mode, rate, accuracy, blocking).map_err(|_| {
            error!("[sht3x] invalid mode \"{}\"", mode);
            Error::InvalidMode
        })?;
        for note in configured.notes.iter() {
            if note.is_warning() {
                warn!("[sht3x] {}", note.message());
            } else {
                info!("[sht3x] {}", note.message());
            }
        }
        self.set_config(configured.config);
        Ok(configured)
    }

    pub fn set_config(&mut self, config: SensorConfig) {
        debug!("[sht3x] configured: {:?}", config);
        self.config = config;
        self.state = State::Configured;
    }

    // ------------------------------------------------------------------------
    // Acquisition
    // ------------------------------------------------------------------------

    /// Sends the acquisition command for the current configuration. In
    /// blocking single-shot mode the frame is fetched right away; otherwise
    /// the caller fetches later.
    pub fn begin_acquisition(&mut self) -> Result<(), Error<I::Error>> {
        let command = Command::acquisition(&self.config);
        self.write_command(command)?;
        self.state = State::Acquiring;
        if self.config.is_blocking() {
            self.fetch()?;
        }
        Ok(())
    }

    /// Reads one measurement frame and decodes each channel that passes
    /// its checksum.
    pub fn fetch(&mut self) -> Result<&Reading, Error<I::Error>> {
        self.delay.delay_ms(FETCH_SETTLE_MS);
        if self.config.is_periodic() {
            self.write_command(Command::FetchData)?;
            self.delay.delay_ms(PERIODIC_FETCH_MS);
        }
        let measurement = Measurement::read(self.address, &mut self.i2c)?;
        self.decode(measurement);
        Ok(&self.reading)
    }

    fn decode(&mut self, measurement: Measurement) {
        match measurement.temperature {
            Some(code) => {
                self.reading.temperature = raw_to_celsius(code).into();
                self.reading.temperature_f = raw_to_fahrenheit(code).into();
                self.reading.temperature_valid = true;
            }
            None => {
                warn!("[sht3x] checksum failed on temperature value reported by sensor");
                self.reading.temperature_valid = false;
            }
        }
        match measurement.humidity {
            Some(code) => {
                self.reading.relative_humidity = raw_to_humidity(code);
                self.reading.humidity_valid = true;
            }
            None => {
                warn!("[sht3x] checksum failed on humidity value reported by sensor");
                self.reading.humidity_valid = false;
            }
        }
        self.ready
            .set(self.reading.temperature_valid, self.reading.humidity_valid);
        self.state = if self.ready.both() {
            State::DataReady
        } else {
            State::DataInvalid
        };
        trace!(
            "[sht3x] temperature={} humidity={}",
            self.reading.temperature.raw_value(),
            self.reading.relative_humidity
        );
    }

    /// True when both channels hold fresh, unconsumed values.
    pub fn is_ready(&self) -> bool {
        self.ready.both()
    }

    /// Consumes a fresh sample. When none is ready a single fetch is tried;
    /// if that still does not produce both channels the sample is empty.
    pub fn sample(&mut self, unit: TemperatureUnit) -> Result<Sample, Error<I::Error>> {
        if let Some(sample) = self.take_sample(unit) {
            return Ok(sample);
        }
        self.fetch()?;
        Ok(self.take_sample(unit).unwrap_or(Sample::EMPTY))
    }

    fn take_sample(&mut self, unit: TemperatureUnit) -> Option<Sample> {
        if self.ready.consume_both() {
            Some(Sample {
                temperature: Some(self.reading.temperature_in(unit)),
                relative_humidity: Some(self.reading.relative_humidity),
            })
        } else {
            None
        }
    }

    /// The last temperature, whether fresh or not. Lowers the temperature
    /// ready flag.
    pub fn temperature(&mut self, unit: TemperatureUnit) -> f32 {
        self.ready.consume(Channel::Temperature);
        self.reading.temperature_in(unit)
    }

    /// The last relative humidity, whether fresh or not. Lowers the
    /// humidity ready flag.
    pub fn humidity(&mut self) -> f32 {
        self.ready.consume(Channel::Humidity);
        self.reading.relative_humidity
    }

    // ------------------------------------------------------------------------
    // Control
    // ------------------------------------------------------------------------

    /// Stops periodic acquisition. Ignored in single-shot mode.
    pub fn stop(&mut self) -> Result<(), Error<I::Error>> {
        if !self.config.is_periodic() {
            info!("[sht3x] not in periodic mode, nothing to stop");
            return Ok(());
        }
        self.write_command(Command::Break)?;
        self.delay.delay_ms(BREAK_SETTLE_MS);
        self.state = State::Configured;
        info!("[sht3x] break command sent to sensor");
        Ok(())
    }

    /// Soft-resets the sensor. The driver keeps its configuration; call
    /// [`Sht3x::configure`] and begin a new acquisition afterwards.
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.write_command(Command::SoftReset)?;
        info!("[sht3x] reset command sent to sensor");
        Ok(())
    }

    pub fn set_heater(&mut self, on: bool) -> Result<(), Error<I::Error>> {
        let command = if on {
            Command::HeaterEnable
        } else {
            Command::HeaterDisable
        };
        self.write_command(command)
    }

    /// Starts accelerated response time mode: periodic acquisition at 4 Hz
    /// with the current repeatability.
    pub fn enable_art(&mut self) -> Result<(), Error<I::Error>> {
        self.write_command(Command::Art)?;
        self.config.mode = Mode::Periodic { rate: Rate::Hz4 };
        self.state = State::Acquiring;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Status register
    // ------------------------------------------------------------------------

    /// Reads the status register. Never cached.
    pub fn read_status(&mut self) -> Result<StatusRead, Error<I::Error>> {
        let status = StatusRead::read(self.address, &mut self.i2c, &mut self.delay)?;
        if status == StatusRead::Corrupt {
            warn!("[sht3x] checksum failed on status register");
        }
        Ok(status)
    }

    fn query_status<F: FnOnce(&Status) -> bool>(&mut self, query: F) -> Result<bool, Error<I::Error>> {
        Ok(self
            .read_status()?
            .valid()
            .map(|status| query(&status))
            .unwrap_or(false))
    }

    pub fn alert_pending(&mut self) -> Result<bool, Error<I::Error>> {
        let pending = self.query_status(Status::alert_pending)?;
        if pending {
            info!("[sht3x] alert pending");
        }
        Ok(pending)
    }

    /// Whether the last command was executed. False on a corrupt status.
    pub fn command_succeeded(&mut self) -> Result<bool, Error<I::Error>> {
        self.query_status(|s| !s.command_failed())
    }

    /// Whether the checksum of the last write was correct. False on a
    /// corrupt status.
    pub fn write_checksum_ok(&mut self) -> Result<bool, Error<I::Error>> {
        self.query_status(|s| !s.write_checksum_failed())
    }

    pub fn heater_on(&mut self) -> Result<bool, Error<I::Error>> {
        self.query_status(Status::heater_on)
    }

    /// Returns the tracking and reset alerts that are set and clears the
    /// status register. A corrupt status yields no alerts and is not
    /// cleared.
    pub fn consume_alerts(&mut self) -> Result<Alerts, Error<I::Error>> {
        let status = match self.read_status()?.valid() {
            Some(status) => status,
            None => return Ok(Alerts::new()),
        };
        let alerts = status.alerts();
        for alert in alerts.iter() {
            info!("[sht3x] alert: {:?}", alert);
        }
        self.write_command(Command::ClearStatus)?;
        self.delay.delay_ms(CLEAR_STATUS_SETTLE_MS);
        Ok(alerts)
    }

    fn write_command(&mut self, command: Command) -> Result<(), Error<I::Error>> {
        trace!("[sht3x] command {:#x}", command.code());
        self.i2c.write(self.address.into(), &command.to_bytes())?;
        Ok(())
    }
}

impl<I, D> HumiditySensor for Sht3x<I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = Error<I::Error>;

    fn is_periodic(&self) -> bool {
        self.config.is_periodic()
    }

    fn configure_periodic(&mut self) -> Result<(), Self::Error> {
        self.set_config(SensorConfig::periodic(Rate::Hz1, Repeatability::Medium));
        Ok(())
    }

    fn begin_acquisition(&mut self) -> Result<(), Self::Error> {
        Sht3x::begin_acquisition(self)
    }

    fn sample(&mut self, unit: TemperatureUnit) -> Result<Sample, Self::Error> {
        Sht3x::sample(self, unit)
    }
}
