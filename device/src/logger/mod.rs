//! Periodic logging of humidity and temperature samples.
//!
//! A [`Logger`] drives any [`HumiditySensor`] at a fixed interval and
//! writes one [`LogRow`] per interval to a [`Sink`] until its
//! [`StopSignal`] fires.

pub mod clock;
pub mod config;
pub mod export;
pub mod sink;
pub mod table;

use crate::domain::temperature::TemperatureUnit;
use crate::domain::Sample;
use crate::kernel::signal::StopSignal;
use crate::traits::sensors::humidity::HumiditySensor;
use clock::Clock;
use core::fmt::Debug;
use sink::{LogRow, Sink};
use std::io;
use std::time::Duration;

pub use config::LoggerConfig;

pub struct Logger {
    interval: Duration,
    unit: TemperatureUnit,
    acquisition_started: bool,
}

impl Logger {
    pub fn new(interval: Duration, unit: TemperatureUnit) -> Self {
        Self {
            interval,
            unit,
            acquisition_started: false,
        }
    }

    pub fn acquisition_started(&self) -> bool {
        self.acquisition_started
    }

    /// Logs until `stop` is signalled and returns the number of rows
    /// written. A sensor failure yields a row without values; a sink
    /// failure ends the loop with that error.
    pub fn run<S, K, C>(
        &mut self,
        sensor: &mut S,
        sink: &mut K,
        clock: &C,
        stop: &StopSignal,
    ) -> io::Result<u64>
    where
        S: HumiditySensor,
        S::Error: Debug,
        K: Sink + ?Sized,
        C: Clock,
    {
        if !sensor.is_periodic() {
            if let Err(e) = sensor.configure_periodic() {
                log::warn!("[logger] unable to switch sensor to periodic mode: {:?}", e);
            }
        }

        let mut written = 0;
        loop {
            let sample = self.poll(sensor);
            let row = LogRow::new(clock.now()?, sample);
            sink.write(&row)?;
            written += 1;
            log::debug!("[logger] {}", row);

            if stop.wait_timeout(self.interval) {
                break;
            }
        }
        log::info!("[logger] stopped after {} rows", written);
        Ok(written)
    }

    fn poll<S>(&mut self, sensor: &mut S) -> Sample
    where
        S: HumiditySensor,
        S::Error: Debug,
    {
        if !self.acquisition_started {
            match sensor.begin_acquisition() {
                Ok(()) => self.acquisition_started = true,
                Err(e) => {
                    log::warn!("[logger] unable to start acquisition: {:?}", e);
                    return Sample::EMPTY;
                }
            }
        }
        sensor.sample(self.unit).unwrap_or_else(|e| {
            log::warn!("[logger] unable to read sensor: {:?}", e);
            Sample::EMPTY
        })
    }
}
