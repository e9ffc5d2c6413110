#![macro_use]
#![cfg_attr(not(feature = "std"), no_std)]
//! Driver and periodic data logger for the Sensirion SHT3x-DIS digital
//! humidity and temperature sensor.
//!
//! The [`drivers::sensors::sht3x`] module holds the sensor protocol: the
//! command table, the CRC-8 frame checksum, raw-to-physical conversion,
//! the acquisition state machine and status register decoding. It only
//! needs the `embedded-hal` I2C and delay traits, and works without `std`.
//!
//! With the `std` feature the [`logger`] module drives a sensor at a fixed
//! interval and writes each sample to a [`logger::sink::Sink`], until a
//! [`kernel::signal::StopSignal`] is raised.
//!
//! # Example
//!
//! ```ignore
//! use sht3x_device::drivers::sensors::sht3x::{Sht3x, ADDR};
//! use sht3x_device::domain::temperature::TemperatureUnit;
//!
//! let mut sensor = Sht3x::new(i2c, delay, ADDR);
//! sensor.configure("periodic", Some(1.0), "med", false)?;
//! sensor.begin_acquisition()?;
//! let sample = sensor.sample(TemperatureUnit::Celsius)?;
//! ```

pub(crate) mod fmt;

pub mod domain;

pub mod drivers;

pub mod traits;

#[cfg(feature = "std")]
pub mod kernel;

#[cfg(feature = "std")]
pub mod logger;

#[cfg(feature = "std")]
pub mod testutil;
