//! Test doubles for the logging loop: a scripted sensor, a sink that keeps
//! rows in memory and a clock with canned timestamps.

use crate::domain::{temperature::TemperatureUnit, Sample};
use crate::kernel::signal::StopSignal;
use crate::logger::clock::Clock;
use crate::logger::sink::{LogRow, Sink};
use crate::traits::sensors::humidity::HumiditySensor;
use std::cell::Cell;
use std::collections::VecDeque;
use std::io;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FakeError;

/// A sensor that replays scripted results. Once the script runs out every
/// sample is empty.
#[derive(Default)]
pub struct FakeSensor {
    periodic: bool,
    begin_results: VecDeque<Result<(), FakeError>>,
    samples: VecDeque<Result<Sample, FakeError>>,
    pub configure_calls: usize,
    pub begin_calls: usize,
    pub units: Vec<TemperatureUnit>,
}

impl FakeSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periodic(mut self) -> Self {
        self.periodic = true;
        self
    }

    pub fn fail_begin(mut self, times: usize) -> Self {
        for _ in 0..times {
            self.begin_results.push_back(Err(FakeError));
        }
        self
    }

    pub fn sample(mut self, temperature: f32, humidity: f32) -> Self {
        self.samples.push_back(Ok(Sample {
            temperature: Some(temperature),
            relative_humidity: Some(humidity),
        }));
        self
    }

    pub fn empty(mut self) -> Self {
        self.samples.push_back(Ok(Sample::EMPTY));
        self
    }

    pub fn bus_error(mut self) -> Self {
        self.samples.push_back(Err(FakeError));
        self
    }
}

impl HumiditySensor for FakeSensor {
    type Error = FakeError;

    fn is_periodic(&self) -> bool {
        self.periodic
    }

    fn configure_periodic(&mut self) -> Result<(), FakeError> {
        self.configure_calls += 1;
        self.periodic = true;
        Ok(())
    }

    fn begin_acquisition(&mut self) -> Result<(), FakeError> {
        self.begin_calls += 1;
        self.begin_results.pop_front().unwrap_or(Ok(()))
    }

    fn sample(&mut self, unit: TemperatureUnit) -> Result<Sample, FakeError> {
        self.units.push(unit);
        self.samples.pop_front().unwrap_or(Ok(Sample::EMPTY))
    }
}

/// Keeps written rows. Can raise a stop signal after a number of rows and
/// fail a given write.
#[derive(Default)]
pub struct RecordingSink {
    pub rows: Vec<LogRow>,
    stop_after: Option<(usize, StopSignal)>,
    fail_on: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_after(mut self, rows: usize, stop: &StopSignal) -> Self {
        self.stop_after = Some((rows, stop.clone()));
        self
    }

    /// The write of row number `row` (zero based) fails.
    pub fn fail_on(mut self, row: usize) -> Self {
        self.fail_on = Some(row);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.to_string()).collect()
    }
}

impl Sink for RecordingSink {
    fn write(&mut self, row: &LogRow) -> io::Result<()> {
        if self.fail_on == Some(self.rows.len()) {
            return Err(io::Error::new(io::ErrorKind::Other, "sink unavailable"));
        }
        self.rows.push(row.clone());
        if let Some((after, stop)) = &self.stop_after {
            if self.rows.len() >= *after {
                stop.signal();
            }
        }
        Ok(())
    }
}

/// Starts at `2024-01-01 00:00:00` and advances one second per call.
#[derive(Default)]
pub struct FixedClock {
    ticks: Cell<u32>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> io::Result<String> {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        Ok(format!("2024-01-01 00:{:02}:{:02}", tick / 60, tick % 60))
    }
}
