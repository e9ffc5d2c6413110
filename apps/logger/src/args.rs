use sht3x_device::logger::config::{LoggerConfig, SinkConfig};
use sht3x_device::logger::sink::FileMode;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const USAGE: &str = "\
USAGE: sht3x-logger [OPTIONS]

OPTIONS:
    --config <PATH>      TOML configuration file
    -f <PATH>            log to a text file
    --overwrite          keep only the latest row in the -f file
    -t <TABLE>           log to a table
    --dir <DIR>          directory holding the tables (default: .)
    --latest <PATH>      mirror the latest table row to a file
    --interval <SECS>    seconds between samples
    --bus <PATH>         I2C bus device (default: /dev/i2c-1)
    --address <ADDR>     sensor address, e.g. 0x44 or 0x45
    --celsius            log degrees Celsius instead of Fahrenheit
    --mode <MODE>        single-shot or periodic
    --rate <HZ>          periodic rate: 0.5, 1, 2, 4 or 10
    --accuracy <LEVEL>   low, med or high
    --blocking           use clock stretching in single-shot mode
    -h, --help           print this help";

#[derive(Debug)]
pub struct UsageError(pub String);

impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Command line overrides. Anything not given keeps its configured value.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub help: bool,
    pub config: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub overwrite: bool,
    pub table: Option<String>,
    pub dir: Option<PathBuf>,
    pub latest: Option<PathBuf>,
    pub interval: Option<u64>,
    pub bus: Option<PathBuf>,
    pub address: Option<u8>,
    pub celsius: bool,
    pub mode: Option<String>,
    pub rate: Option<f32>,
    pub accuracy: Option<String>,
    pub blocking: bool,
}

impl Args {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, UsageError> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| UsageError(format!("missing value for {}", arg)))
            };
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--config" => parsed.config = Some(value()?.into()),
                "-f" => parsed.file = Some(value()?.into()),
                "--overwrite" => parsed.overwrite = true,
                "-t" => parsed.table = Some(value()?),
                "--dir" => parsed.dir = Some(value()?.into()),
                "--latest" => parsed.latest = Some(value()?.into()),
                "--interval" => parsed.interval = Some(number(&arg, &value()?)?),
                "--bus" => parsed.bus = Some(value()?.into()),
                "--address" => parsed.address = Some(address(&value()?)?),
                "--celsius" => parsed.celsius = true,
                "--mode" => parsed.mode = Some(value()?),
                "--rate" => parsed.rate = Some(number(&arg, &value()?)?),
                "--accuracy" => parsed.accuracy = Some(value()?),
                "--blocking" => parsed.blocking = true,
                other => return Err(UsageError(format!("unexpected argument {:?}", other))),
            }
        }
        if parsed.file.is_some() && parsed.table.is_some() {
            return Err(UsageError("-f and -t cannot be combined".into()));
        }
        Ok(parsed)
    }

    pub fn apply(self, config: &mut LoggerConfig) -> Result<(), UsageError> {
        if let Some(bus) = self.bus {
            config.bus = bus;
        }
        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if self.celsius {
            config.unit = sht3x_device::domain::temperature::TemperatureUnit::Celsius;
        }
        if let Some(mode) = self.mode {
            config.sensor.mode = mode;
        }
        if let Some(rate) = self.rate {
            config.sensor.rate = Some(rate);
        }
        if let Some(accuracy) = self.accuracy {
            config.sensor.accuracy = accuracy;
        }
        if self.blocking {
            config.sensor.blocking = true;
        }

        if let Some(path) = self.file {
            if self.dir.is_some() || self.latest.is_some() {
                return Err(UsageError("--dir and --latest require -t".into()));
            }
            let mode = if self.overwrite {
                FileMode::Overwrite
            } else {
                FileMode::Append
            };
            config.sink = SinkConfig::File { path, mode };
            return Ok(());
        }

        if let Some(table) = self.table {
            let (dir, latest_path) = match &config.sink {
                SinkConfig::Table {
                    dir, latest_path, ..
                } => (dir.clone(), latest_path.clone()),
                SinkConfig::File { .. } => (PathBuf::from("."), None),
            };
            config.sink = SinkConfig::Table {
                dir: self.dir.unwrap_or(dir),
                table,
                latest_path: self.latest.or(latest_path),
            };
            return Ok(());
        }

        match &mut config.sink {
            SinkConfig::Table {
                dir, latest_path, ..
            } => {
                if let Some(d) = self.dir {
                    *dir = d;
                }
                if self.latest.is_some() {
                    *latest_path = self.latest;
                }
            }
            SinkConfig::File { mode, .. } => {
                if self.dir.is_some() || self.latest.is_some() {
                    return Err(UsageError("--dir and --latest require -t".into()));
                }
                if self.overwrite {
                    *mode = FileMode::Overwrite;
                }
            }
        }
        Ok(())
    }
}

fn number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, UsageError> {
    value
        .parse()
        .map_err(|_| UsageError(format!("invalid number {:?} for {}", value, flag)))
}

fn address(value: &str) -> Result<u8, UsageError> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    };
    match parsed {
        Some(address) if address <= 0x7F => Ok(address),
        _ => Err(UsageError(format!("invalid address {:?}", value))),
    }
}
