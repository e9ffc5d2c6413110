use super::sink::{FileMode, FileSink, Sink, TableSink};
use super::table::Table;
use crate::domain::temperature::TemperatureUnit;
use crate::drivers::sensors::sht3x::ADDR;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings of the logging binary, read from a TOML file. Every field has
/// a default so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub bus: PathBuf,
    pub address: u8,
    pub interval_secs: u64,
    pub unit: TemperatureUnit,
    pub sensor: SensorSettings,
    pub sink: SinkConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            bus: PathBuf::from("/dev/i2c-1"),
            address: ADDR,
            interval_secs: 60,
            unit: TemperatureUnit::default(),
            sensor: SensorSettings::default(),
            sink: SinkConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Textual acquisition settings, validated by the driver's `configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub mode: String,
    pub rate: Option<f32>,
    pub accuracy: String,
    pub blocking: bool,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            mode: "periodic".into(),
            rate: Some(1.0),
            accuracy: "med".into(),
            blocking: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    File {
        path: PathBuf,
        #[serde(default)]
        mode: FileMode,
    },
    Table {
        dir: PathBuf,
        table: String,
        #[serde(default)]
        latest_path: Option<PathBuf>,
    },
}

impl Default for SinkConfig {
    fn default() -> Self {
        SinkConfig::File {
            path: PathBuf::from("sht3x.log"),
            mode: FileMode::Append,
        }
    }
}

impl SinkConfig {
    pub fn open(&self) -> io::Result<Box<dyn Sink>> {
        Ok(match self {
            SinkConfig::File { path, mode } => Box::new(FileSink::new(path.clone(), *mode)),
            SinkConfig::Table {
                dir,
                table,
                latest_path,
            } => {
                let sink = TableSink::new(Table::open(dir, table)?);
                match latest_path {
                    Some(path) => Box::new(sink.with_latest(path.clone())),
                    None => Box::new(sink),
                }
            }
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "unable to read configuration: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
