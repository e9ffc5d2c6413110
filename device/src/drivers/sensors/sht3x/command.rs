use super::config::{Mode, Rate, Repeatability, SensorConfig};

/// Every 16-bit command the driver sends, MSB first on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Single-shot acquisition. With clock stretching the sensor holds SCL
    /// low until the result can be read; without it the sensor NACKs reads
    /// until the measurement is done.
    SingleShot {
        repeatability: Repeatability,
        clock_stretching: bool,
    },
    /// Start periodic acquisition.
    Periodic {
        repeatability: Repeatability,
        rate: Rate,
    },
    /// Read out the latest periodic measurement.
    FetchData,
    /// Accelerated response time: periodic acquisition at 4 Hz.
    Art,
    /// Stop periodic acquisition.
    Break,
    SoftReset,
    HeaterEnable,
    HeaterDisable,
    Status,
    ClearStatus,
}

impl Command {
    /// The acquisition command for a configuration.
    pub fn acquisition(config: &SensorConfig) -> Command {
        match config.mode {
            Mode::SingleShot { blocking } => Command::SingleShot {
                repeatability: config.repeatability,
                clock_stretching: blocking,
            },
            Mode::Periodic { rate } => Command::Periodic {
                repeatability: config.repeatability,
                rate,
            },
        }
    }

    pub fn code(&self) -> u16 {
        use Rate::*;
        use Repeatability::*;
        match *self {
            Command::SingleShot {
                repeatability,
                clock_stretching: true,
            } => match repeatability {
                High => 0x2C06,
                Medium => 0x2C0D,
                Low => 0x2C10,
            },
            Command::SingleShot {
                repeatability,
                clock_stretching: false,
            } => match repeatability {
                High => 0x2400,
                Medium => 0x240B,
                Low => 0x2416,
            },
            Command::Periodic {
                repeatability,
                rate,
            } => match (rate, repeatability) {
                (Hz0_5, High) => 0x2032,
                (Hz0_5, Medium) => 0x2024,
                (Hz0_5, Low) => 0x202F,
                (Hz1, High) => 0x2130,
                (Hz1, Medium) => 0x2126,
                (Hz1, Low) => 0x212D,
                (Hz2, High) => 0x2236,
                (Hz2, Medium) => 0x2220,
                (Hz2, Low) => 0x222B,
                (Hz4, High) => 0x2334,
                (Hz4, Medium) => 0x2322,
                (Hz4, Low) => 0x2329,
                (Hz10, High) => 0x2737,
                (Hz10, Medium) => 0x2721,
                (Hz10, Low) => 0x272A,
            },
            Command::FetchData => 0xE000,
            Command::Art => 0x2B32,
            Command::Break => 0x3093,
            Command::SoftReset => 0x30A2,
            Command::HeaterEnable => 0x306D,
            Command::HeaterDisable => 0x3066,
            Command::Status => 0xF32D,
            Command::ClearStatus => 0x3041,
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.code().to_be_bytes()
    }
}
