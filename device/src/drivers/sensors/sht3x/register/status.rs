use super::measurement::word;
use crate::drivers::sensors::sht3x::command::Command;
use crate::traits::i2c::I2cAddress;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

// time for the sensor to prepare the status word after the command
const STATUS_SETTLE_MS: u32 = 50;

const ALERT_PENDING: u16 = 1 << 15;
const HEATER_ON: u16 = 1 << 13;
const HUMIDITY_ALERT: u16 = 1 << 11;
const TEMPERATURE_ALERT: u16 = 1 << 10;
const RESET_DETECTED: u16 = 1 << 4;
const COMMAND_FAILED: u16 = 1 << 1;
const WRITE_CHECKSUM_FAILED: u16 = 1 << 0;

/// Value reported in place of a status whose own checksum failed.
pub const CORRUPT_STATUS: u16 = 0xFFFF;

/// The 16-bit status register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn alert_pending(&self) -> bool {
        self.0 & ALERT_PENDING != 0
    }

    pub fn heater_on(&self) -> bool {
        self.0 & HEATER_ON != 0
    }

    pub fn humidity_alert(&self) -> bool {
        self.0 & HUMIDITY_ALERT != 0
    }

    pub fn temperature_alert(&self) -> bool {
        self.0 & TEMPERATURE_ALERT != 0
    }

    pub fn reset_detected(&self) -> bool {
        self.0 & RESET_DETECTED != 0
    }

    pub fn command_failed(&self) -> bool {
        self.0 & COMMAND_FAILED != 0
    }

    pub fn write_checksum_failed(&self) -> bool {
        self.0 & WRITE_CHECKSUM_FAILED != 0
    }

    pub fn alerts(&self) -> Alerts {
        let mut alerts = Alerts::new();
        for (set, alert) in [
            (self.temperature_alert(), Alert::Temperature),
            (self.humidity_alert(), Alert::Humidity),
            (self.reset_detected(), Alert::Reset),
        ] {
            if set {
                // one slot per alert kind
                let _ = alerts.push(alert);
            }
        }
        alerts
    }
}

impl From<u16> for Status {
    fn from(bits: u16) -> Self {
        Status(bits)
    }
}

/// Outcome of a status register read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusRead {
    Valid(Status),
    /// The status frame failed its own checksum.
    Corrupt,
}

impl StatusRead {
    pub fn read<I: I2c, D: DelayNs>(
        address: I2cAddress,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<StatusRead, I::Error> {
        i2c.write(address.into(), &Command::Status.to_bytes())?;
        delay.delay_ms(STATUS_SETTLE_MS);
        let mut buf = [0; 3];
        i2c.read(address.into(), &mut buf)?;
        Ok(match word(buf[0], buf[1], buf[2]) {
            Some(bits) => StatusRead::Valid(bits.into()),
            None => StatusRead::Corrupt,
        })
    }

    pub fn valid(&self) -> Option<Status> {
        match self {
            StatusRead::Valid(status) => Some(*status),
            StatusRead::Corrupt => None,
        }
    }

    /// The register bits, with a corrupt read reported as [`CORRUPT_STATUS`].
    pub fn bits(&self) -> u16 {
        match self {
            StatusRead::Valid(status) => status.bits(),
            StatusRead::Corrupt => CORRUPT_STATUS,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alert {
    Temperature,
    Humidity,
    Reset,
}

pub type Alerts = Vec<Alert, 3>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_individual_bits() {
        let status = Status::from(0x8000);
        assert!(status.alert_pending());
        assert!(!status.heater_on());

        let status = Status::from(0x2000);
        assert!(status.heater_on());
        assert!(!status.alert_pending());

        let status = Status::from(0x0003);
        assert!(status.command_failed());
        assert!(status.write_checksum_failed());
        assert!(!status.reset_detected());
    }

    #[test]
    fn collects_alerts_in_order() {
        let status = Status::from(0x8C10);
        assert_eq!(
            &status.alerts()[..],
            &[Alert::Temperature, Alert::Humidity, Alert::Reset]
        );
        assert!(Status::from(0x8000).alerts().is_empty());
        assert_eq!(&Status::from(0x0010).alerts()[..], &[Alert::Reset]);
    }

    #[test]
    fn corrupt_read_reports_sentinel() {
        assert_eq!(StatusRead::Corrupt.bits(), CORRUPT_STATUS);
        assert_eq!(StatusRead::Corrupt.valid(), None);
        assert_eq!(StatusRead::Valid(Status::from(0x0010)).bits(), 0x0010);
    }
}
