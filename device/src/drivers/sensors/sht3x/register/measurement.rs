use crate::drivers::sensors::sht3x::crc;
use crate::traits::i2c::I2cAddress;
use embedded_hal::i2c::I2c;

/// Length of a temperature and humidity frame.
pub const FRAME_LEN: usize = 6;

/// A measurement frame `[T_MSB, T_LSB, T_CRC, RH_MSB, RH_LSB, RH_CRC]`,
/// split into its two channels. A channel whose checksum does not match
/// is `None`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub temperature: Option<u16>,
    pub humidity: Option<u16>,
}

impl Measurement {
    pub fn read<I: I2c>(address: I2cAddress, i2c: &mut I) -> Result<Measurement, I::Error> {
        let mut buf = [0; FRAME_LEN];
        i2c.read(address.into(), &mut buf)?;
        Ok(buf.into())
    }
}

impl From<[u8; FRAME_LEN]> for Measurement {
    fn from(frame: [u8; FRAME_LEN]) -> Self {
        Measurement {
            temperature: word(frame[0], frame[1], frame[2]),
            humidity: word(frame[3], frame[4], frame[5]),
        }
    }
}

/// Checks one `[MSB, LSB, CRC]` triple and returns the data word.
pub(crate) fn word(msb: u8, lsb: u8, sum: u8) -> Option<u16> {
    if crc::verify([msb, lsb], sum) {
        Some(u16::from_be_bytes([msb, lsb]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_valid_frame() {
        let m = Measurement::from([0x66, 0x66, 0x93, 0x80, 0x00, 0xA2]);
        assert_eq!(m.temperature, Some(0x6666));
        assert_eq!(m.humidity, Some(0x8000));
    }

    #[test]
    fn channels_fail_independently() {
        let m = Measurement::from([0x66, 0x66, 0x00, 0x80, 0x00, 0xA2]);
        assert_eq!(m.temperature, None);
        assert_eq!(m.humidity, Some(0x8000));
    }
}
