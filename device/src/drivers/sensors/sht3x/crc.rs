//! Checksum over the 2-byte data words exchanged with the sensor.

use crc::{Algorithm, Crc};

// SHT3x-DIS datasheet section 4.12
/// The CRC-8 algorithm Sensirion uses for every 16-bit data word.
pub const CRC_8_SENSIRION: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_SENSIRION);

/// Computes the checksum of one data word.
pub fn checksum(word: [u8; 2]) -> u8 {
    CRC.checksum(&word)
}

/// Returns true if `expected` is the checksum of `word`.
pub fn verify(word: [u8; 2], expected: u8) -> bool {
    checksum(word) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasheet_example() {
        assert_eq!(checksum([0xBE, 0xEF]), 0x92);
    }

    #[test]
    fn known_words() {
        assert!(verify([0x00, 0x00], 0x81));
        assert!(verify([0x66, 0x66], 0x93));
        assert!(verify([0x80, 0x00], 0xA2));
        assert!(verify([0xFF, 0xFF], 0xAC));
    }

    #[test]
    fn any_single_bit_flip_is_rejected() {
        for word in [[0xBE, 0xEF], [0x00, 0x00], [0x66, 0x66], [0x80, 0x00]] {
            let sum = checksum(word);
            for bit in 0..8 {
                assert!(!verify(word, sum ^ (1 << bit)));
            }
        }
    }
}
