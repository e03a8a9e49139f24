//! # Checksum Engine
//!
//! The NMEA 0183 checksum is calculated by performing an XOR (exclusive OR)
//! operation on all bytes between the start marker and the `*` checksum
//! delimiter, excluding both. Talker, sentence identifier and the commas are
//! part of the checksummed span.
//!
//! ```rust
//! use nmea0183_sentence::nmea0183::checksum;
//!
//! let payload = "GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,";
//! assert_eq!(checksum::compute(payload), 0x79);
//! assert!(checksum::verify(payload, 0x79));
//! assert_eq!(checksum::format(0x0A), "0A");
//! ```

/// Calculates the checksum of `payload`.
///
/// The result is an 8-bit value; an empty payload yields `0`.
pub fn compute(payload: impl AsRef<[u8]>) -> u8 {
    payload
        .as_ref()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Returns `true` if `claimed` is the checksum of `payload`.
pub fn verify(payload: impl AsRef<[u8]>, claimed: u8) -> bool {
    compute(payload) == claimed
}

/// Formats a checksum as two upper-case hexadecimal digits.
pub fn format(checksum: u8) -> String {
    format!("{checksum:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute() {
        assert_eq!(compute(""), 0);
        assert_eq!(compute("GPGLL,,,,,, ,V"), 0x0A);
        assert_eq!(
            compute("GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,0.5,0523"),
            0x56
        );
        assert_eq!(compute(b"GPZDA,032915,07,08,2004,00,00"), 0x4D);
    }

    #[test]
    fn test_single_bit_flip_changes_checksum() {
        let payload = b"GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,".to_vec();
        let original = compute(&payload);

        for index in 0..payload.len() {
            for bit in 0..8 {
                let mut corrupted = payload.clone();
                corrupted[index] ^= 1 << bit;
                assert_ne!(compute(&corrupted), original);
                assert!(!verify(&corrupted, original));
            }
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(format(0), "00");
        assert_eq!(format(0x79), "79");
        assert_eq!(format(0xab), "AB");
    }
}
