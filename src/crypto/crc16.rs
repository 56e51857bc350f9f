//! CRC-16 checksum for installation codes
//!
//! Reflected CCITT polynomial (0x8408), initial register 0xFFFF, final XOR 0xFFFF.
//! This is the CRC-16/X-25 parameter set. The lookup table is generated at compile
//! time from the polynomial.

/// Reflected form of the CCITT generator polynomial 0x1021
pub const POLYNOMIAL: u16 = 0x8408;

/// Register value before the first byte
pub const INITIAL: u16 = 0xFFFF;

/// Applied to the register after the last byte
pub const XOR_OUT: u16 = 0xFFFF;

/// Checksum length in bytes
pub const CHECKSUM_LEN: usize = 2;

/// Byte-wise lookup table for [`POLYNOMIAL`]
pub const TABLE: [u16; 256] = make_table(POLYNOMIAL);

const fn make_table(poly: u16) -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the CRC-16 of `data`
pub fn checksum(data: &[u8]) -> u16 {
    let crc = data.iter().fold(INITIAL, |crc, &byte| {
        TABLE[(byte ^ (crc & 0xFF) as u8) as usize] ^ (crc >> 8)
    });
    crc ^ XOR_OUT
}

/// Checksum serialized the way it is embedded in an installation code (low byte first)
pub fn checksum_bytes(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    checksum(data).to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shift-register form, one bit at a time, no table
    fn checksum_bitwise(data: &[u8]) -> u16 {
        let mut crc = INITIAL;
        for &byte in data {
            crc ^= byte as u16;
            for _ in 0..8 {
                crc = if crc & 1 != 0 { (crc >> 1) ^ POLYNOMIAL } else { crc >> 1 };
            }
        }
        crc ^ XOR_OUT
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(TABLE[0], 0x0000);
        assert_eq!(TABLE[1], 0x1189);
        assert_eq!(TABLE[2], 0x2312);
        assert_eq!(TABLE[128], 0x8408);
        assert_eq!(TABLE[255], 0x0F78);
    }

    #[test]
    fn test_check_value() {
        // CRC-16/X-25 catalogue check value
        assert_eq!(checksum(b"123456789"), 0x906E);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(checksum(&[]), INITIAL ^ XOR_OUT);
    }

    #[test]
    fn test_matches_bitwise() {
        let inputs: [&[u8]; 4] = [
            b"",
            &[0x00; 16],
            &[0xFF, 0x01, 0x80, 0x7F, 0x55, 0xAA],
            b"installation code",
        ];
        for input in inputs {
            assert_eq!(checksum(input), checksum_bitwise(input));
        }
    }

    #[test]
    fn test_checksum_bytes_little_endian() {
        let secret = hex::decode("83FED3407A939723A5C639B26916D505").unwrap();
        assert_eq!(checksum(&secret), 0xB5C3);
        assert_eq!(checksum_bytes(&secret), [0xC3, 0xB5]);
    }
}
