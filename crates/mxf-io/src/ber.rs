//! BER (Basic Encoding Rules) length encoding, as used for the `L` in KLV.
//!
//! A length under 0x80 is encoded in a single byte (short form). Otherwise
//! the first byte is `0x80 | n`, where `n` is the number of big-endian bytes
//! that follow and hold the actual length (long form).

/// The smallest `llen` this crate will ever produce: one byte, short form.
pub const MIN_BER_LLEN: u8 = 1;

/// Number of bytes the BER encoding of `value` occupies, including the
/// leading form byte.
///
/// Mirrors `mxf_get_llen`: callers use it to size a length field before
/// writing it, so it must agree exactly with what [`encode`] produces for
/// the same value.
pub fn ber_encoded_len(value: u64) -> u8 {
    if value < 0x80 {
        return 1;
    }
    1 + long_form_byte_count(value)
}

fn long_form_byte_count(value: u64) -> u8 {
    let bytes = value.to_be_bytes();
    let leading_zeros = bytes.iter().take_while(|b| **b == 0).count();
    (8 - leading_zeros) as u8
}

/// Encodes `value` into `buf` (which must be at least 9 bytes), returning
/// the number of bytes written.
pub(crate) fn encode(value: u64, buf: &mut [u8; 9]) -> u8 {
    if value < 0x80 {
        buf[0] = value as u8;
        return 1;
    }
    let n = long_form_byte_count(value);
    let full = value.to_be_bytes();
    buf[0] = 0x80 | n;
    buf[1..1 + n as usize].copy_from_slice(&full[8 - n as usize..]);
    1 + n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_below_0x80() {
        assert_eq!(ber_encoded_len(0), 1);
        assert_eq!(ber_encoded_len(0x7f), 1);
    }

    #[test]
    fn long_form_boundaries() {
        assert_eq!(ber_encoded_len(0x80), 2);
        assert_eq!(ber_encoded_len(0xff), 2);
        assert_eq!(ber_encoded_len(0x100), 3);
        assert_eq!(ber_encoded_len(u64::MAX), 9);
    }

    #[test]
    fn encode_matches_encoded_len() {
        for value in [0u64, 0x7f, 0x80, 0xff, 0x1_0000, u64::MAX] {
            let mut buf = [0u8; 9];
            let n = encode(value, &mut buf);
            assert_eq!(n, ber_encoded_len(value));
        }
    }
}
