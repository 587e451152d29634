//! Text parsing for every caller-supplied value.
//!
//! Hex fields accept an optional `0x`/`0X` prefix. Integers are decimal unless
//! they carry the hex prefix.

use crate::error::ParseError;
use alloy_primitives::{Address, B256, Uint};

/// How to treat hex input with an odd number of digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HexMode {
    /// Reject odd-length input.
    #[default]
    Strict,
    /// Prepend a single `0` nibble before decoding.
    PadOdd,
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Decodes hex text into bytes. `"0x"` and `""` decode to an empty vector.
pub fn decode_hex(text: &str, mode: HexMode) -> Result<Vec<u8>, ParseError> {
    let text = text.trim();
    let body = strip_hex_prefix(text).unwrap_or(text);

    if body.len() % 2 == 1 {
        return match mode {
            HexMode::Strict => Err(ParseError::OddLength),
            HexMode::PadOdd => {
                log::warn!("padding odd-length hex {text:?} with a leading zero nibble");
                Ok(hex::decode(format!("0{body}"))?)
            }
        };
    }
    Ok(hex::decode(body)?)
}

/// Decodes hex text that must be exactly `N` bytes long.
pub fn parse_fixed<const N: usize>(text: &str, mode: HexMode) -> Result<[u8; N], ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Missing);
    }
    let bytes = decode_hex(text, mode)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| ParseError::Length {
        expected: N,
        actual: bytes.len(),
    })
}

pub fn parse_address(text: &str, mode: HexMode) -> Result<Address, ParseError> {
    parse_fixed::<20>(text, mode).map(Address::from)
}

pub fn parse_b256(text: &str, mode: HexMode) -> Result<B256, ParseError> {
    parse_fixed::<32>(text, mode).map(B256::from)
}

/// Splits integer text into its digits and radix.
fn integer_body(text: &str) -> Result<(&str, u32), ParseError> {
    let text = text.trim();
    let (body, radix) = match strip_hex_prefix(text) {
        Some(body) => (body, 16),
        None => (text, 10),
    };
    if body.is_empty() {
        return Err(ParseError::Missing);
    }
    // `from_str_radix` tolerates a leading `+`, and ruint's also skips `_`.
    if let Some(c) = body.chars().find(|c| !c.is_digit(radix)) {
        return Err(ParseError::Integer(format!("invalid digit {c:?} in {text:?}")));
    }
    Ok((body, radix))
}

pub fn parse_u128(text: &str) -> Result<u128, ParseError> {
    let (body, radix) = integer_body(text)?;
    u128::from_str_radix(body, radix).map_err(|e| ParseError::Integer(e.to_string()))
}

pub fn parse_u64(text: &str) -> Result<u64, ParseError> {
    let (body, radix) = integer_body(text)?;
    u64::from_str_radix(body, radix).map_err(|e| ParseError::Integer(e.to_string()))
}

/// Parses a `u64` that must be non-zero.
pub fn parse_cap(text: &str) -> Result<u64, ParseError> {
    match parse_u64(text)? {
        0 => Err(ParseError::Zero),
        n => Ok(n),
    }
}

/// Parses an arbitrary-width unsigned integer such as `U256` or `U112`.
pub fn parse_uint<const BITS: usize, const LIMBS: usize>(
    text: &str,
) -> Result<Uint<BITS, LIMBS>, ParseError> {
    let (body, radix) = integer_body(text)?;
    Uint::from_str_radix(body, radix as u64).map_err(|e| ParseError::Integer(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address, aliases::U112};

    #[test]
    fn strict_rejects_odd_length() {
        assert_eq!(decode_hex("0xabc", HexMode::Strict), Err(ParseError::OddLength));
        assert_eq!(decode_hex("abc", HexMode::PadOdd).unwrap(), vec![0x0a, 0xbc]);
        assert_eq!(decode_hex("0X0abc", HexMode::Strict).unwrap(), vec![0x0a, 0xbc]);
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(matches!(
            decode_hex("0xzz", HexMode::Strict),
            Err(ParseError::Hex(_))
        ));
        assert!(matches!(
            decode_hex("0xzzz", HexMode::PadOdd),
            Err(ParseError::Hex(_))
        ));
    }

    #[test]
    fn empty_hex_is_empty_bytes() {
        assert_eq!(decode_hex("0x", HexMode::Strict).unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("", HexMode::Strict).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn fixed_width_fields() {
        assert_eq!(
            parse_address("0xba5ed099633d3b313e4d5f7bdc1305d3c28ba5ed", HexMode::Strict).unwrap(),
            address!("ba5ed099633d3b313e4d5f7bdc1305d3c28ba5ed")
        );
        assert_eq!(
            parse_address("0xba5e", HexMode::Strict),
            Err(ParseError::Length {
                expected: 20,
                actual: 2
            })
        );
        assert_eq!(parse_address("", HexMode::Strict), Err(ParseError::Missing));
        assert_eq!(parse_b256(&"00".repeat(32), HexMode::Strict).unwrap(), B256::ZERO);
    }

    #[test]
    fn integers_accept_decimal_and_hex() {
        assert_eq!(parse_u128("1337").unwrap(), 1337);
        assert_eq!(parse_u128("0x539").unwrap(), 1337);
        assert_eq!(parse_u128(&u128::MAX.to_string()).unwrap(), u128::MAX);
        assert!(parse_u128("340282366920938463463374607431768211456").is_err());
        assert!(parse_u128("12ab").is_err());
        assert!(parse_u128("+5").is_err());
        assert_eq!(parse_u128("0x"), Err(ParseError::Missing));
        assert_eq!(parse_u128("  "), Err(ParseError::Missing));
    }

    #[test]
    fn separators_rejected_at_every_width() {
        for text in ["1_000", "0x_ff", "0xf_f"] {
            assert!(parse_u64(text).is_err(), "{text}");
            assert!(parse_u128(text).is_err(), "{text}");
            assert!(parse_uint::<256, 4>(text).is_err(), "{text}");
            assert!(parse_uint::<112, 2>(text).is_err(), "{text}");
        }
        assert!(parse_uint::<256, 4>("+5").is_err());
        assert_eq!(parse_uint::<256, 4>("0xFf").unwrap(), U256::from(255));
    }

    #[test]
    fn bad_digit_keeps_hex_error_detail() {
        assert_eq!(
            decode_hex("0xzz", HexMode::Strict),
            Err(ParseError::Hex(hex::FromHexError::InvalidHexCharacter {
                c: 'z',
                index: 0
            }))
        );
        let err = parse_b256("0x0g", HexMode::Strict).unwrap_err();
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn caps_must_be_positive() {
        assert_eq!(parse_cap("0"), Err(ParseError::Zero));
        assert_eq!(parse_cap("0x10").unwrap(), 16);
    }

    #[test]
    fn wide_integers() {
        assert_eq!(
            parse_uint::<256, 4>("999000000000000100").unwrap(),
            U256::from(999000000000000100_u128)
        );
        assert_eq!(parse_uint::<112, 2>("0xff").unwrap(), U112::from(255));
        // 2^112 does not fit
        assert!(parse_uint::<112, 2>("5192296858534827628530496329220096").is_err());
    }
}
