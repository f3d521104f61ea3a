//! Hex-string boundary helpers.
//!
//! The core crates are strictly typed over fixed-size byte arrays; these
//! helpers normalize hex-string inputs (optionally `0x`-prefixed) to bytes
//! immediately so the rest of the stack never has to think about string
//! formatting again.
use crate::error::CoreError;

/// Strips a leading `0x`/`0X` prefix, if present.
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Decodes a hex string (optionally `0x`-prefixed) into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(what: &'static str, s: &str) -> Result<[u8; N], CoreError> {
    let bytes = hex::decode(strip_0x(s)).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
    bytes_to_fixed(what, &bytes)
}

/// Copies a byte slice into a fixed-size array, checking its length first.
pub fn bytes_to_fixed<const N: usize>(what: &'static str, bytes: &[u8]) -> Result<[u8; N], CoreError> {
    if bytes.len() != N {
        return Err(CoreError::InvalidInputSize {
            what,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Encodes bytes as a lowercase hex string, with no `0x` prefix.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_0x_prefix() {
        assert_eq!(strip_0x("0xabcd"), "abcd");
        assert_eq!(strip_0x("0XABCD"), "ABCD");
        assert_eq!(strip_0x("abcd"), "abcd");
    }

    #[test]
    fn decode_fixed_checks_length() {
        let err = decode_fixed::<20>("tag", "0xabcd").unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInputSize {
                what: "tag",
                expected: 20,
                actual: 2
            }
        );
    }

    #[test]
    fn decode_fixed_rejects_bad_hex() {
        let err = decode_fixed::<2>("tag", "zzzz").unwrap_err();
        assert!(matches!(err, CoreError::InvalidHex(_)));
    }

    #[test]
    fn roundtrip() {
        let bytes: [u8; 4] = decode_fixed("x", "0xdeadbeef").unwrap();
        assert_eq!(encode(&bytes), "deadbeef");
    }
}
