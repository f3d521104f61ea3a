//! Base58+CRC16/XMODEM codec for 20-byte account tags.
//!
//! This is the human-facing deposit identifier: a tag is appended with a
//! 2-byte little-endian CRC-16/XMODEM trailer, then Base58-encoded.
use crc::{Crc, CRC_16_XMODEM};
use mochimo_types::CoreError;

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

fn checksum(tag: &[u8; 20]) -> u16 {
    XMODEM.checksum(tag)
}

/// Encodes a 20-byte account tag as a Base58+CRC string.
pub fn encode_tag(tag: &[u8; 20]) -> String {
    let crc = checksum(tag);
    let mut payload = [0u8; 22];
    payload[..20].copy_from_slice(tag);
    payload[20..].copy_from_slice(&crc.to_le_bytes());
    bs58::encode(payload).into_string()
}

/// Decodes a Base58+CRC string back into a 20-byte account tag, verifying
/// the embedded checksum.
pub fn decode_tag(encoded: &str) -> Result<[u8; 20], CoreError> {
    let payload = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| CoreError::ChecksumFailure)?;

    if payload.len() != 22 {
        return Err(CoreError::ChecksumFailure);
    }

    let mut tag = [0u8; 20];
    tag.copy_from_slice(&payload[..20]);
    let expected_crc = u16::from_le_bytes([payload[20], payload[21]]);

    if checksum(&tag) != expected_crc {
        return Err(CoreError::ChecksumFailure);
    }

    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(b: u8) -> [u8; 20] {
        [b; 20]
    }

    #[test]
    fn round_trips() {
        let t = tag(0x42);
        let encoded = encode_tag(&t);
        assert_eq!(decode_tag(&encoded).unwrap(), t);
    }

    #[test]
    fn re_encoding_a_decoded_string_matches() {
        let t = tag(0x07);
        let encoded = encode_tag(&t);
        let decoded = decode_tag(&encoded).unwrap();
        assert_eq!(encode_tag(&decoded), encoded);
    }

    #[test]
    fn flipped_byte_breaks_checksum() {
        let t = tag(0x11);
        let encoded = encode_tag(&t);
        let mut payload = bs58::decode(&encoded).into_vec().unwrap();
        payload[0] ^= 0x01;
        let tampered = bs58::encode(payload).into_string();
        assert_eq!(decode_tag(&tampered), Err(CoreError::ChecksumFailure));
    }

    #[test]
    fn wrong_length_payload_is_rejected() {
        let short = bs58::encode([1u8, 2, 3]).into_string();
        assert_eq!(decode_tag(&short), Err(CoreError::ChecksumFailure));
    }
}
