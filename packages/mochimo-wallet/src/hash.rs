//! Hash primitives used throughout the cryptographic core.
//!
//! Every function here is a thin, bit-exact wrapper around a `RustCrypto`
//! digest. Nothing is truncated beyond what each function's name promises.
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_512;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA3-512 of `data`.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-512 of `data`. Used by the deterministic PRNG and the derivation tree.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The domain hash used for message-to-sign digests: plain SHA-256.
pub fn mochimo_hash(data: &[u8]) -> [u8; 32] {
    sha256(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn output_sizes() {
        assert_eq!(sha256(b"x").len(), 32);
        assert_eq!(sha3_512(b"x").len(), 64);
        assert_eq!(ripemd160(b"x").len(), 20);
        assert_eq!(sha512(b"x").len(), 64);
    }

    #[test]
    fn mochimo_hash_is_sha256() {
        assert_eq!(mochimo_hash(b"abc"), sha256(b"abc"));
    }
}
