//! Ledger address composition: DSA hashes, implicit/explicit addresses.
use crate::hash::{ripemd160, sha3_512};

/// A DSA hash changes every spend: `ripemd160(sha3_512(wots_pk_2144))`.
pub fn dsa_hash(wots_pk: &[u8]) -> [u8; 20] {
    let digest = sha3_512(wots_pk);
    ripemd160(&digest)
}

/// Whether a ledger address is the implicit form (tag == DSA, i.e. the
/// account's first, never-yet-spent deposit address) or an explicit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Implicit,
    Explicit,
}

/// A 40-byte ledger address: the 20-byte account tag concatenated with the
/// 20-byte DSA hash of the spend currently occupying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerAddress {
    pub tag: [u8; 20],
    pub dsa: [u8; 20],
}

impl LedgerAddress {
    pub fn new(tag: [u8; 20], dsa: [u8; 20]) -> Self {
        LedgerAddress { tag, dsa }
    }

    /// The implicit address for a freshly-tagged account: `tag ∥ tag`.
    pub fn implicit(tag: [u8; 20]) -> Self {
        LedgerAddress { tag, dsa: tag }
    }

    pub fn kind(&self) -> AddressKind {
        if self.tag == self.dsa {
            AddressKind::Implicit
        } else {
            AddressKind::Explicit
        }
    }

    pub fn to_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        out[..20].copy_from_slice(&self.tag);
        out[20..].copy_from_slice(&self.dsa);
        out
    }

    pub fn from_bytes(bytes: &[u8; 40]) -> Self {
        let mut tag = [0u8; 20];
        let mut dsa = [0u8; 20];
        tag.copy_from_slice(&bytes[..20]);
        dsa.copy_from_slice(&bytes[20..]);
        LedgerAddress { tag, dsa }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wots::{WotsKeypair, PK_BYTES};

    #[test]
    fn dsa_hash_is_20_bytes() {
        let kp = WotsKeypair::from_seed(&[7u8; 32]);
        let h = dsa_hash(&kp.public_key);
        assert_eq!(h.len(), 20);
    }

    #[test]
    fn different_keys_give_different_dsa_hashes() {
        let a = WotsKeypair::from_seed(&[1u8; 32]);
        let b = WotsKeypair::from_seed(&[2u8; 32]);
        assert_ne!(dsa_hash(&a.public_key), dsa_hash(&b.public_key));
    }

    #[test]
    fn implicit_address_has_equal_halves() {
        let tag = [9u8; 20];
        let addr = LedgerAddress::implicit(tag);
        assert_eq!(addr.kind(), AddressKind::Implicit);
        assert_eq!(&addr.to_bytes()[..20], &addr.to_bytes()[20..]);
    }

    #[test]
    fn explicit_address_has_distinct_halves() {
        let addr = LedgerAddress::new([1u8; 20], [2u8; 20]);
        assert_eq!(addr.kind(), AddressKind::Explicit);
    }

    #[test]
    fn round_trips_through_bytes() {
        let addr = LedgerAddress::new([3u8; 20], [4u8; 20]);
        let bytes = addr.to_bytes();
        assert_eq!(LedgerAddress::from_bytes(&bytes), addr);
    }

    #[test]
    #[allow(clippy::no_effect)]
    fn pk_bytes_constant_matches_declared_size() {
        assert_eq!(PK_BYTES, 2144);
    }
}
