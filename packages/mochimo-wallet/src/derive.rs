//! Hierarchical derivation: master seed → account seed → spend keypair.
//!
//! Every secret below is a pure function of `(master seed, account index,
//! spend index)`. Derivation-input indices are encoded **big-endian**,
//! distinct from the little-endian counters internal to [`crate::prng`] —
//! see that module's doc comment.
use crate::address::{dsa_hash, LedgerAddress};
use crate::hash::sha512;
use crate::prng::DigestRandomGenerator;
use crate::wots::WotsKeypair;

/// The fixed 12-byte constant appended after the leading 20 bytes of the
/// address seed when building an extended public key. Its semantics are
/// not documented upstream; it is carried bit-exactly.
pub const FIXED_TAG: [u8; 12] = [0x42, 0x00, 0x00, 0x00, 0x0e, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00];

/// Size of the "extended" public key: `pk(2144) ∥ pub_seed(32) ∥ addr_seed[0..20](20) ∥ FIXED_TAG(12)`.
pub const EXTENDED_PK_BYTES: usize = 2144 + 32 + 20 + 12;

fn extract_32(material: &[u8]) -> [u8; 32] {
    let mut prng = DigestRandomGenerator::new();
    prng.add_seed_material(material);
    let bytes = prng.next_bytes(32);
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    out
}

/// `derive_account_seed`: `sha512(master ∥ be_u32(acct_idx))` fed into a
/// fresh PRNG, 32 bytes extracted.
pub fn derive_account_seed(master: &[u8; 32], acct_idx: u32) -> [u8; 32] {
    let mut material = Vec::with_capacity(32 + 4);
    material.extend_from_slice(master);
    material.extend_from_slice(&acct_idx.to_be_bytes());
    extract_32(&sha512(&material))
}

/// `derive_wots_secret`: `sha512(account_seed ∥ be_u32(spend_idx))` fed into
/// a fresh PRNG, 32 bytes extracted.
pub fn derive_wots_secret(account_seed: &[u8; 32], spend_idx: u32) -> [u8; 32] {
    let mut material = Vec::with_capacity(32 + 4);
    material.extend_from_slice(account_seed);
    material.extend_from_slice(&spend_idx.to_be_bytes());
    extract_32(&sha512(&material))
}

fn build_extended_public_key(kp: &WotsKeypair) -> [u8; EXTENDED_PK_BYTES] {
    let mut out = [0u8; EXTENDED_PK_BYTES];
    out[..2144].copy_from_slice(&kp.public_key);
    out[2144..2176].copy_from_slice(&kp.public_seed);
    out[2176..2196].copy_from_slice(&kp.addr_seed[..20]);
    out[2196..].copy_from_slice(&FIXED_TAG);
    out
}

/// A materialized spend keypair: the WOTS+ keypair itself, its 2208-byte
/// extended public key, and the ledger address it currently occupies.
pub struct DerivedKeypair {
    pub wots: WotsKeypair,
    pub extended_public_key: [u8; EXTENDED_PK_BYTES],
    pub ledger_address: LedgerAddress,
}

/// Derives the WOTS+ keypair for `(account_seed, spend_idx)` and composes
/// its ledger address against the account's persistent `account_tag`.
pub fn derive_wots_keypair(account_seed: &[u8; 32], spend_idx: u32, account_tag: [u8; 20]) -> DerivedKeypair {
    let secret = derive_wots_secret(account_seed, spend_idx);
    let wots = WotsKeypair::from_seed(&secret);
    let dsa = dsa_hash(&wots.public_key);
    let extended_public_key = build_extended_public_key(&wots);

    DerivedKeypair {
        wots,
        extended_public_key,
        ledger_address: LedgerAddress::new(account_tag, dsa),
    }
}

/// Derives the account tag: the first 20 bytes of the DSA hash of the
/// spend-0 WOTS+ public key. The tag is defined by, and exists iff, the
/// spend-0 keypair exists — callers must compute spend-0 even when only the
/// tag is wanted.
pub fn derive_account_tag(master: &[u8; 32], acct_idx: u32) -> [u8; 20] {
    let account_seed = derive_account_seed(master, acct_idx);
    let secret = derive_wots_secret(&account_seed, 0);
    let wots = WotsKeypair::from_seed(&secret);
    dsa_hash(&wots.public_key)
}

/// The static view of an account: its seed, persistent tag, and the
/// implicit deposit address the tag defines.
pub struct AccountInfo {
    pub account_seed: [u8; 32],
    pub account_tag: [u8; 20],
    pub deposit_address: LedgerAddress,
}

pub fn get_account(master: &[u8; 32], acct_idx: u32) -> AccountInfo {
    let account_seed = derive_account_seed(master, acct_idx);
    let account_tag = derive_account_tag(master, acct_idx);

    AccountInfo {
        account_seed,
        account_tag,
        deposit_address: LedgerAddress::implicit(account_tag),
    }
}

/// Persists the next unused spend index per account.
///
/// The core cannot enforce the WOTS+ single-use invariant on its own: a
/// caller must persist the post-increment index atomically after a
/// successful broadcast, and before ever signing again with that index.
/// This trait names the boundary; it carries no implementation-specific
/// storage policy.
pub trait SpendIndexStore {
    /// Returns the next unused spend index for `account_tag`, or `0` if the
    /// account has never spent.
    fn next_spend_index(&self, account_tag: &[u8; 20]) -> u32;

    /// Records that `index` has now been used (and so `index + 1` is next).
    fn record_spend(&mut self, account_tag: &[u8; 20], index: u32);
}

/// An in-memory [`SpendIndexStore`] suitable for tests and short-lived
/// processes. It holds no disk or encrypted persistence — see `DESIGN.md`
/// for why that was dropped from the core.
#[derive(Default)]
pub struct InMemorySpendIndexStore {
    indices: std::collections::HashMap<[u8; 20], u32>,
}

impl InMemorySpendIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpendIndexStore for InMemorySpendIndexStore {
    fn next_spend_index(&self, account_tag: &[u8; 20]) -> u32 {
        self.indices.get(account_tag).map(|i| i + 1).unwrap_or(0)
    }

    fn record_spend(&mut self, account_tag: &[u8; 20], index: u32) {
        self.indices.insert(*account_tag, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master() -> [u8; 32] {
        let mut m = [0u8; 32];
        for (i, b) in m.iter_mut().enumerate() {
            *b = i as u8;
        }
        m
    }

    #[test]
    fn account_seed_is_deterministic() {
        let m = master();
        assert_eq!(derive_account_seed(&m, 0), derive_account_seed(&m, 0));
    }

    #[test]
    fn distinct_account_indices_give_distinct_seeds() {
        let m = master();
        assert_ne!(derive_account_seed(&m, 0), derive_account_seed(&m, 1));
    }

    #[test]
    fn tag_persists_across_spend_indices() {
        let m = master();
        let account_seed = derive_account_seed(&m, 0);
        let tag = derive_account_tag(&m, 0);

        let spend_a = derive_wots_keypair(&account_seed, 0, tag);
        let spend_b = derive_wots_keypair(&account_seed, 1, tag);

        assert_eq!(spend_a.ledger_address.tag, tag);
        assert_eq!(spend_b.ledger_address.tag, tag);
        assert_ne!(spend_a.ledger_address.dsa, spend_b.ledger_address.dsa);
    }

    #[test]
    fn spend_zero_address_is_implicit() {
        let m = master();
        let info = get_account(&m, 0);
        let spend0 = derive_wots_keypair(&info.account_seed, 0, info.account_tag);
        assert_eq!(spend0.ledger_address.tag, spend0.ledger_address.dsa);
        assert_eq!(info.deposit_address, spend0.ledger_address);
    }

    #[test]
    fn get_account_is_deterministic_and_index_sensitive() {
        let m = master();
        let a1 = get_account(&m, 0);
        let a2 = get_account(&m, 0);
        assert_eq!(a1.account_tag, a2.account_tag);

        let a3 = get_account(&m, 1);
        assert_ne!(a1.account_tag, a3.account_tag);
    }

    #[test]
    fn extended_public_key_has_expected_layout() {
        let m = master();
        let info = get_account(&m, 0);
        let spend0 = derive_wots_keypair(&info.account_seed, 0, info.account_tag);
        assert_eq!(spend0.extended_public_key.len(), 2208);
        assert_eq!(&spend0.extended_public_key[..2144], &spend0.wots.public_key[..]);
        assert_eq!(&spend0.extended_public_key[2144..2176], &spend0.wots.public_seed[..]);
        assert_eq!(&spend0.extended_public_key[2196..], &FIXED_TAG[..]);
    }

    #[test]
    fn in_memory_store_tracks_next_index() {
        let mut store = InMemorySpendIndexStore::new();
        let tag = [1u8; 20];
        assert_eq!(store.next_spend_index(&tag), 0);
        store.record_spend(&tag, 0);
        assert_eq!(store.next_spend_index(&tag), 1);
        store.record_spend(&tag, 1);
        assert_eq!(store.next_spend_index(&tag), 2);
    }
}
