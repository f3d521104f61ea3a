//! The WOTS+ (Winternitz One-Time Signature Plus) engine.
//!
//! Fixed parameters: `n = 32` (hash output size), `w = 16` (Winternitz
//! parameter), `len1 = 64` message chains, `len2 = 3` checksum chains,
//! `len = 67` chains total. None of these are configurable — a different
//! parameter set produces a different, incompatible scheme.
use crate::hash::sha256;

/// Hash output / chain element size, in bytes.
pub const N: usize = 32;
/// Winternitz parameter.
pub const W: usize = 16;
pub const LOG2_W: u32 = 4;
/// Number of message chains.
pub const LEN1: usize = 64;
/// Number of checksum chains.
pub const LEN2: usize = 3;
/// Total chains.
pub const LEN: usize = LEN1 + LEN2;

/// Size of a WOTS+ public key / signature: `LEN` chains of `N` bytes each.
pub const PK_BYTES: usize = LEN * N;

/// The 8-lane, 32-bit address array used as a hash domain separator.
///
/// Lanes are stored **little-endian**. Lanes 0..4 are seeded from the
/// address seed and never change again; lane 5 holds the chain index,
/// lane 6 the hash-within-chain index, lane 7 the key/mask selector
/// (0 = key, 1 = mask).
#[derive(Clone, Copy)]
struct Address([u8; 32]);

impl Address {
    fn from_addr_seed(addr_seed: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..20].copy_from_slice(&addr_seed[..20]);
        Address(bytes)
    }

    fn set_word(&mut self, lane: usize, value: u32) {
        self.0[lane * 4..lane * 4 + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn set_chain(&mut self, chain: u32) {
        self.set_word(5, chain);
    }

    fn set_hash_index(&mut self, idx: u32) {
        self.set_word(6, idx);
    }

    fn set_selector(&mut self, sel: u32) {
        self.set_word(7, sel);
    }

    fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// `pad(v, k)`: the big-endian encoding of `v` in the low bytes of a
/// `k`-byte buffer, zero above.
fn pad(v: u32, k: usize) -> Vec<u8> {
    let mut buf = vec![0u8; k];
    let v_bytes = v.to_be_bytes();
    buf[k - v_bytes.len()..].copy_from_slice(&v_bytes);
    buf
}

/// `PRF(key, in) := sha256(pad(3, 32) ∥ key ∥ in)`.
fn prf(key: &[u8], input: &[u8]) -> [u8; N] {
    let mut buf = Vec::with_capacity(32 + key.len() + input.len());
    buf.extend_from_slice(&pad(3, 32));
    buf.extend_from_slice(key);
    buf.extend_from_slice(input);
    sha256(&buf)
}

/// The keyed, masked hash `F`.
///
/// `F(in, pub_seed, addr) := sha256(pad(0,32) ∥ PRF(addr|sel=0, pub_seed) ∥ (in ⊕ PRF(addr|sel=1, pub_seed)))`.
fn f(input: &[u8; N], pub_seed: &[u8; 32], addr: &mut Address) -> [u8; N] {
    addr.set_selector(0);
    let key = prf(addr.as_bytes(), pub_seed);

    addr.set_selector(1);
    let bitmask = prf(addr.as_bytes(), pub_seed);

    let mut masked = [0u8; N];
    for i in 0..N {
        masked[i] = input[i] ^ bitmask[i];
    }

    let mut buf = Vec::with_capacity(32 + N + N);
    buf.extend_from_slice(&pad(0, 32));
    buf.extend_from_slice(&key);
    buf.extend_from_slice(&masked);
    sha256(&buf)
}

/// Iterates `F` exactly `steps` times starting from hash-within-chain index
/// `start`, incrementing lane 6 on every step.
fn gen_chain(mut x: [u8; N], start: usize, steps: usize, pub_seed: &[u8; 32], addr: &mut Address) -> [u8; N] {
    for i in start..start + steps {
        debug_assert!(i < W, "chain index must stay below w-1");
        addr.set_hash_index(i as u32);
        x = f(&x, pub_seed, addr);
    }
    x
}

/// Expands a 32-byte private seed into `LEN` per-chain seeds:
/// `chain_seed[i] := PRF(big_endian_32(i), private_seed)`.
fn expand_chain_seeds(private_seed: &[u8; 32]) -> [[u8; N]; LEN] {
    let mut seeds = [[0u8; N]; LEN];
    for (i, seed) in seeds.iter_mut().enumerate() {
        *seed = prf(&(i as u32).to_be_bytes(), private_seed);
    }
    seeds
}

/// Decomposes a 32-byte message into the 67-digit signing length vector
/// `l[0..67)`: 64 base-16 message digits (MSB nibble first) followed by the
/// 3-digit Winternitz checksum.
fn signing_digits(msg: &[u8; 32]) -> [u8; LEN] {
    let mut digits = [0u8; LEN];
    for (i, byte) in msg.iter().enumerate() {
        digits[2 * i] = byte >> 4;
        digits[2 * i + 1] = byte & 0x0f;
    }

    let csum: u32 = digits[..LEN1].iter().map(|&d| (W as u32 - 1) - d as u32).sum();
    // Left-shift so the checksum's base-16 digits land on nibble boundaries
    // of a 2-byte big-endian buffer; the vacated low nibble is always zero.
    let csum_shifted = (csum << 4) as u16;
    let csum_bytes = csum_shifted.to_be_bytes();
    digits[LEN1] = csum_bytes[0] >> 4;
    digits[LEN1 + 1] = csum_bytes[0] & 0x0f;
    digits[LEN1 + 2] = csum_bytes[1] >> 4;

    digits
}

/// The components derived from a 32-byte WOTS seed: private seed, public
/// seed and address seed, each `sha256(seed ∥ suffix)` for a fixed 4-byte
/// ASCII suffix.
#[derive(Clone, Copy)]
pub struct WotsComponents {
    pub private_seed: [u8; 32],
    pub public_seed: [u8; 32],
    pub addr_seed: [u8; 32],
}

pub fn derive_components(seed: &[u8; 32]) -> WotsComponents {
    let mut with_suffix = |suffix: &[u8; 4]| -> [u8; 32] {
        let mut buf = [0u8; 36];
        buf[..32].copy_from_slice(seed);
        buf[32..].copy_from_slice(suffix);
        sha256(&buf)
    };

    WotsComponents {
        private_seed: with_suffix(b"seed"),
        public_seed: with_suffix(b"publ"),
        addr_seed: with_suffix(b"addr"),
    }
}

/// A materialized WOTS+ keypair: the chain-top public key plus the public
/// material (`public_seed`, `addr_seed`) needed to verify or re-sign.
#[derive(Clone)]
pub struct WotsKeypair {
    pub public_key: [u8; PK_BYTES],
    pub public_seed: [u8; 32],
    pub addr_seed: [u8; 32],
    private_seed: [u8; 32],
}

impl WotsKeypair {
    /// Generates a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let components = derive_components(seed);
        let chain_seeds = expand_chain_seeds(&components.private_seed);
        let mut addr = Address::from_addr_seed(&components.addr_seed);

        let mut public_key = [0u8; PK_BYTES];
        for (i, chain_seed) in chain_seeds.iter().enumerate() {
            addr.set_chain(i as u32);
            let top = gen_chain(*chain_seed, 0, W - 1, &components.public_seed, &mut addr);
            public_key[i * N..(i + 1) * N].copy_from_slice(&top);
        }

        WotsKeypair {
            public_key,
            public_seed: components.public_seed,
            addr_seed: components.addr_seed,
            private_seed: components.private_seed,
        }
    }

    /// Signs a 32-byte message, producing a `PK_BYTES`-long signature.
    pub fn sign(&self, msg: &[u8; 32]) -> [u8; PK_BYTES] {
        let digits = signing_digits(msg);
        let chain_seeds = expand_chain_seeds(&self.private_seed);
        let mut addr = Address::from_addr_seed(&self.addr_seed);

        let mut signature = [0u8; PK_BYTES];
        for (i, chain_seed) in chain_seeds.iter().enumerate() {
            addr.set_chain(i as u32);
            let steps = digits[i] as usize;
            let sig_i = gen_chain(*chain_seed, 0, steps, &self.public_seed, &mut addr);
            signature[i * N..(i + 1) * N].copy_from_slice(&sig_i);
        }
        signature
    }
}

/// Reconstructs the chain-top public key implied by a signature: for each
/// chain, runs the remaining `w-1-l[i]` steps from where signing stopped.
/// A genuine signature reconstructs exactly the signer's public key; a
/// forged or corrupted one does not.
pub fn recover_public_key(
    msg: &[u8; 32],
    signature: &[u8; PK_BYTES],
    public_seed: &[u8; 32],
    addr_seed: &[u8; 32],
) -> [u8; PK_BYTES] {
    let digits = signing_digits(msg);
    let mut addr = Address::from_addr_seed(addr_seed);

    let mut reconstructed = [0u8; PK_BYTES];
    for i in 0..LEN {
        addr.set_chain(i as u32);
        let mut sig_i = [0u8; N];
        sig_i.copy_from_slice(&signature[i * N..(i + 1) * N]);

        let start = digits[i] as usize;
        let steps = (W - 1) - start;
        let top = gen_chain(sig_i, start, steps, public_seed, &mut addr);
        reconstructed[i * N..(i + 1) * N].copy_from_slice(&top);
    }

    reconstructed
}

/// Verifies a WOTS+ signature against the given public key and public
/// material. Returns `true` iff the signature reconstructs `public_key`
/// exactly.
pub fn verify(
    msg: &[u8; 32],
    signature: &[u8; PK_BYTES],
    public_key: &[u8; PK_BYTES],
    public_seed: &[u8; 32],
    addr_seed: &[u8; 32],
) -> bool {
    recover_public_key(msg, signature, public_seed, addr_seed) == *public_key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_byte(b: u8) -> [u8; 32] {
        [b; 32]
    }

    fn sequential_seed() -> [u8; 32] {
        let mut s = [0u8; 32];
        for (i, b) in s.iter_mut().enumerate() {
            *b = i as u8;
        }
        s
    }

    #[test]
    fn keygen_and_sign_have_expected_sizes() {
        let kp = WotsKeypair::from_seed(&sequential_seed());
        assert_eq!(kp.public_key.len(), PK_BYTES);
        assert_eq!(PK_BYTES, 2144);

        let msg = seed_from_byte(0xff);
        let sig = kp.sign(&msg);
        assert_eq!(sig.len(), PK_BYTES);
    }

    #[test]
    fn keygen_is_deterministic() {
        let seed = sequential_seed();
        let a = WotsKeypair::from_seed(&seed);
        let b = WotsKeypair::from_seed(&seed);
        assert_eq!(a.public_key, b.public_key);
        assert_eq!(a.public_seed, b.public_seed);
        assert_eq!(a.addr_seed, b.addr_seed);
    }

    #[test]
    fn different_seeds_give_different_keys() {
        let a = WotsKeypair::from_seed(&seed_from_byte(0x00));
        let b = WotsKeypair::from_seed(&seed_from_byte(0xff));
        assert_ne!(a.public_key, b.public_key);
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let kp = WotsKeypair::from_seed(&sequential_seed());
        let msg = seed_from_byte(0xab);
        let sig = kp.sign(&msg);
        assert!(verify(&msg, &sig, &kp.public_key, &kp.public_seed, &kp.addr_seed));
    }

    #[test]
    fn flipping_a_signature_byte_breaks_verification() {
        let kp = WotsKeypair::from_seed(&seed_from_byte(0x42));
        let msg = seed_from_byte(0x07);
        let mut sig = kp.sign(&msg);
        sig[0] ^= 0x01;
        assert!(!verify(&msg, &sig, &kp.public_key, &kp.public_seed, &kp.addr_seed));
    }

    #[test]
    fn flipping_the_message_breaks_verification() {
        let kp = WotsKeypair::from_seed(&seed_from_byte(0x11));
        let msg = seed_from_byte(0x22);
        let sig = kp.sign(&msg);
        let mut other_msg = msg;
        other_msg[31] ^= 0x01;
        assert!(!verify(&other_msg, &sig, &kp.public_key, &kp.public_seed, &kp.addr_seed));
    }

    #[test]
    fn signing_digits_checksum_is_within_range() {
        // every digit must be a valid base-16 nibble (0..=15), including the
        // checksum's three digits.
        let digits = signing_digits(&seed_from_byte(0xaa));
        assert_eq!(digits.len(), LEN);
        assert!(digits.iter().all(|&d| d < W as u8));
    }

    #[test]
    fn components_use_distinct_fixed_suffixes() {
        let seed = seed_from_byte(0x05);
        let c = derive_components(&seed);
        assert_ne!(c.private_seed, c.public_seed);
        assert_ne!(c.public_seed, c.addr_seed);
        assert_ne!(c.private_seed, c.addr_seed);
    }
}
