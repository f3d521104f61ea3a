//! The error taxonomy shared by every crate in the workspace.
//!
//! Each crate also defines its own thin, crate-local error enum for the
//! failure modes specific to its boundary (bad URIs, HTTP transport, JSON
//! decoding, ...); those convert into [`CoreError`] where they cross back
//! into cryptographic core territory. `CoreError` itself only carries the
//! failure kinds described by the specification: bad fixed-width inputs,
//! grammar violations, arithmetic and checksum failures, and the two
//! cryptographic assertions the core is able to check.
use thiserror::Error;

/// Errors surfaced by the cryptographic core (hashing, WOTS+, derivation,
/// transaction assembly, address codecs).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A fixed-width field (tag, public key, secret, address, ...) was the
    /// wrong length.
    #[error("invalid size for {what}: expected {expected} bytes, got {actual}")]
    InvalidInputSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A hex-string input contained non-hex characters.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// The memo failed the alternating-letters/digits grammar.
    #[error("invalid memo `{0}`")]
    InvalidMemo(String),

    /// `amount <= 0`, `fee < 0` (unrepresentable for u64, kept for parity
    /// with the source taxonomy), or `balance < amount + fee`.
    #[error("amount out of range: short by {shortfall} nanoMCM")]
    AmountOutOfRange { shortfall: u64 },

    /// The computed change ledger address is implicit (`tag == dsa`); the
    /// caller must derive the change keypair from a fresh spend index.
    #[error("change address must not be implicit; derive a fresh spend index")]
    ChangeAddressImplicit,

    /// The WOTS+ keypair re-derived from `secret` does not match the
    /// declared source DSA hash.
    #[error("secret does not match the declared source DSA hash")]
    SecretMismatch,

    /// A Base58+CRC payload failed checksum verification on decode.
    #[error("checksum failure decoding base58 payload")]
    ChecksumFailure,

    /// A WOTS+ signature did not verify against the claimed public key.
    #[error("signature verification failed")]
    VerificationFailure,
}
