//! The cryptographic core of the Mochimo client SDK: WOTS+ keypairs,
//! ledger addresses, the deterministic PRNG, and hierarchical account
//! derivation.
//!
//! Every function here is a pure, synchronous transform of its inputs —
//! there is no global state, no hidden cache, no I/O. Callers are
//! responsible for persisting the one piece of mutable state the whole
//! scheme depends on: the per-account spend index (see [`derive::SpendIndexStore`]).
pub mod address;
pub mod derive;
mod error;
pub mod hash;
pub mod prng;
pub mod wots;

pub use crate::error::WalletError;
