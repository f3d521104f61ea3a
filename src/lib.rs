//! Facade crate for the Mochimo offline cryptographic core: WOTS+ keys,
//! hierarchical derivation, ledger addressing and transaction signing.
//!
//! The cryptographic core itself lives in [`mochimo_types`], [`mochimo_wallet`]
//! and [`mochimo_tx`]; this crate re-exports them behind one dependency and
//! adds the [`account`] convenience layer plus optional FFI and
//! wasm-bindgen surfaces. The REST collaborator, [`mochimo_client`], is
//! gated behind the `client` feature since it pulls in an async HTTP stack
//! that offline callers don't need.
#[cfg(feature = "ffi")]
#[macro_use]
extern crate ffi_helpers;

pub use mochimo_tx;
pub use mochimo_types;
pub use mochimo_wallet;

#[cfg(feature = "client")]
pub use mochimo_client;

pub mod account;
mod error;
pub mod logging;

pub use crate::error::SdkError;

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "wasm-bindgen")]
pub mod wasm32_bindgen;
