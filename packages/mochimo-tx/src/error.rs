//! Error type re-exported by this crate.
//!
//! Transaction assembly shares the cryptographic core's error taxonomy; see
//! `mochimo_wallet::error` for the same convention.
pub use mochimo_types::CoreError as TxError;
