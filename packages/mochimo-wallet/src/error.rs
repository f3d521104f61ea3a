//! Error type re-exported by this crate.
//!
//! The cryptographic core has a single error taxonomy, shared with
//! `mochimo-tx`, defined in [`mochimo_types::CoreError`]. This module just
//! gives it a crate-local name, mirroring the teacher's one-error-enum-per-
//! crate-boundary convention.
pub use mochimo_types::CoreError as WalletError;
