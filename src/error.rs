//! Error type re-exported by the facade crate.
//!
//! The SDK surface re-exports the cryptographic core's shared taxonomy
//! directly; `mochimo-client`'s `ClientError` is re-exported separately
//! since it covers an unrelated failure domain (HTTP transport), matching
//! the one-enum-per-crate-boundary convention used throughout the
//! workspace.
pub use mochimo_types::CoreError as SdkError;
