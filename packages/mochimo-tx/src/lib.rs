//! Base58+CRC tag codec, memo grammar validation, and transaction assembly
//! for the Mochimo protocol's fixed 2408-byte transaction format.
pub mod base58;
mod error;
pub mod hexio;
pub mod memo;
pub mod tx;

pub use crate::error::TxError;
