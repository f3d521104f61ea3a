//! Hex-string entry points mirroring the byte-oriented API.
//!
//! Per the Design Notes' "accept both raw bytes and hex strings... normalize
//! immediately" guidance: every fixed-size buffer accepted or returned by
//! [`crate::tx`] also has a hex-string counterpart here. An optional `0x`
//! prefix is stripped on ingress, same as every other hex boundary in this
//! workspace.
use mochimo_types::hexutil::decode_fixed;
use mochimo_types::CoreError;

use crate::tx::{build_transaction, verify_transaction, BuildParams, Transaction, TX_BYTES};

/// Hex-string counterpart of [`BuildParams`]. All fixed-width fields are
/// plain (optionally `0x`-prefixed) hex strings; numeric and memo fields
/// are unchanged.
pub struct BuildParamsHex<'a> {
    pub src_tag: &'a str,
    pub source_pk_extended: &'a str,
    pub change_pk_extended: &'a str,
    pub secret: &'a str,
    pub balance: u64,
    pub amount: u64,
    pub fee: u64,
    pub dst_account_tag: &'a str,
    pub memo: &'a str,
    pub blocks_to_live: u64,
}

/// Builds and signs a transaction from hex-encoded fixed-width fields.
pub fn build_transaction_hex(params: BuildParamsHex) -> Result<Transaction, CoreError> {
    let parsed = BuildParams {
        src_tag: decode_fixed("src_tag", params.src_tag)?,
        source_pk_extended: decode_fixed("source_pk_extended", params.source_pk_extended)?,
        change_pk_extended: decode_fixed("change_pk_extended", params.change_pk_extended)?,
        secret: decode_fixed("secret", params.secret)?,
        balance: params.balance,
        amount: params.amount,
        fee: params.fee,
        dst_account_tag: decode_fixed("dst_account_tag", params.dst_account_tag)?,
        memo: params.memo,
        blocks_to_live: params.blocks_to_live,
    };
    build_transaction(parsed)
}

/// Verifies a hex-encoded, 2408-byte transaction blob.
pub fn verify_transaction_hex(hex_blob: &str) -> Result<bool, CoreError> {
    let bytes: [u8; TX_BYTES] = decode_fixed("transaction", hex_blob)?;
    verify_transaction(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mochimo_wallet::derive::{derive_wots_keypair, derive_wots_secret, get_account};

    #[test]
    fn build_and_verify_round_trip_via_hex() {
        let master_seed = [0x09u8; 32];
        let info = get_account(&master_seed, 0);
        let source = derive_wots_keypair(&info.account_seed, 0, info.account_tag);
        let change = derive_wots_keypair(&info.account_seed, 1, info.account_tag);
        let secret = derive_wots_secret(&info.account_seed, 0);

        let tx = build_transaction_hex(BuildParamsHex {
            src_tag: &hex::encode(source.ledger_address.tag),
            source_pk_extended: &hex::encode(source.extended_public_key),
            change_pk_extended: &hex::encode(change.extended_public_key),
            secret: &hex::encode(secret),
            balance: 100_000,
            amount: 5_000,
            fee: 500,
            dst_account_tag: &format!("0x{}", hex::encode([0x01u8; 20])),
            memo: "TEST-1",
            blocks_to_live: 0,
        })
        .unwrap();

        assert!(verify_transaction_hex(&tx.to_hex()).unwrap());
    }
}
