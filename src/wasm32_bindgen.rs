//! Implementation for WASM via wasm-bindgen.
extern crate bindgen as wasm_bindgen;
use wasm_bindgen::prelude::*;

use mochimo_types::hexutil::{decode_fixed, encode, strip_0x};
use mochimo_wallet::derive::InMemorySpendIndexStore;

use crate::account::Account;

#[wasm_bindgen(js_name = Account)]
pub struct JsAccount {
    account: Account<InMemorySpendIndexStore>,
}

#[wasm_bindgen(js_class = Account)]
impl JsAccount {
    /// Derives account `acct_idx` from a 32-byte `master_seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(master_seed: Vec<u8>, acct_idx: u32) -> Result<JsAccount, JsValue> {
        let master: [u8; 32] = decode_fixed_from_bytes(&master_seed).map_err(|e| JsValue::from(e.to_string()))?;
        Ok(JsAccount {
            account: Account::new(master, acct_idx),
        })
    }

    #[wasm_bindgen(js_name = tagHex)]
    pub fn tag_hex(&self) -> String {
        encode(&self.account.tag())
    }

    #[wasm_bindgen(js_name = depositAddressBase58)]
    pub fn deposit_address_base58(&self) -> String {
        self.account.deposit_address_base58()
    }

    /// Builds and signs a spend transaction, returning its hex-encoded blob
    /// and the spend index it consumed. This does **not** mark that index
    /// used — call [`JsAccount::confirm_spend`] only once the transaction
    /// has actually been broadcast and accepted.
    #[wasm_bindgen(js_name = spend)]
    #[allow(clippy::too_many_arguments)]
    pub fn spend(
        &mut self,
        dst_account_tag_hex: &str,
        amount: u64,
        balance: u64,
        fee: u64,
        memo: &str,
        blocks_to_live: u64,
    ) -> Result<JsSignedSpend, JsValue> {
        let dst_account_tag: [u8; 20] =
            decode_fixed("dst_account_tag", dst_account_tag_hex).map_err(|e| JsValue::from(e.to_string()))?;

        let signed = self
            .account
            .spend(dst_account_tag, amount, balance)
            .fee(fee)
            .memo(memo)
            .blocks_to_live(blocks_to_live)
            .sign()
            .map_err(|e| JsValue::from(e.to_string()))?;

        Ok(JsSignedSpend {
            transaction_hex: signed.transaction().to_hex(),
            spend_index: signed.spend_index(),
        })
    }

    /// Marks `spend_index` as used, after the transaction it signed has
    /// been broadcast and accepted.
    #[wasm_bindgen(js_name = confirmSpend)]
    pub fn confirm_spend(&mut self, spend_index: u32) {
        self.account.confirm_spend(spend_index);
    }
}

/// A signed transaction's hex blob paired with the spend index it consumed.
#[wasm_bindgen(js_name = SignedSpend)]
pub struct JsSignedSpend {
    transaction_hex: String,
    spend_index: u32,
}

#[wasm_bindgen(js_class = SignedSpend)]
impl JsSignedSpend {
    #[wasm_bindgen(getter, js_name = transactionHex)]
    pub fn transaction_hex(&self) -> String {
        self.transaction_hex.clone()
    }

    #[wasm_bindgen(getter, js_name = spendIndex)]
    pub fn spend_index(&self) -> u32 {
        self.spend_index
    }
}

fn decode_fixed_from_bytes(bytes: &[u8]) -> Result<[u8; 32], mochimo_types::CoreError> {
    mochimo_types::hexutil::bytes_to_fixed("master_seed", bytes)
}

/// Verifies a hex-encoded 2408-byte transaction blob's embedded WOTS+
/// signature against its own declared source address.
#[wasm_bindgen(js_name = verifyTransactionHex)]
pub fn verify_transaction_hex(transaction_hex: &str) -> Result<bool, JsValue> {
    let decoded = hex::decode(strip_0x(transaction_hex)).map_err(|e| JsValue::from(e.to_string()))?;
    let bytes: [u8; mochimo_tx::tx::TX_BYTES] = decoded
        .try_into()
        .map_err(|_| JsValue::from("transaction must be exactly 2408 bytes"))?;

    mochimo_tx::tx::verify_transaction(&bytes).map_err(|e| JsValue::from(e.to_string()))
}
