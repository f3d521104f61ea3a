//! C ABI bindings over [`crate::account::Account`] and raw transaction
//! verification, for embedding this core in non-Rust wallets.
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uchar, c_uint};
use std::ptr::null_mut;

use ffi_helpers::error_handling::error_message_utf8;
use libc::c_ulonglong;

use mochimo_types::hexutil::{decode_fixed, strip_0x};
use mochimo_wallet::derive::InMemorySpendIndexStore;

use crate::account::Account;

/// Release a string returned from this crate.
#[no_mangle]
pub extern "C" fn cstring_free(s: *mut c_char) {
    unsafe {
        if s.is_null() {
            return;
        }
        CString::from_raw(s)
    };
}

/// Derives account `acct_idx` from a 32-byte `master_seed`, backed by an
/// in-memory spend-index store. The returned pointer must be freed with
/// [`account_free`].
///
/// # Errors
/// Returns a nullptr if `master_seed` is null; the error cause is readable
/// via [`error_message_utf8`].
#[no_mangle]
pub extern "C" fn account_new(master_seed: *const c_uchar, acct_idx: c_uint) -> *mut Account<InMemorySpendIndexStore> {
    null_pointer_check!(master_seed);

    let seed = unsafe { std::slice::from_raw_parts(master_seed, 32) };
    let mut master = [0u8; 32];
    master.copy_from_slice(seed);

    Box::into_raw(Box::new(Account::new(master, acct_idx as u32)))
}

/// Deallocate an [`Account`] instance.
#[no_mangle]
pub extern "C" fn account_free(ptr: *mut Account<InMemorySpendIndexStore>) {
    if ptr.is_null() {
        return;
    }
    unsafe { Box::from_raw(ptr) };
}

/// Returns the account's persistent tag, hex encoded.
///
/// # Errors
/// Returns a nullptr if `ptr` is null.
#[no_mangle]
pub extern "C" fn account_tag_hex(ptr: *const Account<InMemorySpendIndexStore>) -> *mut c_char {
    null_pointer_check!(ptr);

    let account = unsafe { ptr.as_ref().unwrap() };
    let hex = mochimo_types::hexutil::encode(&account.tag());
    CString::new(hex).unwrap().into_raw()
}

/// Returns the account's deposit address, Base58+CRC16 encoded.
///
/// # Errors
/// Returns a nullptr if `ptr` is null.
#[no_mangle]
pub extern "C" fn account_deposit_address_base58(ptr: *const Account<InMemorySpendIndexStore>) -> *mut c_char {
    null_pointer_check!(ptr);

    let account = unsafe { ptr.as_ref().unwrap() };
    CString::new(account.deposit_address_base58()).unwrap().into_raw()
}

/// Builds, signs and serializes a spend transaction, returning its
/// 2408-byte blob hex encoded and writing the spend index it consumed to
/// `spend_idx_out`. This does **not** mark that index used — call
/// [`account_confirm_spend`] with the same index only once the transaction
/// has actually been broadcast and accepted.
///
/// # Errors
/// Returns a nullptr if `ptr`, `dst_account_tag_hex`, `memo` or
/// `spend_idx_out` is null, or on any build failure (insufficient balance,
/// bad memo grammar, ...); the error cause is readable via
/// [`error_message_utf8`].
#[no_mangle]
pub extern "C" fn account_spend(
    ptr: *mut Account<InMemorySpendIndexStore>,
    dst_account_tag_hex: *const c_char,
    amount: c_ulonglong,
    balance: c_ulonglong,
    fee: c_ulonglong,
    memo: *const c_char,
    blocks_to_live: c_ulonglong,
    spend_idx_out: *mut c_uint,
) -> *mut c_char {
    null_pointer_check!(ptr);
    null_pointer_check!(dst_account_tag_hex);
    null_pointer_check!(memo);
    null_pointer_check!(spend_idx_out);

    let dst_c_str = unsafe { CStr::from_ptr(dst_account_tag_hex).to_string_lossy() };
    let memo_c_str = unsafe { CStr::from_ptr(memo).to_string_lossy() };

    let dst_account_tag: [u8; 20] = match decode_fixed("dst_account_tag", dst_c_str.as_ref()) {
        Ok(tag) => tag,
        Err(e) => {
            ffi_helpers::update_last_error(e);
            return null_mut();
        }
    };

    let account = unsafe { ptr.as_mut().unwrap() };
    let signed = match account
        .spend(dst_account_tag, amount as u64, balance as u64)
        .fee(fee as u64)
        .memo(memo_c_str.as_ref())
        .blocks_to_live(blocks_to_live as u64)
        .sign()
    {
        Ok(signed) => signed,
        Err(e) => {
            ffi_helpers::update_last_error(e);
            return null_mut();
        }
    };

    unsafe { *spend_idx_out = signed.spend_index() };
    CString::new(signed.transaction().to_hex()).unwrap().into_raw()
}

/// Marks `spend_idx` as used, so it is never signed again.
///
/// Call this only after the transaction returned by [`account_spend`] for
/// `spend_idx` has been broadcast and accepted. Silently does nothing if
/// `ptr` is null.
#[no_mangle]
pub extern "C" fn account_confirm_spend(ptr: *mut Account<InMemorySpendIndexStore>, spend_idx: c_uint) {
    if ptr.is_null() {
        return;
    }
    let account = unsafe { ptr.as_mut().unwrap() };
    account.confirm_spend(spend_idx);
}

/// Verifies a hex-encoded 2408-byte transaction blob's embedded WOTS+
/// signature against its own declared source address. Returns `1` if
/// valid, `0` if invalid, `-1` on a decoding error.
///
/// # Errors
/// Sets the thread-local error message (see [`error_message_utf8`]) when
/// returning `-1`.
#[no_mangle]
pub extern "C" fn transaction_verify_hex(transaction_hex: *const c_char) -> c_int {
    if transaction_hex.is_null() {
        ffi_helpers::update_last_error(mochimo_types::CoreError::InvalidHex("null transaction ptr".to_owned()));
        return -1;
    }

    let hex_c_str = unsafe { CStr::from_ptr(transaction_hex).to_string_lossy() };
    let decoded = match hex::decode(strip_0x(hex_c_str.as_ref())) {
        Ok(bytes) => bytes,
        Err(e) => {
            ffi_helpers::update_last_error(mochimo_types::CoreError::InvalidHex(e.to_string()));
            return -1;
        }
    };

    let bytes: [u8; mochimo_tx::tx::TX_BYTES] = match decoded.try_into() {
        Ok(b) => b,
        Err(bytes) => {
            ffi_helpers::update_last_error(mochimo_types::CoreError::InvalidInputSize {
                what: "transaction",
                expected: mochimo_tx::tx::TX_BYTES,
                actual: bytes.len(),
            });
            return -1;
        }
    };

    match mochimo_tx::tx::verify_transaction(&bytes) {
        Ok(true) => 1,
        Ok(false) => 0,
        Err(e) => {
            ffi_helpers::update_last_error(e);
            -1
        }
    }
}

// Macro to export the ffi_helpers's functions used to access the error message from other programming languages.
export_error_handling_functions!();

#[cfg(test)]
mod tests {
    use super::*;

    fn master() -> [u8; 32] {
        [0x21u8; 32]
    }

    #[test]
    fn account_lifecycle() {
        let seed = master();
        let ptr = account_new(seed.as_ptr(), 0);
        assert!(!ptr.is_null());

        let tag = account_tag_hex(ptr);
        assert!(!tag.is_null());
        let tag_str = unsafe { CString::from_raw(tag) }.to_string_lossy().to_string();
        assert_eq!(tag_str.len(), 40);

        let deposit = account_deposit_address_base58(ptr);
        assert!(!deposit.is_null());
        cstring_free(deposit);

        account_free(ptr);
    }

    #[test]
    fn account_new_with_null_seed_fails() {
        let ptr = account_new(std::ptr::null(), 0);
        assert!(ptr.is_null());
    }

    #[test]
    fn spend_roundtrips_through_hex_and_verifies() {
        let seed = master();
        let ptr = account_new(seed.as_ptr(), 0);

        let dst_tag = CString::new("aa".repeat(20)).unwrap().into_raw();
        let memo = CString::new("FFI-1").unwrap().into_raw();
        let mut spend_idx: c_uint = 0;

        let tx_hex = account_spend(ptr, dst_tag, 5_000, 100_000, 500, memo, 0, &mut spend_idx);
        assert!(!tx_hex.is_null());
        assert_eq!(spend_idx, 0);

        let ok = transaction_verify_hex(tx_hex);
        assert_eq!(ok, 1);

        account_confirm_spend(ptr, spend_idx);

        cstring_free(tx_hex);
        cstring_free(dst_tag);
        cstring_free(memo);
        account_free(ptr);
    }
}
