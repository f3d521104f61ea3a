//! Transaction assembly, message hashing, signing and serialization.
//!
//! Builds the protocol's fixed 2408-byte transaction blob. This is a pure
//! function of its inputs — no network calls, no retries, no state beyond
//! what the caller passes in. See `mochimo_wallet::derive::SpendIndexStore`
//! for the external single-use invariant this layer depends on but cannot
//! enforce itself.
use mochimo_types::CoreError;
use mochimo_wallet::address::{dsa_hash, LedgerAddress};
use mochimo_wallet::hash::sha256;
use mochimo_wallet::wots::{self, WotsKeypair};

use crate::memo;

const HEADER_BYTES: usize = 4 + 40 + 40 + 8 + 8 + 8 + 8; // 116
const DATA_BYTES: usize = 20 + 16 + 8; // 44
const SIGNATURE_SECTION_BYTES: usize = 2144 + 32 + 20 + 12; // 2208
const TRAILER_BYTES: usize = 8 + 32; // 40

/// Total size of a serialized transaction.
pub const TX_BYTES: usize = HEADER_BYTES + DATA_BYTES + SIGNATURE_SECTION_BYTES + TRAILER_BYTES;

const FIXED_TAG: [u8; 12] = mochimo_wallet::derive::FIXED_TAG;

/// Inputs to build-and-sign a single-destination transaction.
pub struct BuildParams<'a> {
    /// The source account's persistent tag — not its current DSA hash.
    pub src_tag: [u8; 20],
    /// The current spend's extended public key (2208 bytes).
    pub source_pk_extended: [u8; 2208],
    /// The *next* spend's extended public key (2208 bytes).
    pub change_pk_extended: [u8; 2208],
    /// The WOTS+ seed for the current spend.
    pub secret: [u8; 32],
    pub balance: u64,
    pub amount: u64,
    pub fee: u64,
    pub dst_account_tag: [u8; 20],
    pub memo: &'a str,
    pub blocks_to_live: u64,
}

/// A built, signed transaction: the raw 2408-byte blob plus the pieces
/// callers commonly need without re-parsing it.
pub struct Transaction {
    bytes: [u8; TX_BYTES],
    message_hash: [u8; 32],
    source_ledger_address: LedgerAddress,
    change_ledger_address: LedgerAddress,
}

impl Transaction {
    pub fn as_bytes(&self) -> &[u8; TX_BYTES] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn message_hash(&self) -> [u8; 32] {
        self.message_hash
    }

    pub fn source_ledger_address(&self) -> LedgerAddress {
        self.source_ledger_address
    }

    pub fn change_ledger_address(&self) -> LedgerAddress {
        self.change_ledger_address
    }
}

/// Builds and signs a transaction per the protocol's byte layout.
pub fn build_transaction(params: BuildParams) -> Result<Transaction, CoreError> {
    let BuildParams {
        src_tag,
        source_pk_extended,
        change_pk_extended,
        secret,
        balance,
        amount,
        fee,
        dst_account_tag,
        memo,
        blocks_to_live,
    } = params;

    if amount == 0 {
        return Err(CoreError::AmountOutOfRange { shortfall: amount });
    }
    let required = amount.checked_add(fee).ok_or(CoreError::AmountOutOfRange { shortfall: u64::MAX })?;
    if balance < required {
        return Err(CoreError::AmountOutOfRange {
            shortfall: required - balance,
        });
    }

    let src_pk = &source_pk_extended[..2144];
    let src_dsa = dsa_hash(src_pk);

    let chg_pk = &change_pk_extended[..2144];
    let chg_dsa = dsa_hash(chg_pk);

    if chg_dsa == src_tag {
        return Err(CoreError::ChangeAddressImplicit);
    }

    let source_ledger_address = LedgerAddress::new(src_tag, src_dsa);
    let change_ledger_address = LedgerAddress::new(src_tag, chg_dsa);

    let change_amount = balance - amount - fee;

    let memo_padded = memo::pad(memo)?;

    let mut header = [0u8; HEADER_BYTES];
    // options = { type=0x00, dsa=0x00, dst_count_minus_1=0, reserved=0 }
    header[0..4].copy_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    header[4..44].copy_from_slice(&source_ledger_address.to_bytes());
    header[44..84].copy_from_slice(&change_ledger_address.to_bytes());
    header[84..92].copy_from_slice(&amount.to_le_bytes());
    header[92..100].copy_from_slice(&change_amount.to_le_bytes());
    header[100..108].copy_from_slice(&fee.to_le_bytes());
    header[108..116].copy_from_slice(&blocks_to_live.to_le_bytes());

    let mut data = [0u8; DATA_BYTES];
    data[..20].copy_from_slice(&dst_account_tag);
    data[20..36].copy_from_slice(&memo_padded);
    data[36..44].copy_from_slice(&amount.to_le_bytes());

    let mut message = Vec::with_capacity(HEADER_BYTES + DATA_BYTES);
    message.extend_from_slice(&header);
    message.extend_from_slice(&data);
    let msg_hash = sha256(&message);

    let keypair = WotsKeypair::from_seed(&secret);
    if dsa_hash(&keypair.public_key) != src_dsa {
        return Err(CoreError::SecretMismatch);
    }

    let signature = keypair.sign(&msg_hash);

    let mut signature_section = [0u8; SIGNATURE_SECTION_BYTES];
    signature_section[..2144].copy_from_slice(&signature);
    signature_section[2144..2176].copy_from_slice(&keypair.public_seed);
    signature_section[2176..2196].copy_from_slice(&keypair.addr_seed[..20]);
    signature_section[2196..].copy_from_slice(&FIXED_TAG);

    let trailer = [0u8; TRAILER_BYTES];

    let mut bytes = [0u8; TX_BYTES];
    let mut offset = 0;
    bytes[offset..offset + HEADER_BYTES].copy_from_slice(&header);
    offset += HEADER_BYTES;
    bytes[offset..offset + DATA_BYTES].copy_from_slice(&data);
    offset += DATA_BYTES;
    bytes[offset..offset + SIGNATURE_SECTION_BYTES].copy_from_slice(&signature_section);
    offset += SIGNATURE_SECTION_BYTES;
    bytes[offset..offset + TRAILER_BYTES].copy_from_slice(&trailer);

    Ok(Transaction {
        bytes,
        message_hash: msg_hash,
        source_ledger_address,
        change_ledger_address,
    })
}

/// Re-derives the message hash from a parsed transaction blob and checks
/// the embedded WOTS+ signature against the source ledger address's DSA
/// hash. Pure client-side sanity check, not network validation.
pub fn verify_transaction(bytes: &[u8; TX_BYTES]) -> Result<bool, CoreError> {
    let header = &bytes[..HEADER_BYTES];
    let data = &bytes[HEADER_BYTES..HEADER_BYTES + DATA_BYTES];

    let mut message = Vec::with_capacity(HEADER_BYTES + DATA_BYTES);
    message.extend_from_slice(header);
    message.extend_from_slice(data);
    let msg_hash = sha256(&message);

    let src_dsa: [u8; 20] = header[24..44].try_into().unwrap();

    let sig_section_start = HEADER_BYTES + DATA_BYTES;
    let mut signature = [0u8; 2144];
    signature.copy_from_slice(&bytes[sig_section_start..sig_section_start + 2144]);

    let mut public_seed = [0u8; 32];
    public_seed.copy_from_slice(&bytes[sig_section_start + 2144..sig_section_start + 2176]);

    let mut addr_seed = [0u8; 32];
    addr_seed[..20].copy_from_slice(&bytes[sig_section_start + 2176..sig_section_start + 2196]);

    let recovered = wots::recover_public_key(&msg_hash, &signature, &public_seed, &addr_seed);
    Ok(dsa_hash(&recovered) == src_dsa)
}
