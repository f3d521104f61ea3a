//! A convenience wrapper over the cryptographic core: one account, carrying
//! its own spend-index bookkeeping, with a chainable builder for spends.
//!
//! This mirrors the shape of a wallet-level `TxBuilder`, but the WOTS+
//! single-use invariant means every signature here consumes a spend index —
//! `Account` owns a [`SpendIndexStore`] so callers don't have to thread
//! indices through by hand. Signing never marks an index used by itself:
//! a signed transaction that is never broadcast, or whose broadcast fails,
//! must remain resignable. Callers call [`Account::confirm_spend`] with the
//! index reported by [`SignedSpend::spend_index`] only once the transaction
//! has actually been submitted and accepted.
use mochimo_tx::tx::{self, BuildParams, Transaction};
use mochimo_types::CoreError;
use mochimo_wallet::derive::{self, AccountInfo, InMemorySpendIndexStore, SpendIndexStore};

/// A derived account plus its spend-index bookkeeping.
pub struct Account<S: SpendIndexStore = InMemorySpendIndexStore> {
    master_seed: [u8; 32],
    acct_idx: u32,
    info: AccountInfo,
    store: S,
}

impl Account<InMemorySpendIndexStore> {
    /// Derives account `acct_idx` from `master_seed`, backed by an
    /// in-memory spend-index store. Reach for [`Account::with_store`] to
    /// supply durable persistence instead.
    pub fn new(master_seed: [u8; 32], acct_idx: u32) -> Self {
        Self::with_store(master_seed, acct_idx, InMemorySpendIndexStore::new())
    }
}

impl<S: SpendIndexStore> Account<S> {
    /// Derives account `acct_idx` from `master_seed`, backed by `store`.
    pub fn with_store(master_seed: [u8; 32], acct_idx: u32, store: S) -> Self {
        let info = derive::get_account(&master_seed, acct_idx);
        Account {
            master_seed,
            acct_idx,
            info,
            store,
        }
    }

    /// The account's persistent 20-byte tag.
    pub fn tag(&self) -> [u8; 20] {
        self.info.account_tag
    }

    /// The implicit deposit address (`tag == dsa`) for spend index 0.
    pub fn deposit_address(&self) -> mochimo_wallet::address::LedgerAddress {
        self.info.deposit_address
    }

    /// The deposit address's tag, Base58+CRC16 encoded.
    pub fn deposit_address_base58(&self) -> String {
        mochimo_tx::base58::encode_tag(&self.info.deposit_address.tag)
    }

    fn next_spend_index(&self) -> u32 {
        self.store.next_spend_index(&self.info.account_tag)
    }

    /// Starts building a single-destination spend of `amount` nanoMCM
    /// against a known current `balance`, leaving change at the account's
    /// next unused spend index.
    pub fn spend(&mut self, dst_account_tag: [u8; 20], amount: u64, balance: u64) -> SpendBuilder<'_, S> {
        SpendBuilder {
            account: self,
            dst_account_tag,
            amount,
            balance,
            fee: 0,
            memo: "",
            blocks_to_live: 0,
        }
    }

    /// Marks `spend_idx` as used, so it is never signed again.
    ///
    /// Call this only after the transaction built for `spend_idx` has been
    /// broadcast and accepted by the network — not merely signed. A
    /// signature that was dropped, or whose submission failed, must remain
    /// available to resign against the same index.
    pub fn confirm_spend(&mut self, spend_idx: u32) {
        self.store.record_spend(&self.info.account_tag, spend_idx);
    }
}

/// Chainable builder for a single spend transaction, terminated by
/// [`SpendBuilder::sign`].
pub struct SpendBuilder<'a, S: SpendIndexStore> {
    account: &'a mut Account<S>,
    dst_account_tag: [u8; 20],
    amount: u64,
    balance: u64,
    fee: u64,
    memo: &'a str,
    blocks_to_live: u64,
}

impl<'a, S: SpendIndexStore> SpendBuilder<'a, S> {
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn memo(mut self, memo: &'a str) -> Self {
        self.memo = memo;
        self
    }

    pub fn blocks_to_live(mut self, blocks_to_live: u64) -> Self {
        self.blocks_to_live = blocks_to_live;
        self
    }

    /// Derives the spending and change keypairs and builds and signs the
    /// transaction. Never logs the account's master seed or any derived
    /// secret.
    ///
    /// This does **not** mark the consumed spend index as used — call
    /// [`Account::confirm_spend`] with [`SignedSpend::spend_index`] once the
    /// returned transaction has actually been broadcast.
    pub fn sign(self) -> Result<SignedSpend, CoreError> {
        let account = self.account;
        let spend_idx = account.next_spend_index();
        let change_idx = spend_idx + 1;

        tracing::debug!(acct_idx = account.acct_idx, spend_idx, "signing spend");

        let source = derive::derive_wots_keypair(&account.info.account_seed, spend_idx, account.info.account_tag);
        let change = derive::derive_wots_keypair(&account.info.account_seed, change_idx, account.info.account_tag);
        let secret = derive::derive_wots_secret(&account.info.account_seed, spend_idx);

        let transaction = tx::build_transaction(BuildParams {
            src_tag: account.info.account_tag,
            source_pk_extended: source.extended_public_key,
            change_pk_extended: change.extended_public_key,
            secret,
            balance: self.balance,
            amount: self.amount,
            fee: self.fee,
            dst_account_tag: self.dst_account_tag,
            memo: self.memo,
            blocks_to_live: self.blocks_to_live,
        })?;

        Ok(SignedSpend { transaction, spend_idx })
    }
}

/// A signed transaction paired with the spend index it consumed.
///
/// Bundling the two together is what makes [`Account::confirm_spend`] safe
/// to call only with an index that really was signed: there is no way to
/// get a spend index out of this type without having produced a signature
/// for it first.
pub struct SignedSpend {
    transaction: Transaction,
    spend_idx: u32,
}

impl SignedSpend {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// The spend index this transaction consumed. Pass to
    /// [`Account::confirm_spend`] after a successful broadcast.
    pub fn spend_index(&self) -> u32 {
        self.spend_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn deposit_address_is_implicit() {
        let account = Account::new(master(0x10), 0);
        let deposit = account.deposit_address();
        assert_eq!(deposit.tag, deposit.dsa);
        assert_eq!(deposit.tag, account.tag());
    }

    #[test]
    fn signing_alone_does_not_consume_the_spend_index() {
        let mut account = Account::new(master(0x11), 0);
        let signed = account
            .spend([0xaa; 20], 5_000, 100_000)
            .fee(500)
            .memo("HELLO-1")
            .sign()
            .unwrap();

        assert_eq!(signed.transaction().as_bytes().len(), 2408);
        assert_eq!(signed.spend_index(), 0);
        // Signing must not burn the spend index by itself.
        assert_eq!(account.next_spend_index(), 0);

        account.confirm_spend(signed.spend_index());
        assert_eq!(account.next_spend_index(), 1);

        let signed2 = account.spend([0xbb; 20], 1_000, 94_500).fee(500).sign().unwrap();
        assert_ne!(
            signed.transaction().source_ledger_address().dsa,
            signed2.transaction().source_ledger_address().dsa
        );
        account.confirm_spend(signed2.spend_index());
        assert_eq!(account.next_spend_index(), 2);
    }

    #[test]
    fn an_unconfirmed_signature_can_be_resigned_against_the_same_index() {
        let mut account = Account::new(master(0x13), 0);
        let first = account.spend([0xaa; 20], 5_000, 100_000).sign().unwrap();
        let second = account.spend([0xaa; 20], 5_000, 100_000).sign().unwrap();
        assert_eq!(first.spend_index(), second.spend_index());
    }

    #[test]
    fn rejects_overspend() {
        let mut account = Account::new(master(0x12), 0);
        let err = account.spend([0xcc; 20], 5_000, 100).sign().unwrap_err();
        assert!(matches!(err, CoreError::AmountOutOfRange { .. }));
        // A rejected spend must not advance the spend index.
        assert_eq!(account.next_spend_index(), 0);
    }
}
