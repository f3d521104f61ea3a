//! JSON wire shapes for the Mochimo mesh (Rosetta-flavored) REST API.
//!
//! These mirror the request/response shapes given in the specification
//! verbatim; they are opaque collaborator types, not part of the
//! cryptographic core.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkIdentifier {
    pub blockchain: String,
    pub network: String,
}

impl NetworkIdentifier {
    pub fn mainnet() -> Self {
        NetworkIdentifier {
            blockchain: "mochimo".to_string(),
            network: "mainnet".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockIdentifier {
    pub index: u64,
    pub hash: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceRequest {
    pub network_identifier: NetworkIdentifier,
    pub account_identifier: AccountIdentifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub block_identifier: BlockIdentifier,
    pub balances: Vec<Amount>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTransactionsRequest {
    pub network_identifier: NetworkIdentifier,
    pub account_identifier: AccountIdentifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTransactionsResponse {
    pub transactions: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MempoolRequest {
    pub network_identifier: NetworkIdentifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MempoolResponse {
    pub transaction_identifiers: Vec<TransactionIdentifier>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MempoolTransactionRequest {
    pub network_identifier: NetworkIdentifier,
    pub transaction_identifier: TransactionIdentifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MempoolTransactionResponse {
    pub transaction: serde_json::Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub signed_transaction: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub transaction_identifier: TransactionIdentifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TagResolveParams {
    pub tag: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallRequest {
    pub network_identifier: NetworkIdentifier,
    pub method: String,
    pub parameters: TagResolveParams,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TagResolveResult {
    pub address: String,
    pub amount: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallResponse {
    pub result: TagResolveResult,
}
