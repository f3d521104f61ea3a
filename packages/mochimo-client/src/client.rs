//! A thin REST client for the Mochimo mesh API's balance, transaction
//! search, mempool, submit and tag-resolve endpoints.
//!
//! This is an external collaborator, not part of the cryptographic core: it
//! does no retries, no backoff, and treats the bytes it sends/receives as
//! already-validated by the caller.
use mochimo_types::hexutil::strip_0x;
use reqwest::StatusCode;

use crate::error::ClientError;
use crate::json::{
    AccountIdentifier, BalanceRequest, BalanceResponse, CallRequest, CallResponse,
    MempoolRequest, MempoolResponse, MempoolTransactionRequest, MempoolTransactionResponse,
    NetworkIdentifier, SearchTransactionsRequest, SearchTransactionsResponse, SubmitRequest,
    SubmitResponse, TagResolveParams, TagResolveResult, TransactionIdentifier,
};

/// Client to communicate with a Mochimo mesh API node.
#[derive(Clone)]
pub struct MochimoClient {
    http: reqwest::Client,
    base_url: String,
    network: NetworkIdentifier,
}

impl MochimoClient {
    /// Creates a new client targeting `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        MochimoClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            network: NetworkIdentifier::mainnet(),
        }
    }

    async fn post<Req: serde::Serialize, Resp: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, ClientError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<Resp>().await?),
            status => Err(ClientError::Status(status)),
        }
    }

    /// Queries the account balance for a 40-byte ledger address (hex, with
    /// or without `0x`).
    pub async fn balance(&self, ledger_address_hex: &str) -> Result<BalanceResponse, ClientError> {
        let request = BalanceRequest {
            network_identifier: self.network.clone(),
            account_identifier: AccountIdentifier {
                address: format!("0x{}", strip_0x(ledger_address_hex)),
            },
        };
        self.post("/account/balance", &request).await
    }

    /// Searches transactions touching a 20-byte account tag (hex).
    pub async fn search_transactions(&self, tag_hex: &str) -> Result<SearchTransactionsResponse, ClientError> {
        let request = SearchTransactionsRequest {
            network_identifier: self.network.clone(),
            account_identifier: AccountIdentifier {
                address: format!("0x{}", strip_0x(tag_hex)),
            },
        };
        self.post("/search/transactions", &request).await
    }

    /// Lists pending mempool transaction identifiers.
    pub async fn mempool(&self) -> Result<MempoolResponse, ClientError> {
        let request = MempoolRequest {
            network_identifier: self.network.clone(),
        };
        self.post("/mempool", &request).await
    }

    /// Fetches a single pending transaction by hash.
    pub async fn mempool_transaction(&self, tx_hash: &str) -> Result<MempoolTransactionResponse, ClientError> {
        let request = MempoolTransactionRequest {
            network_identifier: self.network.clone(),
            transaction_identifier: TransactionIdentifier {
                hash: tx_hash.to_string(),
            },
        };
        self.post("/mempool/transaction", &request).await
    }

    /// Submits a signed, hex-encoded 2408-byte transaction blob.
    pub async fn submit(&self, signed_transaction_hex: &str) -> Result<TransactionIdentifier, ClientError> {
        let request = SubmitRequest {
            signed_transaction: signed_transaction_hex.to_string(),
        };
        let response: SubmitResponse = self.post("/construction/submit", &request).await?;
        Ok(response.transaction_identifier)
    }

    /// Resolves a 20-byte account tag (hex) to its current ledger address
    /// and balance via the `tag_resolve` call endpoint.
    pub async fn tag_resolve(&self, tag_hex: &str) -> Result<TagResolveResult, ClientError> {
        let request = CallRequest {
            network_identifier: self.network.clone(),
            method: "tag_resolve".to_string(),
            parameters: TagResolveParams {
                tag: format!("0x{}", strip_0x(tag_hex)),
            },
        };
        let response: CallResponse = self.post("/call", &request).await?;
        Ok(response.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trims_trailing_slash() {
        let client = MochimoClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
