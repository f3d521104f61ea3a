//! Thin REST client for the Mochimo mesh API: balance, transaction search,
//! mempool, submit and tag-resolve. An explicitly external collaborator —
//! see the crate-level data model in `mochimo-wallet`/`mochimo-tx` for the
//! cryptographic core this client carries opaque JSON for.
pub mod client;
mod error;
pub mod json;

pub use crate::client::MochimoClient;
pub use crate::error::ClientError;
