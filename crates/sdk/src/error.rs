//! Error taxonomy of the SDK.
//!
//! Encoder errors are always fatal to the current sign operation; the caller
//! re-validates input and retries the whole pipeline. Reconciler errors from
//! the lookup/switch/add steps surface immediately; only confirmation polling
//! absorbs transient failures, up to its retry budget.

use thiserror::Error;

use crate::{types::ChainId, wallet::WalletError};

/// Error building the order signing payload.
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// Input was not a well-formed order record.
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    /// Order nonce was not hex-decodable into the expected 16 bytes.
    #[error("invalid nonce: {0}")]
    InvalidNonce(String),
    /// A field value did not match the width or shape implied by its tag.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Error reconciling the wallet onto a target chain.
#[derive(Debug, Clone, Error)]
pub enum SwitchError {
    /// Chain key is not present in the registry.
    #[error("unknown chain key: {0}")]
    UnknownChain(String),
    /// The wallet rejected the `wallet_addEthereumChain` request.
    #[error("failed to add chain to wallet: {0}")]
    ChainAddition(WalletError),
    /// The wallet rejected the `wallet_switchEthereumChain` request for a
    /// reason other than the chain being unrecognized.
    #[error("chain switch request failed: {0}")]
    ChainSwitch(WalletError),
    /// Confirmation polling exhausted its retry budget without the wallet
    /// ever reporting the target chain.
    #[error("wallet did not report chain {chain_id} after {attempts} attempts")]
    ConfirmationTimeout { chain_id: ChainId, attempts: u32 },
    /// Another reconciliation is already running on this reconciler.
    #[error("another chain reconciliation is already in progress")]
    InProgress,
    /// The caller's cancellation token fired during confirmation polling.
    #[error("chain reconciliation cancelled")]
    Cancelled,
}

/// Error running the encode → hash → `personal_sign` pipeline.
#[derive(Debug, Clone, Error)]
pub enum SignError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// Wallet returned something other than a hex signature string.
    #[error("unexpected wallet response: {0}")]
    UnexpectedResponse(String),
}
