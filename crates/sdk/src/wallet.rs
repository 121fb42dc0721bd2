//! Abstraction over the connected wallet.
//!
//! The SDK never holds ambient wallet state: both the signing pipeline and
//! the reconciler take the provider as an explicit parameter, so each stays
//! independently testable against [`crate::testing::MockWallet`].

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::types::ChainId;

/// `personal_sign` request: signs an arbitrary byte payload without
/// broadcasting a transaction.
pub const PERSONAL_SIGN: &str = "personal_sign";

/// EIP-3326 switch-chain request.
pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";

/// EIP-3085 add-chain request.
pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";

/// EIP-1193 error code the wallet reports when asked to switch to a chain it
/// has never seen; the chain must be added first.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// Error returned by the wallet for a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WalletError {
    /// EIP-1193 numeric error code, if the wallet provided one.
    pub code: Option<i64>,
    pub message: String,
}

impl WalletError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self { code: Some(code), message: message.into() }
    }

    /// Whether the error signals the chain must be added before switching.
    pub fn is_unrecognized_chain(&self) -> bool { self.code == Some(UNRECOGNIZED_CHAIN_CODE) }
}

/// Connected wallet exposing the JSON-RPC `request` entry point and the
/// currently active chain.
pub trait WalletProvider {
    /// Sends a `{method, params}` request to the wallet.
    fn request(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, WalletError>>;

    /// Chain the wallet currently reports as active.
    fn chain_id(&self) -> impl Future<Output = Result<ChainId, WalletError>>;
}

impl<W: WalletProvider + ?Sized> WalletProvider for &W {
    fn request(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, WalletError>> {
        (**self).request(method, params)
    }

    fn chain_id(&self) -> impl Future<Output = Result<ChainId, WalletError>> {
        (**self).chain_id()
    }
}

impl<W: WalletProvider + ?Sized> WalletProvider for Arc<W> {
    fn request(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, WalletError>> {
        (**self).request(method, params)
    }

    fn chain_id(&self) -> impl Future<Output = Result<ChainId, WalletError>> {
        (**self).chain_id()
    }
}
