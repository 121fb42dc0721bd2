//! Signing pipelines: encode → hash → `personal_sign`.

use alloy::primitives::{Bytes, hex};
use serde_json::json;

use crate::{
    encoder,
    error::SignError,
    types::Order,
    wallet::{PERSONAL_SIGN, WalletProvider},
};

/// Runs the full order signing pipeline against the connected wallet.
///
/// Any failure at the encode or hash stage aborts before the wallet is
/// contacted; no partial signing request is ever issued.
pub async fn sign_order<W: WalletProvider>(
    wallet: &W,
    account: &str,
    order: &Order,
) -> Result<Bytes, SignError> {
    let fields = encoder::encode(order)?;
    let digest = encoder::hash(&fields)?;
    log::debug!("signing order digest {digest} for {account}");
    personal_sign(wallet, account, &digest.to_string()).await
}

/// Personal-signs an arbitrary UTF-8 message.
pub async fn sign_message<W: WalletProvider>(
    wallet: &W,
    account: &str,
    message: &str,
) -> Result<Bytes, SignError> {
    let payload = format!("0x{}", hex::encode(message.as_bytes()));
    personal_sign(wallet, account, &payload).await
}

async fn personal_sign<W: WalletProvider>(
    wallet: &W,
    account: &str,
    payload: &str,
) -> Result<Bytes, SignError> {
    let response = wallet.request(PERSONAL_SIGN, json!([payload, account])).await?;
    let signature = response
        .as_str()
        .ok_or_else(|| SignError::UnexpectedResponse(response.to_string()))?;
    signature
        .parse()
        .map_err(|_| SignError::UnexpectedResponse(signature.to_string()))
}
