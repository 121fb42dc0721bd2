use std::path::Path;

use alloy::{
    primitives::hex,
    signers::{Signer, local::PrivateKeySigner},
};
use anyhow::Context;
use colored::Colorize;
use tradewire_sdk::encoder;

use crate::encode::load_order;

const PRIVATE_KEY_ENV: &str = "TRADEWIRE_PRIVATE_KEY";

pub(crate) async fn order(order_path: &Path, private_key: Option<String>) -> anyhow::Result<()> {
    let order = load_order(order_path)?;
    let signer = local_signer(private_key)?;

    let digest = encoder::hash(&encoder::encode(&order)?)?;
    let signature = signer
        .sign_message(digest.as_slice())
        .await
        .context("signing order digest")?;
    log::info!("signed {} order for {}", order.market, order.wallet);

    println!("{} {}", "Digest:".bold(), digest);
    println!("{} {}", "Signer:".bold(), signer.address());
    println!(
        "{} {}",
        "Signature:".bold(),
        hex::encode_prefixed(signature.as_bytes()).green()
    );
    Ok(())
}

pub(crate) async fn message(text: &str, private_key: Option<String>) -> anyhow::Result<()> {
    let signer = local_signer(private_key)?;
    let signature = signer
        .sign_message(text.as_bytes())
        .await
        .context("signing message")?;

    println!("{} {}", "Signer:".bold(), signer.address());
    println!(
        "{} {}",
        "Signature:".bold(),
        hex::encode_prefixed(signature.as_bytes()).green()
    );
    Ok(())
}

fn local_signer(private_key: Option<String>) -> anyhow::Result<PrivateKeySigner> {
    let key = match private_key {
        Some(key) => key,
        None => std::env::var(PRIVATE_KEY_ENV)
            .with_context(|| format!("no --private-key given and {PRIVATE_KEY_ENV} is not set"))?,
    };
    key.parse().context("parsing private key")
}
