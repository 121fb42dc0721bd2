//! Tradewire venue signing SDK.
//!
//! # Overview
//!
//! Deterministic construction of trade signing payloads plus wallet chain
//! reconciliation.
//!
//! Use [`encoder::encode`] and [`encoder::hash`] to turn a [`types::Order`]
//! into the digest the venue expects, or [`signer::sign_order`] to run the
//! full encode → hash → `personal_sign` pipeline against a connected
//! [`wallet::WalletProvider`].
//!
//! Use [`reconciler::ChainReconciler`] to move the wallet onto one of the
//! chains in a [`ChainRegistry`] and confirm the switch took effect.
//!
//! See `./tests` for examples.
//!
//! # Features
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `testing` | yes | Enables the [`testing`] module with [`testing::MockWallet`]. |

pub mod encoder;
pub mod error;
pub mod reconciler;
pub mod signer;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;
pub mod wallet;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::ChainId;

/// Native currency of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameters needed to register or switch the wallet to a chain.
///
/// Serializes to the exact `wallet_addEthereumChain` wire shape: camelCase
/// keys, chain id as a `0x`-prefixed hex string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    #[serde(with = "chain_id_hex")]
    chain_id: ChainId,
    chain_name: String,
    native_currency: NativeCurrency,
    rpc_urls: Vec<String>,
    block_explorer_urls: Vec<String>,
}

impl ChainDescriptor {
    pub fn new(
        chain_id: ChainId,
        chain_name: impl Into<String>,
        native_currency: NativeCurrency,
        rpc_urls: Vec<String>,
        block_explorer_urls: Vec<String>,
    ) -> Self {
        Self {
            chain_id,
            chain_name: chain_name.into(),
            native_currency,
            rpc_urls,
            block_explorer_urls,
        }
    }

    pub fn chain_id(&self) -> ChainId { self.chain_id }

    /// Chain id in the `0x`-prefixed hex form wallet RPC methods expect.
    pub fn chain_id_hex(&self) -> String { format!("{:#x}", self.chain_id) }

    pub fn chain_name(&self) -> &str { &self.chain_name }

    pub fn native_currency(&self) -> &NativeCurrency { &self.native_currency }

    pub fn rpc_urls(&self) -> &[String] { &self.rpc_urls }

    pub fn block_explorer_urls(&self) -> &[String] { &self.block_explorer_urls }
}

mod chain_id_hex {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::types::ChainId;

    pub fn serialize<S: Serializer>(chain_id: &ChainId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{chain_id:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ChainId, D::Error> {
        let text = String::deserialize(deserializer)?;
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(&text);
        ChainId::from_str_radix(digits, 16)
            .map_err(|err| de::Error::custom(format!("invalid chain id {text:?}: {err}")))
    }
}

/// Read-only mapping from short chain key (e.g. "arbitrum") to
/// [`ChainDescriptor`], loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct ChainRegistry {
    chains: HashMap<String, ChainDescriptor>,
}

impl ChainRegistry {
    /// Registry with the chains the venue supports out of the box.
    pub fn defaults() -> Self {
        let eth = NativeCurrency {
            name: "ETH".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        };
        let mut registry = Self::default();
        registry.insert(
            "xchain",
            ChainDescriptor::new(
                0x1713C,
                "xchain",
                eth.clone(),
                vec!["https://xchain-rpc.idex.io".to_string()],
                vec!["https://xchain-explorer.idex.io/".to_string()],
            ),
        );
        registry.insert(
            "arbitrum",
            ChainDescriptor::new(
                0xA4B1,
                "Arbitrum One",
                eth.clone(),
                vec!["https://arb1.arbitrum.io/rpc".to_string()],
                vec!["https://arbiscan.io/".to_string()],
            ),
        );
        registry.insert(
            "base",
            ChainDescriptor::new(
                0x2105,
                "Base",
                eth.clone(),
                vec!["https://mainnet.base.org".to_string()],
                vec!["https://basescan.org/".to_string()],
            ),
        );
        registry.insert(
            "optimism",
            ChainDescriptor::new(
                0xA,
                "Optimism",
                eth,
                vec!["https://mainnet.optimism.io".to_string()],
                vec!["https://optimistic.etherscan.io/".to_string()],
            ),
        );
        registry
    }

    /// Parses a registry from its JSON text form
    /// (`{"<key>": <descriptor>, ...}`).
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Ok(Self { chains: serde_json::from_str(text)? })
    }

    pub fn insert(&mut self, key: impl Into<String>, chain: ChainDescriptor) {
        self.chains.insert(key.into(), chain);
    }

    pub fn get(&self, key: &str) -> Option<&ChainDescriptor> { self.chains.get(key) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChainDescriptor)> {
        self.chains.iter().map(|(key, chain)| (key.as_str(), chain))
    }

    pub fn len(&self) -> usize { self.chains.len() }

    pub fn is_empty(&self) -> bool { self.chains.is_empty() }
}
