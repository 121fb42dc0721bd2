//! Chain reconciliation: drive the wallet onto a desired chain and confirm
//! the switch took effect.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::{
    ChainDescriptor, ChainRegistry,
    error::SwitchError,
    types::ChainId,
    wallet::{WALLET_ADD_ETHEREUM_CHAIN, WALLET_SWITCH_ETHEREUM_CHAIN, WalletProvider},
};

/// Number of confirmation polls before the switch is declared timed out.
pub const MAX_CONFIRM_ATTEMPTS: u32 = 10;

/// Fixed delay between confirmation polls.
pub const CONFIRM_INTERVAL: Duration = Duration::from_secs(1);

/// Reconciles the wallet's active chain with a desired [`ChainDescriptor`].
///
/// One reconciliation may run at a time per instance; a concurrent
/// [`ChainReconciler::switch_to`] call gets [`SwitchError::InProgress`]
/// instead of racing the polling loop.
pub struct ChainReconciler<W> {
    wallet: W,
    registry: ChainRegistry,
    busy: AtomicBool,
}

impl<W: WalletProvider> ChainReconciler<W> {
    pub fn new(wallet: W, registry: ChainRegistry) -> Self {
        Self { wallet, registry, busy: AtomicBool::new(false) }
    }

    pub fn wallet(&self) -> &W { &self.wallet }

    pub fn registry(&self) -> &ChainRegistry { &self.registry }

    /// Ensures the wallet's active chain matches `chain_key`.
    ///
    /// Returns immediately if the wallet already reports the target chain,
    /// without issuing any request. Otherwise requests the switch (adding the
    /// chain first if the wallet signals it is unrecognized), then polls the
    /// reported chain id every [`CONFIRM_INTERVAL`] up to
    /// [`MAX_CONFIRM_ATTEMPTS`] times. Transient poll failures consume an
    /// attempt but never abort the loop.
    ///
    /// On success the wallet's reported chain equals the target at the moment
    /// of return; refreshing any chain-bound caches is up to the caller.
    ///
    /// `sleep` is the timer to wait with (`tokio::time::sleep` in
    /// production). `cancellation_token` is checked at the top of every
    /// polling iteration; pass a fresh token for the non-cancellable
    /// behavior.
    pub async fn switch_to<S, SFut>(
        &self,
        chain_key: &str,
        cancellation_token: CancellationToken,
        sleep: S,
    ) -> Result<(), SwitchError>
    where
        S: Fn(Duration) -> SFut + Copy,
        SFut: Future<Output = ()>,
    {
        let chain = self
            .registry
            .get(chain_key)
            .ok_or_else(|| SwitchError::UnknownChain(chain_key.to_string()))?
            .clone();

        let _guard = BusyGuard::acquire(&self.busy).ok_or(SwitchError::InProgress)?;

        // Already on the target chain: nothing to do. A failed query here is
        // not fatal; confirmation polling below provides the real guarantee.
        match self.wallet.chain_id().await {
            Ok(current) if current == chain.chain_id() => {
                log::debug!("wallet already on chain {} ({chain_key})", chain.chain_id());
                return Ok(());
            },
            Ok(current) => {
                log::debug!(
                    "switching wallet from chain {current} to {} ({chain_key})",
                    chain.chain_id()
                );
            },
            Err(err) => log::debug!("pre-switch chain query failed: {err}"),
        }

        self.request_switch(&chain).await?;
        self.confirm(chain.chain_id(), cancellation_token, sleep).await
    }

    /// Issues the switch request, adding the chain first when the wallet
    /// reports it as unrecognized (EIP-1193 code 4902).
    async fn request_switch(&self, chain: &ChainDescriptor) -> Result<(), SwitchError> {
        let params = json!([{ "chainId": chain.chain_id_hex() }]);
        match self
            .wallet
            .request(WALLET_SWITCH_ETHEREUM_CHAIN, params.clone())
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.is_unrecognized_chain() => {
                log::info!("chain {} unknown to wallet, adding it first", chain.chain_id());
                self.wallet
                    .request(WALLET_ADD_ETHEREUM_CHAIN, json!([chain]))
                    .await
                    .map_err(SwitchError::ChainAddition)?;
                self.wallet
                    .request(WALLET_SWITCH_ETHEREUM_CHAIN, params)
                    .await
                    .map_err(SwitchError::ChainSwitch)?;
                Ok(())
            },
            Err(err) => Err(SwitchError::ChainSwitch(err)),
        }
    }

    /// Polls the wallet until it reports `target`, up to the retry budget.
    async fn confirm<S, SFut>(
        &self,
        target: ChainId,
        cancellation_token: CancellationToken,
        sleep: S,
    ) -> Result<(), SwitchError>
    where
        S: Fn(Duration) -> SFut + Copy,
        SFut: Future<Output = ()>,
    {
        for attempt in 1..=MAX_CONFIRM_ATTEMPTS {
            if cancellation_token.is_cancelled() {
                return Err(SwitchError::Cancelled);
            }
            sleep(CONFIRM_INTERVAL).await;
            match self.wallet.chain_id().await {
                Ok(current) if current == target => {
                    log::debug!("wallet confirmed chain {target} on attempt {attempt}");
                    return Ok(());
                },
                Ok(current) => {
                    log::trace!("attempt {attempt}: wallet still on chain {current}");
                },
                // Transient query failures consume an attempt, they never
                // abort the loop.
                Err(err) => log::debug!("attempt {attempt}: chain query failed: {err}"),
            }
        }
        Err(SwitchError::ConfirmationTimeout { chain_id: target, attempts: MAX_CONFIRM_ATTEMPTS })
    }
}

/// Single-flight flag released on drop.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) { self.0.store(false, Ordering::Release); }
}
