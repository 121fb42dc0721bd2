use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tradewire_sdk::{
    ChainRegistry,
    error::SwitchError,
    reconciler::{CONFIRM_INTERVAL, ChainReconciler, MAX_CONFIRM_ATTEMPTS},
    testing::MockWallet,
    wallet::{
        UNRECOGNIZED_CHAIN_CODE, WALLET_ADD_ETHEREUM_CHAIN, WALLET_SWITCH_ETHEREUM_CHAIN,
        WalletError,
    },
};

const BASE: u64 = 0x2105;

fn no_sleep(_: Duration) -> std::future::Ready<()> { std::future::ready(()) }

fn reconciler(wallet: &MockWallet) -> ChainReconciler<&MockWallet> {
    ChainReconciler::new(wallet, ChainRegistry::defaults())
}

#[tokio::test]
async fn unknown_chain_key_fails_without_wallet_calls() {
    let wallet = MockWallet::on_chain(1);
    let err = reconciler(&wallet)
        .switch_to("not-a-real-chain", CancellationToken::new(), no_sleep)
        .await
        .unwrap_err();

    assert!(matches!(err, SwitchError::UnknownChain(key) if key == "not-a-real-chain"));
    assert!(wallet.requests().is_empty());
    assert_eq!(wallet.chain_queries(), 0);
}

#[tokio::test]
async fn already_on_target_chain_is_a_no_op() {
    let wallet = MockWallet::on_chain(BASE);
    reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap();

    // One query for the short-circuit check, no switch or add requests
    assert!(wallet.requests().is_empty());
    assert_eq!(wallet.chain_queries(), 1);
}

#[tokio::test]
async fn switches_and_confirms_on_first_poll() {
    let wallet = MockWallet::on_chain(BASE).with_chain_ids([Ok(1)]);
    reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap();

    assert_eq!(wallet.request_count(WALLET_SWITCH_ETHEREUM_CHAIN), 1);
    assert_eq!(wallet.request_count(WALLET_ADD_ETHEREUM_CHAIN), 0);
    assert_eq!(wallet.requests()[0].1, json!([{ "chainId": "0x2105" }]));
    // Pre-check plus one confirmation poll
    assert_eq!(wallet.chain_queries(), 2);
}

#[tokio::test]
async fn adds_chain_when_wallet_does_not_recognize_it() {
    let wallet = MockWallet::on_chain(BASE)
        .with_chain_ids([Ok(1)])
        .with_response(
            WALLET_SWITCH_ETHEREUM_CHAIN,
            Err(WalletError::with_code(UNRECOGNIZED_CHAIN_CODE, "unrecognized chain")),
        );
    reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap();

    let methods: Vec<_> = wallet.requests().iter().map(|(m, _)| m.clone()).collect();
    assert_eq!(
        methods,
        [
            WALLET_SWITCH_ETHEREUM_CHAIN,
            WALLET_ADD_ETHEREUM_CHAIN,
            WALLET_SWITCH_ETHEREUM_CHAIN,
        ]
    );

    // The add request carries the full descriptor
    let add_params = &wallet.requests()[1].1;
    assert_eq!(add_params[0]["chainId"], "0x2105");
    assert_eq!(add_params[0]["chainName"], "Base");
    assert_eq!(add_params[0]["nativeCurrency"]["symbol"], "ETH");
    assert_eq!(add_params[0]["rpcUrls"][0], "https://mainnet.base.org");
    assert_eq!(add_params[0]["blockExplorerUrls"][0], "https://basescan.org/");
}

#[tokio::test]
async fn add_failure_is_surfaced() {
    let wallet = MockWallet::on_chain(1)
        .with_response(
            WALLET_SWITCH_ETHEREUM_CHAIN,
            Err(WalletError::with_code(UNRECOGNIZED_CHAIN_CODE, "unrecognized chain")),
        )
        .with_response(WALLET_ADD_ETHEREUM_CHAIN, Err(WalletError::new("user rejected")));
    let err = reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap_err();

    assert!(matches!(err, SwitchError::ChainAddition(_)));
    assert_eq!(wallet.request_count(WALLET_SWITCH_ETHEREUM_CHAIN), 1);
}

#[tokio::test]
async fn non_4902_switch_error_is_not_retried() {
    let wallet = MockWallet::on_chain(1).with_response(
        WALLET_SWITCH_ETHEREUM_CHAIN,
        Err(WalletError::with_code(4001, "user rejected")),
    );
    let err = reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap_err();

    assert!(matches!(err, SwitchError::ChainSwitch(ref e) if e.code == Some(4001)));
    assert_eq!(wallet.request_count(WALLET_SWITCH_ETHEREUM_CHAIN), 1);
    assert_eq!(wallet.request_count(WALLET_ADD_ETHEREUM_CHAIN), 0);
}

#[tokio::test]
async fn poll_errors_are_swallowed_until_confirmation() {
    let wallet = MockWallet::on_chain(BASE).with_chain_ids([
        Ok(1), // pre-check
        Err(WalletError::new("transient rpc failure")),
        Err(WalletError::new("transient rpc failure")),
        Ok(BASE),
    ]);
    reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap();

    assert_eq!(wallet.chain_queries(), 4);
}

#[tokio::test]
async fn exhausts_retry_budget_then_times_out() {
    let wallet = MockWallet::on_chain(1);
    let sleeps = AtomicU32::new(0);
    let sleep = |duration: Duration| {
        assert_eq!(duration, CONFIRM_INTERVAL);
        sleeps.fetch_add(1, Ordering::SeqCst);
        std::future::ready(())
    };

    let err = reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), sleep)
        .await
        .unwrap_err();

    match err {
        SwitchError::ConfirmationTimeout { chain_id, attempts } => {
            assert_eq!(chain_id, BASE);
            assert_eq!(attempts, MAX_CONFIRM_ATTEMPTS);
        },
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(sleeps.load(Ordering::SeqCst), MAX_CONFIRM_ATTEMPTS);
    // Pre-check plus the full polling budget
    assert_eq!(wallet.chain_queries(), 1 + MAX_CONFIRM_ATTEMPTS);
}

#[tokio::test(start_paused = true)]
async fn timeout_elapsed_time_is_bounded() {
    let wallet = MockWallet::on_chain(1);
    let start = tokio::time::Instant::now();
    let err = reconciler(&wallet)
        .switch_to("base", CancellationToken::new(), tokio::time::sleep)
        .await
        .unwrap_err();

    assert!(matches!(err, SwitchError::ConfirmationTimeout { .. }));
    assert_eq!(start.elapsed(), CONFIRM_INTERVAL * MAX_CONFIRM_ATTEMPTS);
}

#[tokio::test]
async fn cancellation_stops_polling() {
    let wallet = MockWallet::on_chain(1);
    let token = CancellationToken::new();
    token.cancel();

    let err = reconciler(&wallet)
        .switch_to("base", token, no_sleep)
        .await
        .unwrap_err();

    assert!(matches!(err, SwitchError::Cancelled));
    // The switch request went out, but no confirmation poll ran
    assert_eq!(wallet.request_count(WALLET_SWITCH_ETHEREUM_CHAIN), 1);
    assert_eq!(wallet.chain_queries(), 1);
}

#[tokio::test]
async fn concurrent_reconciliation_is_rejected() {
    let wallet = Arc::new(MockWallet::on_chain(1));
    let reconciler = Arc::new(ChainReconciler::new(wallet.clone(), ChainRegistry::defaults()));
    let token = CancellationToken::new();

    let background = {
        let reconciler = reconciler.clone();
        let token = token.clone();
        tokio::spawn(async move {
            reconciler
                .switch_to("base", token, |_| std::future::pending::<()>())
                .await
        })
    };
    // Let the background reconciliation reach its first (never-ending) sleep
    tokio::task::yield_now().await;

    let err = reconciler
        .switch_to("base", CancellationToken::new(), no_sleep)
        .await
        .unwrap_err();
    assert!(matches!(err, SwitchError::InProgress));

    background.abort();
}
