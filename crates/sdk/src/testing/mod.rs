//! Test doubles for the wallet seam.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Mutex,
        atomic::{AtomicU32, Ordering},
    },
};

use serde_json::Value;

use crate::{
    types::ChainId,
    wallet::{WalletError, WalletProvider},
};

/// Scripted in-memory wallet.
///
/// Chain-id queries pop from a script and fall back to a fixed id once the
/// script is exhausted. `request` responses are scripted per method and
/// default to `null`. Every request is recorded for assertions.
#[derive(Debug, Default)]
pub struct MockWallet {
    fallback_chain_id: ChainId,
    chain_ids: Mutex<VecDeque<Result<ChainId, WalletError>>>,
    chain_queries: AtomicU32,
    responses: Mutex<HashMap<String, VecDeque<Result<Value, WalletError>>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockWallet {
    /// Wallet that reports `chain_id` unless scripted otherwise.
    pub fn on_chain(chain_id: ChainId) -> Self {
        Self { fallback_chain_id: chain_id, ..Self::default() }
    }

    /// Queues chain-id query results, consumed before the fallback applies.
    pub fn with_chain_ids(
        self,
        results: impl IntoIterator<Item = Result<ChainId, WalletError>>,
    ) -> Self {
        self.chain_ids.lock().unwrap().extend(results);
        self
    }

    /// Queues a response for the next `request` with this method.
    pub fn with_response(self, method: &str, result: Result<Value, WalletError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// All requests issued so far, in order.
    pub fn requests(&self) -> Vec<(String, Value)> { self.requests.lock().unwrap().clone() }

    /// Number of requests issued with the given method.
    pub fn request_count(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    /// Number of chain-id queries answered so far.
    pub fn chain_queries(&self) -> u32 { self.chain_queries.load(Ordering::SeqCst) }
}

impl WalletProvider for MockWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        match self
            .responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
        {
            Some(result) => result,
            None => Ok(Value::Null),
        }
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        self.chain_queries.fetch_add(1, Ordering::SeqCst);
        match self.chain_ids.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(self.fallback_chain_id),
        }
    }
}
